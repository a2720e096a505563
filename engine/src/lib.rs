//! # Lot Ordering Engine
//!
//! A deterministic ordering engine for festival event rosters.
//!
//! Teams draw lots for each event. Before the roster is printed, the lots
//! have to be arranged to follow a canonical list of teams/departments that
//! the organizers maintain. This crate computes that arrangement and the
//! display rows for it, with guaranteed determinism - the same inputs always
//! produce the same order.
//!
//! ## Design Principles
//!
//! - **No IO**: Engine has no knowledge of files, network, or platform
//! - **Deterministic**: Same inputs always produce same outputs, whatever
//!   order the lots arrive in
//! - **Nothing dropped**: Every lot appears in the output exactly once
//! - **Testable**: Pure logic, no mocks needed
//!
//! ## Core Concepts
//!
//! ### Canonical ordering
//!
//! A list of team names. A name may appear more than once (once per shift,
//! say); each occurrence is its own slot. See [`CanonicalIndex`].
//!
//! ### Lots
//!
//! A [`Lot`] is one team's draw for one event: an id, a team name, a lot
//! number (which may be missing or malformed) and an opaque payload.
//!
//! ### Ranks
//!
//! Each team's lots are sorted by lot number and matched, in turn, to the
//! team's canonical slots. Surplus lots overflow onto the team's last slot;
//! teams missing from the list are [`Rank::Unranked`] and go last.
//!
//! ### Rosters
//!
//! A [`RosterTable`] projects the ordered lots into display rows once, so
//! every artifact rendered from it agrees row for row.
//!
//! ## Quick Start
//!
//! ```rust
//! use lotorder_engine::{order, ordered_ids, Lot, RosterTable, StandardColumns};
//!
//! let canonical = ["Physics", "Chemistry", "Physics"];
//! let lots: Vec<Lot> = vec![
//!     Lot::new("phy-a", "Physics", Some("5")),
//!     Lot::new("chem", "Chemistry", Some("1")),
//!     Lot::new("phy-b", "physics", Some("2")),
//! ];
//!
//! let ordered = order(&canonical, &lots).unwrap();
//! assert_eq!(ordered_ids(&ordered), vec!["phy-b", "chem", "phy-a"]);
//!
//! let table = RosterTable::project(&ordered, &StandardColumns::new());
//! assert_eq!(table.len(), 3);
//! ```
//!
//! ## FFI
//!
//! The [`ffi`] module provides C-compatible functions for embedding the
//! engine in the portal backend. All data is exchanged as JSON strings.

pub mod canonical;
pub mod error;
pub mod ffi;
pub mod group;
pub mod lot;
pub mod order;
pub mod rank;
pub mod request;
pub mod roster;

// Re-export main types at crate root
pub use canonical::{CanonicalIndex, IndexCache, NormalizationPolicy};
pub use error::Error;
pub use group::{group, TeamGroups};
pub use lot::Lot;
pub use order::{order, ordered_ids, OrderOptions, Orderer, Placement, PlacementSummary};
pub use rank::{assign, LotNumber, Rank, RankedLot};
pub use request::{ExportRequest, DEFAULT_TITLE, REQUEST_FORMAT_VERSION};
pub use roster::{Column, Projection, RosterRow, RosterTable, StandardColumns};

/// Type aliases for clarity
pub type LotId = String;
pub type TeamName = String;
pub type TeamId = String;
pub type EventName = String;
