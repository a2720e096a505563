//! Rank assignment within a team group.
//!
//! # Algorithm
//!
//! For a team whose name occupies canonical slots `P`:
//!
//! 1. Parse every lot number; anything unparsable becomes [`LotNumber::Unparsed`]
//! 2. Sort the team's lots by (lot number, id)
//! 3. The i-th lot takes slot `P[i]`; lots past the end of `P` overflow onto
//!    the last slot with an increasing overflow counter
//! 4. A team with no slots at all is [`Rank::Unranked`]

use crate::Lot;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A lot number after parsing.
///
/// `Unparsed` sorts after every finite value, so lots with a missing or
/// malformed number go to the back of their team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LotNumber {
    Finite(i64),
    Unparsed,
}

impl LotNumber {
    /// Parse a raw lot number.
    ///
    /// Surrounding whitespace is ignored. An optional sign and ASCII digits
    /// are accepted; everything else (`"N/A"`, `"12abc"`, `""`, values that
    /// overflow `i64`) is `Unparsed`.
    pub fn parse(raw: Option<&str>) -> Self {
        raw.map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse::<i64>().ok())
            .map_or(LotNumber::Unparsed, LotNumber::Finite)
    }

    pub fn as_finite(&self) -> Option<i64> {
        match self {
            LotNumber::Finite(n) => Some(*n),
            LotNumber::Unparsed => None,
        }
    }
}

impl fmt::Display for LotNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LotNumber::Finite(n) => write!(f, "{n}"),
            LotNumber::Unparsed => f.write_str("-"),
        }
    }
}

/// Position of a lot relative to the canonical ordering.
///
/// Compared lexicographically: slot first, then overflow counter. Every
/// `Slot` sorts before `Unranked`. Overflow lots of slot `s` therefore land
/// after the lot matched to `s` and before anything matched to `s + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Rank {
    Slot { slot: usize, overflow: usize },
    Unranked,
}

impl Rank {
    /// Rank of a lot matched exactly to a canonical slot.
    pub fn exact(slot: usize) -> Self {
        Rank::Slot { slot, overflow: 0 }
    }

    pub fn is_overflow(&self) -> bool {
        matches!(self, Rank::Slot { overflow, .. } if *overflow > 0)
    }

    pub fn is_ranked(&self) -> bool {
        !matches!(self, Rank::Unranked)
    }

    pub fn slot(&self) -> Option<usize> {
        match self {
            Rank::Slot { slot, .. } => Some(*slot),
            Rank::Unranked => None,
        }
    }
}

/// A lot paired with its derived sort keys.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedLot<'a, 'k, P> {
    pub lot: &'a Lot<P>,
    /// Normalized team name the lot was grouped under
    pub team_key: &'k str,
    pub rank: Rank,
    pub lot_number: LotNumber,
}

/// Rank every lot of one team against its canonical slots.
///
/// `positions` must be ascending, as returned by
/// [`CanonicalIndex::positions_for`](crate::CanonicalIndex::positions_for).
pub fn assign<'a, 'k, P>(
    team_key: &'k str,
    lots: &[&'a Lot<P>],
    positions: &[usize],
) -> Vec<RankedLot<'a, 'k, P>> {
    let mut parsed: Vec<(LotNumber, &'a Lot<P>)> = lots
        .iter()
        .map(|lot| (LotNumber::parse(lot.lot_number.as_deref()), *lot))
        .collect();

    parsed.sort_by(|(na, la), (nb, lb)| {
        na.cmp(nb)
            .then_with(|| la.id.cmp(&lb.id))
            .then_with(|| la.display_cmp(lb))
    });

    parsed
        .into_iter()
        .enumerate()
        .map(|(i, (lot_number, lot))| RankedLot {
            lot,
            team_key,
            rank: rank_at(i, positions),
            lot_number,
        })
        .collect()
}

fn rank_at(i: usize, positions: &[usize]) -> Rank {
    match positions.get(i) {
        Some(&slot) => Rank::exact(slot),
        None => match positions.last() {
            Some(&last) => Rank::Slot {
                slot: last,
                overflow: i - positions.len() + 1,
            },
            None => Rank::Unranked,
        },
    }
}
