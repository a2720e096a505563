//! Global ordering of lots against the canonical list.
//!
//! This is the core of determinism. Given the canonical ordering and an
//! unordered lot collection, this module produces one total order.
//!
//! # Algorithm
//!
//! 1. Index the canonical list by normalized team name
//! 2. Group lots by normalized team name
//! 3. Rank each group against its canonical slots (see [`crate::rank`])
//! 4. Sort everything by (rank, lot number, team key, id), then by the
//!    remaining display fields
//!
//! Input order never leaks into the result: groups are keyed by name, and
//! both the within-team sort and the global sort fall back to
//! [`Lot::display_cmp`] when ids collide.

use crate::{
    error::{Error, Result},
    group::group,
    rank::{assign, LotNumber, Rank, RankedLot},
    CanonicalIndex, Lot, LotId, NormalizationPolicy,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Options for an ordering run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderOptions {
    /// How team names are matched against the canonical list
    #[serde(default)]
    pub normalization: NormalizationPolicy,
}

impl OrderOptions {
    pub fn with_normalization(mut self, normalization: NormalizationPolicy) -> Self {
        self.normalization = normalization;
        self
    }
}

/// Where a lot ended up and why.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement<'a, P> {
    pub lot: &'a Lot<P>,
    /// Normalized team name the lot was grouped under
    pub team_key: String,
    pub rank: Rank,
    pub lot_number: LotNumber,
}

impl<'a, P> From<RankedLot<'a, '_, P>> for Placement<'a, P> {
    fn from(ranked: RankedLot<'a, '_, P>) -> Self {
        Self {
            lot: ranked.lot,
            team_key: ranked.team_key.to_string(),
            rank: ranked.rank,
            lot_number: ranked.lot_number,
        }
    }
}

/// Counts of how lots were placed in one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementSummary {
    /// Lots matched to their own canonical slot
    pub matched: usize,
    /// Lots stacked after their team's last slot
    pub overflow: usize,
    /// Lots of teams missing from the canonical list
    pub unranked: usize,
    /// Lots whose number could not be parsed
    pub unparsed_numbers: usize,
    /// Teams that had no canonical slot, one entry per team key in the
    /// first spelling seen, sorted
    pub unranked_teams: Vec<String>,
}

impl PlacementSummary {
    pub fn from_placements<P>(placements: &[Placement<'_, P>]) -> Self {
        let mut summary = Self::default();
        let mut unranked_keys = HashSet::new();
        for placement in placements {
            match placement.rank {
                Rank::Unranked => {
                    summary.unranked += 1;
                    if unranked_keys.insert(placement.team_key.as_str()) {
                        summary.unranked_teams.push(placement.lot.team_name.clone());
                    }
                }
                rank if rank.is_overflow() => summary.overflow += 1,
                Rank::Slot { .. } => summary.matched += 1,
            }
            if placement.lot_number == LotNumber::Unparsed {
                summary.unparsed_numbers += 1;
            }
        }
        summary.unranked_teams.sort();
        summary
    }

    pub fn total(&self) -> usize {
        self.matched + self.overflow + self.unranked
    }
}

/// Orders lot collections against a canonical list.
///
/// An `Orderer` holds only options; it can be shared freely and reused for
/// any number of independent runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Orderer {
    options: OrderOptions,
}

impl Orderer {
    pub fn new(options: OrderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &OrderOptions {
        &self.options
    }

    /// Order `lots` against `canonical`.
    pub fn order<'a, S, P>(&self, canonical: &[S], lots: &'a [Lot<P>]) -> Result<Vec<&'a Lot<P>>>
    where
        S: AsRef<str>,
    {
        Ok(self
            .placements(canonical, lots)?
            .into_iter()
            .map(|placement| placement.lot)
            .collect())
    }

    /// Order `lots` against a prebuilt (possibly cached) index.
    ///
    /// The index's own normalization policy is used, so it must have been
    /// built with the policy the caller wants.
    pub fn order_with_index<'a, P>(
        &self,
        index: &CanonicalIndex,
        lots: &'a [Lot<P>],
    ) -> Result<Vec<&'a Lot<P>>> {
        Ok(self
            .placements_with_index(index, lots)?
            .into_iter()
            .map(|placement| placement.lot)
            .collect())
    }

    /// Order and report each lot's rank and parsed lot number.
    pub fn placements<'a, S, P>(
        &self,
        canonical: &[S],
        lots: &'a [Lot<P>],
    ) -> Result<Vec<Placement<'a, P>>>
    where
        S: AsRef<str>,
    {
        let index = CanonicalIndex::build(canonical, self.options.normalization)?;
        self.placements_with_index(&index, lots)
    }

    /// [`placements`](Self::placements) against a prebuilt index.
    pub fn placements_with_index<'a, P>(
        &self,
        index: &CanonicalIndex,
        lots: &'a [Lot<P>],
    ) -> Result<Vec<Placement<'a, P>>> {
        if index.is_empty() {
            return Err(Error::EmptyCanonical);
        }

        let groups = group(lots, index.policy());

        let mut ranked: Vec<RankedLot<'a, '_, P>> = Vec::with_capacity(lots.len());
        for (key, members) in &groups {
            ranked.extend(assign(key, members, index.positions_for_key(key)));
        }

        sort_ranked(&mut ranked);

        Ok(ranked.into_iter().map(Placement::from).collect())
    }
}

/// Sort by (rank, lot number, team key, id, display fields). Stable.
fn sort_ranked<P>(ranked: &mut [RankedLot<'_, '_, P>]) {
    ranked.sort_by(|a, b| {
        a.rank
            .cmp(&b.rank)
            .then_with(|| a.lot_number.cmp(&b.lot_number))
            .then_with(|| a.team_key.cmp(b.team_key))
            .then_with(|| a.lot.id.cmp(&b.lot.id))
            .then_with(|| a.lot.display_cmp(b.lot))
    });
}

/// Order `lots` against `canonical` with default options.
pub fn order<'a, S, P>(canonical: &[S], lots: &'a [Lot<P>]) -> Result<Vec<&'a Lot<P>>>
where
    S: AsRef<str>,
{
    Orderer::default().order(canonical, lots)
}

/// Ids of an ordered sequence, in order.
pub fn ordered_ids<P>(ordered: &[&Lot<P>]) -> Vec<LotId> {
    ordered.iter().map(|lot| lot.id.clone()).collect()
}
