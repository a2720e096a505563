//! Partitioning lots by team.

use crate::{Lot, NormalizationPolicy};
use std::collections::BTreeMap;

/// Lots of one team, keyed by the normalized team name.
///
/// A `BTreeMap` keeps iteration order independent of hashing, and each
/// group keeps the order in which its lots were seen.
pub type TeamGroups<'a, P> = BTreeMap<String, Vec<&'a Lot<P>>>;

/// Group lots by normalized team name.
///
/// Lots with a blank team name are kept under the empty key rather than
/// dropped.
pub fn group<P>(lots: &[Lot<P>], policy: NormalizationPolicy) -> TeamGroups<'_, P> {
    let mut groups: TeamGroups<'_, P> = BTreeMap::new();
    for lot in lots {
        groups
            .entry(policy.normalize(&lot.team_name))
            .or_default()
            .push(lot);
    }
    groups
}
