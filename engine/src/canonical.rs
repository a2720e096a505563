//! Canonical ordering lookup.
//!
//! The canonical ordering is the reference list of team/department names
//! supplied by the portal. A name may occur several times (once per shift,
//! for example) and every occurrence is a separate slot. [`CanonicalIndex`]
//! maps a normalized name to the ascending list of slots it occupies.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// How team names are normalized before they are compared.
///
/// The same policy is applied to canonical entries and to lot team names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NormalizationPolicy {
    /// Lower-case only. `"Physics "` does not match `"physics"`.
    #[default]
    CaseFold,
    /// Lower-case, trim both ends and collapse inner whitespace runs.
    CaseFoldTrim,
}

impl NormalizationPolicy {
    /// Normalize a team name under this policy.
    pub fn normalize(&self, name: &str) -> String {
        match self {
            NormalizationPolicy::CaseFold => name.to_lowercase(),
            NormalizationPolicy::CaseFoldTrim => name
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase(),
        }
    }

    fn tag(&self) -> u8 {
        match self {
            NormalizationPolicy::CaseFold => 0,
            NormalizationPolicy::CaseFoldTrim => 1,
        }
    }
}

impl fmt::Display for NormalizationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizationPolicy::CaseFold => f.write_str("case-fold"),
            NormalizationPolicy::CaseFoldTrim => f.write_str("case-fold-trim"),
        }
    }
}

impl FromStr for NormalizationPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "case-fold" | "caseFold" => Ok(NormalizationPolicy::CaseFold),
            "case-fold-trim" | "caseFoldTrim" => Ok(NormalizationPolicy::CaseFoldTrim),
            other => Err(Error::InvalidOptions(format!(
                "unknown normalization policy: {other}"
            ))),
        }
    }
}

/// Lookup from normalized team name to canonical slot positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalIndex {
    policy: NormalizationPolicy,
    /// Normalized entries, in canonical order
    entries: Vec<String>,
    positions: HashMap<String, Vec<usize>>,
    fingerprint: u64,
}

impl CanonicalIndex {
    /// Build the index. Fails if the canonical list is empty.
    pub fn build<S: AsRef<str>>(canonical: &[S], policy: NormalizationPolicy) -> Result<Self> {
        if canonical.is_empty() {
            return Err(Error::EmptyCanonical);
        }

        let entries: Vec<String> = canonical
            .iter()
            .map(|name| policy.normalize(name.as_ref()))
            .collect();

        let mut positions: HashMap<String, Vec<usize>> = HashMap::with_capacity(entries.len());
        for (slot, key) in entries.iter().enumerate() {
            // Slots are pushed in order, so every list is ascending.
            positions.entry(key.clone()).or_default().push(slot);
        }

        Ok(Self {
            policy,
            fingerprint: fingerprint(policy, &entries),
            entries,
            positions,
        })
    }

    /// Slots occupied by `name`, ascending. Empty if the name is absent.
    pub fn positions_for(&self, name: &str) -> &[usize] {
        self.positions_for_key(&self.policy.normalize(name))
    }

    /// Like [`positions_for`](Self::positions_for) for an already-normalized key.
    pub fn positions_for_key(&self, key: &str) -> &[usize] {
        self.positions.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of canonical slots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; an index is never built from an empty list.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct names.
    pub fn distinct_names(&self) -> usize {
        self.positions.len()
    }

    pub fn policy(&self) -> NormalizationPolicy {
        self.policy
    }

    /// Stable hash of the policy and the normalized entries.
    ///
    /// Two indexes with the same fingerprint were built from lists that are
    /// equal under the policy. Unlike `std`'s default hasher the value does
    /// not change between processes.
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    fn matches<S: AsRef<str>>(&self, canonical: &[S], policy: NormalizationPolicy) -> bool {
        self.policy == policy
            && self.entries.len() == canonical.len()
            && self
                .entries
                .iter()
                .zip(canonical)
                .all(|(entry, name)| *entry == policy.normalize(name.as_ref()))
    }
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn fingerprint(policy: NormalizationPolicy, entries: &[String]) -> u64 {
    let mut hash = FNV_OFFSET;
    let mut feed = |byte: u8| {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    };

    feed(policy.tag());
    for entry in entries {
        entry.bytes().for_each(&mut feed);
        // 0xff never appears in UTF-8, so it separates entries unambiguously.
        feed(0xff);
    }
    hash
}

/// Caller-owned memoization of canonical indexes.
///
/// Nothing in the engine keeps indexes between calls; a caller that exports
/// many rosters against the same canonical list can hold one of these and
/// pass the cached index to [`Orderer::order_with_index`](crate::Orderer::order_with_index).
#[derive(Debug, Default)]
pub struct IndexCache {
    indexes: HashMap<u64, Arc<CanonicalIndex>>,
}

impl IndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached index for this list, building it on a miss.
    pub fn get_or_build<S: AsRef<str>>(
        &mut self,
        canonical: &[S],
        policy: NormalizationPolicy,
    ) -> Result<Arc<CanonicalIndex>> {
        let index = CanonicalIndex::build(canonical, policy)?;
        let key = index.fingerprint();

        if let Some(cached) = self.indexes.get(&key) {
            if cached.matches(canonical, policy) {
                return Ok(Arc::clone(cached));
            }
        }

        let index = Arc::new(index);
        self.indexes.insert(key, Arc::clone(&index));
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    pub fn clear(&mut self) {
        self.indexes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_ascending_and_duplicated() {
        let index = CanonicalIndex::build(
            &["Physics", "Chemistry", "physics", "Botany", "PHYSICS"],
            NormalizationPolicy::CaseFold,
        )
        .unwrap();

        assert_eq!(index.positions_for("Physics"), &[0, 2, 4]);
        assert_eq!(index.positions_for("chemistry"), &[1]);
        assert_eq!(index.positions_for("Zoology"), &[] as &[usize]);
        assert_eq!(index.len(), 5);
        assert_eq!(index.distinct_names(), 3);
    }

    #[test]
    fn empty_canonical_is_rejected() {
        let canonical: Vec<String> = Vec::new();
        let result = CanonicalIndex::build(&canonical, NormalizationPolicy::CaseFold);
        assert_eq!(result, Err(Error::EmptyCanonical));
    }

    #[test]
    fn case_fold_keeps_whitespace() {
        let index =
            CanonicalIndex::build(&["Physics"], NormalizationPolicy::CaseFold).unwrap();

        assert_eq!(index.positions_for("PHYSICS"), &[0]);
        assert!(index.positions_for("Physics ").is_empty());
        assert!(index.positions_for(" physics").is_empty());
    }

    #[test]
    fn case_fold_trim_collapses_whitespace() {
        let index = CanonicalIndex::build(
            &["Computer  Science", "Physics"],
            NormalizationPolicy::CaseFoldTrim,
        )
        .unwrap();

        assert_eq!(index.positions_for(" computer science "), &[0]);
        assert_eq!(index.positions_for("Physics\t"), &[1]);
        // Punctuation is never normalized.
        assert!(index.positions_for("Physics.").is_empty());
    }

    #[test]
    fn policy_parsing() {
        assert_eq!(
            "case-fold".parse::<NormalizationPolicy>().unwrap(),
            NormalizationPolicy::CaseFold
        );
        assert_eq!(
            "caseFoldTrim".parse::<NormalizationPolicy>().unwrap(),
            NormalizationPolicy::CaseFoldTrim
        );
        assert!(matches!(
            "strip".parse::<NormalizationPolicy>(),
            Err(Error::InvalidOptions(_))
        ));
        assert_eq!(NormalizationPolicy::CaseFoldTrim.to_string(), "case-fold-trim");
    }

    #[test]
    fn fingerprint_is_stable_under_policy() {
        let a = CanonicalIndex::build(&["Physics", "Botany"], NormalizationPolicy::CaseFold)
            .unwrap();
        let b = CanonicalIndex::build(&["PHYSICS", "botany"], NormalizationPolicy::CaseFold)
            .unwrap();
        let c = CanonicalIndex::build(&["Botany", "Physics"], NormalizationPolicy::CaseFold)
            .unwrap();
        let d = CanonicalIndex::build(&["Physics", "Botany"], NormalizationPolicy::CaseFoldTrim)
            .unwrap();

        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
        assert_ne!(a.fingerprint(), d.fingerprint());
    }

    #[test]
    fn fingerprint_separates_entries() {
        let a = CanonicalIndex::build(&["ab", "c"], NormalizationPolicy::CaseFold).unwrap();
        let b = CanonicalIndex::build(&["a", "bc"], NormalizationPolicy::CaseFold).unwrap();
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn cache_reuses_index() {
        let mut cache = IndexCache::new();
        let first = cache
            .get_or_build(&["Physics", "Botany"], NormalizationPolicy::CaseFold)
            .unwrap();
        let second = cache
            .get_or_build(&["physics", "BOTANY"], NormalizationPolicy::CaseFold)
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);

        cache
            .get_or_build(&["Botany"], NormalizationPolicy::CaseFold)
            .unwrap();
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn cache_propagates_empty_canonical() {
        let mut cache = IndexCache::new();
        let empty: [&str; 0] = [];
        assert_eq!(
            cache.get_or_build(&empty, NormalizationPolicy::CaseFold),
            Err(Error::EmptyCanonical)
        );
        assert!(cache.is_empty());
    }
}
