//! Vote counting shared by the consensus steps.

use std::collections::BTreeMap;

/// Candidate with the most votes.
///
/// Candidates are scanned in ascending key order and only a strictly higher
/// count replaces the leader, so ties resolve to the smallest key.
pub(crate) fn most_voted<K: Ord + Clone>(counts: &BTreeMap<K, usize>) -> Option<(K, usize)> {
    let mut best: Option<(&K, usize)> = None;
    for (candidate, &votes) in counts {
        match best {
            Some((_, leader)) if votes <= leader => {}
            _ => best = Some((candidate, votes)),
        }
    }
    best.map(|(k, v)| (k.clone(), v))
}
