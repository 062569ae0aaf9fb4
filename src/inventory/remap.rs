use super::owned::Fingerprint;
use super::owned::OwnedRelic;
use crate::Handle;
use std::collections::HashMap;
use std::collections::VecDeque;

/// rebuild pinned handles after a re-upload.
///
/// the game may reassign the numeric handle of a relic between saves, so
/// persisted pins go stale. fingerprints are paired in encounter order
/// between the old and new inventories; pins whose fingerprint no longer
/// appears are dropped.
pub fn remap_pinned_handles(
    pinned: &[Handle],
    old: &[OwnedRelic],
    new: &[OwnedRelic],
) -> Vec<Handle> {
    let mut available: HashMap<Fingerprint, VecDeque<Handle>> = HashMap::new();
    for relic in new {
        available
            .entry(relic.fingerprint())
            .or_default()
            .push_back(relic.handle);
    }
    let mut mapping: HashMap<Handle, Handle> = HashMap::new();
    for relic in old {
        if let Some(queue) = available.get_mut(&relic.fingerprint()) {
            if let Some(handle) = queue.pop_front() {
                mapping.insert(relic.handle, handle);
            }
        }
    }
    pinned
        .iter()
        .filter_map(|handle| mapping.get(handle).copied())
        .collect()
}
