//! Reconciliation of the local saved-foods list with the remote list.
//!
//! This is the core of the sync design. Given the local list L and the
//! remote list R (fetched for the authenticated principal), produce one
//! consistent merged list.
//!
//! # Algorithm
//!
//! "Remote wins per id, local-only survives and is pushed":
//!
//! 1. Index L by id.
//! 2. Every record in R is accepted verbatim; its id is struck from the
//!    local index. Remote is authoritative for any id it returns, even when
//!    the local copy differs.
//! 3. Records left in the local index are local-only (created offline or
//!    pushed but not confirmed): they join the merged list and are reported
//!    in [`MergeOutcome::to_push`] for a best-effort upload.
//! 4. The merged list is sorted newest first (descending id) and truncated
//!    to the local cap.
//!
//! The rule avoids a three-way diff at a documented cost: an offline edit to
//! a record whose id already exists remotely is overwritten on the next
//! successful pass, because edits are never pushed. That limitation is part
//! of the observed contract, not something this module tries to repair.
//!
//! The function is pure: same (L, R, cap) always produces the same outcome.

use crate::list::cap_newest;
use crate::record::FoodRecord;
use crate::FoodId;
use std::collections::{BTreeMap, BTreeSet};

/// Result of one merge pass.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    /// The merged list, newest first, at most `cap` records.
    pub records: Vec<FoodRecord>,
    /// Local-only records the caller should push to the remote store.
    ///
    /// Includes records the cap truncated out of `records`: the push keeps
    /// them alive on the remote side even when they fall off the local list.
    pub to_push: Vec<FoodRecord>,
}

impl MergeOutcome {
    /// Whether this pass found nothing to upload.
    pub fn is_settled(&self) -> bool {
        self.to_push.is_empty()
    }
}

/// Merge the local list with the remote list under the given local cap.
pub fn merge(local: &[FoodRecord], remote: &[FoodRecord], cap: usize) -> MergeOutcome {
    // Newest-first lists put the authoritative copy first, so keep the first
    // occurrence if an id somehow appears twice.
    let mut local_by_id: BTreeMap<FoodId, &FoodRecord> = BTreeMap::new();
    for record in local {
        local_by_id.entry(record.id).or_insert(record);
    }

    let mut merged: Vec<FoodRecord> = Vec::with_capacity(remote.len() + local.len());
    let mut seen_remote: BTreeSet<FoodId> = BTreeSet::new();

    for record in remote {
        if !seen_remote.insert(record.id) {
            continue;
        }
        local_by_id.remove(&record.id);
        merged.push(record.clone());
    }

    // Survivors are local-only; newest first for a deterministic push order.
    let mut to_push: Vec<FoodRecord> = local_by_id.into_values().cloned().collect();
    to_push.reverse();

    merged.extend(to_push.iter().cloned());
    cap_newest(&mut merged, cap);

    MergeOutcome { records: merged, to_push }
}
