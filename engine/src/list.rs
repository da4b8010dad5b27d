//! Bounded-list policy shared by the saved-foods list and the BMI history.

use crate::record::FoodRecord;

/// Maximum number of food records kept locally.
///
/// The remote store enforces its own independent cap at fetch time.
pub const LOCAL_CAP: usize = 50;

/// Sort records newest first (descending id).
pub fn newest_first(records: &mut [FoodRecord]) {
    records.sort_by(|a, b| b.id.cmp(&a.id));
}

/// Sort newest first and truncate to `cap`.
pub fn cap_newest(records: &mut Vec<FoodRecord>, cap: usize) {
    newest_first(records);
    records.truncate(cap);
}

/// Prepend a record, evicting the oldest (smallest id) while over `cap`.
pub fn prepend_bounded(records: &mut Vec<FoodRecord>, record: FoodRecord, cap: usize) {
    records.insert(0, record);
    while records.len() > cap {
        let Some(oldest) = records
            .iter()
            .enumerate()
            .min_by_key(|(_, r)| r.id)
            .map(|(i, _)| i)
        else {
            break;
        };
        records.remove(oldest);
    }
}

/// Prepend an item to a positional history, dropping the tail beyond `cap`.
pub fn push_front_capped<T>(items: &mut Vec<T>, item: T, cap: usize) {
    items.insert(0, item);
    items.truncate(cap);
}
