//! Local persistence.
//!
//! One named slot holds the saved-foods list as a JSON array. The store
//! itself enforces no ordering or cap; those invariants belong to the
//! reconciler and the CRUD service.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use pantry_engine::{decode_records, encode_records, FoodRecord};

/// Local persistence errors.
///
/// Only writes can fail. Reads never do: malformed or missing persisted data
/// is treated as "no data".
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A durable slot of local storage.
///
/// `load` and `save` are the contract the rest of the crate uses; `read` and
/// `write` expose the raw slot so side features (the BMI history) can share
/// an implementation with their own codec.
pub trait LocalStore {
    /// Raw slot content, `None` when nothing has been persisted.
    fn read(&self) -> Option<String>;

    /// Overwrite the slot. Atomic from the caller's perspective: a failed
    /// write leaves the previous content intact.
    fn write(&self, raw: &str) -> Result<(), StoreError>;

    /// Deserialize the persisted food list. Absent or malformed data decodes
    /// to the empty list; this never raises.
    fn load(&self) -> Vec<FoodRecord> {
        match self.read() {
            Some(raw) => decode_records(&raw),
            None => Vec::new(),
        }
    }

    /// Persist the food list, replacing the previous content.
    fn save(&self, records: &[FoodRecord]) -> Result<(), StoreError> {
        let raw = encode_records(records)?;
        self.write(&raw)
    }
}
