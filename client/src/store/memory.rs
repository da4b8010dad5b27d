//! In-memory store, for tests and embedding without a filesystem.

use super::{LocalStore, StoreError};
use std::sync::Mutex;

/// Volatile slot held in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryStore {
    fn read(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn write(&self, raw: &str) -> Result<(), StoreError> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(raw.to_string());
        Ok(())
    }
}
