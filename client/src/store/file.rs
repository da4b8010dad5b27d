//! File-backed store: one JSON document per slot.

use super::{LocalStore, StoreError};
use std::fs;
use std::path::{Path, PathBuf};

/// Durable slot stored as a single JSON file.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write leaves the previous content readable.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl LocalStore for JsonFileStore {
    fn read(&self) -> Option<String> {
        fs::read_to_string(&self.path).ok()
    }

    fn write(&self, raw: &str) -> Result<(), StoreError> {
        let tmp = self.temp_path();
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
