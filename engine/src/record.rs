//! Food record model and the persisted wire shape.
//!
//! Records are stored as a flat JSON array of
//! `{"id": n, "name": s, "energy": x, "unit": "kJ"|"kcal"}`.
//! The `id` doubles as the sort key: it is derived from creation time and
//! strictly increases, so "newest first" is simply descending id order.

use crate::error::{Error, Result};
use crate::FoodId;
use serde::{Deserialize, Serialize};

/// Energy unit that was active when the value was captured.
///
/// Required to re-enter a saved food into the calculator in the right mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyUnit {
    #[serde(rename = "kJ")]
    KiloJoule,
    #[serde(rename = "kcal")]
    KiloCalorie,
}

impl std::fmt::Display for EnergyUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnergyUnit::KiloJoule => write!(f, "kJ"),
            EnergyUnit::KiloCalorie => write!(f, "kcal"),
        }
    }
}

/// A saved food energy record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    /// Unique identifier, monotonically increasing with creation time.
    /// Immutable after creation.
    pub id: FoodId,
    /// User-editable display name, never empty.
    pub name: String,
    /// Energy magnitude per 100 g, unit-less at rest. Finite and positive.
    pub energy: f64,
    /// Capture-time unit. Immutable after creation.
    pub unit: EnergyUnit,
}

impl FoodRecord {
    /// Create a validated record.
    pub fn new(id: FoodId, name: impl Into<String>, energy: f64, unit: EnergyUnit) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        validate_energy(energy)?;
        Ok(Self {
            id,
            name,
            energy,
            unit,
        })
    }

    /// Whether the record satisfies the model invariants.
    ///
    /// Used when loading persisted data: entries that deserialize but violate
    /// the invariants are treated as corruption and dropped.
    pub fn is_well_formed(&self) -> bool {
        validate_name(&self.name).is_ok() && validate_energy(self.energy).is_ok()
    }
}

/// Validate a user-supplied food name.
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::EmptyName);
    }
    Ok(())
}

/// Validate a user-supplied energy value.
pub fn validate_energy(energy: f64) -> Result<()> {
    if !energy.is_finite() || energy <= 0.0 {
        return Err(Error::InvalidEnergy(energy));
    }
    Ok(())
}

/// Decode a persisted record list.
///
/// Corruption degrades, it never raises: a document that is not a JSON array
/// decodes to the empty list, and malformed entries are dropped individually
/// rather than failing the whole load.
pub fn decode_records(raw: &str) -> Vec<FoodRecord> {
    let Ok(serde_json::Value::Array(items)) = serde_json::from_str(raw) else {
        return Vec::new();
    };

    items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<FoodRecord>(item).ok())
        .filter(FoodRecord::is_well_formed)
        .collect()
}

/// Encode a record list for persistence.
pub fn encode_records(records: &[FoodRecord]) -> serde_json::Result<String> {
    serde_json::to_string(records)
}
