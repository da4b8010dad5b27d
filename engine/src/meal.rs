//! Ephemeral per-session meal log.
//!
//! Tracks the portions added during one calculator session with a running
//! total. Never persisted and never synced, so it lives outside the
//! reconciliation path entirely.

use crate::convert::portion_converted;
use crate::record::EnergyUnit;

/// One portion added to the current meal.
#[derive(Debug, Clone, PartialEq)]
pub struct MealEntry {
    pub id: u64,
    /// Per-100 g energy as entered.
    pub energy: f64,
    /// Portion weight in grams.
    pub grams: f64,
    /// Portion energy in the output unit.
    pub result: f64,
    /// Unit the energy was entered in; the result is in the opposite unit.
    pub unit: EnergyUnit,
}

/// The session's meal so far, newest entry first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MealLog {
    entries: Vec<MealEntry>,
}

impl MealLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a portion. Returns the computed entry, or `None` for inputs the
    /// calculator would refuse (non-finite or non-positive).
    pub fn add(&mut self, id: u64, energy: f64, grams: f64, unit: EnergyUnit) -> Option<&MealEntry> {
        if !energy.is_finite() || !grams.is_finite() || energy <= 0.0 || grams <= 0.0 {
            return None;
        }
        let result = portion_converted(energy, grams, unit);
        self.entries.insert(
            0,
            MealEntry {
                id,
                energy,
                grams,
                result,
                unit,
            },
        );
        self.entries.first()
    }

    /// Remove one entry by id.
    pub fn remove(&mut self, id: u64) {
        self.entries.retain(|e| e.id != id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[MealEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Running total of all portion results.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.result).sum()
    }
}
