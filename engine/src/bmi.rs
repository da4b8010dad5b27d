//! BMI calculation and its small persisted history.
//!
//! The BMI view keeps its own local slot, separate from saved foods, with a
//! much smaller cap. Readings never sync: they are device-local by design.

use serde::{Deserialize, Serialize};

use crate::list::push_front_capped;

/// Maximum number of BMI readings kept.
pub const BMI_HISTORY_CAP: usize = 5;

/// Weight status bands per the WHO adult thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Classify a BMI value.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }
}

impl std::fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BmiCategory::Underweight => write!(f, "underweight"),
            BmiCategory::Normal => write!(f, "normal"),
            BmiCategory::Overweight => write!(f, "overweight"),
            BmiCategory::Obese => write!(f, "obese"),
        }
    }
}

/// Compute BMI from height in centimeters and weight in kilograms.
///
/// Returns `None` for non-positive or non-finite inputs; the view shows a
/// placeholder instead of an error in that case.
pub fn bmi(height_cm: f64, weight_kg: f64) -> Option<f64> {
    if !height_cm.is_finite() || !weight_kg.is_finite() || height_cm <= 0.0 || weight_kg <= 0.0 {
        return None;
    }
    let height_m = height_cm / 100.0;
    Some(weight_kg / (height_m * height_m))
}

/// One saved BMI reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiReading {
    /// Creation-time ordinal, same scheme as food ids.
    pub id: u64,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub bmi: f64,
    pub category: BmiCategory,
}

impl BmiReading {
    /// Build a reading from raw inputs. `None` when the inputs are invalid.
    pub fn capture(id: u64, height_cm: f64, weight_kg: f64) -> Option<Self> {
        let bmi = bmi(height_cm, weight_kg)?;
        Some(Self {
            id,
            height_cm,
            weight_kg,
            bmi,
            category: BmiCategory::from_bmi(bmi),
        })
    }
}

/// Prepend a reading, keeping at most [`BMI_HISTORY_CAP`] entries.
pub fn record_reading(history: &mut Vec<BmiReading>, reading: BmiReading) {
    push_front_capped(history, reading, BMI_HISTORY_CAP);
}

/// Decode a persisted reading history; corruption degrades to empty.
pub fn decode_readings(raw: &str) -> Vec<BmiReading> {
    let Ok(serde_json::Value::Array(items)) = serde_json::from_str(raw) else {
        return Vec::new();
    };
    items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<BmiReading>(item).ok())
        .collect()
}

/// Encode a reading history for persistence.
pub fn encode_readings(readings: &[BmiReading]) -> serde_json::Result<String> {
    serde_json::to_string(readings)
}
