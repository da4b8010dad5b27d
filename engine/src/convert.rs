//! Energy unit conversion and per-portion arithmetic.
//!
//! Food labels state energy per 100 g. The calculator scales that to the
//! consumed portion and converts between kilojoules and kilocalories.

use crate::record::EnergyUnit;

/// Kilojoules per kilocalorie.
pub const KJ_PER_KCAL: f64 = 4.184;

/// Convert kilojoules to kilocalories.
pub fn kj_to_kcal(kj: f64) -> f64 {
    kj / KJ_PER_KCAL
}

/// Convert kilocalories to kilojoules.
pub fn kcal_to_kj(kcal: f64) -> f64 {
    kcal * KJ_PER_KCAL
}

/// Convert a value between units. Same unit passes through unchanged.
pub fn convert(value: f64, from: EnergyUnit, to: EnergyUnit) -> f64 {
    match (from, to) {
        (EnergyUnit::KiloJoule, EnergyUnit::KiloCalorie) => kj_to_kcal(value),
        (EnergyUnit::KiloCalorie, EnergyUnit::KiloJoule) => kcal_to_kj(value),
        _ => value,
    }
}

/// Energy in a portion of `grams`, given the per-100 g value. Unit preserved.
pub fn portion_energy(per_100g: f64, grams: f64) -> f64 {
    per_100g / 100.0 * grams
}

/// Portion energy expressed in the opposite unit.
///
/// This is the calculator's headline number: per-100 g kJ in, portion kcal
/// out, and vice versa.
pub fn portion_converted(per_100g: f64, grams: f64, captured: EnergyUnit) -> f64 {
    let total = portion_energy(per_100g, grams);
    match captured {
        EnergyUnit::KiloJoule => kj_to_kcal(total),
        EnergyUnit::KiloCalorie => kcal_to_kj(total),
    }
}
