//! # Pantry Engine
//!
//! The deterministic core of Pantry's offline-first saved-foods feature.
//!
//! Saved foods live in a bounded local list that works fully offline and,
//! when a user is signed in, reconciles with a per-account remote list that
//! other devices may have edited. This crate holds everything about that
//! problem that can be expressed without IO:
//!
//! - **No IO**: no files, no network, no clock — callers supply ids and lists
//! - **Deterministic**: the same inputs always produce the same outputs
//! - **Testable**: pure logic, no mocks needed
//!
//! ## Core Concepts
//!
//! ### Records
//!
//! A [`FoodRecord`] is a named energy value captured in either kilojoules or
//! kilocalories. Its id is derived from creation time and strictly
//! increases, so it serves as both identity and sort key.
//!
//! ### Merge
//!
//! [`merge`](merge::merge) reconciles the local list with the remote list:
//! remote wins per id, local-only records survive and are offered for push,
//! and the result is re-capped newest first. See the module docs for the
//! exact rules and their documented limitations.
//!
//! ### Calculator math
//!
//! [`convert`] carries the kJ↔kcal and per-portion arithmetic, [`bmi`] the
//! body-mass-index bands and its small device-local history, and [`meal`]
//! the ephemeral per-session portion log.
//!
//! ## Quick Start
//!
//! ```rust
//! use pantry_engine::{merge::merge, EnergyUnit, FoodRecord, LOCAL_CAP};
//!
//! let local = vec![FoodRecord::new(2, "Oats", 1500.0, EnergyUnit::KiloJoule).unwrap()];
//! let remote = vec![FoodRecord::new(1, "Milk", 64.0, EnergyUnit::KiloCalorie).unwrap()];
//!
//! let outcome = merge(&local, &remote, LOCAL_CAP);
//! assert_eq!(outcome.records.len(), 2);
//! assert_eq!(outcome.to_push, local); // "Oats" is unknown remotely
//! ```

pub mod bmi;
pub mod convert;
pub mod error;
pub mod list;
pub mod meal;
pub mod merge;
pub mod record;

// Re-export main types at crate root
pub use error::Error;
pub use list::LOCAL_CAP;
pub use merge::MergeOutcome;
pub use record::{decode_records, encode_records, EnergyUnit, FoodRecord};

/// Opaque record identifier, monotonically increasing with creation time.
pub type FoodId = u64;
