//! # Pantry Client
//!
//! The side-effectful half of Pantry's offline-first saved foods: local
//! persistence, identity, and the reconciliation passes that keep one user's
//! list consistent across devices.
//!
//! The deterministic merge logic lives in [`pantry_engine`]; this crate
//! wires it to a [`store::LocalStore`], a [`remote::RemoteStore`], and a
//! [`session::Session`], and exposes the user-facing CRUD in
//! [`service::Foods`].
//!
//! ## Quick Start
//!
//! ```rust
//! use pantry_client::{
//!     config::SyncConfig, remote::InMemoryRemote, service::Foods,
//!     session::{Principal, Session}, store::MemoryStore,
//! };
//! use pantry_engine::EnergyUnit;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let foods = Foods::new(
//!     SyncConfig::default(),
//!     MemoryStore::new(),
//!     InMemoryRemote::new(),
//!     Session::new(),
//! );
//!
//! // Works fully offline...
//! foods.create("Oats", 1500.0, EnergyUnit::KiloJoule).await.unwrap();
//!
//! // ...and reconciles once someone signs in.
//! foods.session().sign_in(Principal::new("user-1"));
//! let outcome = foods.reconcile().await;
//! assert_eq!(outcome.pushed.len(), 1);
//! # }
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod remote;
pub mod service;
pub mod session;
pub mod store;
pub mod sync;

// Re-export main types at crate root
pub use clock::{Clock, SystemClock};
pub use config::SyncConfig;
pub use error::Error;
pub use remote::{InMemoryRemote, PushOutcome, RemoteError, RemoteStore, REMOTE_CAP};
pub use service::Foods;
pub use session::{Principal, Session};
pub use store::{JsonFileStore, LocalStore, MemoryStore, StoreError};
pub use sync::{SyncKind, SyncOutcome};
