//! The saved-foods CRUD service.
//!
//! All mutations hit the local store synchronously so the UI stays
//! responsive offline, then mirror to the remote store best-effort when a
//! principal is signed in. A mirror failure is logged and forgotten: the
//! record is local-only until the next reconciliation pass picks it up.
//!
//! Edits are the deliberate exception: they persist locally only. The
//! observed design exposes no remote update operation, so an offline edit to
//! a record the remote side already knows is overwritten by the next sync.
//! Known defect, kept for compatibility.

use crate::clock::{Clock, IdSource, SystemClock};
use crate::config::SyncConfig;
use crate::error::Result;
use crate::remote::RemoteStore;
use crate::session::Session;
use crate::store::LocalStore;
use pantry_engine::record::{validate_energy, validate_name};
use pantry_engine::{list::prepend_bounded, EnergyUnit, Error as EngineError, FoodId, FoodRecord};
use std::sync::atomic::AtomicU64;
use tokio::sync::Mutex;

/// The user-facing saved-foods API and its sync state.
///
/// Owns the session context explicitly; there is no ambient global user, so
/// independent instances (and tests) never interfere.
pub struct Foods<L, R, C = SystemClock> {
    pub(crate) config: SyncConfig,
    pub(crate) local: L,
    pub(crate) remote: R,
    pub(crate) session: Session,
    pub(crate) ids: IdSource<C>,
    /// Single-flight guard for reconciliation passes.
    pub(crate) pass_lock: Mutex<()>,
    /// Bumped after every completed merge pass.
    pub(crate) pass_epoch: AtomicU64,
}

impl<L, R> Foods<L, R>
where
    L: LocalStore,
    R: RemoteStore,
{
    pub fn new(config: SyncConfig, local: L, remote: R, session: Session) -> Self {
        Self::with_clock(config, local, remote, session, SystemClock)
    }
}

impl<L, R, C> Foods<L, R, C>
where
    L: LocalStore,
    R: RemoteStore,
    C: Clock,
{
    pub fn with_clock(
        config: SyncConfig,
        local: L,
        remote: R,
        session: Session,
        clock: C,
    ) -> Self {
        Self {
            config,
            local,
            remote,
            session,
            ids: IdSource::new(clock),
            pass_lock: Mutex::new(()),
            pass_epoch: AtomicU64::new(0),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn local_store(&self) -> &L {
        &self.local
    }

    pub fn remote_store(&self) -> &R {
        &self.remote
    }

    /// The current local list.
    pub fn list(&self) -> Vec<FoodRecord> {
        self.local.load()
    }

    /// Save a new food. Persists locally first, then mirrors the insert to
    /// the remote store when signed in.
    pub async fn create(&self, name: &str, energy: f64, unit: EnergyUnit) -> Result<FoodRecord> {
        validate_name(name)?;
        validate_energy(energy)?;

        let record = FoodRecord::new(self.ids.next(), name, energy, unit)?;

        let mut records = self.local.load();
        prepend_bounded(&mut records, record.clone(), self.config.local_cap);
        self.local.save(&records)?;

        if let Some(principal) = self.session.current() {
            if let Err(err) = self.remote.add(&principal, &record).await {
                tracing::warn!(id = record.id, "mirror add failed: {err}");
            }
        }

        Ok(record)
    }

    /// Rename a food or change its energy value. Id and unit are immutable.
    /// Persists locally only; see the module docs for why.
    pub fn edit(&self, id: FoodId, name: &str, energy: f64) -> Result<FoodRecord> {
        validate_name(name)?;
        validate_energy(energy)?;

        let mut records = self.local.load();
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(EngineError::RecordNotFound(id))?;

        record.name = name.to_string();
        record.energy = energy;
        let updated = record.clone();

        self.local.save(&records)?;
        Ok(updated)
    }

    /// Remove a food. Persists locally first, then mirrors the delete to the
    /// remote store when signed in.
    pub async fn delete(&self, id: FoodId) -> Result<()> {
        let mut records = self.local.load();
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(EngineError::RecordNotFound(id).into());
        }
        self.local.save(&records)?;

        if let Some(principal) = self.session.current() {
            if let Err(err) = self.remote.remove(&principal, id).await {
                tracing::warn!(id, "mirror remove failed: {err}");
            }
        }

        Ok(())
    }
}
