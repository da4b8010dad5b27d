//! Remote store contract.
//!
//! The core does not own any transport or schema; it only consumes this
//! narrow contract against a per-account record collection. Every network
//! or auth failure collapses into [`RemoteError::Unavailable`], which the
//! sync layer treats as an expected, recoverable condition, never an error
//! to surface.

use crate::session::Principal;
use pantry_engine::{FoodId, FoodRecord};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// Cap the remote side applies at fetch time, independent of the local cap.
pub const REMOTE_CAP: usize = 50;

/// Remote failure. One condition by design: callers degrade the same way
/// whatever the underlying cause was.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RemoteError {
    #[error("remote store unavailable: {0}")]
    Unavailable(String),
}

/// Result of one best-effort push.
///
/// Failures are data, not errors: the caller logs them and moves on, and the
/// record is retried on the next reconciliation pass.
#[derive(Debug, Clone)]
pub enum PushOutcome {
    Delivered,
    Failed(RemoteError),
}

/// Per-account, durable record collection with network failure modes.
#[allow(async_fn_in_trait)]
pub trait RemoteStore {
    /// Fetch the account's records, newest first, already capped server-side.
    async fn fetch_all(&self, principal: &Principal) -> Result<Vec<FoodRecord>, RemoteError>;

    /// Idempotent upsert by id.
    async fn add(&self, principal: &Principal, record: &FoodRecord) -> Result<(), RemoteError>;

    /// Idempotent delete by id.
    async fn remove(&self, principal: &Principal, id: FoodId) -> Result<(), RemoteError>;
}

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// In-process reference implementation of [`RemoteStore`].
///
/// Backs the test suite and doubles as a demo backend: it is account-scoped,
/// idempotent, and capped like the real thing, with switches to inject the
/// failure modes the sync layer has to survive.
#[derive(Debug, Default)]
pub struct InMemoryRemote {
    accounts: Mutex<HashMap<String, BTreeMap<FoodId, FoodRecord>>>,
    unavailable: AtomicBool,
    failing_add_ids: Mutex<HashSet<FoodId>>,
    latency: Mutex<Duration>,
    fetch_calls: AtomicUsize,
    add_attempts: Mutex<Vec<FoodId>>,
}

impl InMemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate an account, e.g. "another device already synced".
    pub fn seed(&self, principal: &Principal, records: impl IntoIterator<Item = FoodRecord>) {
        let mut accounts = locked(&self.accounts);
        let account = accounts.entry(principal.id.clone()).or_default();
        for record in records {
            account.insert(record.id, record);
        }
    }

    /// Current records for an account, newest first.
    pub fn records_for(&self, principal: &Principal) -> Vec<FoodRecord> {
        locked(&self.accounts)
            .get(&principal.id)
            .map(|account| account.values().rev().cloned().collect())
            .unwrap_or_default()
    }

    /// Make every call fail with [`RemoteError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Make `add` fail for one specific record id.
    pub fn fail_adds_for(&self, id: FoodId) {
        locked(&self.failing_add_ids).insert(id);
    }

    pub fn clear_add_failures(&self) {
        locked(&self.failing_add_ids).clear();
    }

    /// Artificial per-call latency, to exercise overlapping sync passes.
    pub fn set_latency(&self, latency: Duration) {
        *locked(&self.latency) = latency;
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// Ids of every attempted `add`, in call order, delivered or not.
    pub fn add_attempts(&self) -> Vec<FoodId> {
        locked(&self.add_attempts).clone()
    }

    async fn simulate_network(&self) -> Result<(), RemoteError> {
        let latency = *locked(&self.latency);
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RemoteError::Unavailable("connection refused".into()));
        }
        Ok(())
    }
}

impl RemoteStore for InMemoryRemote {
    async fn fetch_all(&self, principal: &Principal) -> Result<Vec<FoodRecord>, RemoteError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_network().await?;

        Ok(locked(&self.accounts)
            .get(&principal.id)
            .map(|account| account.values().rev().take(REMOTE_CAP).cloned().collect())
            .unwrap_or_default())
    }

    async fn add(&self, principal: &Principal, record: &FoodRecord) -> Result<(), RemoteError> {
        locked(&self.add_attempts).push(record.id);
        self.simulate_network().await?;

        if locked(&self.failing_add_ids).contains(&record.id) {
            return Err(RemoteError::Unavailable(format!(
                "insert rejected for {}",
                record.id
            )));
        }

        locked(&self.accounts)
            .entry(principal.id.clone())
            .or_default()
            .insert(record.id, record.clone());
        Ok(())
    }

    async fn remove(&self, principal: &Principal, id: FoodId) -> Result<(), RemoteError> {
        self.simulate_network().await?;

        if let Some(account) = locked(&self.accounts).get_mut(&principal.id) {
            account.remove(&id);
        }
        Ok(())
    }
}
