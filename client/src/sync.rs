//! Reconciliation passes.
//!
//! Entering the saved-foods view, or an explicit "sync now", runs one pass:
//! fetch the remote list, merge it with the local list (remote wins per id,
//! local-only survives), persist the merged result, then push every
//! local-only record best-effort.
//!
//! Failure is not an error here. Signed out or unreachable, the pass
//! degrades to presenting the local list unchanged; a failed push leaves the
//! record in the next pass's local-only set, which is the retry mechanism.
//!
//! Passes are single-flight: at most one runs at a time, and a caller that
//! arrives while one is in flight receives that pass's result instead of
//! starting another merge. A started pass always runs to completion so the
//! persisted state stays consistent.

use crate::clock::Clock;
use crate::remote::{PushOutcome, RemoteStore};
use crate::service::Foods;
use crate::session::Principal;
use crate::store::LocalStore;
use pantry_engine::{merge::merge, FoodId, FoodRecord};
use std::sync::atomic::Ordering;

/// How a reconciliation pass resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncKind {
    /// Remote fetched, lists merged, result persisted.
    Merged,
    /// Remote unreachable; local list presented unchanged.
    Offline,
    /// No principal; sync does not run.
    SignedOut,
    /// An overlapping pass finished while this caller waited; its result is
    /// shared instead of running another merge.
    Coalesced,
}

/// Result of one reconciliation pass.
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    pub kind: SyncKind,
    /// The list to present, newest first.
    pub records: Vec<FoodRecord>,
    /// Local-only records delivered to the remote store this pass.
    pub pushed: Vec<FoodId>,
    /// Local-only records whose push failed; retried next pass.
    pub failed: Vec<FoodId>,
}

impl SyncOutcome {
    fn local(kind: SyncKind, records: Vec<FoodRecord>) -> Self {
        Self {
            kind,
            records,
            pushed: Vec::new(),
            failed: Vec::new(),
        }
    }
}

impl<L, R, C> Foods<L, R, C>
where
    L: LocalStore,
    R: RemoteStore,
    C: Clock,
{
    /// Run one reconciliation pass (or join the one in flight).
    pub async fn reconcile(&self) -> SyncOutcome {
        let Some(principal) = self.session.current() else {
            return SyncOutcome::local(SyncKind::SignedOut, self.local.load());
        };

        let epoch_at_entry = self.pass_epoch.load(Ordering::SeqCst);
        let _guard = self.pass_lock.lock().await;
        if self.pass_epoch.load(Ordering::SeqCst) != epoch_at_entry {
            // A pass completed while we waited for the guard.
            return SyncOutcome::local(SyncKind::Coalesced, self.local.load());
        }

        let remote_records = match self.remote.fetch_all(&principal).await {
            Ok(records) => records,
            Err(err) => {
                tracing::debug!("sync degraded to local-only view: {err}");
                return SyncOutcome::local(SyncKind::Offline, self.local.load());
            }
        };

        let local_records = self.local.load();
        let outcome = merge(&local_records, &remote_records, self.config.local_cap);

        if let Err(err) = self.local.save(&outcome.records) {
            // The merged list is still presented; the slot keeps its old
            // content and the next pass re-merges from it.
            tracing::error!("failed to persist merged list: {err}");
        }

        let mut pushed = Vec::new();
        let mut failed = Vec::new();
        for record in &outcome.to_push {
            match self.push(&principal, record).await {
                PushOutcome::Delivered => pushed.push(record.id),
                PushOutcome::Failed(err) => {
                    tracing::warn!(id = record.id, "push failed: {err}");
                    failed.push(record.id);
                }
            }
        }

        self.pass_epoch.fetch_add(1, Ordering::SeqCst);

        SyncOutcome {
            kind: SyncKind::Merged,
            records: outcome.records,
            pushed,
            failed,
        }
    }

    /// One best-effort upload. Failures are outcomes, not errors; each
    /// record's push is independent of the others.
    async fn push(&self, principal: &Principal, record: &FoodRecord) -> PushOutcome {
        match self.remote.add(principal, record).await {
            Ok(()) => PushOutcome::Delivered,
            Err(err) => PushOutcome::Failed(err),
        }
    }
}
