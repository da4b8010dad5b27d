//! End-to-end reconciliation tests: offline CRUD, sign-in, merge, push
//! retries, and the single-flight guard.

use pantry_client::clock::Clock;
use pantry_client::{
    Foods, InMemoryRemote, LocalStore, MemoryStore, Principal, RemoteStore, Session, SyncConfig,
    SyncKind,
};
use pantry_engine::{EnergyUnit, FoodRecord};
use std::sync::Arc;
use std::time::Duration;

/// Deterministic clock: ids start at the base and increase by one per call
/// through the id source's same-millisecond rule.
#[derive(Clone, Copy)]
struct FixedClock(u64);

impl Clock for FixedClock {
    fn now_ms(&self) -> u64 {
        self.0
    }
}

fn foods_at(base_ms: u64) -> Foods<MemoryStore, InMemoryRemote, FixedClock> {
    static TRACING: std::sync::Once = std::sync::Once::new();
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });

    Foods::with_clock(
        SyncConfig::default(),
        MemoryStore::new(),
        InMemoryRemote::new(),
        Session::new(),
        FixedClock(base_ms),
    )
}

fn remote_food(id: u64, name: &str) -> FoodRecord {
    FoodRecord::new(id, name, 200.0, EnergyUnit::KiloJoule).unwrap()
}

#[tokio::test]
async fn signed_out_pass_is_a_no_op() {
    let foods = foods_at(1000);
    foods.create("Oats", 1500.0, EnergyUnit::KiloJoule).await.unwrap();

    let outcome = foods.reconcile().await;

    assert_eq!(outcome.kind, SyncKind::SignedOut);
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(foods.remote_store().fetch_count(), 0);
}

#[tokio::test]
async fn first_sync_uploads_offline_creations() {
    let foods = foods_at(1000);
    let milk = foods.create("Milk", 64.0, EnergyUnit::KiloCalorie).await.unwrap();
    let oats = foods.create("Oats", 1500.0, EnergyUnit::KiloJoule).await.unwrap();

    let principal = Principal::new("user-1");
    foods.session().sign_in(principal.clone());
    let outcome = foods.reconcile().await;

    assert_eq!(outcome.kind, SyncKind::Merged);
    assert_eq!(outcome.pushed, vec![oats.id, milk.id]);
    assert!(outcome.failed.is_empty());
    assert_eq!(
        foods.remote_store().records_for(&principal),
        vec![oats.clone(), milk.clone()]
    );

    // Second pass with nothing new: same list, nothing pushed again.
    let again = foods.reconcile().await;
    assert_eq!(again.records, outcome.records);
    assert!(again.pushed.is_empty());
}

#[tokio::test]
async fn remote_copy_overwrites_diverged_local_copy() {
    let foods = foods_at(1000);
    // Offline edit of a record another device already synced under id 1000.
    let local = foods.create("Milk (offline edit)", 70.0, EnergyUnit::KiloCalorie).await.unwrap();
    assert_eq!(local.id, 1000);

    let principal = Principal::new("user-1");
    foods.remote_store().seed(&principal, [remote_food(1000, "Milk")]);
    foods.session().sign_in(principal);

    let outcome = foods.reconcile().await;

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].name, "Milk");
    assert!(outcome.pushed.is_empty());
    // The losing local copy is gone from the persisted list too.
    assert_eq!(foods.local_store().load(), outcome.records);
}

#[tokio::test]
async fn local_only_record_gets_exactly_one_add() {
    let foods = foods_at(1000);
    let record = foods.create("Tofu", 76.0, EnergyUnit::KiloCalorie).await.unwrap();

    foods.session().sign_in(Principal::new("user-1"));
    foods.reconcile().await;

    assert_eq!(foods.remote_store().add_attempts(), vec![record.id]);
}

#[tokio::test]
async fn fetch_failure_leaves_local_store_untouched() {
    let foods = foods_at(1000);
    foods.create("Oats", 1500.0, EnergyUnit::KiloJoule).await.unwrap();
    foods.session().sign_in(Principal::new("user-1"));
    foods.remote_store().set_unavailable(true);

    let bytes_before = foods.local_store().read();
    let outcome = foods.reconcile().await;

    assert_eq!(outcome.kind, SyncKind::Offline);
    assert_eq!(outcome.records, foods.local_store().load());
    assert_eq!(foods.local_store().read(), bytes_before);
}

#[tokio::test]
async fn failed_push_is_retried_on_the_next_pass() {
    let foods = foods_at(1000);
    let a = foods.create("A", 100.0, EnergyUnit::KiloJoule).await.unwrap();
    let b = foods.create("B", 100.0, EnergyUnit::KiloJoule).await.unwrap();

    let principal = Principal::new("user-1");
    foods.session().sign_in(principal.clone());
    foods.remote_store().fail_adds_for(a.id);

    let first = foods.reconcile().await;
    assert_eq!(first.pushed, vec![b.id]);
    assert_eq!(first.failed, vec![a.id]);
    // One failing record does not block the rest of the merge.
    assert_eq!(first.records.len(), 2);

    foods.remote_store().clear_add_failures();
    let second = foods.reconcile().await;
    assert_eq!(second.pushed, vec![a.id]);
    assert!(second.failed.is_empty());
    assert_eq!(
        foods.remote_store().records_for(&principal),
        vec![b, a]
    );
}

#[tokio::test]
async fn merged_list_respects_the_cap() {
    let foods = foods_at(1);
    for i in 0..10 {
        foods.create(&format!("old-{i}"), 100.0, EnergyUnit::KiloJoule).await.unwrap();
    }

    let principal = Principal::new("user-1");
    foods
        .remote_store()
        .seed(&principal, (1000..1050).map(|id| remote_food(id, "remote")));
    foods.session().sign_in(principal);

    let outcome = foods.reconcile().await;

    assert_eq!(outcome.records.len(), 50);
    // Every kept record is one of the 50 newest ids, i.e. all remote here.
    assert!(outcome.records.iter().all(|r| r.name == "remote"));
    // The displaced local records are still uploaded.
    assert_eq!(outcome.pushed.len(), 10);
}

#[tokio::test]
async fn record_deleted_elsewhere_is_republished() {
    // Documented consequence of "local-only survives": a record another
    // device deleted (absent from remote) but still present locally is
    // treated as unsynced and pushed back.
    let foods = foods_at(1000);
    let record = foods.create("Ghost", 100.0, EnergyUnit::KiloJoule).await.unwrap();

    let principal = Principal::new("user-1");
    foods.session().sign_in(principal.clone());
    foods.reconcile().await;

    // The other device deletes it remotely.
    foods.remote_store().remove(&principal, record.id).await.unwrap();

    let outcome = foods.reconcile().await;
    assert_eq!(outcome.pushed, vec![record.id]);
    assert_eq!(foods.remote_store().records_for(&principal), vec![record]);
}

#[tokio::test(start_paused = true)]
async fn overlapping_passes_coalesce() {
    let foods = Arc::new(foods_at(1000));
    foods.create("Oats", 1500.0, EnergyUnit::KiloJoule).await.unwrap();
    foods.session().sign_in(Principal::new("user-1"));
    foods.remote_store().set_latency(Duration::from_millis(50));

    let background = {
        let foods = Arc::clone(&foods);
        tokio::spawn(async move { foods.reconcile().await })
    };

    // Let the background pass take the guard and enter its fetch.
    tokio::time::sleep(Duration::from_millis(10)).await;
    let joined = foods.reconcile().await;
    let first = background.await.unwrap();

    assert_eq!(first.kind, SyncKind::Merged);
    assert_eq!(joined.kind, SyncKind::Coalesced);
    assert_eq!(joined.records, first.records);
    // Exactly one fetch: the waiter shared the in-flight pass.
    assert_eq!(foods.remote_store().fetch_count(), 1);
}

#[tokio::test]
async fn session_restore_drives_a_sync() {
    let foods = Arc::new(foods_at(1000));
    foods.create("Oats", 1500.0, EnergyUnit::KiloJoule).await.unwrap();

    let mut auth = foods.session().subscribe();
    let watcher = {
        let foods = Arc::clone(&foods);
        tokio::spawn(async move {
            auth.changed().await.unwrap();
            foods.reconcile().await
        })
    };

    // Identity provider restores a session.
    foods.session().sign_in(Principal::with_email("user-1", "a@example.com"));

    let outcome = watcher.await.unwrap();
    assert_eq!(outcome.kind, SyncKind::Merged);
    assert_eq!(outcome.pushed.len(), 1);
}
