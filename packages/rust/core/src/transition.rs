//! Stage transitions: validation, optimistic local update, remote dispatch.
//!
//! A transition is applied to the local snapshot synchronously and the
//! remote update is dispatched as a detached task afterwards. The remote
//! call confirms, it never decides: its failure is logged and the local
//! state stands, and its response is never folded back into the store. In
//! exchange, the board keeps working with the server unreachable and two
//! overlapping syncs for the same lead cannot reorder what the user sees;
//! the last local write wins.

use leadflow_board::LeadStore;
use leadflow_shared::{LeadId, StageId};
use leadflow_sync::StatusSync;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

// ---------------------------------------------------------------------------
// Listener
// ---------------------------------------------------------------------------

/// Callback for committed stage changes.
///
/// Invoked exactly once per committed transition, after the local update,
/// so the hosting screen can update its own copy of the records. Never
/// invoked for a no-op.
pub trait StageListener: Send + Sync {
    fn on_stage_change(&self, lead: &LeadId, stage: StageId);
}

/// No-op listener for headless/test usage.
pub struct SilentListener;

impl StageListener for SilentListener {
    fn on_stage_change(&self, _lead: &LeadId, _stage: StageId) {}
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// A committed stage change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed {
    pub lead: LeadId,
    pub from: StageId,
    pub to: StageId,
}

/// What [`TransitionService::attempt`] produced.
#[derive(Debug)]
pub struct TransitionOutcome {
    /// The snapshot to render from now. Shares storage with the input
    /// snapshot (see [`LeadStore::ptr_eq`]) when nothing changed.
    pub store: LeadStore,
    /// The committed change, or `None` for a no-op.
    pub committed: Option<Committed>,
    /// Handle of the dispatched sync task, when one was dispatched. Hosts
    /// that drop it leave the task running detached; short-lived hosts can
    /// await it before exiting.
    pub sync: Option<JoinHandle<()>>,
}

impl TransitionOutcome {
    fn noop(store: &LeadStore) -> Self {
        Self {
            store: store.clone(),
            committed: None,
            sync: None,
        }
    }

    /// Whether the attempt committed a change.
    pub fn changed(&self) -> bool {
        self.committed.is_some()
    }
}

// ---------------------------------------------------------------------------
// TransitionService
// ---------------------------------------------------------------------------

/// Applies validated stage changes and notifies the remote service.
pub struct TransitionService {
    sync: Option<StatusSync>,
    listener: Box<dyn StageListener>,
}

impl TransitionService {
    /// Build a service. `sync = None` runs fully local: transitions commit
    /// and no remote dispatch ever happens.
    pub fn new(sync: Option<StatusSync>) -> Self {
        Self {
            sync,
            listener: Box::new(SilentListener),
        }
    }

    /// Replace the stage-change listener.
    pub fn with_listener(mut self, listener: Box<dyn StageListener>) -> Self {
        self.listener = listener;
        self
    }

    /// Attempt to move `lead` to `target`.
    ///
    /// `target = None` is a release outside every column. The previous
    /// stage is read from `store`, the only place it can be trusted.
    ///
    /// A valid attempt updates the snapshot synchronously, invokes the
    /// listener, and dispatches the remote update onto the current Tokio
    /// runtime (one must be current when a sync client is configured).
    /// An invalid attempt (no target, unknown lead, target equals the
    /// current stage) is a complete no-op: same snapshot, no listener
    /// call, no request.
    #[instrument(skip(self, store), fields(lead = %lead))]
    pub fn attempt(
        &self,
        store: &LeadStore,
        lead: &LeadId,
        target: Option<StageId>,
    ) -> TransitionOutcome {
        let Some(target) = target else {
            debug!("released outside the board, ignoring");
            return TransitionOutcome::noop(store);
        };

        let Some(from) = store.get(lead).map(|l| l.status) else {
            debug!("unknown lead, ignoring");
            return TransitionOutcome::noop(store);
        };

        if from == target {
            debug!(stage = %target, "dropped on its own column, ignoring");
            return TransitionOutcome::noop(store);
        }

        let next = store.set_status(lead, target);
        self.listener.on_stage_change(lead, target);
        info!(from = %from, to = %target, "stage changed");

        let sync = self.sync.as_ref().map(|client| {
            let client = client.clone();
            let lead = lead.clone();
            tokio::spawn(async move {
                // The task owns plain copies of the id and stage. Whatever
                // the server answers, there is nothing here that could
                // write back into a snapshot.
                match client.push_status(&lead, target).await {
                    Ok(()) => debug!(lead = %lead, stage = %target, "remote confirmed"),
                    Err(e) => {
                        warn!(lead = %lead, stage = %target, error = %e, "status sync failed, keeping local state")
                    }
                }
            })
        });

        TransitionOutcome {
            store: next,
            committed: Some(Committed {
                lead: lead.clone(),
                from,
                to: target,
            }),
            sync,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use leadflow_shared::Lead;
    use url::Url;

    struct CountingListener(Arc<AtomicUsize>);

    impl StageListener for CountingListener {
        fn on_stage_change(&self, _lead: &LeadId, _stage: StageId) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn sample_store() -> LeadStore {
        LeadStore::from_leads([
            Lead::new("L1", "Acme Corp", StageId::New),
            Lead::new("L2", "Globex", StageId::Contacted),
        ])
    }

    async fn mock_sync(server: &wiremock::MockServer) -> StatusSync {
        let base = Url::parse(&server.uri()).unwrap();
        StatusSync::new(base).unwrap()
    }

    #[tokio::test]
    async fn commit_updates_locally_and_syncs() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("PUT"))
            .and(wiremock::matchers::path("/leads/L1/status"))
            .and(wiremock::matchers::body_json(
                serde_json::json!({"status": "qualified"}),
            ))
            .respond_with(wiremock::ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let service = TransitionService::new(Some(mock_sync(&server).await));
        let store = sample_store();

        let outcome = service.attempt(&store, &LeadId::from("L1"), Some(StageId::Qualified));

        // The local update is visible before the sync resolves.
        assert!(outcome.changed());
        assert!(outcome.store.by_stage(StageId::New).is_empty());
        let qualified = outcome.store.by_stage(StageId::Qualified);
        assert_eq!(qualified.len(), 1);
        assert_eq!(qualified[0].id.as_str(), "L1");
        assert_eq!(
            outcome.committed,
            Some(Committed {
                lead: LeadId::from("L1"),
                from: StageId::New,
                to: StageId::Qualified,
            })
        );

        outcome.sync.expect("sync dispatched").await.unwrap();
    }

    #[tokio::test]
    async fn same_column_drop_is_idempotent_and_silent() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("PUT"))
            .respond_with(wiremock::ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let service = TransitionService::new(Some(mock_sync(&server).await));
        let store = sample_store();

        let outcome = service.attempt(&store, &LeadId::from("L1"), Some(StageId::New));

        assert!(!outcome.changed());
        assert!(outcome.store.ptr_eq(&store));
        assert!(outcome.sync.is_none());
    }

    #[tokio::test]
    async fn release_outside_columns_is_a_noop() {
        let service = TransitionService::new(None);
        let store = sample_store();

        let outcome = service.attempt(&store, &LeadId::from("L1"), None);
        assert!(outcome.store.ptr_eq(&store));
        assert!(outcome.committed.is_none());
    }

    #[tokio::test]
    async fn unknown_lead_is_a_noop() {
        let service = TransitionService::new(None);
        let store = sample_store();

        let outcome = service.attempt(&store, &LeadId::from("missing"), Some(StageId::Qualified));
        assert!(outcome.store.ptr_eq(&store));
        assert!(outcome.committed.is_none());
    }

    #[tokio::test]
    async fn sync_failure_does_not_roll_back() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("PUT"))
            .respond_with(wiremock::ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let service = TransitionService::new(Some(mock_sync(&server).await));
        let store = sample_store();

        let outcome = service.attempt(&store, &LeadId::from("L1"), Some(StageId::Qualified));
        assert!(outcome.changed());

        // Let the rejection arrive, then check nothing moved back.
        outcome.sync.expect("sync dispatched").await.unwrap();
        assert_eq!(outcome.store.by_stage(StageId::Qualified).len(), 1);
        assert!(outcome.store.by_stage(StageId::New).is_empty());
    }

    #[tokio::test]
    async fn listener_fires_once_per_commit_only() {
        let count = Arc::new(AtomicUsize::new(0));
        let service = TransitionService::new(None)
            .with_listener(Box::new(CountingListener(Arc::clone(&count))));
        let store = sample_store();

        let outcome = service.attempt(&store, &LeadId::from("L1"), Some(StageId::Qualified));
        assert_eq!(count.load(Ordering::SeqCst), 1);

        // No-ops never reach the listener.
        service.attempt(&outcome.store, &LeadId::from("L1"), Some(StageId::Qualified));
        service.attempt(&outcome.store, &LeadId::from("L1"), None);
        service.attempt(&outcome.store, &LeadId::from("missing"), Some(StageId::New));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn without_endpoint_commits_stay_local() {
        let service = TransitionService::new(None);
        let store = sample_store();

        let outcome = service.attempt(&store, &LeadId::from("L1"), Some(StageId::ClosedWon));
        assert!(outcome.changed());
        assert!(outcome.sync.is_none());
    }

    #[tokio::test]
    async fn last_local_write_wins_over_sync_ordering() {
        let server = wiremock::MockServer::start().await;
        // The first update's confirmation is slower than the second's.
        wiremock::Mock::given(wiremock::matchers::method("PUT"))
            .and(wiremock::matchers::body_json(
                serde_json::json!({"status": "qualified"}),
            ))
            .respond_with(
                wiremock::ResponseTemplate::new(200)
                    .set_delay(std::time::Duration::from_millis(150)),
            )
            .mount(&server)
            .await;
        wiremock::Mock::given(wiremock::matchers::method("PUT"))
            .respond_with(wiremock::ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let service = TransitionService::new(Some(mock_sync(&server).await));
        let store = sample_store();
        let id = LeadId::from("L1");

        let first = service.attempt(&store, &id, Some(StageId::Qualified));
        let second = service.attempt(&first.store, &id, Some(StageId::ClosedWon));

        // Both in-flight syncs resolve, slow one last; the rendered stage
        // is still the one written last locally.
        second.sync.expect("second dispatched").await.unwrap();
        first.sync.expect("first dispatched").await.unwrap();

        let lead = second.store.get(&id).expect("L1");
        assert_eq!(lead.status, StageId::ClosedWon);
    }
}
