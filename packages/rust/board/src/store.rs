//! Immutable lead collection with snapshot semantics.
//!
//! A [`LeadStore`] is never mutated in place. Every write returns a new
//! store value; a write that changes nothing returns a snapshot sharing the
//! previous one's storage, which callers can detect with [`LeadStore::ptr_eq`]
//! and use to skip re-rendering and downstream sync.
//!
//! Leads are shared as `Arc<Lead>` so a write only reallocates the entry it
//! touches. All other entries in the new snapshot point at the same
//! allocations as before, giving the render layer a cheap card-level
//! unchanged check as well.

use std::sync::Arc;

use leadflow_shared::{Lead, LeadId, StageId};

/// An immutable snapshot of the lead collection.
///
/// Cloning is cheap (one `Arc` bump) and clones are indistinguishable from
/// the original under [`LeadStore::ptr_eq`].
#[derive(Debug, Clone, Default)]
pub struct LeadStore {
    leads: Arc<Vec<Arc<Lead>>>,
}

impl LeadStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a collection of leads.
    pub fn from_leads(leads: impl IntoIterator<Item = Lead>) -> Self {
        Self {
            leads: Arc::new(leads.into_iter().map(Arc::new).collect()),
        }
    }

    /// Number of leads in the snapshot.
    pub fn len(&self) -> usize {
        self.leads.len()
    }

    /// Whether the snapshot holds no leads.
    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }

    /// Iterate over all leads in store order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Lead>> {
        self.leads.iter()
    }

    /// Look up a lead by id.
    pub fn get(&self, id: &LeadId) -> Option<&Arc<Lead>> {
        self.leads.iter().find(|lead| &lead.id == id)
    }

    /// All leads currently in `stage`, in store order.
    ///
    /// A linear filter over the snapshot, recomputed on demand. Column
    /// membership is always derived from `Lead::status` here rather than
    /// kept in a second structure that could drift from it.
    pub fn by_stage(&self, stage: StageId) -> Vec<Arc<Lead>> {
        self.leads
            .iter()
            .filter(|lead| lead.status == stage)
            .cloned()
            .collect()
    }

    /// Snapshot with the lead `id` moved to `status`.
    ///
    /// Returns a snapshot sharing this one's storage (a no-op, observable
    /// via [`LeadStore::ptr_eq`]) when `id` is unknown or the lead is
    /// already in `status`. Otherwise the returned snapshot replaces the
    /// one affected entry and shares every other entry's allocation.
    pub fn set_status(&self, id: &LeadId, status: StageId) -> LeadStore {
        let changes = self
            .leads
            .iter()
            .any(|lead| &lead.id == id && lead.status != status);
        if !changes {
            return self.clone();
        }

        let leads = self
            .leads
            .iter()
            .map(|lead| {
                if &lead.id == id {
                    Arc::new(lead.with_status(status))
                } else {
                    Arc::clone(lead)
                }
            })
            .collect();

        Self { leads: Arc::new(leads) }
    }

    /// Whether two stores are the same snapshot (share storage).
    ///
    /// This is the no-op signal: `store.set_status(..)` returning a store
    /// for which `ptr_eq(&store)` holds means nothing changed and nothing
    /// downstream needs to run.
    pub fn ptr_eq(&self, other: &LeadStore) -> bool {
        Arc::ptr_eq(&self.leads, &other.leads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> LeadStore {
        LeadStore::from_leads([
            Lead::new("L1", "Acme Corp", StageId::New),
            Lead::new("L2", "Globex", StageId::New),
            Lead::new("L3", "Initech", StageId::Qualified),
        ])
    }

    #[test]
    fn by_stage_filters_on_status() {
        let store = sample_store();
        let new_leads = store.by_stage(StageId::New);
        assert_eq!(new_leads.len(), 2);
        assert!(new_leads.iter().all(|l| l.status == StageId::New));
        assert!(store.by_stage(StageId::ClosedWon).is_empty());
    }

    #[test]
    fn every_lead_sits_in_exactly_one_stage() {
        let store = sample_store();
        let total: usize = StageId::ALL
            .iter()
            .map(|stage| store.by_stage(*stage).len())
            .sum();
        assert_eq!(total, store.len());
    }

    #[test]
    fn set_status_moves_the_lead() {
        let store = sample_store();
        let moved = store.set_status(&LeadId::from("L1"), StageId::Qualified);

        assert!(!moved.ptr_eq(&store));
        assert!(moved.by_stage(StageId::New).iter().all(|l| l.id.as_str() != "L1"));
        assert!(
            moved
                .by_stage(StageId::Qualified)
                .iter()
                .any(|l| l.id.as_str() == "L1")
        );
        // The original snapshot is untouched.
        assert_eq!(store.by_stage(StageId::New).len(), 2);
    }

    #[test]
    fn set_status_refreshes_updated_at() {
        let store = sample_store();
        let before = store.get(&LeadId::from("L1")).expect("L1").updated_at;
        let moved = store.set_status(&LeadId::from("L1"), StageId::Contacted);
        let after = moved.get(&LeadId::from("L1")).expect("L1").updated_at;
        assert!(after >= before);
    }

    #[test]
    fn set_status_shares_untouched_entries() {
        let store = sample_store();
        let moved = store.set_status(&LeadId::from("L1"), StageId::Qualified);

        let before = store.get(&LeadId::from("L2")).expect("L2");
        let after = moved.get(&LeadId::from("L2")).expect("L2");
        assert!(Arc::ptr_eq(before, after));
    }

    #[test]
    fn same_stage_write_is_an_observable_noop() {
        let store = sample_store();
        let unchanged = store.set_status(&LeadId::from("L1"), StageId::New);
        assert!(unchanged.ptr_eq(&store));
    }

    #[test]
    fn unknown_id_write_is_an_observable_noop() {
        let store = sample_store();
        let unchanged = store.set_status(&LeadId::from("missing"), StageId::Qualified);
        assert!(unchanged.ptr_eq(&store));
    }

    #[test]
    fn clones_share_the_snapshot() {
        let store = sample_store();
        let clone = store.clone();
        assert!(clone.ptr_eq(&store));
    }
}
