//! Applies one wire event to the graph store.

use std::collections::BTreeSet;

use tracing::debug;

use super::event::Event;
use super::graph::GraphStore;
use super::identity::UserId;

/// Which users an apply created or mutated. Drives logging and tests; the
/// store itself carries all state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub touched: BTreeSet<UserId>,
}

/// Folds one event into the store, in place.
///
/// `seq` is the ingestion sequence index assigned by the driver; it becomes
/// the ordering key of any purchase recorded here.
///
/// - purchase: create-if-missing, append to the purchase history
/// - befriend: symmetric set-like add, repeats are no-ops
/// - unfriend: per-side removal; a side naming a never-seen id is a no-op
pub fn apply_event(store: &mut GraphStore, event: &Event, seq: u64) -> ApplyOutcome {
    let mut outcome = ApplyOutcome::default();
    match event {
        Event::Purchase {
            id,
            timestamp,
            amount,
        } => {
            store
                .get_or_create(id)
                .record_purchase(seq, timestamp.clone(), amount.value());
            outcome.touched.insert(id.clone());
        }
        Event::Befriend { id1, id2 } => {
            if store.get_or_create(id1).befriend(id2.clone()) {
                outcome.touched.insert(id1.clone());
            }
            if store.get_or_create(id2).befriend(id1.clone()) {
                outcome.touched.insert(id2.clone());
            }
        }
        Event::Unfriend { id1, id2 } => {
            for (owner, other) in [(id1, id2), (id2, id1)] {
                match store.get_mut(owner) {
                    Some(node) => {
                        if node.unfriend(other) {
                            outcome.touched.insert(owner.clone());
                        }
                    }
                    None => debug!(user = %owner, "unfriend referencing unknown user ignored"),
                }
            }
        }
    }
    outcome
}
