//! The in-memory social graph.
//!
//! GraphStore: id -> UserNode, insert-only at the key level
//! UserNode: insertion-ordered friend list + append-only purchase history

use std::collections::BTreeMap;

use super::identity::UserId;

/// One recorded purchase.
///
/// `seq` is the ingestion sequence index assigned by the driver. It is the
/// primary ordering key for window selection; the timestamp string is
/// carried verbatim and never parsed.
#[derive(Clone, Debug, PartialEq)]
pub struct Purchase {
    pub seq: u64,
    pub timestamp: String,
    pub amount: f64,
}

/// A participant: who they know and what they bought.
///
/// Friend order is insertion order and otherwise immaterial. Purchases are
/// append-only, in arrival order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserNode {
    friends: Vec<UserId>,
    purchases: Vec<Purchase>,
}

impl UserNode {
    pub fn friends(&self) -> &[UserId] {
        &self.friends
    }

    pub fn purchases(&self) -> &[Purchase] {
        &self.purchases
    }

    pub fn is_friend(&self, id: &UserId) -> bool {
        self.friends.iter().any(|f| f == id)
    }

    /// Set-like add: returns false (and changes nothing) if `id` is already
    /// a friend. Repeated befriend events are no-ops.
    pub(crate) fn befriend(&mut self, id: UserId) -> bool {
        if self.is_friend(&id) {
            false
        } else {
            self.friends.push(id);
            true
        }
    }

    /// Removes `id` from the friend list if present.
    pub(crate) fn unfriend(&mut self, id: &UserId) -> bool {
        match self.friends.iter().position(|f| f == id) {
            Some(pos) => {
                self.friends.remove(pos);
                true
            }
            None => false,
        }
    }

    pub(crate) fn record_purchase(&mut self, seq: u64, timestamp: String, amount: f64) {
        self.purchases.push(Purchase {
            seq,
            timestamp,
            amount,
        });
    }
}

/// Owned store of every node seen so far.
///
/// Nodes enter exclusively through `get_or_create` and are never removed;
/// unfriend only removes edges. Key iteration is ascending id order, which
/// keeps report output deterministic.
#[derive(Clone, Debug, Default)]
pub struct GraphStore {
    nodes: BTreeMap<UserId, UserNode>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the node for `id`, creating an empty one on first reference.
    /// This is the only way nodes enter the store.
    pub fn get_or_create(&mut self, id: &UserId) -> &mut UserNode {
        self.nodes.entry(id.clone()).or_default()
    }

    pub fn get(&self, id: &UserId) -> Option<&UserNode> {
        self.nodes.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &UserId) -> Option<&mut UserNode> {
        self.nodes.get_mut(id)
    }

    pub fn contains(&self, id: &UserId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All known ids, ascending.
    pub fn user_ids(&self) -> impl Iterator<Item = &UserId> {
        self.nodes.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(s: &str) -> UserId {
        UserId::new(s).unwrap()
    }

    #[test]
    fn get_or_create_reuses_existing_node() {
        let mut store = GraphStore::new();
        store.get_or_create(&uid("a")).record_purchase(1, "t1".into(), 5.0);
        store.get_or_create(&uid("a")).record_purchase(2, "t2".into(), 6.0);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&uid("a")).unwrap().purchases().len(), 2);
    }

    #[test]
    fn purchases_keep_arrival_order() {
        let mut store = GraphStore::new();
        let node = store.get_or_create(&uid("a"));
        for (seq, amount) in [(1, 10.0), (2, 20.0), (3, 30.0)] {
            node.record_purchase(seq, format!("t{seq}"), amount);
        }

        let amounts: Vec<f64> = node.purchases().iter().map(|p| p.amount).collect();
        assert_eq!(amounts, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn befriend_is_set_like() {
        let mut node = UserNode::default();
        assert!(node.befriend(uid("b")));
        assert!(!node.befriend(uid("b")));
        assert_eq!(node.friends(), &[uid("b")]);
    }

    #[test]
    fn unfriend_absent_id_is_noop() {
        let mut node = UserNode::default();
        node.befriend(uid("b"));
        assert!(!node.unfriend(&uid("c")));
        assert_eq!(node.friends(), &[uid("b")]);
    }
}
