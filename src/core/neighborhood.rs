//! Bounded-degree neighborhood resolution.

use std::collections::BTreeSet;

use super::graph::GraphStore;
use super::identity::UserId;

/// Ids reachable from `origin` within `degree` friendship hops.
///
/// Round 1 is the direct friend list; each further round expands the friend
/// lists of the ids newly reached in the round before, accumulating into the
/// result. The origin is not specially excluded: friendship edges are
/// symmetric, so any origin with a friend re-enters its own neighborhood at
/// degree 2 and its own purchases join the reference window.
///
/// Unknown origins and `degree == 0` resolve to the empty set.
pub fn resolve(store: &GraphStore, origin: &UserId, degree: u32) -> BTreeSet<UserId> {
    let mut reached = BTreeSet::new();
    if degree == 0 {
        return reached;
    }
    let Some(node) = store.get(origin) else {
        return reached;
    };

    let mut frontier: BTreeSet<UserId> = node.friends().iter().cloned().collect();
    reached.extend(frontier.iter().cloned());

    for _ in 1..degree {
        let mut next = BTreeSet::new();
        for id in &frontier {
            if let Some(node) = store.get(id) {
                next.extend(
                    node.friends()
                        .iter()
                        .filter(|f| !reached.contains(*f))
                        .cloned(),
                );
            }
        }
        if next.is_empty() {
            break;
        }
        reached.extend(next.iter().cloned());
        frontier = next;
    }

    reached
}
