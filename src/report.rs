//! Largest-network report: top users by neighborhood size.

use std::io::Write;

use crate::core::{GraphStore, UserId, resolve};

/// Writes the `top` users ranked by neighborhood size at `degree` as
/// fixed-width columns with a header line. Ranking is by size descending;
/// ties keep ascending id order.
pub fn write_network_report(
    out: &mut impl Write,
    store: &GraphStore,
    degree: u32,
    top: usize,
) -> std::io::Result<()> {
    let mut sizes: Vec<(&UserId, usize)> = store
        .user_ids()
        .map(|id| (id, resolve(store, id, degree).len()))
        .collect();
    // Stable sort on size only: equal sizes stay in ascending id order.
    sizes.sort_by(|a, b| b.1.cmp(&a.1));

    let shown = top.min(sizes.len());
    writeln!(out, "First {shown} largest networks (D = {degree}) are:")?;
    writeln!(out)?;
    writeln!(out, "{:<10} {:<10}", "id", "size")?;
    for (id, size) in sizes.into_iter().take(shown) {
        writeln!(out, "{:<10} {:<10}", id.as_str(), size)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Event, apply_event};

    fn befriend(store: &mut GraphStore, id1: &str, id2: &str) {
        let event: Event = serde_json::from_str(&format!(
            r#"{{"event_type":"befriend", "id1":"{id1}", "id2":"{id2}"}}"#
        ))
        .unwrap();
        apply_event(store, &event, 1);
    }

    fn render(store: &GraphStore, degree: u32, top: usize) -> String {
        let mut buf = Vec::new();
        write_network_report(&mut buf, store, degree, top).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn ranks_by_neighborhood_size() {
        // Star: hub knows a, b, c. At degree 1 the hub sees 3, the leaves
        // see 1 each.
        let mut store = GraphStore::new();
        for leaf in ["a", "b", "c"] {
            befriend(&mut store, "hub", leaf);
        }

        let report = render(&store, 1, 10);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "First 4 largest networks (D = 1) are:");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], format!("{:<10} {:<10}", "id", "size"));
        assert_eq!(lines[3], format!("{:<10} {:<10}", "hub", 3));
        // Ties between the leaves keep ascending id order.
        assert_eq!(lines[4], format!("{:<10} {:<10}", "a", 1));
        assert_eq!(lines[5], format!("{:<10} {:<10}", "b", 1));
        assert_eq!(lines[6], format!("{:<10} {:<10}", "c", 1));
    }

    #[test]
    fn caps_at_top_n() {
        let mut store = GraphStore::new();
        for leaf in ["a", "b", "c"] {
            befriend(&mut store, "hub", leaf);
        }

        let report = render(&store, 1, 2);
        assert!(report.starts_with("First 2 largest networks"));
        assert_eq!(report.lines().count(), 5);
    }

    #[test]
    fn empty_store_renders_header_only() {
        let store = GraphStore::new();
        let report = render(&store, 2, 10);
        assert!(report.starts_with("First 0 largest networks (D = 2) are:"));
        assert_eq!(report.lines().count(), 3);
    }
}
