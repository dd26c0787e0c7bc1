//! Reference-window statistics over a neighborhood's purchase history.

use std::collections::BTreeSet;

use super::graph::{GraphStore, Purchase};
use super::identity::UserId;

/// Flagging threshold: mean + SIGMA * population standard deviation.
const SIGMA: f64 = 3.0;

/// Outcome of evaluating one candidate amount.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Evaluation {
    pub mean: f64,
    pub sd: f64,
    /// Purchases actually used; may be fewer than the configured window.
    pub count: usize,
    pub anomalous: bool,
}

/// Evaluates `amount` against the neighborhood's reference window.
///
/// The window is the head of the combined purchase history when ordered by
/// ingestion sequence index ascending: the first `window` entries. Later
/// arrivals do not displace earlier ones. Returns `None` when the
/// neighborhood has no purchase history at all: nothing to compare against,
/// nothing to flag, never a division error.
///
/// Read-only: the store is not touched.
pub fn evaluate(
    store: &GraphStore,
    neighborhood: &BTreeSet<UserId>,
    window: usize,
    amount: f64,
) -> Option<Evaluation> {
    let amounts = window_amounts(store, neighborhood, window);
    let (mean, sd) = mean_sd(&amounts)?;
    Some(Evaluation {
        mean,
        sd,
        count: amounts.len(),
        anomalous: amount > mean + SIGMA * sd,
    })
}

/// Combined purchases of all neighborhood members, ordered by sequence
/// index, truncated to `window` entries.
fn window_amounts(
    store: &GraphStore,
    neighborhood: &BTreeSet<UserId>,
    window: usize,
) -> Vec<f64> {
    let mut combined: Vec<&Purchase> = neighborhood
        .iter()
        .filter_map(|id| store.get(id))
        .flat_map(|node| node.purchases())
        .collect();
    combined.sort_by_key(|p| p.seq);
    combined.truncate(window);
    combined.into_iter().map(|p| p.amount).collect()
}

/// Arithmetic mean and population standard deviation (divide by the count
/// used, not count - 1 and not the configured window).
fn mean_sd(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Some((mean, variance.sqrt()))
}
