//! Smurfing detection (§4.4): fan-in/fan-out hub discovery with a 72-hour
//! temporal-cluster flag. Runs on the **unfiltered** transaction set — see
//! SPEC_FULL.md §3 item 1 for why that is intentional, not an oversight.

use crate::config;
use crate::index::GraphIndex;
use crate::parsed::ParsedTransaction;

/// One fan-in or fan-out hub: the hub account plus its counterparties in
/// first-observed order, and whether their activity clustered within the
/// temporal window.
#[derive(Debug, Clone, PartialEq)]
pub struct HubEntry {
    pub hub: String,
    pub counterparties: Vec<String>,
    pub temporal: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmurfingResult {
    pub fan_in: Vec<HubEntry>,
    pub fan_out: Vec<HubEntry>,
}

pub fn detect_smurfing(index: &GraphIndex, transactions: &[ParsedTransaction]) -> SmurfingResult {
    let fan_in = detect_hubs(&index.reverse, transactions);
    let fan_out = detect_hubs(&index.adjacency, transactions);
    SmurfingResult { fan_in, fan_out }
}

/// `grouped` is either the receiver-keyed reverse index (for fan-in) or the
/// sender-keyed forward index (for fan-out) — structurally identical.
fn detect_hubs(
    grouped: &indexmap::IndexMap<String, indexmap::IndexMap<String, Vec<usize>>>,
    transactions: &[ParsedTransaction],
) -> Vec<HubEntry> {
    let mut hubs = Vec::new();

    for (hub, counterparties) in grouped {
        if counterparties.len() < config::HUB_MIN_COUNTERPARTIES {
            continue;
        }

        let mut events: Vec<(i64, String)> = Vec::new();
        for (counterparty, tx_indices) in counterparties {
            for &idx in tx_indices {
                if let Some(ts) = transactions[idx].timestamp_ms {
                    events.push((ts, counterparty.clone()));
                }
            }
        }
        events.sort_by_key(|(ts, _)| *ts);

        hubs.push(HubEntry {
            hub: hub.clone(),
            counterparties: counterparties.keys().cloned().collect(),
            temporal: has_temporal_cluster(&events),
        });
    }

    hubs
}

/// True if any 72-hour window anchored at an actual event timestamp contains
/// at least `HUB_MIN_COUNTERPARTIES` distinct counterparties (§4.4 step 3).
/// `events` must be sorted ascending by timestamp.
fn has_temporal_cluster(events: &[(i64, String)]) -> bool {
    let window_ms = config::TEMPORAL_WINDOW_HOURS * 3_600_000;
    let n = events.len();
    let mut right = 0usize;
    let mut counts: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();
    let mut distinct = 0usize;
    let mut max_distinct = 0usize;

    for left in 0..n {
        while right < n && events[right].0 <= events[left].0 + window_ms {
            let counterparty = events[right].1.as_str();
            let count = counts.entry(counterparty).or_insert(0);
            *count += 1;
            if *count == 1 {
                distinct += 1;
            }
            right += 1;
        }
        max_distinct = max_distinct.max(distinct);

        let counterparty = events[left].1.as_str();
        if let Some(count) = counts.get_mut(counterparty) {
            *count -= 1;
            if *count == 0 {
                distinct -= 1;
                counts.remove(counterparty);
            }
        }
    }

    max_distinct >= config::HUB_MIN_COUNTERPARTIES
}

/// Distinct hub accounts across both directions, used by the scoring stage
/// to look up an account's temporal flag without inheriting it from peers.
pub fn hub_index(result: &SmurfingResult) -> indexmap::IndexMap<String, bool> {
    let mut idx = indexmap::IndexMap::new();
    for entry in result.fan_in.iter().chain(result.fan_out.iter()) {
        idx.entry(entry.hub.clone())
            .and_modify(|t: &mut bool| *t = *t || entry.temporal)
            .or_insert(entry.temporal);
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temporal_cluster_detects_dense_window() {
        let events: Vec<(i64, String)> = (0..10)
            .map(|i| (i * 3_600_000, format!("S{i}")))
            .collect();
        assert!(has_temporal_cluster(&events));
    }

    #[test]
    fn temporal_cluster_false_when_spread_out() {
        let events: Vec<(i64, String)> = (0..10)
            .map(|i| (i * 100 * 3_600_000, format!("S{i}")))
            .collect();
        assert!(!has_temporal_cluster(&events));
    }

    #[test]
    fn temporal_cluster_false_with_repeated_counterparty() {
        // same sender 10 times within the window: only 1 distinct counterparty
        let events: Vec<(i64, String)> = (0..10).map(|i| (i * 3_600_000, "S0".to_string())).collect();
        assert!(!has_temporal_cluster(&events));
    }
}
