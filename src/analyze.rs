//! Pipeline orchestration (§2): wires the legitimacy filter, the three
//! detectors, ring assembly, scoring, and projection into the single
//! `analyze` entry point.

use crate::cycles;
use crate::filter;
use crate::index::{self, AccountStats};
use crate::models::{
    AnalysisResult, Edge, Node, PatternLabel, Ring, Summary, SuspiciousAccount, Transaction,
};
use crate::parsed;
use crate::rings::{self as rings_mod, RingBook};
use crate::scoring;
use crate::shell;
use crate::smurfing;
use indexmap::{IndexMap, IndexSet};
use log::info;
use std::time::Instant;

/// Runs the full detection pipeline over a batch of transactions and returns
/// a complete, JSON-compatible result. Infallible: malformed input is the
/// caller's responsibility (§6/§7); this function never panics on it.
pub fn analyze(transactions: &[Transaction]) -> AnalysisResult {
    let start_time = Instant::now();

    let parsed_all = parsed::parse_all(transactions);
    let universe = index::build_universe(&parsed_all);
    info!("ingested {} transactions over {} accounts", parsed_all.len(), universe.len());

    let unfiltered_index = index::build_index(&parsed_all);

    let (legitimate, filtered_transactions) =
        filter::apply(&universe, &unfiltered_index.stats, &parsed_all);
    info!(
        "legitimacy filter: {} accounts flagged, {} of {} transactions removed",
        legitimate.len(),
        parsed_all.len() - filtered_transactions.len(),
        parsed_all.len()
    );

    if !parsed_all.is_empty() && filtered_transactions.is_empty() {
        info!("legitimacy filter removed every transaction; skipping detection");
        return empty_result(transactions, &universe, &legitimate, start_time);
    }

    let filtered_index = index::build_index(&filtered_transactions);
    let filtered_universe = index::build_universe(&filtered_transactions);

    let cycles = cycles::detect_cycles(&filtered_index.adjacency, &filtered_universe);
    info!("cycle detection: {} cycles found", cycles.len());

    let smurfing_result = smurfing::detect_smurfing(&unfiltered_index, &parsed_all);
    info!(
        "smurfing detection: {} fan-in hubs, {} fan-out hubs",
        smurfing_result.fan_in.len(),
        smurfing_result.fan_out.len()
    );

    let cycle_nodes: IndexSet<String> = cycles.iter().flatten().cloned().collect();
    let shells = shell::detect_shell_networks(
        &filtered_index.adjacency,
        &filtered_index.stats,
        &cycle_nodes,
        &filtered_universe,
    );
    info!("shell-network detection: {} chains found", shells.len());

    let book = rings_mod::assemble(
        cycles,
        smurfing_result.fan_in.clone(),
        smurfing_result.fan_out.clone(),
        shells,
    );
    info!("ring assembly: {} unique rings accepted", book.rings.len());

    let hub_temporal = smurfing::hub_index(&smurfing_result);

    let suspicious_accounts = build_suspicious_accounts(&book, &hub_temporal, &unfiltered_index.stats);
    info!("scoring: {} suspicious accounts", suspicious_accounts.len());

    let nodes = build_nodes(&universe, &legitimate, &book, &suspicious_accounts, &unfiltered_index.stats);
    let edges = build_edges(transactions);

    let processing_time_seconds = round3(start_time.elapsed().as_secs_f64());

    AnalysisResult {
        summary: Summary {
            total_accounts_analyzed: universe.len(),
            suspicious_accounts_flagged: suspicious_accounts.len(),
            fraud_rings_detected: book.rings.len(),
            legitimate_accounts_filtered: legitimate.len(),
            processing_time_seconds,
        },
        suspicious_accounts,
        fraud_rings: book.rings,
        nodes,
        edges,
    }
}

fn build_suspicious_accounts(
    book: &RingBook,
    hub_temporal: &IndexMap<String, bool>,
    unfiltered_stats: &IndexMap<String, AccountStats>,
) -> Vec<SuspiciousAccount> {
    let mut accounts: Vec<SuspiciousAccount> = book
        .account_ring_ids
        .keys()
        .map(|account| {
            let patterns = book
                .account_patterns
                .get(account)
                .cloned()
                .unwrap_or_default();
            let score = scoring::score_account(account, &patterns, book, hub_temporal, unfiltered_stats);
            SuspiciousAccount {
                account_id: account.clone(),
                suspicion_score: score,
                detected_patterns: patterns.into_iter().collect(),
                ring_id: book.first_ring_id(account).cloned().unwrap_or_default(),
            }
        })
        .collect();

    accounts.sort_by(|a, b| {
        b.suspicion_score
            .partial_cmp(&a.suspicion_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    accounts
}

fn build_nodes(
    universe: &IndexSet<String>,
    legitimate: &IndexSet<String>,
    book: &RingBook,
    suspicious_accounts: &[SuspiciousAccount],
    unfiltered_stats: &IndexMap<String, AccountStats>,
) -> Vec<Node> {
    let suspicious_scores: IndexMap<&str, f64> = suspicious_accounts
        .iter()
        .map(|a| (a.account_id.as_str(), a.suspicion_score))
        .collect();

    universe
        .iter()
        .map(|account| {
            let is_legitimate = legitimate.contains(account);
            let patterns: Vec<PatternLabel> = if is_legitimate {
                vec![PatternLabel::LegitimateBusiness]
            } else {
                book.account_patterns
                    .get(account)
                    .cloned()
                    .unwrap_or_default()
                    .into_iter()
                    .collect()
            };
            let ring_ids = book.account_ring_ids.get(account).cloned().unwrap_or_default();
            let stats = unfiltered_stats.get(account);

            Node {
                id: account.clone(),
                suspicious: suspicious_scores.contains_key(account.as_str()),
                ring_ids,
                patterns,
                total_sent: stats.map(|s| s.total_sent).unwrap_or(0.0),
                total_received: stats.map(|s| s.total_received).unwrap_or(0.0),
                transaction_count: stats.map(|s| s.total_transactions()).unwrap_or(0),
                suspicion_score: suspicious_scores.get(account.as_str()).copied().unwrap_or(0.0),
            }
        })
        .collect()
}

fn build_edges(transactions: &[Transaction]) -> Vec<Edge> {
    transactions
        .iter()
        .map(|tx| Edge {
            source: tx.sender_id.clone(),
            target: tx.receiver_id.clone(),
            amount: tx.amount,
            timestamp: tx.timestamp.clone(),
            transaction_id: tx.transaction_id.clone(),
        })
        .collect()
}

fn empty_result(
    transactions: &[Transaction],
    universe: &IndexSet<String>,
    legitimate: &IndexSet<String>,
    start_time: Instant,
) -> AnalysisResult {
    let nodes = universe
        .iter()
        .map(|account| Node {
            id: account.clone(),
            suspicious: false,
            ring_ids: Vec::new(),
            patterns: if legitimate.contains(account) {
                vec![PatternLabel::LegitimateBusiness]
            } else {
                Vec::new()
            },
            total_sent: 0.0,
            total_received: 0.0,
            transaction_count: 0,
            suspicion_score: 0.0,
        })
        .collect();

    AnalysisResult {
        suspicious_accounts: Vec::new(),
        fraud_rings: Vec::<Ring>::new(),
        summary: Summary {
            total_accounts_analyzed: universe.len(),
            suspicious_accounts_flagged: 0,
            fraud_rings_detected: 0,
            legitimate_accounts_filtered: legitimate.len(),
            processing_time_seconds: round3(start_time.elapsed().as_secs_f64()),
        },
        nodes,
        edges: build_edges(transactions),
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(id: &str, from: &str, to: &str, amount: f64, ts: &str) -> Transaction {
        Transaction {
            transaction_id: id.to_string(),
            sender_id: from.to_string(),
            receiver_id: to.to_string(),
            amount,
            timestamp: ts.to_string(),
        }
    }

    #[test]
    fn pure_3_cycle_scenario() {
        let txs = vec![
            tx("T1", "A", "B", 100.0, "2024-01-01T00:00:00Z"),
            tx("T2", "B", "C", 100.0, "2024-01-01T01:00:00Z"),
            tx("T3", "C", "A", 100.0, "2024-01-01T02:00:00Z"),
        ];
        let result = analyze(&txs);

        assert_eq!(result.fraud_rings.len(), 1);
        assert_eq!(result.fraud_rings[0].ring_id, "RING_001");
        assert_eq!(result.fraud_rings[0].risk_score, 85.0);
        assert_eq!(result.suspicious_accounts.len(), 3);
        for account in &result.suspicious_accounts {
            assert_eq!(account.suspicion_score, 35.0);
        }
        assert_eq!(result.nodes.len(), 3);
        assert_eq!(result.edges.len(), 3);
    }

    #[test]
    fn legitimate_business_scenario() {
        let mut txs = Vec::new();
        for i in 1..=10 {
            txs.push(tx(
                &format!("T{i}"),
                "ACME_CORP_PAYROLL",
                &format!("E{i}"),
                2000.0,
                "2024-01-01T00:00:00Z",
            ));
        }
        let result = analyze(&txs);

        assert_eq!(result.fraud_rings.len(), 0);
        assert_eq!(result.suspicious_accounts.len(), 0);
        assert_eq!(result.nodes.len(), 11);
        assert_eq!(result.edges.len(), 10);
        let payroll_node = result.nodes.iter().find(|n| n.id == "ACME_CORP_PAYROLL").unwrap();
        assert_eq!(payroll_node.patterns, vec![PatternLabel::LegitimateBusiness]);
    }

    #[test]
    fn fan_in_hub_scenario() {
        let mut txs = Vec::new();
        for i in 1..=10 {
            txs.push(tx(
                &format!("T{i}"),
                &format!("S{i}"),
                "HUB",
                50.0,
                &format!("2024-01-01T{:02}:00:00Z", i % 24),
            ));
        }
        let result = analyze(&txs);

        assert_eq!(result.fraud_rings.len(), 1);
        assert_eq!(result.fraud_rings[0].pattern_type, crate::models::PatternType::FanIn);
    }

    #[test]
    fn dedup_across_dfs_roots() {
        let txs = vec![
            tx("T1", "A", "B", 10.0, "2024-01-01T00:00:00Z"),
            tx("T2", "B", "C", 10.0, "2024-01-01T01:00:00Z"),
            tx("T3", "C", "A", 10.0, "2024-01-01T02:00:00Z"),
        ];
        let result = analyze(&txs);
        assert_eq!(result.fraud_rings.len(), 1);
    }
}
