//! Suspicion scoring (§4.7): composite per-account score from detected
//! patterns, cycle multiplicity, temporal flags, and flow balance.

use crate::config;
use crate::filter::flow_ratio;
use crate::index::AccountStats;
use crate::models::PatternLabel;
use crate::rings::RingBook;
use indexmap::{IndexMap, IndexSet};

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Computes the composite suspicion score for one ring-bearing account.
/// `unfiltered_stats` supplies the flow-balance ratio (§2 step 8 "flow
/// balance"), consistent with the rest of the account's public projection.
pub fn score_account(
    account: &str,
    patterns: &IndexSet<PatternLabel>,
    book: &RingBook,
    hub_temporal: &IndexMap<String, bool>,
    unfiltered_stats: &IndexMap<String, AccountStats>,
) -> f64 {
    let mut score = 0.0;

    let is_cycle = patterns.iter().any(|p| {
        matches!(
            p,
            PatternLabel::CycleLength3 | PatternLabel::CycleLength4 | PatternLabel::CycleLength5
        )
    });
    if is_cycle {
        score += config::SCORE_CYCLE_BASE;
        let cycle_count = book.cycle_ring_count(account) as u32;
        let bonus_multiples = cycle_count.saturating_sub(1).min(config::SCORE_CYCLE_MULTIPLICITY_CAP);
        score += bonus_multiples as f64 * config::SCORE_CYCLE_MULTIPLICITY_BONUS;
    }

    if patterns.contains(&PatternLabel::FanIn) {
        score += config::SCORE_FAN_IN;
    }
    if patterns.contains(&PatternLabel::FanOut) {
        score += config::SCORE_FAN_OUT;
    }
    if patterns.contains(&PatternLabel::ShellNetwork) {
        score += config::SCORE_SHELL_NETWORK;
    }

    if hub_temporal.get(account).copied().unwrap_or(false) {
        score += config::SCORE_TEMPORAL;
    }

    if let Some(stats) = unfiltered_stats.get(account) {
        if stats.total_sent > 0.0 && stats.total_received > 0.0 {
            let ratio = flow_ratio(stats.total_sent, stats.total_received);
            if ratio > config::SCORE_FLOW_BALANCE_MIN && ratio < config::SCORE_FLOW_BALANCE_MAX {
                score += config::SCORE_FLOW_BALANCE;
            }
        }
    }

    round1(score.min(config::SUSPICION_SCORE_CAP))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PatternType;
    use crate::rings::assemble;

    #[test]
    fn pure_3_cycle_scores_35() {
        let cycles = vec![vec!["A".to_string(), "B".to_string(), "C".to_string()]];
        let book = assemble(cycles, vec![], vec![], vec![]);
        let patterns: IndexSet<PatternLabel> = [PatternLabel::CycleLength3].into_iter().collect();
        let hub_temporal = IndexMap::new();
        let mut stats = IndexMap::new();
        let mut s = AccountStats::default();
        s.total_sent = 100.0;
        s.total_received = 100.0;
        stats.insert("A".to_string(), s);

        let score = score_account("A", &patterns, &book, &hub_temporal, &stats);
        // ratio == 1.0 is not < 1.0, so the flow-balance bonus does not apply.
        assert_eq!(score, 35.0);
        assert_eq!(book.rings[0].pattern_type, PatternType::Cycle);
    }

    #[test]
    fn score_caps_at_100() {
        let cycles = vec![
            vec!["A".to_string(), "B".to_string(), "C".to_string()],
            vec!["A".to_string(), "D".to_string(), "E".to_string()],
            vec!["A".to_string(), "F".to_string(), "G".to_string()],
            vec!["A".to_string(), "H".to_string(), "I".to_string()],
        ];
        let book = assemble(cycles, vec![], vec![], vec![]);
        let patterns: IndexSet<PatternLabel> = [
            PatternLabel::CycleLength3,
            PatternLabel::FanIn,
            PatternLabel::FanOut,
            PatternLabel::ShellNetwork,
        ]
        .into_iter()
        .collect();
        let mut hub_temporal = IndexMap::new();
        hub_temporal.insert("A".to_string(), true);
        let stats = IndexMap::new();

        let score = score_account("A", &patterns, &book, &hub_temporal, &stats);
        assert_eq!(score, 100.0);
    }
}
