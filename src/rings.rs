//! Ring assembly & deduplication (§4.6): turns detector output into the
//! final, uniquely-identified `Ring` list and the per-account bookkeeping
//! the scoring and projection stages need.

use crate::config;
use crate::models::{PatternLabel, PatternType, Ring};
use crate::smurfing::HubEntry;
use indexmap::{IndexMap, IndexSet};

/// Per-account bookkeeping accumulated while rings are accepted, in ring
/// acceptance order.
#[derive(Debug, Default)]
pub struct RingBook {
    pub rings: Vec<Ring>,
    pub account_ring_ids: IndexMap<String, Vec<String>>,
    pub account_patterns: IndexMap<String, IndexSet<PatternLabel>>,
}

impl RingBook {
    pub fn cycle_ring_count(&self, account: &str) -> usize {
        let Some(ring_ids) = self.account_ring_ids.get(account) else {
            return 0;
        };
        ring_ids
            .iter()
            .filter(|rid| {
                self.rings
                    .iter()
                    .find(|r| &r.ring_id == *rid)
                    .map(|r| r.pattern_type == PatternType::Cycle)
                    .unwrap_or(false)
            })
            .count()
    }

    pub fn first_ring_id(&self, account: &str) -> Option<&String> {
        self.account_ring_ids.get(account).and_then(|ids| ids.first())
    }
}

fn round1(value: f64) -> f64 {
    ((value * 10.0).round() / 10.0).min(config::RISK_SCORE_CAP)
}

struct Candidate {
    pattern_type: PatternType,
    members: Vec<String>,
    risk_score: f64,
    member_labels: Vec<PatternLabel>,
}

/// Accepts candidates in the order cycles -> fan-in -> fan-out -> shell
/// networks, skipping any whose (pattern_type, sorted member set) has
/// already been accepted, and assigns contiguous `RING_NNN` identifiers.
pub fn assemble(
    cycles: Vec<Vec<String>>,
    fan_in: Vec<HubEntry>,
    fan_out: Vec<HubEntry>,
    shells: Vec<Vec<String>>,
) -> RingBook {
    let mut candidates = Vec::new();

    for cycle in cycles {
        let label = PatternLabel::for_cycle_length(cycle.len());
        let risk = round1(config::CYCLE_RISK_BASE + config::CYCLE_RISK_PER_MEMBER * cycle.len() as f64);
        candidates.push(Candidate {
            pattern_type: PatternType::Cycle,
            members: cycle,
            risk_score: risk,
            member_labels: vec![label],
        });
    }

    for hub in &fan_in {
        candidates.push(hub_candidate(hub, PatternType::FanIn, PatternLabel::FanIn));
    }
    for hub in &fan_out {
        candidates.push(hub_candidate(hub, PatternType::FanOut, PatternLabel::FanOut));
    }

    for chain in shells {
        let risk = round1(config::SHELL_RISK_BASE + config::SHELL_RISK_PER_MEMBER * chain.len() as f64);
        candidates.push(Candidate {
            pattern_type: PatternType::ShellNetwork,
            members: chain,
            risk_score: risk,
            member_labels: vec![PatternLabel::ShellNetwork],
        });
    }

    let mut book = RingBook::default();
    let mut seen_keys: IndexSet<String> = IndexSet::new();
    let mut counter: u32 = 1;

    for candidate in candidates {
        let mut sorted_members = candidate.members.clone();
        sorted_members.sort();
        let key = format!("{}::{}", candidate.pattern_type.as_str(), sorted_members.join(","));
        if !seen_keys.insert(key) {
            continue;
        }

        let ring_id = format!("RING_{:03}", counter);
        counter += 1;

        for member in &candidate.members {
            book.account_ring_ids
                .entry(member.clone())
                .or_default()
                .push(ring_id.clone());
            let patterns = book.account_patterns.entry(member.clone()).or_default();
            for label in &candidate.member_labels {
                patterns.insert(*label);
            }
        }

        book.rings.push(Ring {
            ring_id,
            pattern_type: candidate.pattern_type,
            member_accounts: candidate.members,
            risk_score: candidate.risk_score,
        });
    }

    book
}

fn hub_candidate(hub: &HubEntry, pattern_type: PatternType, label: PatternLabel) -> Candidate {
    let mut members = Vec::with_capacity(hub.counterparties.len() + 1);
    members.push(hub.hub.clone());
    members.extend(hub.counterparties.iter().cloned());

    let bonus = if hub.temporal {
        config::HUB_RISK_TEMPORAL_BONUS
    } else {
        config::HUB_RISK_NON_TEMPORAL_BONUS
    };
    let risk = round1(
        config::HUB_RISK_BASE + bonus + config::HUB_RISK_PER_COUNTERPARTY * hub.counterparties.len() as f64,
    );

    Candidate {
        pattern_type,
        members,
        risk_score: risk,
        member_labels: vec![label],
    }
}
