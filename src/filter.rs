//! Legitimacy filter (§4.1): suppresses transactions touching accounts that
//! are almost certainly payroll, rent, vendor, utility, or merchant accounts,
//! which would otherwise produce dense fan-in/fan-out false positives.

use crate::config;
use crate::index::AccountStats;
use crate::parsed::ParsedTransaction;
use indexmap::IndexSet;

/// Coefficient of variation of a sequence of amounts: `stddev / mean`.
/// Returns infinity when the mean is non-positive so any `< threshold`
/// comparison against it fails, per "if μ = 0 the signature fails".
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::INFINITY;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    if mean <= 0.0 {
        return f64::INFINITY;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt() / mean
}

/// `min(sent, received) / max(sent, received)`, or 0 when either side is 0.
pub fn flow_ratio(total_sent: f64, total_received: f64) -> f64 {
    if total_sent == 0.0 || total_received == 0.0 {
        return 0.0;
    }
    let (lo, hi) = if total_sent < total_received {
        (total_sent, total_received)
    } else {
        (total_received, total_sent)
    };
    lo / hi
}

fn name_match(account_id: &str) -> bool {
    let upper = account_id.to_uppercase();
    config::LEGITIMACY_KEYWORDS.iter().any(|kw| upper.contains(kw))
}

/// Applies the five classification rules of §4.1 to one account's stats.
pub fn is_legitimate(account_id: &str, stats: &AccountStats) -> bool {
    if name_match(account_id) {
        return true;
    }

    let unique_senders = stats.unique_senders.len();
    let unique_receivers = stats.unique_receivers.len();
    let flow = flow_ratio(stats.total_sent, stats.total_received);

    // Rule 2: payroll signature, one-directional.
    if unique_receivers >= config::LEGITIMACY_DIRECTIONAL_MIN_COUNTERPARTIES
        && stats.send_count >= config::LEGITIMACY_DIRECTIONAL_MIN_TRANSACTIONS
        && coefficient_of_variation(&stats.sent_amounts) < config::LEGITIMACY_CV_THRESHOLD
        && flow < config::LEGITIMACY_FLOW_RATIO_THRESHOLD
    {
        return true;
    }

    // Rule 3: rent-collector signature, one-directional.
    if unique_senders >= config::LEGITIMACY_DIRECTIONAL_MIN_COUNTERPARTIES
        && stats.receive_count >= config::LEGITIMACY_DIRECTIONAL_MIN_TRANSACTIONS
        && coefficient_of_variation(&stats.received_amounts) < config::LEGITIMACY_CV_THRESHOLD
        && flow < config::LEGITIMACY_FLOW_RATIO_THRESHOLD
    {
        return true;
    }

    // Rule 4: merchant signature.
    if unique_senders >= config::LEGITIMACY_MERCHANT_MIN_SENDERS
        && unique_receivers <= config::LEGITIMACY_MERCHANT_MAX_RECEIVERS
        && stats.total_received > config::LEGITIMACY_MERCHANT_RECEIVED_MULTIPLE * stats.total_sent
    {
        return true;
    }

    // Rule 5: pure payer signature.
    if unique_receivers >= config::LEGITIMACY_PAYER_MIN_RECEIVERS
        && unique_senders <= config::LEGITIMACY_PAYER_MAX_SENDERS
        && stats.total_sent > config::LEGITIMACY_PAYER_SENT_MULTIPLE * stats.total_received
    {
        return true;
    }

    false
}

/// Classifies every account in `universe` against the unfiltered stats table,
/// then drops every transaction that touches a legitimate account.
///
/// Returns the legitimate-account set and the filtered transaction list,
/// both required downstream by the indexing and detection stages.
pub fn apply(
    universe: &IndexSet<String>,
    unfiltered_stats: &indexmap::IndexMap<String, AccountStats>,
    transactions: &[ParsedTransaction],
) -> (IndexSet<String>, Vec<ParsedTransaction>) {
    let mut legitimate = IndexSet::new();
    let default_stats = AccountStats::default();
    for account in universe {
        let stats = unfiltered_stats.get(account).unwrap_or(&default_stats);
        if is_legitimate(account, stats) {
            legitimate.insert(account.clone());
        }
    }

    let filtered: Vec<ParsedTransaction> = transactions
        .iter()
        .filter(|tx| !legitimate.contains(&tx.sender_id) && !legitimate.contains(&tx.receiver_id))
        .cloned()
        .collect();

    (legitimate, filtered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cv_of_empty_is_infinite() {
        assert!(coefficient_of_variation(&[]).is_infinite());
    }

    #[test]
    fn cv_of_constant_sequence_is_zero() {
        assert_eq!(coefficient_of_variation(&[10.0, 10.0, 10.0]), 0.0);
    }

    #[test]
    fn flow_ratio_zero_when_one_sided() {
        assert_eq!(flow_ratio(100.0, 0.0), 0.0);
        assert_eq!(flow_ratio(0.0, 100.0), 0.0);
    }

    #[test]
    fn flow_ratio_symmetric() {
        assert_eq!(flow_ratio(50.0, 100.0), 0.5);
        assert_eq!(flow_ratio(100.0, 50.0), 0.5);
    }

    #[test]
    fn name_match_is_case_insensitive_substring() {
        assert!(name_match("acme_corp_payroll"));
        assert!(name_match("BIG_GROCERY_STORE_7"));
        assert!(!name_match("ALICE"));
    }
}
