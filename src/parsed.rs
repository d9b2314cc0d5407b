use crate::models::Transaction;

/// A transaction with its timestamp resolved to a millisecond epoch moment,
/// or `None` when the original string fails to parse.
///
/// Per the error-handling rules a malformed timestamp must not corrupt
/// adjacency or aggregate statistics — only temporal windowing is affected —
/// so every detector keeps carrying the transaction itself and only
/// consults `timestamp_ms` when it actually needs a moment in time.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTransaction {
    pub transaction_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub amount: f64,
    pub timestamp: String,
    pub timestamp_ms: Option<i64>,
}

pub fn parse_timestamp_ms(raw: &str) -> Option<i64> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.timestamp_millis())
}

pub fn parse_all(transactions: &[Transaction]) -> Vec<ParsedTransaction> {
    transactions
        .iter()
        .map(|tx| ParsedTransaction {
            transaction_id: tx.transaction_id.clone(),
            sender_id: tx.sender_id.clone(),
            receiver_id: tx.receiver_id.clone(),
            amount: tx.amount,
            timestamp: tx.timestamp.clone(),
            timestamp_ms: parse_timestamp_ms(&tx.timestamp),
        })
        .collect()
}
