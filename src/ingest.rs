//! CSV ingestion convenience (§6): parsing `transaction_id, sender_id,
//! receiver_id, amount, timestamp` rows is the caller's responsibility, not
//! the core's — but the shape of that responsibility is exactly a `csv`
//! reader loop, so this module supplies one for callers who want it.

use crate::error::AnalyzerError;
use crate::models::Transaction;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct TransactionRow {
    transaction_id: String,
    sender_id: String,
    receiver_id: String,
    amount: String,
    timestamp: String,
}

/// Reads a transactions CSV, discarding any row whose `amount` column fails
/// to parse as a finite number, and preserving file order.
pub fn read_transactions_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Transaction>, AnalyzerError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut transactions = Vec::new();

    for record in reader.deserialize::<TransactionRow>() {
        let row = record?;
        match row.amount.trim().parse::<f64>() {
            Ok(amount) if amount.is_finite() => transactions.push(Transaction {
                transaction_id: row.transaction_id,
                sender_id: row.sender_id,
                receiver_id: row.receiver_id,
                amount,
                timestamp: row.timestamp,
            }),
            _ => {
                log::warn!(
                    "discarding transaction {} with unparseable amount {:?}",
                    row.transaction_id,
                    row.amount
                );
            }
        }
    }

    Ok(transactions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_valid_rows_and_skips_bad_amount() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "transaction_id,sender_id,receiver_id,amount,timestamp").unwrap();
        writeln!(file, "T1,A,B,100.0,2024-01-01T00:00:00Z").unwrap();
        writeln!(file, "T2,B,C,not_a_number,2024-01-01T01:00:00Z").unwrap();
        writeln!(file, "T3,C,A,50.5,2024-01-01T02:00:00Z").unwrap();

        let transactions = read_transactions_csv(file.path()).unwrap();
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].transaction_id, "T1");
        assert_eq!(transactions[1].transaction_id, "T3");
    }
}
