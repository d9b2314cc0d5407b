/// # Modules Overview
///
/// This crate ingests a batch of directed, amount-and-timestamp annotated
/// transfers between accounts and detects three money-muling patterns:
/// circular fund routing, smurfing, and layered shell networks.

/// `analyze`
///
/// The single core entry point. Wires the legitimacy filter, the three
/// detectors, ring assembly, scoring, and projection into one synchronous,
/// infallible pass over a transaction batch.
///
/// Example usage:
/// ```rust,ignore
/// let result = ring_ledger::analyze::analyze(&transactions);
/// println!("{} fraud rings detected", result.summary.fraud_rings_detected);
/// ```
pub mod analyze;

pub mod config;

/// `error`
///
/// The one recoverable error type this crate exposes, scoped to the CSV
/// ingestion convenience in [`ingest`]. The detection core never fails.
pub mod error;

/// `ingest`
///
/// Convenience CSV reader matching the column contract callers are expected
/// to uphold (`transaction_id, sender_id, receiver_id, amount, timestamp`).
pub mod ingest;

/// `models`
///
/// Defines the data structures crossing the core's boundary: `Transaction`
/// input, and the `AnalysisResult` output with its `SuspiciousAccount`,
/// `Ring`, `Node`, `Edge`, and `Summary` members.
pub mod models;

mod cycles;
mod filter;
mod index;
mod parsed;
mod rings;
mod scoring;
mod shell;
mod smurfing;
