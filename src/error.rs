use thiserror::Error;

/// The one fallible boundary this crate owns: the convenience CSV reader in
/// [`crate::ingest`]. The detection core itself (`analyze::analyze`) never
/// returns a `Result` — it has no recoverable error kinds.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("failed to read transactions CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to access transactions file: {0}")]
    Io(#[from] std::io::Error),
}
