mod analyze;
mod config;
mod error;
mod ingest;
mod models;

mod cycles;
mod filter;
mod index;
mod parsed;
mod rings;
mod scoring;
mod shell;
mod smurfing;

use log::{error, info};
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = env::args().skip(1);
    let Some(input_path) = args.next() else {
        error!("usage: ring_ledger <transactions.csv> [output.json]");
        return ExitCode::FAILURE;
    };
    let output_path = args.next();

    let transactions = match ingest::read_transactions_csv(&input_path) {
        Ok(transactions) => transactions,
        Err(e) => {
            error!("failed to read {}: {}", input_path, e);
            return ExitCode::FAILURE;
        }
    };
    info!("loaded {} transactions from {}", transactions.len(), input_path);

    let result = analyze::analyze(&transactions);
    info!(
        "analysis complete: {} suspicious accounts, {} fraud rings, {:.3}s",
        result.summary.suspicious_accounts_flagged,
        result.summary.fraud_rings_detected,
        result.summary.processing_time_seconds
    );

    let json = match serde_json::to_string_pretty(&result) {
        Ok(json) => json,
        Err(e) => {
            error!("failed to serialize analysis result: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match output_path {
        Some(path) => {
            if let Err(e) = std::fs::write(&path, json) {
                error!("failed to write {}: {}", path, e);
                return ExitCode::FAILURE;
            }
            info!("wrote analysis result to {}", path);
        }
        None => println!("{json}"),
    }

    ExitCode::SUCCESS
}
