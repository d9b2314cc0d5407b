//! Tunable thresholds for the detection pipeline.
//!
//! Every magic number referenced by `filter`, `cycles`, `smurfing`, `shell`,
//! `rings`, and `scoring` lives here rather than scattered across the
//! detectors, so a reviewer can see the whole knob set in one place.

/// Minimum distinct counterparties for a receiver/sender to be a smurfing hub.
pub const HUB_MIN_COUNTERPARTIES: usize = 10;

/// Width of the temporal clustering window used by the smurfing detector.
pub const TEMPORAL_WINDOW_HOURS: i64 = 72;

/// Inclusive node-count bounds for directed simple cycles.
pub const CYCLE_MIN_LENGTH: usize = 3;
pub const CYCLE_MAX_LENGTH: usize = 5;

/// Interior accounts of a shell chain must have total_transactions in this set.
pub const SHELL_INTERIOR_DEGREE: [usize; 2] = [2, 3];

/// Minimum node count of a chain, and the minimum number of low-degree
/// interior members before the chain is recorded independent of a terminal.
pub const SHELL_MIN_CHAIN_NODES: usize = 3;
pub const SHELL_MIN_INTERIOR_RUN: usize = 3;

/// Legitimacy-filter coefficient-of-variation and flow-ratio cutoffs (§4.1).
pub const LEGITIMACY_CV_THRESHOLD: f64 = 0.3;
pub const LEGITIMACY_FLOW_RATIO_THRESHOLD: f64 = 0.15;

/// Payroll / rent-collector signatures require at least this many
/// counterparties and at least this many transactions in that direction.
pub const LEGITIMACY_DIRECTIONAL_MIN_COUNTERPARTIES: usize = 5;
pub const LEGITIMACY_DIRECTIONAL_MIN_TRANSACTIONS: usize = 5;

/// Merchant signature: many senders, few receivers, received dominates sent.
pub const LEGITIMACY_MERCHANT_MIN_SENDERS: usize = 8;
pub const LEGITIMACY_MERCHANT_MAX_RECEIVERS: usize = 3;
pub const LEGITIMACY_MERCHANT_RECEIVED_MULTIPLE: f64 = 5.0;

/// Pure-payer signature: many receivers, at most one sender, sent dominates received.
pub const LEGITIMACY_PAYER_MIN_RECEIVERS: usize = 5;
pub const LEGITIMACY_PAYER_MAX_SENDERS: usize = 1;
pub const LEGITIMACY_PAYER_SENT_MULTIPLE: f64 = 5.0;

/// Name-match keyword list (§4.1 rule 1); matched against the uppercased account id.
pub const LEGITIMACY_KEYWORDS: &[&str] = &[
    // corporate suffixes
    "COMPANY", "CORP", "INC", "LLC", "LTD", "ENTERPRISE",
    // payroll
    "PAYROLL", "SALARY", "WAGE", "HR_", "HUMAN_RESOURCE",
    // property
    "RENT", "LANDLORD", "PROPERTY", "REALTY", "HOUSING",
    // supply chain
    "VENDOR", "SUPPLIER", "SUPPLY", "WHOLESALE",
    // retail
    "GROCERY", "STORE", "SHOP", "MARKET", "RETAIL",
    // utilities
    "UTILITY", "ELECTRIC", "WATER", "GAS_CO", "POWER",
    // insurance / banking
    "INSURANCE", "INSURE", "BANK", "CREDIT_UNION", "MORTGAGE",
    // public sector
    "GOVERNMENT", "GOV_", "TAX_", "IRS",
    // education
    "SCHOOL", "UNIVERSITY", "COLLEGE",
    // healthcare
    "HOSPITAL", "CLINIC", "MEDICAL", "HEALTH",
    // communications
    "TELECOM", "PHONE", "MOBILE", "INTERNET",
    // subscriptions
    "SUBSCRIPTION", "NETFLIX", "SPOTIFY",
];

/// Risk-score coefficients (§4.6).
pub const CYCLE_RISK_BASE: f64 = 70.0;
pub const CYCLE_RISK_PER_MEMBER: f64 = 5.0;

pub const HUB_RISK_BASE: f64 = 60.0;
pub const HUB_RISK_TEMPORAL_BONUS: f64 = 25.0;
pub const HUB_RISK_NON_TEMPORAL_BONUS: f64 = 10.0;
pub const HUB_RISK_PER_COUNTERPARTY: f64 = 0.5;

pub const SHELL_RISK_BASE: f64 = 50.0;
pub const SHELL_RISK_PER_MEMBER: f64 = 8.0;

pub const RISK_SCORE_CAP: f64 = 100.0;

/// Suspicion-scoring weights (§4.7).
pub const SCORE_CYCLE_BASE: f64 = 35.0;
pub const SCORE_CYCLE_MULTIPLICITY_BONUS: f64 = 10.0;
pub const SCORE_CYCLE_MULTIPLICITY_CAP: u32 = 3;
pub const SCORE_FAN_IN: f64 = 25.0;
pub const SCORE_FAN_OUT: f64 = 25.0;
pub const SCORE_SHELL_NETWORK: f64 = 20.0;
pub const SCORE_TEMPORAL: f64 = 15.0;
pub const SCORE_FLOW_BALANCE: f64 = 10.0;
pub const SCORE_FLOW_BALANCE_MIN: f64 = 0.7;
pub const SCORE_FLOW_BALANCE_MAX: f64 = 1.0;
pub const SUSPICION_SCORE_CAP: f64 = 100.0;
