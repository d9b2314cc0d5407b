use serde::{Deserialize, Serialize};

/// A single directed transfer between two accounts, as supplied by the caller.
///
/// Callers own CSV parsing and column validation; by the time a `Transaction`
/// reaches [`crate::analyze::analyze`] its `amount` has already been parsed to
/// a finite `f64` and rows with an unparseable amount have been discarded.
/// `timestamp` is kept as the raw ISO-8601 string so it can be echoed back
/// verbatim in [`Edge`] records even when it fails to parse.
///
/// # Example
///
/// ```rust,ignore
/// let tx = Transaction {
///     transaction_id: "T1".to_string(),
///     sender_id: "A".to_string(),
///     receiver_id: "B".to_string(),
///     amount: 100.0,
///     timestamp: "2024-01-01T00:00:00Z".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub amount: f64,
    pub timestamp: String,
}

/// Labels describing why an account or ring was flagged. The closed set mirrors
/// the pattern vocabulary every detector emits; `as_str` yields exactly the
/// string used in the JSON-compatible result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternLabel {
    CycleLength3,
    CycleLength4,
    CycleLength5,
    FanIn,
    FanOut,
    ShellNetwork,
    LegitimateBusiness,
}

impl PatternLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternLabel::CycleLength3 => "cycle_length_3",
            PatternLabel::CycleLength4 => "cycle_length_4",
            PatternLabel::CycleLength5 => "cycle_length_5",
            PatternLabel::FanIn => "fan_in",
            PatternLabel::FanOut => "fan_out",
            PatternLabel::ShellNetwork => "shell_network",
            PatternLabel::LegitimateBusiness => "legitimate_business",
        }
    }

    pub fn for_cycle_length(len: usize) -> PatternLabel {
        match len {
            3 => PatternLabel::CycleLength3,
            4 => PatternLabel::CycleLength4,
            _ => PatternLabel::CycleLength5,
        }
    }
}

/// The four pattern families a [`Ring`] can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    Cycle,
    FanIn,
    FanOut,
    ShellNetwork,
}

impl PatternType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternType::Cycle => "cycle",
            PatternType::FanIn => "fan_in",
            PatternType::FanOut => "fan_out",
            PatternType::ShellNetwork => "shell_network",
        }
    }
}

/// A detected fraud ring: one unique pattern instance with a stable identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pub ring_id: String,
    pub pattern_type: PatternType,
    pub member_accounts: Vec<String>,
    pub risk_score: f64,
}

/// A ring-bearing account with its composite suspicion score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuspiciousAccount {
    pub account_id: String,
    pub suspicion_score: f64,
    pub detected_patterns: Vec<PatternLabel>,
    pub ring_id: String,
}

/// One record per account observed anywhere in the input, legitimate or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub suspicious: bool,
    pub ring_ids: Vec<String>,
    pub patterns: Vec<PatternLabel>,
    pub total_sent: f64,
    pub total_received: f64,
    pub transaction_count: usize,
    pub suspicion_score: f64,
}

/// An original transaction echoed unchanged at the edge of the output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub amount: f64,
    pub timestamp: String,
    pub transaction_id: String,
}

/// Pipeline-level counts and timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_accounts_analyzed: usize,
    pub suspicious_accounts_flagged: usize,
    pub fraud_rings_detected: usize,
    pub legitimate_accounts_filtered: usize,
    pub processing_time_seconds: f64,
}

/// The complete, JSON-compatible result of one [`crate::analyze::analyze`] call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub suspicious_accounts: Vec<SuspiciousAccount>,
    pub fraud_rings: Vec<Ring>,
    pub summary: Summary,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}
