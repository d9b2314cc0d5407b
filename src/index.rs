use crate::parsed::ParsedTransaction;
use indexmap::{IndexMap, IndexSet};

/// Per-account aggregate statistics, derived over whichever transaction set
/// the caller indexes (filtered or unfiltered — see §4.1/§4.2).
#[derive(Debug, Clone, Default)]
pub struct AccountStats {
    pub total_sent: f64,
    pub total_received: f64,
    pub send_count: usize,
    pub receive_count: usize,
    pub unique_senders: IndexSet<String>,
    pub unique_receivers: IndexSet<String>,
    pub sent_amounts: Vec<f64>,
    pub received_amounts: Vec<f64>,
}

impl AccountStats {
    pub fn total_transactions(&self) -> usize {
        self.send_count + self.receive_count
    }
}

/// Adjacency and per-account statistics built over one transaction set.
///
/// Both the sender-keyed `adjacency` and the receiver-keyed `reverse` maps
/// preserve insertion order — the order in which each key is first
/// encountered while scanning `transactions` — per the determinism
/// requirement in §5: downstream DFS and smurfing enumeration depend on this
/// order to be reproducible.
#[derive(Debug, Clone, Default)]
pub struct GraphIndex {
    /// sender -> receiver -> indices into the transaction slice it was built from
    pub adjacency: IndexMap<String, IndexMap<String, Vec<usize>>>,
    /// receiver -> sender -> indices into the transaction slice it was built from
    pub reverse: IndexMap<String, IndexMap<String, Vec<usize>>>,
    pub stats: IndexMap<String, AccountStats>,
}

/// Builds the adjacency index and aggregate statistics over `transactions` in
/// O(N) time and O(N + A) memory (§4.2).
pub fn build_index(transactions: &[ParsedTransaction]) -> GraphIndex {
    let mut index = GraphIndex::default();

    for (i, tx) in transactions.iter().enumerate() {
        index
            .adjacency
            .entry(tx.sender_id.clone())
            .or_default()
            .entry(tx.receiver_id.clone())
            .or_default()
            .push(i);
        index
            .reverse
            .entry(tx.receiver_id.clone())
            .or_default()
            .entry(tx.sender_id.clone())
            .or_default()
            .push(i);

        let sender_stats = index.stats.entry(tx.sender_id.clone()).or_default();
        sender_stats.total_sent += tx.amount;
        sender_stats.send_count += 1;
        sender_stats.unique_receivers.insert(tx.receiver_id.clone());
        sender_stats.sent_amounts.push(tx.amount);

        let receiver_stats = index.stats.entry(tx.receiver_id.clone()).or_default();
        receiver_stats.total_received += tx.amount;
        receiver_stats.receive_count += 1;
        receiver_stats.unique_senders.insert(tx.sender_id.clone());
        receiver_stats.received_amounts.push(tx.amount);
    }

    index
}

/// The complete set of accounts seen as sender or receiver, in first-seen
/// order over the original (pre-filter) transaction sequence.
pub fn build_universe(transactions: &[ParsedTransaction]) -> IndexSet<String> {
    let mut universe = IndexSet::new();
    for tx in transactions {
        universe.insert(tx.sender_id.clone());
        universe.insert(tx.receiver_id.clone());
    }
    universe
}
