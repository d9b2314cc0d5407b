//! Shell-network detection (§4.5): bounded DFS for directed chains of 3+
//! nodes whose interior members each have total degree 2 or 3, avoiding
//! cycle members entirely.

use crate::config;
use crate::index::AccountStats;
use indexmap::{IndexMap, IndexSet};

type Adjacency = IndexMap<String, IndexMap<String, Vec<usize>>>;

fn is_low_degree(stats: &IndexMap<String, AccountStats>, account: &str) -> bool {
    stats
        .get(account)
        .map(|s| config::SHELL_INTERIOR_DEGREE.contains(&s.total_transactions()))
        .unwrap_or(false)
}

/// Finds every candidate shell chain, then eliminates chains whose member
/// set is a subset of a longer kept chain. Output is in descending length
/// order.
pub fn detect_shell_networks(
    adjacency: &Adjacency,
    stats: &IndexMap<String, AccountStats>,
    cycle_nodes: &IndexSet<String>,
    start_order: &IndexSet<String>,
) -> Vec<Vec<String>> {
    let mut chains: Vec<Vec<String>> = Vec::new();

    for start in start_order {
        if cycle_nodes.contains(start) || !adjacency.contains_key(start) {
            continue;
        }
        let mut path = vec![start.clone()];
        let mut visited: IndexSet<String> = IndexSet::new();
        visited.insert(start.clone());
        dfs(adjacency, stats, cycle_nodes, &mut path, &mut visited, &mut chains);
    }

    subset_eliminate(chains)
}

fn dfs(
    adjacency: &Adjacency,
    stats: &IndexMap<String, AccountStats>,
    cycle_nodes: &IndexSet<String>,
    path: &mut Vec<String>,
    visited: &mut IndexSet<String>,
    out: &mut Vec<Vec<String>>,
) {
    let current = path.last().unwrap().clone();
    let Some(neighbors) = adjacency.get(&current) else {
        return;
    };

    for neighbor in neighbors.keys() {
        if visited.contains(neighbor) || cycle_nodes.contains(neighbor) {
            continue;
        }
        if !is_low_degree(stats, neighbor) {
            continue;
        }

        path.push(neighbor.clone());
        visited.insert(neighbor.clone());

        let interior_low_degree_count = path[1..]
            .iter()
            .filter(|n| is_low_degree(stats, n))
            .count();
        if path.len() >= config::SHELL_MIN_CHAIN_NODES
            && interior_low_degree_count >= config::SHELL_MIN_INTERIOR_RUN
        {
            out.push(path.clone());
        }

        if let Some(further) = adjacency.get(neighbor) {
            for terminal in further.keys() {
                if visited.contains(terminal) || cycle_nodes.contains(terminal) {
                    continue;
                }
                if !is_low_degree(stats, terminal) && path.len() >= 2 {
                    let mut chain = path.clone();
                    chain.push(terminal.clone());
                    out.push(chain);
                }
            }
        }

        dfs(adjacency, stats, cycle_nodes, path, visited, out);

        path.pop();
        visited.shift_remove(neighbor);
    }
}

fn subset_eliminate(chains: Vec<Vec<String>>) -> Vec<Vec<String>> {
    let mut indexed: Vec<(usize, Vec<String>)> = chains.into_iter().enumerate().collect();
    indexed.sort_by(|(ai, a), (bi, b)| b.len().cmp(&a.len()).then(ai.cmp(bi)));

    let mut kept: Vec<Vec<String>> = Vec::new();
    let mut kept_sets: Vec<IndexSet<String>> = Vec::new();

    for (_, chain) in indexed {
        let chain_set: IndexSet<String> = chain.iter().cloned().collect();
        let is_subset = kept_sets
            .iter()
            .any(|kept_set| chain_set.iter().all(|m| kept_set.contains(m)));
        if !is_subset {
            kept_sets.push(chain_set);
            kept.push(chain);
        }
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_with(totals: &[(&str, usize)]) -> IndexMap<String, AccountStats> {
        let mut stats = IndexMap::new();
        for (name, total) in totals {
            let mut s = AccountStats::default();
            // split evenly between send/receive so total_transactions() == total
            s.send_count = total / 2;
            s.receive_count = total - s.send_count;
            stats.insert(name.to_string(), s);
        }
        stats
    }

    fn adj_from(edges: &[(&str, &str)]) -> Adjacency {
        let mut adjacency: Adjacency = IndexMap::new();
        for (i, (from, to)) in edges.iter().enumerate() {
            adjacency
                .entry(from.to_string())
                .or_default()
                .entry(to.to_string())
                .or_default()
                .push(i);
        }
        adjacency
    }

    #[test]
    fn finds_basic_chain() {
        let adjacency = adj_from(&[("SRC", "M1"), ("M1", "M2"), ("M2", "M3"), ("M3", "DST")]);
        let stats = stats_with(&[("SRC", 20), ("M1", 2), ("M2", 2), ("M3", 2), ("DST", 20)]);
        let cycle_nodes = IndexSet::new();
        let mut start_order = IndexSet::new();
        for n in ["SRC", "M1", "M2", "M3", "DST"] {
            start_order.insert(n.to_string());
        }

        let chains = detect_shell_networks(&adjacency, &stats, &cycle_nodes, &start_order);
        assert!(!chains.is_empty());
        assert!(chains[0].contains(&"SRC".to_string()));
        assert!(chains[0].contains(&"DST".to_string()));
    }

    #[test]
    fn excludes_cycle_members() {
        let adjacency = adj_from(&[("SRC", "M1"), ("M1", "M2"), ("M2", "DST")]);
        let stats = stats_with(&[("SRC", 20), ("M1", 2), ("M2", 2), ("DST", 20)]);
        let mut cycle_nodes = IndexSet::new();
        cycle_nodes.insert("M1".to_string());
        let mut start_order = IndexSet::new();
        for n in ["SRC", "M1", "M2", "DST"] {
            start_order.insert(n.to_string());
        }

        let chains = detect_shell_networks(&adjacency, &stats, &cycle_nodes, &start_order);
        for chain in &chains {
            assert!(!chain.contains(&"M1".to_string()));
        }
    }

    #[test]
    fn subset_elimination_keeps_longest() {
        let chains = vec![
            vec!["A".to_string(), "B".to_string(), "C".to_string()],
            vec!["A".to_string(), "B".to_string(), "C".to_string(), "D".to_string()],
        ];
        let kept = subset_eliminate(chains);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].len(), 4);
    }
}
