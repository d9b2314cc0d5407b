//! Cycle detection (§4.3): bounded-depth DFS enumeration of simple directed
//! cycles of length 3-5 over the filtered adjacency graph.

use crate::config;
use indexmap::{IndexMap, IndexSet};

type Adjacency = IndexMap<String, IndexMap<String, Vec<usize>>>;

/// Enumerates every simple directed cycle of length 3-5 reachable from any
/// account in `start_order`, deduplicated by canonical rotation, in
/// first-discovery order.
///
/// `start_order` should be the filtered universe in insertion order; accounts
/// with no outgoing filtered edges simply contribute no cycles.
pub fn detect_cycles(adjacency: &Adjacency, start_order: &IndexSet<String>) -> Vec<Vec<String>> {
    let mut raw_cycles: Vec<Vec<String>> = Vec::new();

    for start in start_order {
        if !adjacency.contains_key(start) {
            continue;
        }
        let mut path = vec![start.clone()];
        let mut visited: IndexSet<String> = IndexSet::new();
        visited.insert(start.clone());
        dfs(adjacency, start, 1, &mut path, &mut visited, &mut raw_cycles);
    }

    let mut seen_keys: IndexSet<String> = IndexSet::new();
    let mut cycles = Vec::new();
    for raw in raw_cycles {
        let canonical = canonicalize(&raw);
        let key = canonical.join(",");
        if seen_keys.insert(key) {
            cycles.push(canonical);
        }
    }
    cycles
}

fn dfs(
    adjacency: &Adjacency,
    start: &str,
    depth: usize,
    path: &mut Vec<String>,
    visited: &mut IndexSet<String>,
    out: &mut Vec<Vec<String>>,
) {
    let current = path.last().unwrap().clone();
    let Some(neighbors) = adjacency.get(&current) else {
        return;
    };

    for neighbor in neighbors.keys() {
        if neighbor == start {
            if path.len() >= config::CYCLE_MIN_LENGTH {
                out.push(path.clone());
            }
        } else if !visited.contains(neighbor) && depth < config::CYCLE_MAX_LENGTH {
            path.push(neighbor.clone());
            visited.insert(neighbor.clone());
            dfs(adjacency, start, depth + 1, path, visited, out);
            path.pop();
            visited.shift_remove(neighbor);
        }
    }
}

/// Rotates a cycle so its lexicographically smallest member is first.
/// Direction is never reversed — `A,B,C` and `A,C,B` stay distinct.
fn canonicalize(cycle: &[String]) -> Vec<String> {
    let n = cycle.len();
    let min_idx = (0..n).min_by_key(|&i| &cycle[i]).unwrap_or(0);
    (0..n).map(|i| cycle[(min_idx + i) % n].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn canonicalizes_rotation() {
        let c = vec!["B".to_string(), "C".to_string(), "A".to_string()];
        assert_eq!(canonicalize(&c), vec!["A", "B", "C"]);
    }

    #[test]
    fn finds_single_3_cycle_once() {
        let adjacency = adj_from(&[("A", "B"), ("B", "C"), ("C", "A")]);
        let mut start_order = IndexSet::new();
        start_order.insert("A".to_string());
        start_order.insert("B".to_string());
        start_order.insert("C".to_string());

        let cycles = detect_cycles(&adjacency, &start_order);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0], vec!["A", "B", "C"]);
    }

    #[test]
    fn retains_both_directions_on_shared_nodes() {
        // A->B->C->A and A->C->B->A both exist as distinct edge sets.
        let adjacency = adj_from(&[
            ("A", "B"),
            ("B", "C"),
            ("C", "A"),
            ("A", "C"),
            ("C", "B"),
            ("B", "A"),
        ]);
        let mut start_order = IndexSet::new();
        start_order.insert("A".to_string());
        start_order.insert("B".to_string());
        start_order.insert("C".to_string());

        let cycles = detect_cycles(&adjacency, &start_order);
        assert_eq!(cycles.len(), 2);
    }

    #[test]
    fn rejects_length_2_loop() {
        let adjacency = adj_from(&[("A", "B"), ("B", "A")]);
        let mut start_order = IndexSet::new();
        start_order.insert("A".to_string());
        start_order.insert("B".to_string());
        assert!(detect_cycles(&adjacency, &start_order).is_empty());
    }

    #[test]
    fn ignores_cycles_longer_than_5() {
        let adjacency = adj_from(&[
            ("A", "B"),
            ("B", "C"),
            ("C", "D"),
            ("D", "E"),
            ("E", "F"),
            ("F", "A"),
        ]);
        let mut start_order = IndexSet::new();
        for n in ["A", "B", "C", "D", "E", "F"] {
            start_order.insert(n.to_string());
        }
        assert!(detect_cycles(&adjacency, &start_order).is_empty());
    }
}
