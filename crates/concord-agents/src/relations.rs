//! Weighted undirected relationship graph between participating nations.
//!
//! - Nodes are fixed at construction, in roster order
//! - Edges are keyed by the sorted name pair, so (A, B) and (B, A) are the
//!   same edge
//! - Weights are clamped to [-1.0, 1.0] on every update
//! - An absent edge reads as 0.0
//!
//! Touching an edge creates it even when the delta is zero, so degree counts
//! every pair that has been in contact.

use std::collections::{BTreeMap, BTreeSet};

use concord_types::{EdgeSnapshot, GraphSnapshot};

use crate::error::AgentError;

/// Maximum relationship weight (full trust).
const WEIGHT_MAX: f64 = 1.0;

/// Minimum relationship weight (full hostility).
const WEIGHT_MIN: f64 = -1.0;

/// A pair must exceed this weight to be reported as the strongest pair.
pub const STRONG_TIE_THRESHOLD: f64 = 0.1;

/// Relationship graph over a fixed set of nations.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipGraph {
    nodes: Vec<String>,
    edges: BTreeMap<(String, String), f64>,
}

impl RelationshipGraph {
    /// Create a graph with one node per roster entry and no edges.
    pub fn new(roster: &[String]) -> Result<Self, AgentError> {
        let mut seen = BTreeSet::new();
        for name in roster {
            if !seen.insert(name.as_str()) {
                return Err(AgentError::DuplicateMember(name.clone()));
            }
        }
        Ok(Self {
            nodes: roster.to_vec(),
            edges: BTreeMap::new(),
        })
    }

    /// Nodes in roster order.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Whether `name` is a node.
    pub fn contains(&self, name: &str) -> bool {
        self.nodes.iter().any(|n| n == name)
    }

    /// Weight of the edge between `a` and `b`, or 0.0 when absent.
    pub fn weight(&self, a: &str, b: &str) -> f64 {
        self.edges
            .get(&edge_key(a, b))
            .copied()
            .unwrap_or_default()
    }

    /// Whether an edge exists between `a` and `b`.
    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        self.edges.contains_key(&edge_key(a, b))
    }

    /// Add `delta` to the edge between `a` and `b`, creating it at 0.0 if
    /// needed, and return the clamped weight.
    pub fn adjust(&mut self, a: &str, b: &str, delta: f64) -> Result<f64, AgentError> {
        if a == b {
            return Err(AgentError::SelfLoop(a.to_owned()));
        }
        for name in [a, b] {
            if !self.contains(name) {
                return Err(AgentError::UnknownNode(name.to_owned()));
            }
        }
        let weight = self.edges.entry(edge_key(a, b)).or_insert(0.0);
        *weight = (*weight + delta).clamp(WEIGHT_MIN, WEIGHT_MAX);
        Ok(*weight)
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of edges incident to `name`.
    pub fn degree(&self, name: &str) -> usize {
        self.edges
            .keys()
            .filter(|(a, b)| a == name || b == name)
            .count()
    }

    /// Highest-degree node, first in roster order on ties.
    pub fn most_connected(&self) -> Option<&str> {
        self.pick_by_degree(|candidate, best| candidate > best)
    }

    /// Lowest-degree node, first in roster order on ties.
    pub fn least_connected(&self) -> Option<&str> {
        self.pick_by_degree(|candidate, best| candidate < best)
    }

    fn pick_by_degree(&self, better: impl Fn(usize, usize) -> bool) -> Option<&str> {
        let mut best: Option<(&str, usize)> = None;
        for node in &self.nodes {
            let degree = self.degree(node);
            match best {
                Some((_, best_degree)) if !better(degree, best_degree) => {}
                _ => best = Some((node.as_str(), degree)),
            }
        }
        best.map(|(name, _)| name)
    }

    /// `2E / (N(N-1))`, or 0.0 with fewer than two nodes.
    pub fn density(&self) -> f64 {
        let n = count_as_f64(self.nodes.len());
        if n < 2.0 {
            return 0.0;
        }
        2.0 * count_as_f64(self.edges.len()) / (n * (n - 1.0))
    }

    /// Number of connected components. Isolated nodes count individually.
    pub fn components(&self) -> usize {
        let mut adjacency: BTreeMap<&str, Vec<&str>> = self
            .nodes
            .iter()
            .map(|n| (n.as_str(), Vec::new()))
            .collect();
        for (a, b) in self.edges.keys() {
            if let Some(list) = adjacency.get_mut(a.as_str()) {
                list.push(b.as_str());
            }
            if let Some(list) = adjacency.get_mut(b.as_str()) {
                list.push(a.as_str());
            }
        }

        let mut visited: BTreeSet<&str> = BTreeSet::new();
        let mut components = 0_usize;
        for node in &self.nodes {
            if !visited.insert(node.as_str()) {
                continue;
            }
            components = components.saturating_add(1);
            let mut stack = vec![node.as_str()];
            while let Some(current) = stack.pop() {
                for &next in adjacency.get(current).into_iter().flatten() {
                    if visited.insert(next) {
                        stack.push(next);
                    }
                }
            }
        }
        components
    }

    /// Heaviest edge whose weight exceeds [`STRONG_TIE_THRESHOLD`].
    pub fn strongest_pair(&self) -> Option<EdgeSnapshot> {
        self.edges
            .iter()
            .filter(|&(_, &w)| w > STRONG_TIE_THRESHOLD)
            .fold(None, |best: Option<(&(String, String), f64)>, (key, &w)| match best {
                Some((_, best_w)) if w <= best_w => best,
                _ => Some((key, w)),
            })
            .map(|((a, b), weight)| EdgeSnapshot {
                a: a.clone(),
                b: b.clone(),
                weight,
            })
    }

    /// Copy of the current nodes and edges.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes.clone(),
            edges: self
                .edges
                .iter()
                .map(|((a, b), &weight)| EdgeSnapshot {
                    a: a.clone(),
                    b: b.clone(),
                    weight,
                })
                .collect(),
        }
    }
}

fn edge_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_owned(), b.to_owned())
    } else {
        (b.to_owned(), a.to_owned())
    }
}

fn count_as_f64(count: usize) -> f64 {
    u32::try_from(count).map_or(f64::from(u32::MAX), f64::from)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn roster(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_owned()).collect()
    }

    #[test]
    fn absent_edge_reads_zero() {
        let graph = RelationshipGraph::new(&roster(&["USA", "China"])).unwrap();
        assert!(graph.weight("USA", "China").abs() < f64::EPSILON);
        assert!(!graph.has_edge("USA", "China"));
    }

    #[test]
    fn edges_are_symmetric() {
        let mut graph = RelationshipGraph::new(&roster(&["USA", "China"])).unwrap();
        graph.adjust("China", "USA", 0.12).unwrap();
        assert!((graph.weight("USA", "China") - 0.12).abs() < f64::EPSILON);
        assert!((graph.weight("China", "USA") - 0.12).abs() < f64::EPSILON);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn weights_are_clamped() {
        let mut graph = RelationshipGraph::new(&roster(&["A", "B"])).unwrap();
        for _ in 0..20 {
            graph.adjust("A", "B", 0.2).unwrap();
        }
        assert!((graph.weight("A", "B") - WEIGHT_MAX).abs() < f64::EPSILON);
        for _ in 0..40 {
            graph.adjust("B", "A", -0.2).unwrap();
        }
        assert!((graph.weight("A", "B") - WEIGHT_MIN).abs() < f64::EPSILON);
    }

    #[test]
    fn self_loops_and_strangers_are_rejected() {
        let mut graph = RelationshipGraph::new(&roster(&["A", "B"])).unwrap();
        assert!(matches!(graph.adjust("A", "A", 0.1), Err(AgentError::SelfLoop(_))));
        assert!(matches!(graph.adjust("A", "Z", 0.1), Err(AgentError::UnknownNode(_))));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn duplicate_roster_is_rejected() {
        assert!(matches!(
            RelationshipGraph::new(&roster(&["A", "B", "A"])),
            Err(AgentError::DuplicateMember(_))
        ));
    }

    #[test]
    fn zero_delta_still_creates_edge() {
        let mut graph = RelationshipGraph::new(&roster(&["A", "B", "C"])).unwrap();
        graph.adjust("A", "B", 0.0).unwrap();
        assert!(graph.has_edge("B", "A"));
        assert_eq!(graph.degree("A"), 1);
        assert_eq!(graph.degree("C"), 0);
    }

    #[test]
    fn components_without_edges_equal_node_count() {
        let graph = RelationshipGraph::new(&roster(&["A", "B", "C", "D"])).unwrap();
        assert_eq!(graph.components(), 4);
    }

    #[test]
    fn components_merge_through_edges() {
        let mut graph = RelationshipGraph::new(&roster(&["A", "B", "C", "D"])).unwrap();
        graph.adjust("A", "B", 0.1).unwrap();
        graph.adjust("B", "C", -0.1).unwrap();
        assert_eq!(graph.components(), 2);
    }

    #[test]
    fn density_counts_edges() {
        let mut graph = RelationshipGraph::new(&roster(&["A", "B", "C"])).unwrap();
        assert!(graph.density().abs() < f64::EPSILON);
        graph.adjust("A", "B", 0.1).unwrap();
        assert!((graph.density() - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn connectivity_ties_go_to_roster_order() {
        let mut graph = RelationshipGraph::new(&roster(&["A", "B", "C"])).unwrap();
        assert_eq!(graph.most_connected(), Some("A"));
        assert_eq!(graph.least_connected(), Some("A"));
        graph.adjust("B", "C", 0.0).unwrap();
        assert_eq!(graph.most_connected(), Some("B"));
        assert_eq!(graph.least_connected(), Some("A"));
    }

    #[test]
    fn strongest_pair_requires_threshold() {
        let mut graph = RelationshipGraph::new(&roster(&["A", "B", "C"])).unwrap();
        graph.adjust("A", "B", 0.1).unwrap();
        assert!(graph.strongest_pair().is_none());
        graph.adjust("C", "B", 0.3).unwrap();
        let pair = graph.strongest_pair().unwrap();
        assert_eq!((pair.a.as_str(), pair.b.as_str()), ("B", "C"));
    }

    #[test]
    fn snapshot_lists_sorted_pairs() {
        let mut graph = RelationshipGraph::new(&roster(&["USA", "China"])).unwrap();
        graph.adjust("USA", "China", 0.05).unwrap();
        let snapshot = graph.snapshot();
        assert_eq!(snapshot.nodes, roster(&["USA", "China"]));
        let edge = snapshot.edges.first().unwrap();
        assert_eq!((edge.a.as_str(), edge.b.as_str()), ("China", "USA"));
    }
}
