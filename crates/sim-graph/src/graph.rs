//! Graph Storage
//!
//! Undirected graph topology: node registry, adjacency lists, and
//! order-independent edge membership. Nodes keep insertion order so
//! that index-based random draws are reproducible across runs.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Unique identifier for a graph node
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Undirected graph with insertion-ordered nodes.
///
/// Edges are stored directionally as entered; adjacency is symmetric.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<NodeId>,
    adjacency: HashMap<NodeId, Vec<NodeId>>,
    edges: Vec<(NodeId, NodeId)>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node. Re-adding an existing node is a no-op.
    pub fn add_node(&mut self, node: NodeId) {
        if !self.adjacency.contains_key(&node) {
            self.nodes.push(node);
            self.adjacency.insert(node, Vec::new());
        }
    }

    /// Add an undirected edge, registering endpoints as needed.
    /// Duplicate edges (in either direction) are ignored.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) {
        if self.has_edge(a, b) {
            return;
        }
        self.add_node(a);
        self.add_node(b);
        self.adjacency.entry(a).or_default().push(b);
        self.adjacency.entry(b).or_default().push(a);
        self.edges.push((a, b));
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    /// Neighbors of a node in edge-insertion order; empty for unknown nodes.
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        self.adjacency.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Edge membership regardless of direction.
    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.edges.contains(&(a, b)) || self.edges.contains(&(b, a))
    }

    /// Edges as stored (directional pairs).
    pub fn edges(&self) -> &[(NodeId, NodeId)] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_nodes_keeps_insertion_order() {
        let mut graph = Graph::new();
        graph.add_node(NodeId(3));
        graph.add_node(NodeId(1));
        graph.add_node(NodeId(2));
        graph.add_node(NodeId(1));

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.nodes(), &[NodeId(3), NodeId(1), NodeId(2)]);
    }

    #[test]
    fn test_add_edge_registers_endpoints() {
        let mut graph = Graph::new();
        graph.add_edge(NodeId(0), NodeId(1));

        assert_eq!(graph.node_count(), 2);
        assert!(graph.contains(NodeId(0)));
        assert!(graph.contains(NodeId(1)));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let mut graph = Graph::new();
        graph.add_edge(NodeId(0), NodeId(1));
        graph.add_edge(NodeId(1), NodeId(2));

        assert_eq!(graph.neighbors(NodeId(0)), &[NodeId(1)]);
        assert_eq!(graph.neighbors(NodeId(1)), &[NodeId(0), NodeId(2)]);
        assert_eq!(graph.neighbors(NodeId(2)), &[NodeId(1)]);
    }

    #[test]
    fn test_duplicate_edges_ignored() {
        let mut graph = Graph::new();
        graph.add_edge(NodeId(0), NodeId(1));
        graph.add_edge(NodeId(0), NodeId(1));
        graph.add_edge(NodeId(1), NodeId(0));

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.neighbors(NodeId(0)), &[NodeId(1)]);
    }

    #[test]
    fn test_has_edge_is_order_independent() {
        let mut graph = Graph::new();
        graph.add_edge(NodeId(4), NodeId(7));

        assert!(graph.has_edge(NodeId(4), NodeId(7)));
        assert!(graph.has_edge(NodeId(7), NodeId(4)));
        assert!(!graph.has_edge(NodeId(4), NodeId(5)));
    }

    #[test]
    fn test_neighbors_of_unknown_node_empty() {
        let graph = Graph::new();
        assert!(graph.neighbors(NodeId(9)).is_empty());
    }
}
