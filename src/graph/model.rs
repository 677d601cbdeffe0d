//! Graph data model.
//!
//! The node collection owns all node data. Edges are undirected relations
//! that refer to nodes by id only.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geometry::{distance, Point};

/// Type alias for graph node ids (dense, `0..N-1` for generated graphs)
pub type NodeId = usize;

/// A graph vertex with canvas coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
}

impl GraphNode {
    pub fn new(id: NodeId, x: f64, y: f64) -> Self {
        GraphNode { id, x, y }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Euclidean distance to another node.
    pub fn distance_to(&self, other: &GraphNode) -> f64 {
        distance(self.x, self.y, other.x, other.y)
    }
}

/// An undirected, optionally weighted edge.
///
/// When `weight` is `None` the pathfinders fall back to the Euclidean
/// distance between the endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: NodeId,
    pub target: NodeId,
    pub weight: Option<f64>,
}

impl GraphEdge {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        GraphEdge {
            source,
            target,
            weight: None,
        }
    }

    pub fn weighted(source: NodeId, target: NodeId, weight: f64) -> Self {
        GraphEdge {
            source,
            target,
            weight: Some(weight),
        }
    }

    /// Returns true if this edge joins `a` and `b` in either direction.
    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }

    /// Returns the endpoint opposite to `id`, if `id` is an endpoint.
    pub fn other_end(&self, id: NodeId) -> Option<NodeId> {
        if self.source == id {
            Some(self.target)
        } else if self.target == id {
            Some(self.source)
        } else {
            None
        }
    }
}

/// A complete graph snapshot as produced by the generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl Graph {
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        Graph { nodes, edges }
    }

    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<&GraphEdge> {
        self.edges.iter().find(|e| e.connects(a, b))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Neighbour lookup built once per pathfinding call.
///
/// Neighbour lists preserve edge-list order, which fixes the order in which
/// BFS and DFS discover nodes.
pub(crate) struct Adjacency<'g> {
    order: Vec<NodeId>,
    nodes: HashMap<NodeId, &'g GraphNode>,
    neighbors: HashMap<NodeId, Vec<(NodeId, f64)>>,
}

impl<'g> Adjacency<'g> {
    pub(crate) fn build(nodes: &'g [GraphNode], edges: &[GraphEdge]) -> Self {
        let order: Vec<NodeId> = nodes.iter().map(|n| n.id).collect();
        let nodes: HashMap<NodeId, &'g GraphNode> = nodes.iter().map(|n| (n.id, n)).collect();
        let mut neighbors: HashMap<NodeId, Vec<(NodeId, f64)>> = HashMap::new();

        for edge in edges {
            if edge.source == edge.target {
                continue;
            }
            let (Some(a), Some(b)) = (nodes.get(&edge.source), nodes.get(&edge.target)) else {
                continue;
            };
            let weight = edge.weight.unwrap_or_else(|| a.distance_to(b));
            neighbors.entry(edge.source).or_default().push((edge.target, weight));
            neighbors.entry(edge.target).or_default().push((edge.source, weight));
        }

        Adjacency {
            order,
            nodes,
            neighbors,
        }
    }

    pub(crate) fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub(crate) fn node(&self, id: NodeId) -> Option<&'g GraphNode> {
        self.nodes.get(&id).copied()
    }

    /// Node ids in node-list order.
    pub(crate) fn order(&self) -> &[NodeId] {
        &self.order
    }

    /// `(neighbor, effective weight)` pairs in edge-list order.
    pub(crate) fn neighbors(&self, id: NodeId) -> &[(NodeId, f64)] {
        self.neighbors.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> (Vec<GraphNode>, Vec<GraphEdge>) {
        let nodes = vec![
            GraphNode::new(0, 0.0, 0.0),
            GraphNode::new(1, 3.0, 0.0),
            GraphNode::new(2, 3.0, 4.0),
            GraphNode::new(3, 0.0, 4.0),
        ];
        let edges = vec![
            GraphEdge::weighted(0, 1, 7.0),
            GraphEdge::new(1, 2),
            GraphEdge::new(2, 3),
            GraphEdge::new(0, 2),
        ];
        (nodes, edges)
    }

    #[test]
    fn test_edge_endpoints() {
        let edge = GraphEdge::new(4, 9);
        assert!(edge.connects(9, 4));
        assert!(!edge.connects(4, 4));
        assert_eq!(edge.other_end(4), Some(9));
        assert_eq!(edge.other_end(9), Some(4));
        assert_eq!(edge.other_end(1), None);
    }

    #[test]
    fn test_adjacency_is_undirected_and_ordered() {
        let (nodes, edges) = square();
        let adjacency = Adjacency::build(&nodes, &edges);

        let of_zero: Vec<NodeId> = adjacency.neighbors(0).iter().map(|(id, _)| *id).collect();
        assert_eq!(of_zero, vec![1, 2]);
        let of_two: Vec<NodeId> = adjacency.neighbors(2).iter().map(|(id, _)| *id).collect();
        assert_eq!(of_two, vec![1, 3, 0]);
    }

    #[test]
    fn test_adjacency_weight_fallback() {
        let (nodes, edges) = square();
        let adjacency = Adjacency::build(&nodes, &edges);

        // explicit weight wins, missing weight is the Euclidean distance
        assert_eq!(adjacency.neighbors(0)[0].1, 7.0);
        assert_eq!(adjacency.neighbors(0)[1].1, 5.0);
    }

    #[test]
    fn test_adjacency_skips_dangling_edges() {
        let (nodes, mut edges) = square();
        edges.push(GraphEdge::new(0, 42));
        let adjacency = Adjacency::build(&nodes, &edges);
        assert_eq!(adjacency.neighbors(0).len(), 2);
        assert!(!adjacency.contains(42));
    }

    #[test]
    fn test_graph_lookups() {
        let (nodes, edges) = square();
        let graph = Graph::new(nodes, edges);
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 4);
        assert!(graph.edge_between(2, 0).is_some());
        assert!(graph.edge_between(1, 3).is_none());
        assert_eq!(graph.node(3).map(|n| n.y), Some(4.0));
    }
}
