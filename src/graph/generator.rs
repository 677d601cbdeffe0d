use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GraphConfig;
use crate::graph::model::{Graph, GraphEdge, GraphNode, NodeId};

/// Builds random planar-ish graphs for the pathfinding view.
///
/// Nodes are sampled uniformly inside the canvas minus a margin, then every
/// node is joined to its nearest neighbours.
pub struct GraphGenerator {
    node_count: usize,
    width: f64,
    height: f64,
    config: GraphConfig,
    seed: Option<u64>,
}

impl GraphGenerator {
    pub fn new(node_count: usize, width: f64, height: f64) -> Self {
        Self {
            node_count,
            width,
            height,
            config: GraphConfig::default(),
            seed: None,
        }
    }

    pub fn with_config(node_count: usize, width: f64, height: f64, config: GraphConfig) -> Self {
        Self {
            node_count,
            width,
            height,
            config,
            seed: None,
        }
    }

    /// Makes generation reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn generate(&self) -> Graph {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let nodes = self.place_nodes(&mut rng);
        let edges = connect_nearest(&nodes, self.config.neighbor_count);

        tracing::debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            seed = ?self.seed,
            "graph generated"
        );
        Graph::new(nodes, edges)
    }

    fn place_nodes(&self, rng: &mut StdRng) -> Vec<GraphNode> {
        let margin = self.config.margin;
        let span_x = (self.width - margin * 2.0).max(0.0);
        let span_y = (self.height - margin * 2.0).max(0.0);

        (0..self.node_count)
            .map(|id| {
                let x = margin + rng.gen::<f64>() * span_x;
                let y = margin + rng.gen::<f64>() * span_y;
                GraphNode::new(id, x, y)
            })
            .collect()
    }
}

/// Joins every node to its `k` nearest other nodes.
///
/// An edge is skipped when the unordered pair was already added by the
/// neighbour's own pass. Weights are the floored Euclidean distance.
fn connect_nearest(nodes: &[GraphNode], k: usize) -> Vec<GraphEdge> {
    let mut edges = Vec::new();
    let mut seen: HashSet<(NodeId, NodeId)> = HashSet::new();

    for node in nodes {
        let mut candidates: Vec<(NodeId, f64)> = nodes
            .iter()
            .filter(|other| other.id != node.id)
            .map(|other| (other.id, node.distance_to(other)))
            .collect();
        candidates.sort_by(|a, b| a.1.total_cmp(&b.1));

        for (neighbor, dist) in candidates.into_iter().take(k) {
            let key = (node.id.min(neighbor), node.id.max(neighbor));
            if seen.insert(key) {
                edges.push(GraphEdge::weighted(node.id, neighbor, dist.floor()));
            }
        }
    }

    edges
}

/// Generates a graph with default settings.
pub fn generate_graph(node_count: usize, width: f64, height: f64) -> Graph {
    GraphGenerator::new(node_count, width, height).generate()
}
