//! Graph generation and pathfinding.

pub mod generator;
pub mod model;
pub mod pathfinding;

pub use generator::{generate_graph, GraphGenerator};
pub use model::{Graph, GraphEdge, GraphNode, NodeId};
pub use pathfinding::{
    path_weight, run_pathfinding, AlgorithmInfo, PathAlgorithm, PathResult, PathStats,
};
