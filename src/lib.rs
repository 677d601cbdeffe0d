pub mod config;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod logic;
pub mod searching;
pub mod sorting;
pub mod traits;
pub mod tree;

// Export traits
pub use traits::{build_tree, DynTree, TreeModel};

// Export configuration and errors
pub use config::{EngineConfig, GraphConfig, LogicConfig, SortConfig, TreeLayoutConfig};
pub use error::{ExpressionError, TreeError};

// Export graph engine
pub use geometry::{distance, Point};
pub use graph::{
    generate_graph, path_weight, run_pathfinding, AlgorithmInfo, Graph, GraphEdge, GraphGenerator,
    GraphNode, NodeId, PathAlgorithm, PathResult, PathStats,
};

// Export sorting and searching tracers
pub use searching::{found_index, run_search, SearchAlgorithm, SearchInstruction};
pub use sorting::{replay, run_sort, SortAlgorithm, SortInstruction};

// Export tree models
pub use tree::{
    BinaryNode, BinaryTree, GeneralNode, GeneralTree, LayoutExtent, SearchStep, SearchStrategy, Side,
    TraversalOrder, TreeKind, TreeNodeId, TreeSearchResult,
};

// Export logic engine
pub use logic::{analyze, generate_truth_table, simplify, LogicAnalysis, TruthTable};
