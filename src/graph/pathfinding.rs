//! Pathfinding over the graph model.
//!
//! Every algorithm returns the order in which nodes were visited together with
//! the reconstructed start-to-end path. An unreachable end, or a start or end
//! id that is not in the node list, yields an empty path rather than an error.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::graph::model::{Adjacency, Graph, GraphEdge, GraphNode, NodeId};

/// Outcome of a pathfinding run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathResult {
    /// Node ids in visitation order, never repeated
    pub visited_order: Vec<NodeId>,
    /// Start to end inclusive, empty when the end was not reached
    pub path: Vec<NodeId>,
}

impl PathResult {
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }
}

/// The four supported pathfinding algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathAlgorithm {
    Bfs,
    Dfs,
    Dijkstra,
    AStar,
}

/// Descriptive text shown next to an algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    pub name: &'static str,
    pub complexity: &'static str,
    pub description: &'static str,
    pub best_for: &'static str,
    pub drawbacks: &'static str,
}

impl PathAlgorithm {
    pub const ALL: [PathAlgorithm; 4] = [
        PathAlgorithm::Bfs,
        PathAlgorithm::Dfs,
        PathAlgorithm::Dijkstra,
        PathAlgorithm::AStar,
    ];

    pub fn run(
        &self,
        nodes: &[GraphNode],
        edges: &[GraphEdge],
        start: NodeId,
        end: NodeId,
    ) -> PathResult {
        let result = match self {
            PathAlgorithm::Bfs => bfs(nodes, edges, start, end),
            PathAlgorithm::Dfs => dfs(nodes, edges, start, end),
            PathAlgorithm::Dijkstra => dijkstra(nodes, edges, start, end),
            PathAlgorithm::AStar => astar(nodes, edges, start, end),
        };
        tracing::debug!(
            algorithm = %self,
            start,
            end,
            visited = result.visited_order.len(),
            path_len = result.path.len(),
            "pathfinding finished"
        );
        result
    }

    pub fn info(&self) -> AlgorithmInfo {
        match self {
            PathAlgorithm::Bfs => AlgorithmInfo {
                name: "Breadth-First Search",
                complexity: "O(V + E)",
                description: "Explores the graph layer by layer, visiting every neighbour at the current depth before moving deeper.",
                best_for: "Shortest paths by hop count in unweighted graphs.",
                drawbacks: "Ignores edge weights and touches many nodes on large graphs.",
            },
            PathAlgorithm::Dfs => AlgorithmInfo {
                name: "Depth-First Search",
                complexity: "O(V + E)",
                description: "Follows one branch as deep as possible before backtracking. It does not guarantee the shortest path.",
                best_for: "Maze exploration and connectivity checks.",
                drawbacks: "Paths are often long and winding.",
            },
            PathAlgorithm::Dijkstra => AlgorithmInfo {
                name: "Dijkstra's Algorithm",
                complexity: "O(V^2) with a linear scan",
                description: "Always expands the cheapest known node, which yields the minimum-weight path.",
                best_for: "Road networks and routing on weighted graphs.",
                drawbacks: "Explores in every direction without a sense of the goal.",
            },
            PathAlgorithm::AStar => AlgorithmInfo {
                name: "A* Search",
                complexity: "O(V^2) with a linear scan",
                description: "Dijkstra guided by the straight-line distance to the goal.",
                best_for: "Games, navigation and robotics.",
                drawbacks: "Only as good as its heuristic.",
            },
        }
    }
}

impl fmt::Display for PathAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PathAlgorithm::Bfs => "bfs",
            PathAlgorithm::Dfs => "dfs",
            PathAlgorithm::Dijkstra => "dijkstra",
            PathAlgorithm::AStar => "astar",
        };
        f.write_str(name)
    }
}

impl FromStr for PathAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" => Ok(PathAlgorithm::Bfs),
            "dfs" => Ok(PathAlgorithm::Dfs),
            "dijkstra" => Ok(PathAlgorithm::Dijkstra),
            "astar" | "a*" => Ok(PathAlgorithm::AStar),
            other => Err(format!("Unknown pathfinding algorithm: {}", other)),
        }
    }
}

/// Runs the selected algorithm.
pub fn run_pathfinding(
    algorithm: PathAlgorithm,
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    start: NodeId,
    end: NodeId,
) -> PathResult {
    algorithm.run(nodes, edges, start, end)
}

impl Graph {
    /// Runs `algorithm` between two nodes of this graph.
    pub fn find_path(&self, algorithm: PathAlgorithm, start: NodeId, end: NodeId) -> PathResult {
        algorithm.run(&self.nodes, &self.edges, start, end)
    }
}

/// Walks the predecessor map back from `end`.
///
/// Returns an empty path if the chain does not lead back to `start`.
fn reconstruct_path(came_from: &HashMap<NodeId, NodeId>, start: NodeId, end: NodeId) -> Vec<NodeId> {
    let mut path = vec![end];
    let mut current = end;
    while current != start {
        match came_from.get(&current) {
            Some(&prev) => {
                path.push(prev);
                current = prev;
            }
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}

/// Breadth-first search.
///
/// Stops as soon as the end node is dequeued. The path is minimal by edge count.
pub fn bfs(nodes: &[GraphNode], edges: &[GraphEdge], start: NodeId, end: NodeId) -> PathResult {
    let adjacency = Adjacency::build(nodes, edges);
    if !adjacency.contains(start) {
        return PathResult::default();
    }

    let mut visited_order = Vec::new();
    let mut queue = VecDeque::from([start]);
    let mut discovered = HashSet::from([start]);
    let mut came_from = HashMap::new();
    let mut reached = false;

    while let Some(current) = queue.pop_front() {
        visited_order.push(current);
        if current == end {
            reached = true;
            break;
        }
        for &(next, _) in adjacency.neighbors(current) {
            if discovered.insert(next) {
                came_from.insert(next, current);
                queue.push_back(next);
            }
        }
    }

    let path = if reached {
        reconstruct_path(&came_from, start, end)
    } else {
        Vec::new()
    };
    PathResult {
        visited_order,
        path,
    }
}

/// Depth-first search.
///
/// Neighbours are tried in edge-list order. The recursion depth is bounded by
/// the node count; very large graphs would need an explicit stack.
pub fn dfs(nodes: &[GraphNode], edges: &[GraphEdge], start: NodeId, end: NodeId) -> PathResult {
    struct Walk<'a, 'g> {
        adjacency: &'a Adjacency<'g>,
        end: NodeId,
        visited: HashSet<NodeId>,
        visited_order: Vec<NodeId>,
        came_from: HashMap<NodeId, NodeId>,
        found: bool,
    }

    impl Walk<'_, '_> {
        fn traverse(&mut self, current: NodeId) {
            if self.found || !self.visited.insert(current) {
                return;
            }
            self.visited_order.push(current);
            if current == self.end {
                self.found = true;
                return;
            }
            for &(next, _) in self.adjacency.neighbors(current) {
                if self.found {
                    return;
                }
                if !self.visited.contains(&next) {
                    self.came_from.insert(next, current);
                    self.traverse(next);
                }
            }
        }
    }

    let adjacency = Adjacency::build(nodes, edges);
    if !adjacency.contains(start) {
        return PathResult::default();
    }

    let mut walk = Walk {
        adjacency: &adjacency,
        end,
        visited: HashSet::new(),
        visited_order: Vec::new(),
        came_from: HashMap::new(),
        found: false,
    };
    walk.traverse(start);

    let path = if walk.found {
        reconstruct_path(&walk.came_from, start, end)
    } else {
        Vec::new()
    };
    PathResult {
        visited_order: walk.visited_order,
        path,
    }
}

/// Dijkstra's algorithm with a linear minimum scan.
///
/// Ties between equal tentative distances go to the node that comes first in
/// the node list.
pub fn dijkstra(nodes: &[GraphNode], edges: &[GraphEdge], start: NodeId, end: NodeId) -> PathResult {
    let adjacency = Adjacency::build(nodes, edges);
    if !adjacency.contains(start) {
        return PathResult::default();
    }

    let mut distances: HashMap<NodeId, f64> =
        adjacency.order().iter().map(|&id| (id, f64::INFINITY)).collect();
    distances.insert(start, 0.0);
    let mut unvisited: Vec<NodeId> = adjacency.order().to_vec();
    let mut came_from = HashMap::new();
    let mut visited_order = Vec::new();
    let mut reached = false;

    loop {
        let mut best: Option<(usize, f64)> = None;
        for (slot, id) in unvisited.iter().enumerate() {
            let dist = distances[id];
            if dist < best.map_or(f64::INFINITY, |(_, d)| d) {
                best = Some((slot, dist));
            }
        }
        let Some((slot, current_dist)) = best else {
            break;
        };

        let current = unvisited.remove(slot);
        visited_order.push(current);
        if current == end {
            reached = true;
            break;
        }

        for &(neighbor, weight) in adjacency.neighbors(current) {
            if !unvisited.contains(&neighbor) {
                continue;
            }
            let candidate = current_dist + weight;
            if candidate < distances[&neighbor] {
                distances.insert(neighbor, candidate);
                came_from.insert(neighbor, current);
            }
        }
    }

    let path = if reached {
        reconstruct_path(&came_from, start, end)
    } else {
        Vec::new()
    };
    PathResult {
        visited_order,
        path,
    }
}

/// A* search with the straight-line distance to the goal as heuristic.
///
/// The open set is scanned linearly for the lowest f-score, ties going to the
/// node that entered the open set first. Expanded nodes are closed and never
/// expanded twice.
pub fn astar(nodes: &[GraphNode], edges: &[GraphEdge], start: NodeId, end: NodeId) -> PathResult {
    let adjacency = Adjacency::build(nodes, edges);
    let (Some(_), Some(goal)) = (adjacency.node(start), adjacency.node(end)) else {
        return unreachable_goal(&adjacency, start);
    };

    let heuristic = |id: NodeId| -> f64 {
        adjacency
            .node(id)
            .map(|node| node.distance_to(goal))
            .unwrap_or(f64::INFINITY)
    };

    let mut g_score: HashMap<NodeId, f64> = HashMap::from([(start, 0.0)]);
    let mut f_score: HashMap<NodeId, f64> = HashMap::from([(start, heuristic(start))]);
    let mut open: Vec<NodeId> = vec![start];
    let mut closed: HashSet<NodeId> = HashSet::new();
    let mut came_from = HashMap::new();
    let mut visited_order = Vec::new();
    let mut reached = false;

    while !open.is_empty() {
        let mut slot = 0;
        for (i, id) in open.iter().enumerate() {
            if f_score[id] < f_score[&open[slot]] {
                slot = i;
            }
        }
        let current = open.remove(slot);
        closed.insert(current);
        visited_order.push(current);
        if current == end {
            reached = true;
            break;
        }

        let current_g = g_score[&current];
        for &(neighbor, weight) in adjacency.neighbors(current) {
            if closed.contains(&neighbor) {
                continue;
            }
            let tentative = current_g + weight;
            if tentative < g_score.get(&neighbor).copied().unwrap_or(f64::INFINITY) {
                came_from.insert(neighbor, current);
                g_score.insert(neighbor, tentative);
                f_score.insert(neighbor, tentative + heuristic(neighbor));
                if !open.contains(&neighbor) {
                    open.push(neighbor);
                }
            }
        }
    }

    let path = if reached {
        reconstruct_path(&came_from, start, end)
    } else {
        Vec::new()
    };
    PathResult {
        visited_order,
        path,
    }
}

/// A* cannot aim at a goal without coordinates. The start is still reported
/// as visited when it exists, matching the other algorithms.
fn unreachable_goal(adjacency: &Adjacency<'_>, start: NodeId) -> PathResult {
    let visited_order = if adjacency.contains(start) {
        vec![start]
    } else {
        Vec::new()
    };
    PathResult {
        visited_order,
        path: Vec::new(),
    }
}

/// Summary figures for a found path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStats {
    /// Number of nodes on the path
    pub nodes: usize,
    /// Rounded geometric length of the path
    pub cost: u64,
}

impl PathStats {
    /// Computes the statistics of `path`; `None` when the path is empty or
    /// names a node that does not exist.
    pub fn from_path(nodes: &[GraphNode], path: &[NodeId]) -> Option<Self> {
        if path.is_empty() {
            return None;
        }
        let by_id: HashMap<NodeId, &GraphNode> = nodes.iter().map(|n| (n.id, n)).collect();
        let mut total = 0.0;
        for hop in path.windows(2) {
            let a = by_id.get(&hop[0])?;
            let b = by_id.get(&hop[1])?;
            total += a.distance_to(b);
        }
        Some(PathStats {
            nodes: path.len(),
            cost: total.round() as u64,
        })
    }
}

/// Sums the effective edge weights along `path`.
///
/// Returns `None` if two consecutive path nodes are not joined by an edge.
pub fn path_weight(nodes: &[GraphNode], edges: &[GraphEdge], path: &[NodeId]) -> Option<f64> {
    let adjacency = Adjacency::build(nodes, edges);
    let mut total = 0.0;
    for hop in path.windows(2) {
        let weight = adjacency
            .neighbors(hop[0])
            .iter()
            .filter(|(id, _)| *id == hop[1])
            .map(|(_, w)| *w)
            .fold(None, |best: Option<f64>, w| Some(best.map_or(w, |b| b.min(w))))?;
        total += weight;
    }
    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 0 -- 1 -- 2
    // |         |
    // 3 ------- 4      5 (isolated)
    fn sample() -> (Vec<GraphNode>, Vec<GraphEdge>) {
        let nodes = vec![
            GraphNode::new(0, 0.0, 0.0),
            GraphNode::new(1, 10.0, 0.0),
            GraphNode::new(2, 20.0, 0.0),
            GraphNode::new(3, 0.0, 10.0),
            GraphNode::new(4, 20.0, 10.0),
            GraphNode::new(5, 50.0, 50.0),
        ];
        let edges = vec![
            GraphEdge::new(0, 1),
            GraphEdge::new(1, 2),
            GraphEdge::new(0, 3),
            GraphEdge::new(3, 4),
            GraphEdge::new(2, 4),
        ];
        (nodes, edges)
    }

    fn assert_no_duplicates(order: &[NodeId]) {
        let unique: HashSet<_> = order.iter().collect();
        assert_eq!(unique.len(), order.len(), "duplicate in {:?}", order);
    }

    #[test]
    fn test_bfs_level_order() {
        let (nodes, edges) = sample();
        let result = bfs(&nodes, &edges, 0, 4);
        assert_eq!(result.visited_order, vec![0, 1, 3, 2, 4]);
        assert_eq!(result.path, vec![0, 3, 4]);
    }

    #[test]
    fn test_dfs_follows_edge_order() {
        let (nodes, edges) = sample();
        let result = dfs(&nodes, &edges, 0, 4);
        assert_eq!(result.visited_order, vec![0, 1, 2, 4]);
        assert_eq!(result.path, vec![0, 1, 2, 4]);
    }

    #[test]
    fn test_dijkstra_prefers_cheaper_route() {
        let (nodes, edges) = sample();
        let result = dijkstra(&nodes, &edges, 0, 4);
        // both routes are 30 long; 0-1-2-4 and 0-3-4 tie, first minimum wins
        assert_eq!(path_weight(&nodes, &edges, &result.path), Some(30.0));
        assert_eq!(result.path.first(), Some(&0));
        assert_eq!(result.path.last(), Some(&4));
        assert_no_duplicates(&result.visited_order);
    }

    #[test]
    fn test_explicit_weights_override_distance() {
        let (nodes, mut edges) = sample();
        edges[2] = GraphEdge::weighted(0, 3, 100.0);
        let result = dijkstra(&nodes, &edges, 0, 4);
        assert_eq!(result.path, vec![0, 1, 2, 4]);
        let result = astar(&nodes, &edges, 0, 4);
        assert_eq!(result.path, vec![0, 1, 2, 4]);
    }

    #[test]
    fn test_unreachable_end_yields_empty_path() {
        let (nodes, edges) = sample();
        for algorithm in PathAlgorithm::ALL {
            let result = algorithm.run(&nodes, &edges, 0, 5);
            assert!(result.path.is_empty(), "{} found a path", algorithm);
            assert!(!result.found());
            assert_no_duplicates(&result.visited_order);
            assert!(!result.visited_order.contains(&5));
        }
    }

    #[test]
    fn test_missing_start_is_unreachable() {
        let (nodes, edges) = sample();
        for algorithm in PathAlgorithm::ALL {
            let result = algorithm.run(&nodes, &edges, 77, 4);
            assert_eq!(result, PathResult::default());
        }
    }

    #[test]
    fn test_missing_end_is_unreachable() {
        let (nodes, edges) = sample();
        for algorithm in PathAlgorithm::ALL {
            let result = algorithm.run(&nodes, &edges, 0, 77);
            assert!(result.path.is_empty());
            assert_no_duplicates(&result.visited_order);
        }
    }

    #[test]
    fn test_start_equals_end() {
        let (nodes, edges) = sample();
        for algorithm in PathAlgorithm::ALL {
            let result = algorithm.run(&nodes, &edges, 2, 2);
            assert_eq!(result.visited_order, vec![2]);
            assert_eq!(result.path, vec![2]);
        }
    }

    #[test]
    fn test_path_stats() {
        let (nodes, _) = sample();
        let stats = PathStats::from_path(&nodes, &[0, 1, 2, 4]).unwrap();
        assert_eq!(stats, PathStats { nodes: 4, cost: 30 });
        assert!(PathStats::from_path(&nodes, &[]).is_none());
        assert!(PathStats::from_path(&nodes, &[0, 99]).is_none());
    }

    #[test]
    fn test_path_weight_requires_edges() {
        let (nodes, edges) = sample();
        assert_eq!(path_weight(&nodes, &edges, &[0, 3, 4]), Some(30.0));
        assert_eq!(path_weight(&nodes, &edges, &[0, 4]), None);
        assert_eq!(path_weight(&nodes, &edges, &[1]), Some(0.0));
    }

    #[test]
    fn test_algorithm_names() {
        for algorithm in PathAlgorithm::ALL {
            let parsed: PathAlgorithm = algorithm.to_string().parse().unwrap();
            assert_eq!(parsed, algorithm);
            assert!(!algorithm.info().name.is_empty());
        }
        assert_eq!("A*".parse::<PathAlgorithm>(), Ok(PathAlgorithm::AStar));
        assert!("floyd".parse::<PathAlgorithm>().is_err());
    }
}
