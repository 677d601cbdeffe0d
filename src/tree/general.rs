use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::config::TreeLayoutConfig;
use crate::error::TreeError;
use crate::tree::layout::{layout_tree, LayoutExtent, LayoutNode};
use crate::tree::{SearchStrategy, TreeNodeId, TreeSearchResult};

/// An n-ary tree node with ordered children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralNode<T> {
    pub id: TreeNodeId,
    pub value: T,
    pub children: Vec<GeneralNode<T>>,
    pub x: f64,
    pub y: f64,
}

impl<T> GeneralNode<T> {
    fn new(id: TreeNodeId, value: T) -> Self {
        GeneralNode {
            id,
            value,
            children: Vec::new(),
            x: 0.0,
            y: 0.0,
        }
    }

    fn find(&self, id: TreeNodeId) -> Option<&GeneralNode<T>> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    fn find_mut(&mut self, id: TreeNodeId) -> Option<&mut GeneralNode<T>> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    fn count(&self) -> usize {
        1 + self.children.iter().map(|c| c.count()).sum::<usize>()
    }
}

impl<T> LayoutNode for GeneralNode<T> {
    fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    fn x(&self) -> f64 {
        self.x
    }

    fn children_mut(&mut self) -> Vec<&mut Self> {
        self.children.iter_mut().collect()
    }
}

/// N-ary tree built by explicit parent selection. New children are appended
/// after their existing siblings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralTree<T> {
    root: Option<GeneralNode<T>>,
    next_id: TreeNodeId,
}

impl<T> Default for GeneralTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> GeneralTree<T> {
    pub fn new() -> Self {
        GeneralTree {
            root: None,
            next_id: 1,
        }
    }

    pub fn root(&self) -> Option<&GeneralNode<T>> {
        self.root.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn len(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.count())
    }

    pub fn node(&self, id: TreeNodeId) -> Option<&GeneralNode<T>> {
        self.root.as_ref().and_then(|root| root.find(id))
    }

    /// Adds `value` under `parent`, or as the root when `parent` is `None`.
    ///
    /// # Arguments
    /// * `parent` - id of an existing node, or `None` to create the root
    /// * `value` - value of the new node
    ///
    /// # Examples
    /// ```
    /// use algotrace::GeneralTree;
    ///
    /// let mut tree = GeneralTree::new();
    /// let root = tree.insert(None, "Root").unwrap();
    /// tree.insert(Some(root), "a").unwrap();
    /// tree.insert(Some(root), "b").unwrap();
    /// assert_eq!(tree.bfs(), vec!["Root", "a", "b"]);
    /// ```
    pub fn insert(&mut self, parent: Option<TreeNodeId>, value: T) -> Result<TreeNodeId, TreeError> {
        let id = self.next_id;
        match parent {
            None => {
                if self.root.is_some() {
                    return Err(TreeError::RootOccupied);
                }
                self.root = Some(GeneralNode::new(id, value));
            }
            Some(parent_id) => {
                let parent = self
                    .root
                    .as_mut()
                    .and_then(|root| root.find_mut(parent_id))
                    .ok_or(TreeError::ParentNotFound(parent_id))?;
                parent.children.push(GeneralNode::new(id, value));
            }
        }
        self.next_id += 1;
        Ok(id)
    }

    pub fn bfs(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut visited = Vec::new();
        let mut queue: VecDeque<&GeneralNode<T>> = self.root.iter().collect();
        while let Some(node) = queue.pop_front() {
            visited.push(node.value.clone());
            queue.extend(node.children.iter());
        }
        visited
    }

    pub fn dfs_pre_order(&self) -> Vec<T>
    where
        T: Clone,
    {
        fn walk<T: Clone>(node: &GeneralNode<T>, out: &mut Vec<T>) {
            out.push(node.value.clone());
            for child in &node.children {
                walk(child, out);
            }
        }
        let mut visited = Vec::new();
        if let Some(root) = &self.root {
            walk(root, &mut visited);
        }
        visited
    }

    pub fn layout(&mut self, config: &TreeLayoutConfig) -> LayoutExtent {
        match self.root.as_mut() {
            Some(root) => layout_tree(root, config),
            None => LayoutExtent::default(),
        }
    }
}

impl<T: PartialEq + Clone> GeneralTree<T> {
    /// Searches for `target`. General trees carry no ordering, so
    /// `SearchStrategy::Logic` runs as a level-order scan.
    pub fn search(&self, target: &T, strategy: SearchStrategy) -> TreeSearchResult<T> {
        let (visits, found) = match strategy {
            SearchStrategy::Logic | SearchStrategy::Bfs => self.search_bfs(target),
            SearchStrategy::Dfs => self.search_dfs(target),
        };
        tracing::debug!(%strategy, visited = visits.len(), found, "general tree search");
        TreeSearchResult::from_visits(visits, found)
    }

    fn search_bfs(&self, target: &T) -> (Vec<T>, bool) {
        let mut visits = Vec::new();
        let mut queue: VecDeque<&GeneralNode<T>> = self.root.iter().collect();
        while let Some(node) = queue.pop_front() {
            visits.push(node.value.clone());
            if node.value == *target {
                return (visits, true);
            }
            queue.extend(node.children.iter());
        }
        (visits, false)
    }

    fn search_dfs(&self, target: &T) -> (Vec<T>, bool) {
        fn walk<T: PartialEq + Clone>(node: &GeneralNode<T>, target: &T, visits: &mut Vec<T>) -> bool {
            visits.push(node.value.clone());
            node.value == *target || node.children.iter().any(|child| walk(child, target, visits))
        }
        let mut visits = Vec::new();
        let found = match &self.root {
            Some(root) => walk(root, target, &mut visits),
            None => false,
        };
        (visits, found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Root -> [A -> [A1, A2], B, C -> [C1]]
    fn sample() -> GeneralTree<&'static str> {
        let mut tree = GeneralTree::new();
        let root = tree.insert(None, "Root").unwrap();
        let a = tree.insert(Some(root), "A").unwrap();
        tree.insert(Some(root), "B").unwrap();
        let c = tree.insert(Some(root), "C").unwrap();
        tree.insert(Some(a), "A1").unwrap();
        tree.insert(Some(a), "A2").unwrap();
        tree.insert(Some(c), "C1").unwrap();
        tree
    }

    #[test]
    fn test_traversals() {
        let tree = sample();
        assert_eq!(tree.bfs(), vec!["Root", "A", "B", "C", "A1", "A2", "C1"]);
        assert_eq!(tree.dfs_pre_order(), vec!["Root", "A", "A1", "A2", "B", "C", "C1"]);
        assert_eq!(tree.len(), 7);
    }

    #[test]
    fn test_second_root_rejected() {
        let mut tree = sample();
        assert_eq!(tree.insert(None, "Other"), Err(TreeError::RootOccupied));
        assert_eq!(tree.len(), 7);
    }

    #[test]
    fn test_missing_parent() {
        let mut tree = sample();
        assert_eq!(tree.insert(Some(99), "X"), Err(TreeError::ParentNotFound(99)));
        let mut empty: GeneralTree<i32> = GeneralTree::new();
        assert_eq!(empty.insert(Some(1), 5), Err(TreeError::ParentNotFound(1)));
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let tree = sample();
        let root = tree.root().unwrap();
        let names: Vec<&str> = root.children.iter().map(|c| c.value).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(tree.node(root.children[2].id).map(|n| n.value), Some("C"));
    }

    #[test]
    fn test_search_strategies() {
        let tree = sample();
        let bfs = tree.search(&"A2", SearchStrategy::Bfs);
        assert!(bfs.found);
        assert_eq!(bfs.visited().copied().collect::<Vec<_>>(), vec!["Root", "A", "B", "C", "A1", "A2"]);

        let logic = tree.search(&"A2", SearchStrategy::Logic);
        assert_eq!(logic, bfs);

        let dfs = tree.search(&"A2", SearchStrategy::Dfs);
        assert!(dfs.found);
        assert_eq!(dfs.visited().copied().collect::<Vec<_>>(), vec!["Root", "A", "A1", "A2"]);
        assert!(dfs.path.last().unwrap().is_final);
    }

    #[test]
    fn test_search_miss_visits_everything() {
        let tree = sample();
        let result = tree.search(&"Z", SearchStrategy::Dfs);
        assert!(!result.found);
        assert_eq!(result.path.len(), 7);
        assert_eq!(result.path.iter().filter(|s| s.is_final).count(), 1);
    }

    #[test]
    fn test_layout() {
        let mut tree = sample();
        let extent = tree.layout(&TreeLayoutConfig::default());
        let root = tree.root().unwrap();
        // leaves A1, A2, B, C1 at 0, 50, 100, 150
        assert_eq!(root.children[0].x, 25.0);
        assert_eq!(root.children[1].x, 100.0);
        assert_eq!(root.children[2].x, 150.0);
        assert_eq!(root.x, 87.5);
        assert_eq!(root.children[2].children[0].y, 120.0);
        assert_eq!(extent.leaves, 4);
    }
}
