use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::config::TreeLayoutConfig;
use crate::error::TreeError;
use crate::tree::layout::{layout_tree, LayoutExtent, LayoutNode};
use crate::tree::{SearchStrategy, Side, TreeNodeId, TreeSearchResult};

/// A binary tree node. Children are owned exclusively by their parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryNode<T> {
    pub id: TreeNodeId,
    pub value: T,
    pub left: Option<Box<BinaryNode<T>>>,
    pub right: Option<Box<BinaryNode<T>>>,
    pub x: f64,
    pub y: f64,
}

impl<T> BinaryNode<T> {
    fn new(id: TreeNodeId, value: T) -> Self {
        BinaryNode {
            id,
            value,
            left: None,
            right: None,
            x: 0.0,
            y: 0.0,
        }
    }

    pub fn child(&self, side: Side) -> Option<&BinaryNode<T>> {
        match side {
            Side::Left => self.left.as_deref(),
            Side::Right => self.right.as_deref(),
        }
    }

    fn slot_mut(&mut self, side: Side) -> &mut Option<Box<BinaryNode<T>>> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    fn find(&self, id: TreeNodeId) -> Option<&BinaryNode<T>> {
        if self.id == id {
            return Some(self);
        }
        self.left
            .as_deref()
            .and_then(|left| left.find(id))
            .or_else(|| self.right.as_deref().and_then(|right| right.find(id)))
    }

    fn find_mut(&mut self, id: TreeNodeId) -> Option<&mut BinaryNode<T>> {
        if self.id == id {
            return Some(self);
        }
        if let Some(left) = self.left.as_deref_mut() {
            if let Some(found) = left.find_mut(id) {
                return Some(found);
            }
        }
        self.right.as_deref_mut().and_then(|right| right.find_mut(id))
    }

    fn count(&self) -> usize {
        1 + self.left.as_ref().map_or(0, |n| n.count()) + self.right.as_ref().map_or(0, |n| n.count())
    }
}

impl<T> LayoutNode for BinaryNode<T> {
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
        let mut children = Vec::with_capacity(2);
        if let Some(left) = self.left.as_deref_mut() {
            children.push(left);
        }
        if let Some(right) = self.right.as_deref_mut() {
            children.push(right);
        }
        children
    }
}

/// Binary tree with BST auto-insertion and unrestricted manual insertion.
///
/// Auto insertion keeps the BST ordering (left < node < right). Manual
/// insertion attaches a leaf wherever the caller asks and may break that
/// ordering on purpose, so that arbitrary binary trees can be built; the
/// `Logic` search strategy is unsound on such trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryTree<T> {
    root: Option<Box<BinaryNode<T>>>,
    next_id: TreeNodeId,
}

impl<T> Default for BinaryTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BinaryTree<T> {
    pub fn new() -> Self {
        BinaryTree {
            root: None,
            next_id: 1,
        }
    }

    pub fn root(&self) -> Option<&BinaryNode<T>> {
        self.root.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn len(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.count())
    }

    pub fn node(&self, id: TreeNodeId) -> Option<&BinaryNode<T>> {
        self.root.as_deref().and_then(|root| root.find(id))
    }

    fn allocate_id(&mut self) -> TreeNodeId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Creates the root of an empty tree.
    pub fn insert_root(&mut self, value: T) -> Result<TreeNodeId, TreeError> {
        if self.root.is_some() {
            return Err(TreeError::RootOccupied);
        }
        let id = self.allocate_id();
        self.root = Some(Box::new(BinaryNode::new(id, value)));
        Ok(id)
    }

    /// Attaches a new leaf on `side` of the node `parent_id`.
    ///
    /// Fails without touching the tree if the parent does not exist or that
    /// side is already occupied. Ordering is not checked.
    pub fn insert_manual(&mut self, parent_id: TreeNodeId, value: T, side: Side) -> Result<TreeNodeId, TreeError> {
        let id = self.next_id;
        let parent = self
            .root
            .as_deref_mut()
            .and_then(|root| root.find_mut(parent_id))
            .ok_or(TreeError::ParentNotFound(parent_id))?;

        let slot = parent.slot_mut(side);
        if slot.is_some() {
            return Err(TreeError::SideOccupied {
                parent: parent_id,
                side,
            });
        }
        *slot = Some(Box::new(BinaryNode::new(id, value)));
        self.next_id += 1;
        Ok(id)
    }

    /// Level-order values.
    pub fn bfs(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut visited = Vec::new();
        let mut queue: VecDeque<&BinaryNode<T>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = queue.pop_front() {
            visited.push(node.value.clone());
            queue.extend(node.left.as_deref());
            queue.extend(node.right.as_deref());
        }
        visited
    }

    /// Pre-order values (node, left, right).
    pub fn dfs_pre_order(&self) -> Vec<T>
    where
        T: Clone,
    {
        fn walk<T: Clone>(node: Option<&BinaryNode<T>>, out: &mut Vec<T>) {
            if let Some(node) = node {
                out.push(node.value.clone());
                walk(node.left.as_deref(), out);
                walk(node.right.as_deref(), out);
            }
        }
        let mut visited = Vec::new();
        walk(self.root.as_deref(), &mut visited);
        visited
    }

    /// In-order values (left, node, right); sorted for a BST.
    pub fn dfs_in_order(&self) -> Vec<T>
    where
        T: Clone,
    {
        fn walk<T: Clone>(node: Option<&BinaryNode<T>>, out: &mut Vec<T>) {
            if let Some(node) = node {
                walk(node.left.as_deref(), out);
                out.push(node.value.clone());
                walk(node.right.as_deref(), out);
            }
        }
        let mut visited = Vec::new();
        walk(self.root.as_deref(), &mut visited);
        visited
    }

    /// Post-order values (left, right, node).
    pub fn dfs_post_order(&self) -> Vec<T>
    where
        T: Clone,
    {
        fn walk<T: Clone>(node: Option<&BinaryNode<T>>, out: &mut Vec<T>) {
            if let Some(node) = node {
                walk(node.left.as_deref(), out);
                walk(node.right.as_deref(), out);
                out.push(node.value.clone());
            }
        }
        let mut visited = Vec::new();
        walk(self.root.as_deref(), &mut visited);
        visited
    }

    /// Assigns drawing coordinates to every node.
    pub fn layout(&mut self, config: &TreeLayoutConfig) -> LayoutExtent {
        match self.root.as_deref_mut() {
            Some(root) => layout_tree(root, config),
            None => LayoutExtent::default(),
        }
    }
}

impl<T: Ord + Clone> BinaryTree<T> {
    /// BST insertion. Duplicates are ignored and return `None`.
    pub fn insert(&mut self, value: T) -> Option<TreeNodeId> {
        fn descend<T: Ord>(slot: &mut Option<Box<BinaryNode<T>>>, id: TreeNodeId, value: T) -> bool {
            match slot {
                None => {
                    *slot = Some(Box::new(BinaryNode::new(id, value)));
                    true
                }
                Some(node) => match value.cmp(&node.value) {
                    std::cmp::Ordering::Equal => false,
                    std::cmp::Ordering::Less => descend(&mut node.left, id, value),
                    std::cmp::Ordering::Greater => descend(&mut node.right, id, value),
                },
            }
        }

        let id = self.next_id;
        if descend(&mut self.root, id, value) {
            self.next_id += 1;
            Some(id)
        } else {
            None
        }
    }

    /// Searches for `target`, recording every node visited.
    pub fn search(&self, target: &T, strategy: SearchStrategy) -> TreeSearchResult<T> {
        let (visits, found) = match strategy {
            SearchStrategy::Logic => self.search_logic(target),
            SearchStrategy::Bfs => self.search_bfs(target),
            SearchStrategy::Dfs => self.search_dfs(target),
        };
        tracing::debug!(%strategy, visited = visits.len(), found, "binary tree search");
        TreeSearchResult::from_visits(visits, found)
    }

    /// Root-to-leaf descent guided by the BST ordering.
    fn search_logic(&self, target: &T) -> (Vec<T>, bool) {
        let mut visits = Vec::new();
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            visits.push(node.value.clone());
            current = match target.cmp(&node.value) {
                std::cmp::Ordering::Equal => return (visits, true),
                std::cmp::Ordering::Less => node.left.as_deref(),
                std::cmp::Ordering::Greater => node.right.as_deref(),
            };
        }
        (visits, false)
    }

    fn search_bfs(&self, target: &T) -> (Vec<T>, bool) {
        let mut visits = Vec::new();
        let mut queue: VecDeque<&BinaryNode<T>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = queue.pop_front() {
            visits.push(node.value.clone());
            if node.value == *target {
                return (visits, true);
            }
            queue.extend(node.left.as_deref());
            queue.extend(node.right.as_deref());
        }
        (visits, false)
    }

    fn search_dfs(&self, target: &T) -> (Vec<T>, bool) {
        fn walk<T: Ord + Clone>(node: Option<&BinaryNode<T>>, target: &T, visits: &mut Vec<T>) -> bool {
            let Some(node) = node else {
                return false;
            };
            visits.push(node.value.clone());
            node.value == *target
                || walk(node.left.as_deref(), target, visits)
                || walk(node.right.as_deref(), target, visits)
        }
        let mut visits = Vec::new();
        let found = walk(self.root.as_deref(), target, &mut visits);
        (visits, found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BinaryTree<i32> {
        let mut tree = BinaryTree::new();
        for value in [50, 30, 70, 20, 40, 60, 80] {
            tree.insert(value);
        }
        tree
    }

    fn visited(result: &TreeSearchResult<i32>) -> Vec<i32> {
        result.visited().copied().collect()
    }

    #[test]
    fn test_traversals() {
        let tree = sample();
        assert_eq!(tree.bfs(), vec![50, 30, 70, 20, 40, 60, 80]);
        assert_eq!(tree.dfs_pre_order(), vec![50, 30, 20, 40, 70, 60, 80]);
        assert_eq!(tree.dfs_in_order(), vec![20, 30, 40, 50, 60, 70, 80]);
        assert_eq!(tree.dfs_post_order(), vec![20, 40, 30, 60, 80, 70, 50]);
    }

    #[test]
    fn test_duplicates_are_ignored() {
        let mut tree = sample();
        assert_eq!(tree.insert(40), None);
        assert_eq!(tree.len(), 7);
        assert!(tree.insert(45).is_some());
        assert_eq!(tree.len(), 8);
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut tree = BinaryTree::new();
        assert_eq!(tree.insert(5), Some(1));
        assert_eq!(tree.insert(5), None);
        assert_eq!(tree.insert(3), Some(2));
        assert_eq!(tree.insert_manual(2, 9, Side::Left), Ok(3));
    }

    #[test]
    fn test_logic_search_follows_descent() {
        let tree = sample();
        let result = tree.search(&60, SearchStrategy::Logic);
        assert!(result.found);
        assert_eq!(visited(&result), vec![50, 70, 60]);
        assert!(result.path.last().unwrap().is_final);
        assert!(result.path[..2].iter().all(|s| !s.is_final));
    }

    #[test]
    fn test_logic_search_miss() {
        let tree = sample();
        let result = tree.search(&65, SearchStrategy::Logic);
        assert!(!result.found);
        assert_eq!(visited(&result), vec![50, 70, 60]);
        assert!(result.path.last().unwrap().is_final);
    }

    #[test]
    fn test_bfs_and_dfs_search() {
        let tree = sample();
        let bfs = tree.search(&40, SearchStrategy::Bfs);
        assert!(bfs.found);
        assert_eq!(visited(&bfs), vec![50, 30, 70, 20, 40]);

        let dfs = tree.search(&40, SearchStrategy::Dfs);
        assert!(dfs.found);
        assert_eq!(visited(&dfs), vec![50, 30, 20, 40]);

        let miss = tree.search(&99, SearchStrategy::Dfs);
        assert!(!miss.found);
        assert_eq!(miss.path.len(), 7);
    }

    #[test]
    fn test_search_empty_tree() {
        let tree: BinaryTree<i32> = BinaryTree::new();
        for strategy in [SearchStrategy::Logic, SearchStrategy::Bfs, SearchStrategy::Dfs] {
            let result = tree.search(&1, strategy);
            assert!(!result.found);
            assert!(result.path.is_empty());
        }
    }

    #[test]
    fn test_manual_insert_rejects_occupied_side() {
        let mut tree = BinaryTree::new();
        let root = tree.insert_root(10).unwrap();
        let first = tree.insert_manual(root, 99, Side::Left).unwrap();
        let err = tree.insert_manual(root, 5, Side::Left).unwrap_err();
        assert_eq!(
            err,
            TreeError::SideOccupied {
                parent: root,
                side: Side::Left
            }
        );
        let left = tree.root().unwrap().child(Side::Left).unwrap();
        assert_eq!(left.id, first);
        assert_eq!(left.value, 99);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_manual_insert_missing_parent() {
        let mut tree = sample();
        assert_eq!(
            tree.insert_manual(404, 1, Side::Right),
            Err(TreeError::ParentNotFound(404))
        );
        let mut empty: BinaryTree<i32> = BinaryTree::new();
        assert_eq!(empty.insert_manual(1, 1, Side::Left), Err(TreeError::ParentNotFound(1)));
    }

    #[test]
    fn test_insert_root_twice() {
        let mut tree = BinaryTree::new();
        tree.insert_root(1).unwrap();
        assert_eq!(tree.insert_root(2), Err(TreeError::RootOccupied));
    }

    #[test]
    fn test_logic_search_unsound_on_manual_tree() {
        // 10 with a left child of 99 breaks the ordering
        let mut tree = BinaryTree::new();
        let root = tree.insert_root(10).unwrap();
        tree.insert_manual(root, 99, Side::Left).unwrap();

        assert!(!tree.search(&99, SearchStrategy::Logic).found);
        assert!(tree.search(&99, SearchStrategy::Bfs).found);
        assert!(tree.search(&99, SearchStrategy::Dfs).found);
    }

    #[test]
    fn test_node_lookup() {
        let tree = sample();
        let root_id = tree.root().unwrap().id;
        assert_eq!(tree.node(root_id).map(|n| n.value), Some(50));
        assert!(tree.node(1000).is_none());
        assert!(tree.root().unwrap().left.as_ref().unwrap().left.as_ref().unwrap().is_leaf());
    }

    #[test]
    fn test_layout_balanced_tree() {
        let mut tree = sample();
        let extent = tree.layout(&TreeLayoutConfig::default());
        let root = tree.root().unwrap();
        assert_eq!(root.y, 0.0);
        assert_eq!(root.x, 75.0);
        let left = root.child(Side::Left).unwrap();
        assert_eq!(left.x, 25.0);
        assert_eq!(left.y, 60.0);
        assert_eq!(extent.leaves, 4);
        assert_eq!(extent.width, 150.0);
        assert_eq!(extent.height, 120.0);
    }
}
