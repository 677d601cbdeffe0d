//! Tree models and their algorithms.
//!
//! This module contains:
//! - Binary trees (BST auto-insertion plus manual construction)
//! - General n-ary trees
//! - Search strategies and traversals recorded as visitation sequences
//! - The two-pass layout that assigns drawing coordinates

pub mod binary;
pub mod general;
pub mod layout;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use binary::{BinaryNode, BinaryTree};
pub use general::{GeneralNode, GeneralTree};
pub use layout::LayoutExtent;

/// Type alias for tree node ids (monotonic per tree, starting at 1)
pub type TreeNodeId = u64;

/// Which child slot of a binary node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(Side::Left),
            "right" | "r" => Ok(Side::Right),
            other => Err(format!("Unknown side: {}", other)),
        }
    }
}

/// How a tree search walks the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Descend using the BST ordering. Only sound on BST-ordered trees; on a
    /// manually built tree that breaks the ordering it may miss values.
    /// General trees treat it as `Bfs`.
    Logic,
    /// Level-order scan
    Bfs,
    /// Pre-order scan
    Dfs,
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStrategy::Logic => f.write_str("logic"),
            SearchStrategy::Bfs => f.write_str("bfs"),
            SearchStrategy::Dfs => f.write_str("dfs"),
        }
    }
}

impl FromStr for SearchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "logic" => Ok(SearchStrategy::Logic),
            "bfs" => Ok(SearchStrategy::Bfs),
            "dfs" => Ok(SearchStrategy::Dfs),
            other => Err(format!("Unknown search strategy: {}", other)),
        }
    }
}

/// Traversal orders. In-order and post-order exist for binary trees only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalOrder {
    Bfs,
    PreOrder,
    InOrder,
    PostOrder,
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TraversalOrder::Bfs => "bfs",
            TraversalOrder::PreOrder => "pre-order",
            TraversalOrder::InOrder => "in-order",
            TraversalOrder::PostOrder => "post-order",
        };
        f.write_str(name)
    }
}

impl FromStr for TraversalOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" => Ok(TraversalOrder::Bfs),
            "pre" | "pre-order" | "preorder" => Ok(TraversalOrder::PreOrder),
            "in" | "in-order" | "inorder" => Ok(TraversalOrder::InOrder),
            "post" | "post-order" | "postorder" => Ok(TraversalOrder::PostOrder),
            other => Err(format!("Unknown traversal order: {}", other)),
        }
    }
}

/// The two tree flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeKind {
    Binary,
    General,
}

impl fmt::Display for TreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeKind::Binary => f.write_str("binary"),
            TreeKind::General => f.write_str("general"),
        }
    }
}

impl FromStr for TreeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "binary" | "bst" => Ok(TreeKind::Binary),
            "general" => Ok(TreeKind::General),
            other => Err(format!("Unknown tree kind: {}", other)),
        }
    }
}

/// One node visited by a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStep<T> {
    pub value: T,
    /// Set on the last step only
    pub is_final: bool,
}

/// Outcome of a tree search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeSearchResult<T> {
    /// Whether the final step matched the target
    pub found: bool,
    pub path: Vec<SearchStep<T>>,
}

impl<T> TreeSearchResult<T> {
    /// Builds a result from visited values, marking the last one final.
    pub(crate) fn from_visits(visits: Vec<T>, found: bool) -> Self {
        let last = visits.len().saturating_sub(1);
        let path = visits
            .into_iter()
            .enumerate()
            .map(|(i, value)| SearchStep {
                value,
                is_final: i == last,
            })
            .collect();
        TreeSearchResult { found, path }
    }

    /// Visited values in order.
    pub fn visited(&self) -> impl Iterator<Item = &T> + '_ {
        self.path.iter().map(|step| &step.value)
    }
}
