use crate::config::TreeLayoutConfig;
use crate::error::TreeError;
use crate::tree::{
    BinaryTree, GeneralTree, LayoutExtent, SearchStrategy, TraversalOrder, TreeKind, TreeSearchResult,
};

/// Operations shared by every tree flavour.
///
/// This trait provides methods to:
/// - Search for a value with a chosen strategy, recording each visit
/// - Produce traversal sequences
/// - Assign drawing coordinates
///
/// Insertion is not part of the trait: binary and general trees are built
/// through different operations (BST descent or side choice versus parent
/// choice), so callers reach them through the concrete types.
pub trait TreeModel<T> {
    /// Returns which flavour of tree this is
    fn kind(&self) -> TreeKind;

    /// Returns the number of nodes
    fn len(&self) -> usize;

    /// Returns true if the tree has no root
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Searches for `target`, recording the visitation path
    fn search(&self, target: &T, strategy: SearchStrategy) -> TreeSearchResult<T>;

    /// Returns values in level order
    fn bfs(&self) -> Vec<T>;

    /// Returns values in pre-order
    fn dfs_pre_order(&self) -> Vec<T>;

    /// Returns values in the requested order, or an error when the order is
    /// not defined for this flavour
    fn traverse(&self, order: TraversalOrder) -> Result<Vec<T>, TreeError>;

    /// Assigns `x`/`y` to every node and returns the drawing extent
    fn layout(&mut self, config: &TreeLayoutConfig) -> LayoutExtent;
}

impl<T: Ord + Clone> TreeModel<T> for BinaryTree<T> {
    fn kind(&self) -> TreeKind {
        TreeKind::Binary
    }

    fn len(&self) -> usize {
        BinaryTree::len(self)
    }

    fn search(&self, target: &T, strategy: SearchStrategy) -> TreeSearchResult<T> {
        BinaryTree::search(self, target, strategy)
    }

    fn bfs(&self) -> Vec<T> {
        BinaryTree::bfs(self)
    }

    fn dfs_pre_order(&self) -> Vec<T> {
        BinaryTree::dfs_pre_order(self)
    }

    fn traverse(&self, order: TraversalOrder) -> Result<Vec<T>, TreeError> {
        Ok(match order {
            TraversalOrder::Bfs => self.bfs(),
            TraversalOrder::PreOrder => self.dfs_pre_order(),
            TraversalOrder::InOrder => self.dfs_in_order(),
            TraversalOrder::PostOrder => self.dfs_post_order(),
        })
    }

    fn layout(&mut self, config: &TreeLayoutConfig) -> LayoutExtent {
        BinaryTree::layout(self, config)
    }
}

impl<T: PartialEq + Clone> TreeModel<T> for GeneralTree<T> {
    fn kind(&self) -> TreeKind {
        TreeKind::General
    }

    fn len(&self) -> usize {
        GeneralTree::len(self)
    }

    fn search(&self, target: &T, strategy: SearchStrategy) -> TreeSearchResult<T> {
        GeneralTree::search(self, target, strategy)
    }

    fn bfs(&self) -> Vec<T> {
        GeneralTree::bfs(self)
    }

    fn dfs_pre_order(&self) -> Vec<T> {
        GeneralTree::dfs_pre_order(self)
    }

    fn traverse(&self, order: TraversalOrder) -> Result<Vec<T>, TreeError> {
        match order {
            TraversalOrder::Bfs => Ok(self.bfs()),
            TraversalOrder::PreOrder => Ok(self.dfs_pre_order()),
            TraversalOrder::InOrder | TraversalOrder::PostOrder => Err(TreeError::UnsupportedTraversal {
                kind: TreeKind::General.to_string(),
                order: order.to_string(),
            }),
        }
    }

    fn layout(&mut self, config: &TreeLayoutConfig) -> LayoutExtent {
        GeneralTree::layout(self, config)
    }
}

// ============================================================================
// Enum Dispatch
// ============================================================================

/// A tree of either flavour, selected at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum DynTree<T> {
    Binary(BinaryTree<T>),
    General(GeneralTree<T>),
}

/// Creates an empty tree of the given flavour.
pub fn build_tree<T>(kind: TreeKind) -> DynTree<T> {
    match kind {
        TreeKind::Binary => DynTree::Binary(BinaryTree::new()),
        TreeKind::General => DynTree::General(GeneralTree::new()),
    }
}

impl<T> DynTree<T> {
    pub fn as_binary(&self) -> Option<&BinaryTree<T>> {
        match self {
            DynTree::Binary(tree) => Some(tree),
            DynTree::General(_) => None,
        }
    }

    pub fn as_binary_mut(&mut self) -> Option<&mut BinaryTree<T>> {
        match self {
            DynTree::Binary(tree) => Some(tree),
            DynTree::General(_) => None,
        }
    }

    pub fn as_general(&self) -> Option<&GeneralTree<T>> {
        match self {
            DynTree::General(tree) => Some(tree),
            DynTree::Binary(_) => None,
        }
    }

    pub fn as_general_mut(&mut self) -> Option<&mut GeneralTree<T>> {
        match self {
            DynTree::General(tree) => Some(tree),
            DynTree::Binary(_) => None,
        }
    }
}

impl<T: Ord + Clone> TreeModel<T> for DynTree<T> {
    #[inline]
    fn kind(&self) -> TreeKind {
        match self {
            DynTree::Binary(t) => t.kind(),
            DynTree::General(t) => t.kind(),
        }
    }

    #[inline]
    fn len(&self) -> usize {
        match self {
            DynTree::Binary(t) => t.len(),
            DynTree::General(t) => t.len(),
        }
    }

    #[inline]
    fn search(&self, target: &T, strategy: SearchStrategy) -> TreeSearchResult<T> {
        match self {
            DynTree::Binary(t) => t.search(target, strategy),
            DynTree::General(t) => t.search(target, strategy),
        }
    }

    #[inline]
    fn bfs(&self) -> Vec<T> {
        match self {
            DynTree::Binary(t) => t.bfs(),
            DynTree::General(t) => t.bfs(),
        }
    }

    #[inline]
    fn dfs_pre_order(&self) -> Vec<T> {
        match self {
            DynTree::Binary(t) => t.dfs_pre_order(),
            DynTree::General(t) => t.dfs_pre_order(),
        }
    }

    #[inline]
    fn traverse(&self, order: TraversalOrder) -> Result<Vec<T>, TreeError> {
        match self {
            DynTree::Binary(t) => TreeModel::traverse(t, order),
            DynTree::General(t) => TreeModel::traverse(t, order),
        }
    }

    #[inline]
    fn layout(&mut self, config: &TreeLayoutConfig) -> LayoutExtent {
        match self {
            DynTree::Binary(t) => t.layout(config),
            DynTree::General(t) => t.layout(config),
        }
    }
}
