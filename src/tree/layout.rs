//! Two-pass tree layout.
//!
//! The first pass assigns `y = depth * level_spacing`. The second pass walks
//! the tree post-order: leaves take consecutive columns `sibling_spacing`
//! apart, and every internal node is centred between its first and last
//! child. The result never overlaps and keeps each depth on one row, for
//! binary and general trees alike.

use serde::{Deserialize, Serialize};

use crate::config::TreeLayoutConfig;

/// Access the layout passes need on a tree node.
pub trait LayoutNode {
    fn set_x(&mut self, x: f64);
    fn set_y(&mut self, y: f64);
    fn x(&self) -> f64;
    /// Present children, left to right.
    fn children_mut(&mut self) -> Vec<&mut Self>;
}

/// Bounding box of a laid-out tree, measured from the origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutExtent {
    pub width: f64,
    pub height: f64,
    pub leaves: usize,
}

/// Assigns coordinates to every node below and including `root`.
pub fn layout_tree<N: LayoutNode>(root: &mut N, config: &TreeLayoutConfig) -> LayoutExtent {
    let max_depth = assign_depths(root, 0, config.level_spacing);

    let mut next_x = 0.0;
    let mut leaves = 0;
    assign_columns(root, &mut next_x, &mut leaves, config.sibling_spacing);

    LayoutExtent {
        width: leaves.saturating_sub(1) as f64 * config.sibling_spacing,
        height: max_depth as f64 * config.level_spacing,
        leaves,
    }
}

fn assign_depths<N: LayoutNode>(node: &mut N, depth: usize, level_spacing: f64) -> usize {
    node.set_y(depth as f64 * level_spacing);
    let mut max_depth = depth;
    for child in node.children_mut() {
        max_depth = max_depth.max(assign_depths(child, depth + 1, level_spacing));
    }
    max_depth
}

fn assign_columns<N: LayoutNode>(node: &mut N, next_x: &mut f64, leaves: &mut usize, spacing: f64) {
    let mut first: Option<f64> = None;
    let mut last: Option<f64> = None;

    for child in node.children_mut() {
        assign_columns(child, next_x, leaves, spacing);
        let x = child.x();
        first.get_or_insert(x);
        last = Some(x);
    }

    let x = match (first, last) {
        (Some(first), Some(last)) => (first + last) / 2.0,
        _ => {
            let x = *next_x;
            *next_x += spacing;
            *leaves += 1;
            x
        }
    };
    node.set_x(x);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain {
        x: f64,
        y: f64,
        children: Vec<Plain>,
    }

    impl Plain {
        fn leaf() -> Self {
            Plain {
                x: -1.0,
                y: -1.0,
                children: Vec::new(),
            }
        }

        fn with(children: Vec<Plain>) -> Self {
            Plain {
                x: -1.0,
                y: -1.0,
                children,
            }
        }
    }

    impl LayoutNode for Plain {
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

    #[test]
    fn test_single_node() {
        let mut root = Plain::leaf();
        let extent = layout_tree(&mut root, &TreeLayoutConfig::default());
        assert_eq!((root.x, root.y), (0.0, 0.0));
        assert_eq!(extent, LayoutExtent { width: 0.0, height: 0.0, leaves: 1 });
    }

    #[test]
    fn test_parent_centred_over_children() {
        let mut root = Plain::with(vec![Plain::leaf(), Plain::leaf(), Plain::leaf()]);
        let config = TreeLayoutConfig {
            level_spacing: 60.0,
            sibling_spacing: 50.0,
        };
        let extent = layout_tree(&mut root, &config);

        let xs: Vec<f64> = root.children.iter().map(|c| c.x).collect();
        assert_eq!(xs, vec![0.0, 50.0, 100.0]);
        assert!(root.children.iter().all(|c| c.y == 60.0));
        assert_eq!(root.x, 50.0);
        assert_eq!(root.y, 0.0);
        assert_eq!(extent.width, 100.0);
        assert_eq!(extent.height, 60.0);
    }

    #[test]
    fn test_uneven_subtrees_do_not_overlap() {
        // root -> [a -> [a1, a2], b]
        let mut root = Plain::with(vec![
            Plain::with(vec![Plain::leaf(), Plain::leaf()]),
            Plain::leaf(),
        ]);
        layout_tree(&mut root, &TreeLayoutConfig::default());

        let a = &root.children[0];
        let b = &root.children[1];
        assert_eq!(a.children[0].x, 0.0);
        assert_eq!(a.children[1].x, 50.0);
        assert_eq!(a.x, 25.0);
        assert_eq!(b.x, 100.0);
        assert_eq!(root.x, 62.5);
        assert_eq!(a.children[1].y, 120.0);
    }
}
