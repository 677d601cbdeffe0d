//! Error types surfaced to callers of the engines.
//!
//! Only externally supplied input can fail: Boolean expressions and manual
//! tree edits. Unreachable targets and missing search values are ordinary
//! outcomes and are reported as empty paths or traces instead.

use crate::tree::Side;

/// Errors produced while parsing a Boolean expression.
///
/// Every variant means the same thing to a caller: the expression is invalid
/// and the user should correct it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpressionError {
    #[error("Unexpected character '{ch}' at position {position}")]
    UnexpectedCharacter { ch: char, position: usize },

    #[error("Unexpected token '{found}' at position {position}")]
    UnexpectedToken { found: String, position: usize },

    #[error("Expression ended unexpectedly")]
    UnexpectedEnd,

    #[error("Unbalanced parentheses at position {position}")]
    UnbalancedParentheses { position: usize },

    #[error("Expression contains no variables")]
    NoVariables,

    #[error("Expression uses {count} variables, at most {max} are supported")]
    TooManyVariables { count: usize, max: usize },
}

/// Errors produced by structural tree edits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("Parent node {0} not found")]
    ParentNotFound(u64),

    #[error("The {side} child of node {parent} is already occupied")]
    SideOccupied { parent: u64, side: Side },

    #[error("Tree already has a root")]
    RootOccupied,

    #[error("{order} traversal is not defined for {kind} trees")]
    UnsupportedTraversal { kind: String, order: String },
}
