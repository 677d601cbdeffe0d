//! Boolean logic engine.
//!
//! Parses infix expressions, enumerates their truth tables and simplifies
//! them to a sum of products by prime-implicant merging.

pub mod minimize;
pub mod parser;
pub mod truth_table;

use serde::{Deserialize, Serialize};

use crate::config::LogicConfig;
use crate::error::ExpressionError;

pub use minimize::{prime_implicants, simplify, Implicant};
pub use parser::{parse_expression, Expr};
pub use truth_table::{generate_truth_table, generate_truth_table_with_config, TruthRow, TruthTable, RESULT_HEADER};

/// Truth table and simplified form of one expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicAnalysis {
    pub expression: String,
    pub table: TruthTable,
    pub simplified: String,
}

/// Parses `expression`, builds its truth table and simplifies it.
pub fn analyze(expression: &str) -> Result<LogicAnalysis, ExpressionError> {
    analyze_with_config(expression, &LogicConfig::default())
}

pub fn analyze_with_config(expression: &str, config: &LogicConfig) -> Result<LogicAnalysis, ExpressionError> {
    let table = generate_truth_table_with_config(expression, config)?;
    let simplified = simplify(&table);
    Ok(LogicAnalysis {
        expression: expression.to_string(),
        table,
        simplified,
    })
}
