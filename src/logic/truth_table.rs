use serde::{Deserialize, Serialize};

use crate::config::LogicConfig;
use crate::error::ExpressionError;
use crate::logic::parser::{parse_expression, Expr};

/// Header of the output column.
pub const RESULT_HEADER: &str = "Result";

/// One row of a truth table: input bits in header order, then the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruthRow {
    pub inputs: Vec<u8>,
    pub result: u8,
}

/// Complete truth table of an expression.
///
/// `headers` lists the sorted variable names followed by `"Result"`. Rows
/// follow binary counting order with the first variable as the most
/// significant bit, so row `i` encodes the assignment whose bits spell `i`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruthTable {
    pub headers: Vec<String>,
    pub rows: Vec<TruthRow>,
}

impl TruthTable {
    /// Variable headers without the result column.
    pub fn variables(&self) -> &[String] {
        let len = self.headers.len().saturating_sub(1);
        &self.headers[..len]
    }

    pub fn variable_count(&self) -> usize {
        self.variables().len()
    }

    /// Looks up a cell by row index and header name.
    pub fn get(&self, row: usize, header: &str) -> Option<u8> {
        let row = self.rows.get(row)?;
        if header == RESULT_HEADER {
            return Some(row.result);
        }
        let column = self.variables().iter().position(|h| h == header)?;
        row.inputs.get(column).copied()
    }

    /// Indices of the rows whose result is 1.
    pub fn minterms(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.result == 1)
            .map(|(index, _)| index)
            .collect()
    }

    /// A row as a header-keyed JSON object, in header order.
    pub fn row_object(&self, row: usize) -> Option<serde_json::Map<String, serde_json::Value>> {
        let data = self.rows.get(row)?;
        let mut object = serde_json::Map::new();
        for (header, bit) in self.variables().iter().zip(&data.inputs) {
            object.insert(header.clone(), serde_json::Value::from(*bit));
        }
        object.insert(RESULT_HEADER.to_string(), serde_json::Value::from(data.result));
        Some(object)
    }

    /// The table in `{headers, rows: [{A: 0, ..., Result: 1}]}` form.
    pub fn to_json(&self) -> serde_json::Value {
        let rows: Vec<serde_json::Value> = (0..self.rows.len())
            .filter_map(|i| self.row_object(i))
            .map(serde_json::Value::Object)
            .collect();
        serde_json::json!({
            "headers": self.headers,
            "rows": rows,
        })
    }
}

/// Builds the truth table of `expression` with the default variable cap.
///
/// # Examples
/// ```
/// use algotrace::logic::generate_truth_table;
///
/// let table = generate_truth_table("A + B").unwrap();
/// assert_eq!(table.headers, vec!["A", "B", "Result"]);
/// assert_eq!(table.minterms(), vec![1, 2, 3]);
/// ```
pub fn generate_truth_table(expression: &str) -> Result<TruthTable, ExpressionError> {
    generate_truth_table_with_config(expression, &LogicConfig::default())
}

/// Builds the truth table of `expression`, rejecting expressions with more
/// than `config.max_variables` distinct variables.
pub fn generate_truth_table_with_config(expression: &str, config: &LogicConfig) -> Result<TruthTable, ExpressionError> {
    let expr = parse_expression(expression)?;
    let table = table_for(&expr, config)?;
    tracing::debug!(
        expression,
        variables = table.variable_count(),
        rows = table.rows.len(),
        "truth table generated"
    );
    Ok(table)
}

pub(crate) fn table_for(expr: &Expr, config: &LogicConfig) -> Result<TruthTable, ExpressionError> {
    let variables = expr.variables();
    if variables.is_empty() {
        return Err(ExpressionError::NoVariables);
    }
    if variables.len() > config.max_variables {
        return Err(ExpressionError::TooManyVariables {
            count: variables.len(),
            max: config.max_variables,
        });
    }

    let width = variables.len();
    let rows = (0..1usize << width)
        .map(|i| {
            let inputs: Vec<u8> = (0..width).map(|bit| ((i >> (width - 1 - bit)) & 1) as u8).collect();
            let value_of = |name: char| {
                variables
                    .iter()
                    .position(|v| *v == name)
                    .map_or(false, |column| inputs[column] == 1)
            };
            let result = u8::from(expr.evaluate_with(&value_of));
            TruthRow { inputs, result }
        })
        .collect();

    let mut headers: Vec<String> = variables.iter().map(|v| v.to_string()).collect();
    headers.push(RESULT_HEADER.to_string());
    Ok(TruthTable { headers, rows })
}
