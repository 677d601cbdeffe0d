//! Prime-implicant merging over a truth table's ON-set.
//!
//! Terms are repeatedly combined pairwise when they differ in exactly one
//! position. Every term that survives a round without merging is kept, so the
//! result is the full set of prime implicants rather than a minimum cover.
//! The output is always logically equivalent to the table but may not be the
//! shortest sum of products.

use std::collections::HashSet;
use std::fmt;

use crate::logic::truth_table::TruthTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Bit {
    Zero,
    One,
    DontCare,
}

/// A product term over the table's variables, one position per variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Implicant(Vec<Bit>);

impl Implicant {
    fn from_inputs(inputs: &[u8]) -> Self {
        Implicant(inputs.iter().map(|b| if *b == 1 { Bit::One } else { Bit::Zero }).collect())
    }

    /// Merges two terms that differ in exactly one position.
    fn combine(&self, other: &Implicant) -> Option<Implicant> {
        let mut differing = None;
        for (i, (a, b)) in self.0.iter().zip(&other.0).enumerate() {
            if a != b {
                if differing.is_some() {
                    return None;
                }
                differing = Some(i);
            }
        }
        let position = differing?;
        let mut merged = self.0.clone();
        merged[position] = Bit::DontCare;
        Some(Implicant(merged))
    }

    /// Renders the term as a product of literals, e.g. `A'C`.
    pub fn to_product(&self, variables: &[String]) -> String {
        let product: String = self
            .0
            .iter()
            .zip(variables)
            .filter_map(|(bit, name)| match bit {
                Bit::One => Some(name.clone()),
                Bit::Zero => Some(format!("{}'", name)),
                Bit::DontCare => None,
            })
            .collect();
        if product.is_empty() {
            "1".to_string()
        } else {
            product
        }
    }
}

impl fmt::Display for Implicant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.0 {
            let ch = match bit {
                Bit::Zero => '0',
                Bit::One => '1',
                Bit::DontCare => '-',
            };
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}

/// Computes the prime implicants of the table's ON-set.
///
/// Each round keeps the terms that merged with nothing, followed by the newly
/// merged terms in discovery order, without duplicates.
pub fn prime_implicants(table: &TruthTable) -> Vec<Implicant> {
    let mut terms: Vec<Implicant> = table
        .rows
        .iter()
        .filter(|row| row.result == 1)
        .map(|row| Implicant::from_inputs(&row.inputs))
        .collect();

    loop {
        let mut merged_terms: Vec<Implicant> = Vec::new();
        let mut used = vec![false; terms.len()];

        for i in 0..terms.len() {
            for j in (i + 1)..terms.len() {
                if let Some(merged) = terms[i].combine(&terms[j]) {
                    used[i] = true;
                    used[j] = true;
                    merged_terms.push(merged);
                }
            }
        }

        if merged_terms.is_empty() {
            return terms;
        }

        let mut seen = HashSet::new();
        terms = terms
            .into_iter()
            .zip(used)
            .filter(|(_, used)| !used)
            .map(|(term, _)| term)
            .chain(merged_terms)
            .filter(|term| seen.insert(term.clone()))
            .collect();
    }
}

/// Simplifies a truth table to a sum of products.
///
/// Returns `"0"` when no row is true and `"1"` when every row is true.
/// Otherwise products are joined with `" + "`, using juxtaposition for AND and
/// a trailing `'` for NOT, so the result parses back as an expression.
///
/// # Examples
/// ```
/// use algotrace::logic::{generate_truth_table, simplify};
///
/// let table = generate_truth_table("A*B + A*B'").unwrap();
/// assert_eq!(simplify(&table), "A");
/// ```
pub fn simplify(table: &TruthTable) -> String {
    let true_rows = table.rows.iter().filter(|row| row.result == 1).count();
    if true_rows == 0 {
        return "0".to_string();
    }
    if true_rows == table.rows.len() {
        return "1".to_string();
    }

    let variables = table.variables();
    let simplified = prime_implicants(table)
        .iter()
        .map(|term| term.to_product(variables))
        .collect::<Vec<_>>()
        .join(" + ");
    tracing::debug!(true_rows, simplified = %simplified, "expression simplified");
    simplified
}
