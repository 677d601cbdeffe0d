//! Searching tracers.
//!
//! Linear and binary search recorded as Compare, Discard and Found steps.
//! A trace holds at most one `Found`, always as its last instruction; a trace
//! without one means the target is absent.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One primitive step of a search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchInstruction {
    /// The element at `index` is compared with the target. Binary search also
    /// reports the inclusive bounds of the live range.
    Compare {
        index: usize,
        bounds: Option<(usize, usize)>,
    },
    /// The element at `start` (or the inclusive range `start..=end`) is ruled out.
    Discard { start: usize, end: Option<usize> },
    /// The target sits at `index`.
    Found { index: usize },
}

impl SearchInstruction {
    /// The indices ruled out by a Discard step.
    pub fn discarded(&self) -> Option<RangeInclusive<usize>> {
        match *self {
            SearchInstruction::Discard { start, end } => Some(start..=end.unwrap_or(start)),
            _ => None,
        }
    }
}

/// Returns the index reported by the trace's `Found` step, if any.
pub fn found_index(trace: &[SearchInstruction]) -> Option<usize> {
    trace.iter().find_map(|instruction| match instruction {
        SearchInstruction::Found { index } => Some(*index),
        _ => None,
    })
}

/// Sequential scan.
///
/// Each index is compared and then either found or discarded. When the scan
/// is exhausted without a match the trace is empty.
pub fn linear_search<T: PartialEq>(array: &[T], target: &T) -> Vec<SearchInstruction> {
    let mut trace = Vec::with_capacity(array.len() * 2);
    for (index, value) in array.iter().enumerate() {
        trace.push(SearchInstruction::Compare {
            index,
            bounds: None,
        });
        if value == target {
            trace.push(SearchInstruction::Found { index });
            return trace;
        }
        trace.push(SearchInstruction::Discard {
            start: index,
            end: None,
        });
    }
    Vec::new()
}

/// Midpoint search over a pre-sorted array.
///
/// The array is not sorted here; an unsorted input gives an unspecified but
/// finite trace. Every miss discards the inclusive half-range on the far side
/// of the target, midpoint included.
pub fn binary_search<T: PartialOrd>(array: &[T], target: &T) -> Vec<SearchInstruction> {
    let mut trace = Vec::new();
    if array.is_empty() {
        return trace;
    }
    let mut left = 0usize;
    let mut right = array.len() - 1;

    loop {
        let mid = left + (right - left) / 2;
        trace.push(SearchInstruction::Compare {
            index: mid,
            bounds: Some((left, right)),
        });

        if array[mid] == *target {
            trace.push(SearchInstruction::Found { index: mid });
            return trace;
        }

        if array[mid] < *target {
            trace.push(SearchInstruction::Discard {
                start: left,
                end: Some(mid),
            });
            left = mid + 1;
            if left > right {
                break;
            }
        } else {
            trace.push(SearchInstruction::Discard {
                start: mid,
                end: Some(right),
            });
            if mid == left {
                break;
            }
            right = mid - 1;
        }
    }
    trace
}

/// The supported searching algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchAlgorithm {
    Linear,
    Binary,
}

impl SearchAlgorithm {
    pub fn run<T: PartialOrd>(&self, array: &[T], target: &T) -> Vec<SearchInstruction> {
        let trace = match self {
            SearchAlgorithm::Linear => linear_search(array, target),
            SearchAlgorithm::Binary => binary_search(array, target),
        };
        tracing::debug!(
            algorithm = %self,
            len = array.len(),
            instructions = trace.len(),
            found = ?found_index(&trace),
            "search trace generated"
        );
        trace
    }
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchAlgorithm::Linear => f.write_str("linear"),
            SearchAlgorithm::Binary => f.write_str("binary"),
        }
    }
}

impl FromStr for SearchAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(SearchAlgorithm::Linear),
            "binary" => Ok(SearchAlgorithm::Binary),
            other => Err(format!("Unknown searching algorithm: {}", other)),
        }
    }
}

/// Runs the selected algorithm. Binary search expects `array` sorted ascending.
pub fn run_search<T: PartialOrd>(algorithm: SearchAlgorithm, array: &[T], target: &T) -> Vec<SearchInstruction> {
    algorithm.run(array, target)
}
