//! Sorting tracers.
//!
//! Each tracer sorts a private copy of its input and records every primitive
//! step as a [`SortInstruction`]. Replaying the instructions in order against
//! the original array reproduces the sorted array, so a renderer can animate
//! the run at any speed without re-running the algorithm.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::SortConfig;

/// One primitive step of a sorting run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortInstruction<T> {
    /// Indices being compared; the array is unchanged
    Compare(usize, usize),
    /// Clears the highlight of the preceding `Compare`
    Revert(usize, usize),
    /// `Swap(i, new_i, j, new_j)`: position `i` receives `new_i`, position `j` receives `new_j`
    Swap(usize, T, usize, T),
    /// Position receives a value copied from elsewhere
    Overwrite(usize, T),
}

impl<T: Copy> SortInstruction<T> {
    /// Applies the instruction to `array`.
    ///
    /// Compare and Revert are visual only and leave the array untouched.
    pub fn apply(&self, array: &mut [T]) {
        match *self {
            SortInstruction::Compare(..) | SortInstruction::Revert(..) => {}
            SortInstruction::Swap(i, new_i, j, new_j) => {
                array[i] = new_i;
                array[j] = new_j;
            }
            SortInstruction::Overwrite(k, value) => array[k] = value,
        }
    }

    pub fn is_mutation(&self) -> bool {
        matches!(self, SortInstruction::Swap(..) | SortInstruction::Overwrite(..))
    }
}

/// Replays `trace` against a copy of `array` and returns the result.
pub fn replay<T: Copy>(array: &[T], trace: &[SortInstruction<T>]) -> Vec<T> {
    let mut state = array.to_vec();
    for instruction in trace {
        instruction.apply(&mut state);
    }
    state
}

/// Returns true if `array` is in non-decreasing order.
pub fn is_sorted<T: PartialOrd>(array: &[T]) -> bool {
    array.windows(2).all(|pair| pair[0] <= pair[1])
}

/// Working copy plus the instructions recorded so far.
struct Tracer<T> {
    aux: Vec<T>,
    trace: Vec<SortInstruction<T>>,
}

impl<T: PartialOrd + Copy> Tracer<T> {
    fn new(array: &[T]) -> Self {
        Tracer {
            aux: array.to_vec(),
            trace: Vec::new(),
        }
    }

    /// Records a Compare immediately followed by its Revert.
    fn compare(&mut self, i: usize, j: usize) {
        self.trace.push(SortInstruction::Compare(i, j));
        self.trace.push(SortInstruction::Revert(i, j));
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.trace
            .push(SortInstruction::Swap(i, self.aux[j], j, self.aux[i]));
        self.aux.swap(i, j);
    }

    fn finish(self) -> Vec<SortInstruction<T>> {
        self.trace
    }
}

/// Bubble sort: adjacent pairs, swapping only when out of order.
pub fn bubble_sort<T: PartialOrd + Copy>(array: &[T]) -> Vec<SortInstruction<T>> {
    let mut tracer = Tracer::new(array);
    let n = array.len();
    for i in 0..n.saturating_sub(1) {
        for j in 0..n - i - 1 {
            tracer.compare(j, j + 1);
            if tracer.aux[j] > tracer.aux[j + 1] {
                tracer.swap(j, j + 1);
            }
        }
    }
    tracer.finish()
}

/// Insertion sort: each new element is swapped left while smaller than its
/// predecessor. Only comparisons that lead to a shift are recorded.
pub fn insertion_sort<T: PartialOrd + Copy>(array: &[T]) -> Vec<SortInstruction<T>> {
    let mut tracer = Tracer::new(array);
    for i in 1..array.len() {
        let mut j = i;
        while j > 0 && tracer.aux[j] < tracer.aux[j - 1] {
            tracer.compare(j, j - 1);
            tracer.swap(j, j - 1);
            j -= 1;
        }
    }
    tracer.finish()
}

/// Top-down merge sort.
///
/// The main and auxiliary buffers swap roles at every recursion level, so each
/// merge reads from one buffer and overwrites the other without allocating.
/// Placements are recorded as `Overwrite`, never `Swap`.
pub fn merge_sort<T: PartialOrd + Copy>(array: &[T]) -> Vec<SortInstruction<T>> {
    let mut trace = Vec::new();
    if array.len() <= 1 {
        return trace;
    }
    let mut main = array.to_vec();
    let mut aux = array.to_vec();
    merge_sort_helper(&mut main, 0, array.len() - 1, &mut aux, &mut trace);
    trace
}

fn merge_sort_helper<T: PartialOrd + Copy>(
    main: &mut [T],
    start: usize,
    end: usize,
    aux: &mut [T],
    trace: &mut Vec<SortInstruction<T>>,
) {
    if start == end {
        return;
    }
    let middle = (start + end) / 2;
    merge_sort_helper(aux, start, middle, main, trace);
    merge_sort_helper(aux, middle + 1, end, main, trace);
    merge(main, start, middle, end, aux, trace);
}

fn merge<T: PartialOrd + Copy>(
    main: &mut [T],
    start: usize,
    middle: usize,
    end: usize,
    aux: &[T],
    trace: &mut Vec<SortInstruction<T>>,
) {
    let mut k = start;
    let mut i = start;
    let mut j = middle + 1;

    let place = |main: &mut [T], k: &mut usize, from: usize, trace: &mut Vec<SortInstruction<T>>| {
        trace.push(SortInstruction::Overwrite(*k, aux[from]));
        main[*k] = aux[from];
        *k += 1;
    };

    while i <= middle && j <= end {
        trace.push(SortInstruction::Compare(i, j));
        trace.push(SortInstruction::Revert(i, j));
        if aux[i] <= aux[j] {
            place(main, &mut k, i, trace);
            i += 1;
        } else {
            place(main, &mut k, j, trace);
            j += 1;
        }
    }
    while i <= middle {
        trace.push(SortInstruction::Compare(i, i));
        trace.push(SortInstruction::Revert(i, i));
        place(main, &mut k, i, trace);
        i += 1;
    }
    while j <= end {
        trace.push(SortInstruction::Compare(j, j));
        trace.push(SortInstruction::Revert(j, j));
        place(main, &mut k, j, trace);
        j += 1;
    }
}

/// Quick sort with the first element of each range as pivot.
///
/// Two pointers converge from both ends and swap inversions; the pivot is then
/// swapped into its resting place and both sides are sorted recursively.
pub fn quick_sort<T: PartialOrd + Copy>(array: &[T]) -> Vec<SortInstruction<T>> {
    let mut tracer = Tracer::new(array);
    if !array.is_empty() {
        quick_sort_helper(&mut tracer, 0, array.len() - 1);
    }
    tracer.finish()
}

fn quick_sort_helper<T: PartialOrd + Copy>(tracer: &mut Tracer<T>, start: usize, end: usize) {
    if start >= end {
        return;
    }
    let pivot = start;
    let mut left = start + 1;
    let mut right = end;

    while right >= left {
        tracer.compare(left, right);
        if tracer.aux[left] > tracer.aux[pivot] && tracer.aux[right] < tracer.aux[pivot] {
            tracer.swap(left, right);
        }
        if tracer.aux[left] <= tracer.aux[pivot] {
            left += 1;
        }
        if tracer.aux[right] >= tracer.aux[pivot] {
            right -= 1;
        }
    }

    tracer.swap(pivot, right);

    if right > start {
        quick_sort_helper(tracer, start, right - 1);
    }
    quick_sort_helper(tracer, right + 1, end);
}

/// Bogo sort with the default attempt cap and a fresh random source.
pub fn bogo_sort<T: PartialOrd + Copy>(array: &[T]) -> Vec<SortInstruction<T>> {
    let mut rng = StdRng::from_entropy();
    bogo_sort_with(array, SortConfig::default().bogo_attempt_cap, &mut rng)
}

/// Bogo sort driven by a seeded random source, for reproducible traces.
pub fn bogo_sort_seeded<T: PartialOrd + Copy>(array: &[T], seed: u64) -> Vec<SortInstruction<T>> {
    let mut rng = StdRng::seed_from_u64(seed);
    bogo_sort_with(array, SortConfig::default().bogo_attempt_cap, &mut rng)
}

/// Repeats Fisher-Yates shuffles until the array is sorted or `attempt_cap`
/// shuffles have been made.
///
/// Every shuffle step records Compare, Revert and Swap, so the trace never
/// exceeds `attempt_cap * 3 * (n - 1)` instructions. Reaching the cap is a
/// normal outcome and leaves the replayed array unsorted.
pub fn bogo_sort_with<T: PartialOrd + Copy, R: Rng>(
    array: &[T],
    attempt_cap: usize,
    rng: &mut R,
) -> Vec<SortInstruction<T>> {
    let mut tracer = Tracer::new(array);
    let mut attempts = 0;

    while !is_sorted(&tracer.aux) && attempts < attempt_cap {
        for i in (1..tracer.aux.len()).rev() {
            let j = rng.gen_range(0..=i);
            tracer.compare(i, j);
            tracer.swap(i, j);
        }
        attempts += 1;
    }

    if !is_sorted(&tracer.aux) {
        tracing::warn!(attempts, len = array.len(), "bogo sort attempt cap reached");
    }
    tracer.finish()
}

/// Upper bound on the length of a bogo sort trace.
pub fn bogo_instruction_bound(len: usize, attempt_cap: usize) -> usize {
    attempt_cap * 3 * len.saturating_sub(1)
}

/// The supported sorting algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortAlgorithm {
    Bubble,
    Insertion,
    Merge,
    Quick,
    Bogo,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 5] = [
        SortAlgorithm::Bubble,
        SortAlgorithm::Insertion,
        SortAlgorithm::Merge,
        SortAlgorithm::Quick,
        SortAlgorithm::Bogo,
    ];

    pub fn run<T: PartialOrd + Copy>(&self, array: &[T]) -> Vec<SortInstruction<T>> {
        self.run_with_config(array, &SortConfig::default(), None)
    }

    /// Runs the algorithm; `seed` only affects bogo sort.
    pub fn run_with_config<T: PartialOrd + Copy>(
        &self,
        array: &[T],
        config: &SortConfig,
        seed: Option<u64>,
    ) -> Vec<SortInstruction<T>> {
        let trace = match self {
            SortAlgorithm::Bubble => bubble_sort(array),
            SortAlgorithm::Insertion => insertion_sort(array),
            SortAlgorithm::Merge => merge_sort(array),
            SortAlgorithm::Quick => quick_sort(array),
            SortAlgorithm::Bogo => {
                let mut rng = match seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                bogo_sort_with(array, config.bogo_attempt_cap, &mut rng)
            }
        };
        tracing::debug!(
            algorithm = %self,
            len = array.len(),
            instructions = trace.len(),
            "sort trace generated"
        );
        trace
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortAlgorithm::Bubble => "bubble",
            SortAlgorithm::Insertion => "insertion",
            SortAlgorithm::Merge => "merge",
            SortAlgorithm::Quick => "quick",
            SortAlgorithm::Bogo => "bogo",
        };
        f.write_str(name)
    }
}

impl FromStr for SortAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bubble" => Ok(SortAlgorithm::Bubble),
            "insertion" => Ok(SortAlgorithm::Insertion),
            "merge" => Ok(SortAlgorithm::Merge),
            "quick" => Ok(SortAlgorithm::Quick),
            "bogo" => Ok(SortAlgorithm::Bogo),
            other => Err(format!("Unknown sorting algorithm: {}", other)),
        }
    }
}

/// Runs the selected algorithm with default settings.
pub fn run_sort<T: PartialOrd + Copy>(algorithm: SortAlgorithm, array: &[T]) -> Vec<SortInstruction<T>> {
    algorithm.run(array)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: [i64; 8] = [5, 1, 4, 2, 8, 2, 9, 0];

    fn sorted(array: &[i64]) -> Vec<i64> {
        let mut copy = array.to_vec();
        copy.sort();
        copy
    }

    fn assert_compare_revert_pairs(trace: &[SortInstruction<i64>]) {
        for (idx, instruction) in trace.iter().enumerate() {
            if let SortInstruction::Compare(i, j) = instruction {
                assert_eq!(trace.get(idx + 1), Some(&SortInstruction::Revert(*i, *j)));
            }
        }
    }

    #[test]
    fn test_deterministic_algorithms_replay_to_sorted() {
        let tracers: [fn(&[i64]) -> Vec<SortInstruction<i64>>; 4] =
            [bubble_sort, insertion_sort, merge_sort, quick_sort];
        for tracer in tracers {
            let trace = tracer(&SAMPLE);
            assert_eq!(replay(&SAMPLE, &trace), sorted(&SAMPLE));
            assert_compare_revert_pairs(&trace);
        }
    }

    #[test]
    fn test_bubble_trace_shape() {
        let trace = bubble_sort(&[2, 1]);
        assert_eq!(
            trace,
            vec![
                SortInstruction::Compare(0, 1),
                SortInstruction::Revert(0, 1),
                SortInstruction::Swap(0, 1, 1, 2),
            ]
        );
    }

    #[test]
    fn test_bubble_comparison_count_is_quadratic() {
        let trace = bubble_sort(&SAMPLE);
        let compares = trace
            .iter()
            .filter(|i| matches!(i, SortInstruction::Compare(..)))
            .count();
        assert_eq!(compares, SAMPLE.len() * (SAMPLE.len() - 1) / 2);
    }

    #[test]
    fn test_insertion_only_records_shifts() {
        let trace = insertion_sort(&[1, 2, 3]);
        assert!(trace.is_empty());

        let trace = insertion_sort(&[3, 1]);
        assert_eq!(
            trace,
            vec![
                SortInstruction::Compare(1, 0),
                SortInstruction::Revert(1, 0),
                SortInstruction::Swap(1, 3, 0, 1),
            ]
        );
    }

    #[test]
    fn test_merge_uses_overwrite_only() {
        let trace = merge_sort(&SAMPLE);
        assert!(trace.iter().all(|i| !matches!(i, SortInstruction::Swap(..))));
        assert!(trace.iter().any(|i| matches!(i, SortInstruction::Overwrite(..))));
    }

    #[test]
    fn test_merge_short_inputs() {
        assert!(merge_sort::<i64>(&[]).is_empty());
        assert!(merge_sort(&[7]).is_empty());
        let trace = merge_sort(&[2, 1]);
        assert_eq!(replay(&[2, 1], &trace), vec![1, 2]);
    }

    #[test]
    fn test_quick_sort_with_duplicates_and_sorted_input() {
        let input = [3, 3, 3, 1, 1, 2];
        assert_eq!(replay(&input, &quick_sort(&input)), vec![1, 1, 2, 3, 3, 3]);
        let input = [1, 2, 3, 4, 5];
        assert_eq!(replay(&input, &quick_sort(&input)), vec![1, 2, 3, 4, 5]);
        let input = [5, 4, 3, 2, 1];
        assert_eq!(replay(&input, &quick_sort(&input)), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let input = SAMPLE.to_vec();
        for algorithm in SortAlgorithm::ALL {
            let _ = algorithm.run_with_config(&input, &SortConfig::default(), Some(1));
            assert_eq!(input, SAMPLE.to_vec());
        }
    }

    #[test]
    fn test_bogo_sorted_input_needs_no_shuffle() {
        assert!(bogo_sort_seeded(&[1, 2, 3], 4).is_empty());
        assert!(bogo_sort_seeded::<i64>(&[], 4).is_empty());
        assert!(bogo_sort(&[9]).is_empty());
    }

    #[test]
    fn test_bogo_small_input_sorts() {
        let input = [3, 1, 2];
        let trace = bogo_sort_seeded(&input, 2024);
        // 6 permutations and 500 shuffles: the cap is practically unreachable
        assert_eq!(replay(&input, &trace), vec![1, 2, 3]);
        assert_eq!(trace.len() % 6, 0);
    }

    #[test]
    fn test_bogo_respects_cap() {
        let input = [9, 8, 7, 6, 5, 4, 3, 2, 1, 0];
        let mut rng = StdRng::seed_from_u64(1);
        let trace = bogo_sort_with(&input, 3, &mut rng);
        assert!(trace.len() <= bogo_instruction_bound(input.len(), 3));
        let result = replay(&input, &trace);
        let mut expected = result.clone();
        expected.sort();
        assert_eq!(expected, sorted(&input));
    }

    #[test]
    fn test_instruction_apply() {
        let mut state = vec![10, 20, 30];
        SortInstruction::Swap(0, 30, 2, 10).apply(&mut state);
        assert_eq!(state, vec![30, 20, 10]);
        SortInstruction::Overwrite(1, 99).apply(&mut state);
        assert_eq!(state, vec![30, 99, 10]);
        SortInstruction::Compare(0, 1).apply(&mut state);
        assert_eq!(state, vec![30, 99, 10]);
        assert!(!SortInstruction::<i32>::Revert(0, 1).is_mutation());
    }

    #[test]
    fn test_floats_are_supported() {
        let input = [2.5, -1.0, 0.25];
        let trace = SortAlgorithm::Merge.run(&input);
        assert_eq!(replay(&input, &trace), vec![-1.0, 0.25, 2.5]);
    }

    #[test]
    fn test_algorithm_names() {
        for algorithm in SortAlgorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<SortAlgorithm>(), Ok(algorithm));
        }
        assert!("heap".parse::<SortAlgorithm>().is_err());
    }
}
