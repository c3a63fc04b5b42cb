use std::collections::HashMap;
use std::ops::Range;

use crate::StateKey;

/// State-indexed table of fixed-width value rows.
///
/// Rows are created as zero vectors on first mutable access and are never removed. Read-only
/// queries on an unseen state behave as if the row were all zeros, without inserting it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTable {
    width: usize,
    rows: HashMap<StateKey, Vec<f64>>,
}

impl ValueTable {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            rows: HashMap::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of states with a materialized row.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, key: &StateKey) -> bool {
        self.rows.contains_key(key)
    }

    pub fn get(&self, key: &StateKey) -> Option<&[f64]> {
        self.rows.get(key).map(Vec::as_slice)
    }

    /// Row for `key`, inserting a zero row when absent.
    pub fn row_mut(&mut self, key: &StateKey) -> &mut [f64] {
        let width = self.width;
        self.rows
            .entry(key.clone())
            .or_insert_with(|| vec![0.0; width])
    }

    pub fn value(&self, key: &StateKey, index: usize) -> f64 {
        self.get(key).map(|row| row[index]).unwrap_or(0.0)
    }

    /// Maximum over `range` of the row, zero for unseen states.
    pub fn max_in(&self, key: &StateKey, range: Range<usize>) -> f64 {
        match self.get(key) {
            Some(row) => row[range].iter().copied().fold(f64::NEG_INFINITY, f64::max),
            None => 0.0,
        }
    }

    /// First index of the maximum over `range`, relative to `range.start`.
    pub fn argmax_in(&self, key: &StateKey, range: Range<usize>) -> usize {
        match self.get(key) {
            Some(row) => argmax(&row[range]),
            None => 0,
        }
    }
}

/// Index of the first maximal element; `0` for an empty slice.
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v > values[best] {
            best = i;
        }
    }
    best
}
