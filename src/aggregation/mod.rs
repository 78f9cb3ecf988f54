//! Aggregation Engine
//!
//! Pure reducers over a filtered view. Each reducer accepts an empty view and
//! returns an empty or zeroed result. Ties in every count ranking keep the
//! order in which labels were first seen in the view.

pub mod battery;
pub mod company_launches;
pub mod frequency;
pub mod kpi;
pub mod market;
pub mod ram;
pub mod yearly;

pub use battery::*;
pub use company_launches::*;
pub use frequency::*;
pub use kpi::*;
pub use market::*;
pub use ram::*;
pub use yearly::*;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_LABEL_WIDTH: usize = 20;

/// Size limits applied by the ranked reducers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    pub top_n: usize,
    /// Processor labels longer than this are shortened with an ellipsis.
    pub label_width: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            label_width: DEFAULT_LABEL_WIDTH,
        }
    }
}

/// A label with its occurrence count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: u64,
}

impl CategoryCount {
    pub fn new(label: impl Into<String>, count: u64) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// A numeric value attached to a launch year.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct YearValue {
    pub year: String,
    pub value: f64,
}

/// Counts labels while remembering first-seen order.
#[derive(Debug, Default)]
pub(crate) struct OrderedCounter {
    entries: Vec<CategoryCount>,
    index: HashMap<String, usize>,
}

impl OrderedCounter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, label: &str) {
        match self.index.get(label) {
            Some(&i) => self.entries[i].count += 1,
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push(CategoryCount::new(label, 1));
            }
        }
    }

    /// Entries sorted by count descending; stable, so ties stay first-seen.
    pub(crate) fn ranked(mut self) -> Vec<CategoryCount> {
        self.entries.sort_by(|a, b| b.count.cmp(&a.count));
        self.entries
    }

    pub(crate) fn into_entries(self) -> Vec<CategoryCount> {
        self.entries
    }
}

/// Round to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Upper-middle element of a sorted copy; 0 for an empty list.
pub fn upper_median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted[sorted.len() / 2]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_counter_tie_break_is_first_seen() {
        let mut counter = OrderedCounter::new();
        for label in ["B", "A", "C", "A", "B", "C", "A"] {
            counter.add(label);
        }
        let ranked = counter.ranked();
        assert_eq!(
            ranked,
            vec![
                CategoryCount::new("A", 3),
                CategoryCount::new("B", 2),
                CategoryCount::new("C", 2),
            ]
        );
    }

    #[test]
    fn test_upper_median() {
        assert_eq!(upper_median(&[300.0, 100.0, 200.0]), 200.0);
        assert_eq!(upper_median(&[400.0, 100.0, 300.0, 200.0]), 300.0);
        assert_eq!(upper_median(&[]), 0.0);
        assert_eq!(upper_median(&[42.0]), 42.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.005_1), 1.01);
        assert_eq!(round2(333.333_3), 333.33);
    }
}
