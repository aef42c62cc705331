//! Class-balancing plan.
//!
//! Minority classes in the training split are topped up to the median
//! class size. The catch-all class is oversampled to three times its size
//! instead.

use std::collections::HashMap;

/// Catch-all label that is always tripled rather than balanced.
pub const CATCH_ALL_LABEL: &str = "Overig";

pub const TRAIN_SPLIT: &str = "train";
pub const TEST_SPLIT: &str = "test";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassCount {
    pub label: String,
    pub count: usize,
}

/// Count labels, most frequent first (ties broken by label).
pub fn class_counts<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<ClassCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }

    let mut counts: Vec<ClassCount> = counts
        .into_iter()
        .map(|(label, count)| ClassCount {
            label: label.to_string(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    counts
}

/// Median class size, truncated to an integer.
pub fn median_target(counts: &[ClassCount]) -> usize {
    if counts.is_empty() {
        return 0;
    }
    let mut sizes: Vec<usize> = counts.iter().map(|c| c.count).collect();
    sizes.sort_unstable();

    let mid = sizes.len() / 2;
    if sizes.len() % 2 == 1 {
        sizes[mid]
    } else {
        (sizes[mid - 1] + sizes[mid]) / 2
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AugmentationPlan {
    pub target: usize,
    /// (label, rows to generate), in class-count order.
    pub needed: Vec<(String, usize)>,
}

impl AugmentationPlan {
    pub fn from_counts(counts: &[ClassCount]) -> Self {
        let target = median_target(counts);
        let needed = counts
            .iter()
            .filter(|c| c.count < target)
            .map(|c| {
                let n = if c.label == CATCH_ALL_LABEL {
                    2 * c.count
                } else {
                    target - c.count
                };
                (c.label.clone(), n)
            })
            .collect();
        Self { target, needed }
    }

    pub fn total_needed(&self) -> usize {
        self.needed.iter().map(|(_, n)| n).sum()
    }
}

/// Pick `needed` source rows from `class_rows`, with replacement, by
/// cycling through them in order.
pub fn select_rows(class_rows: &[usize], needed: usize) -> Vec<usize> {
    class_rows.iter().copied().cycle().take(needed).collect()
}

/// Train/test assignment for a table without a split column.
///
/// Marks `floor(rows * test_fraction)` rows as test, spread evenly across
/// the table.
pub fn assign_splits(rows: usize, test_fraction: f64) -> Vec<&'static str> {
    let fraction = test_fraction.clamp(0.0, 1.0);
    (0..rows)
        .map(|i| {
            let before = (i as f64 * fraction).floor();
            let after = ((i + 1) as f64 * fraction).floor();
            if after > before {
                TEST_SPLIT
            } else {
                TRAIN_SPLIT
            }
        })
        .collect()
}
