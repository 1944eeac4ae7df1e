//! Per-column status tally.
//!
//! Row labels keep their duplicate rank, the tally does not: every
//! `Duplicate(rank)` lands in the single `Duplicate` bucket.
use crate::types::{StatusCategory, StatusLabel};

/// Row count per status category for one column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    counts: [usize; StatusCategory::COUNT],
}

impl Tally {
    /// Create an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more row with `label`.
    pub fn record(&mut self, label: &StatusLabel) {
        self.counts[label.category().index()] += 1;
    }

    pub fn get(&self, category: StatusCategory) -> usize {
        self.counts[category.index()]
    }

    /// Number of rows counted, always the column's row count.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Every category with its count, in report order.
    pub fn iter(&self) -> impl Iterator<Item = (StatusCategory, usize)> + '_ {
        StatusCategory::ALL.iter().map(|c| (*c, self.get(*c)))
    }

    /// Categories that were actually hit, in report order.
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (StatusCategory, usize)> + '_ {
        self.iter().filter(|(_, count)| *count > 0)
    }

    /// Share of rows labeled `Unique`, 0.0 for an empty column.
    pub fn valid_ratio(&self) -> f64 {
        let total = self.total();
        if total > 0 {
            self.get(StatusCategory::Unique) as f64 / total as f64
        } else {
            0.0
        }
    }

    /// Percentage of rows in `category`, 0.0 for an empty column.
    pub fn percentage(&self, category: StatusCategory) -> f64 {
        let total = self.total();
        if total > 0 {
            (self.get(category) as f64 / total as f64) * 100.
        } else {
            0.0
        }
    }

    /// True when every row is `Unique`.
    pub fn is_clean(&self) -> bool {
        self.get(StatusCategory::Unique) == self.total()
    }
}

impl<'a> FromIterator<&'a StatusLabel> for Tally {
    fn from_iter<I: IntoIterator<Item = &'a StatusLabel>>(iter: I) -> Self {
        let mut tally = Tally::new();
        iter.into_iter().for_each(|label| tally.record(label));
        tally
    }
}

/// Collapse row labels into a tally.
pub fn summarize<'a, I>(labels: I) -> Tally
where
    I: IntoIterator<Item = &'a StatusLabel>,
{
    labels.into_iter().collect()
}
