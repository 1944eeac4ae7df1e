use std::{collections::HashMap, hash::BuildHasherDefault};

use xxhash_rust::xxh3::Xxh3;

/// Hash builder for the occurrence map; values are short digit strings.
pub type ValueHasher = BuildHasherDefault<Xxh3>;

/// Running occurrence count per distinct value.
///
/// Values are compared byte for byte, empty text included.
#[derive(Default)]
pub struct OccurrenceCounter<'a> {
    seen: HashMap<&'a str, usize, ValueHasher>,
}

impl<'a> OccurrenceCounter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            seen: HashMap::with_capacity_and_hasher(capacity, ValueHasher::default()),
        }
    }

    pub fn name(&self) -> &'static str {
        "OccurrenceCounter"
    }

    /// Record one more occurrence of `value` and return its 1-based rank.
    pub fn observe(&mut self, value: &'a str) -> usize {
        let count = self.seen.entry(value).or_insert(0);
        *count += 1;
        *count
    }

    /// Number of distinct values observed so far.
    pub fn distinct(&self) -> usize {
        self.seen.len()
    }
}

/// Rank of every value among the values equal to it, in input order.
pub fn assign_ranks<'a, I>(values: I) -> Vec<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let values = values.into_iter();
    let (lower, _) = values.size_hint();
    let mut counter = OccurrenceCounter::with_capacity(lower);
    let mut ranks = Vec::with_capacity(lower);
    for value in values {
        ranks.push(counter.observe(value));
    }
    ranks
}
