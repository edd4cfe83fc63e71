//! Count aggregation, shared by the combine and reduce stages.
//!
//! One fold serves both stages: within a partition it collapses
//! count-of-1 events into partial sums, and across partitions it merges
//! the partials into final totals. Integer addition is commutative and
//! associative, so the result does not depend on input order or on how
//! the pairs were grouped into partitions.

use crate::{CountEvent, Counts};

/// Fold `(word, count)` pairs into per-word totals.
pub fn sum_counts<I>(pairs: I) -> Counts
where
    I: IntoIterator<Item = (String, u64)>,
{
    let mut totals = Counts::default();
    for (word, count) in pairs {
        *totals.entry(word).or_insert(0) += count;
    }
    totals
}

/// Combine stage: collapse one partition's count events into partial sums.
///
/// Pure function of its input; the subtotal for each word equals that
/// word's occurrence count within the partition.
pub fn combine<I>(events: I) -> Counts
where
    I: IntoIterator<Item = CountEvent>,
{
    sum_counts(events.into_iter().map(CountEvent::into_pair))
}

/// Reduce stage: merge every partition's partial sums into final totals.
///
/// A word missing from some partitions contributes nothing from them but
/// still appears in the output with the sum over the partitions that did
/// see it. Reducing the same partials again yields the same totals.
pub fn reduce<I>(partials: I) -> Counts
where
    I: IntoIterator<Item = Counts>,
{
    sum_counts(partials.into_iter().flatten())
}
