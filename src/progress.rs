//! Job observability side channel.
//!
//! Progress reporting is fully decoupled from the count data path:
//! nothing in this module may alter the totals the pipeline produces.

use crate::PartitionId;
use std::sync::atomic::{AtomicU64, Ordering};

/// How many records a map task processes between two status reports.
pub const STATUS_EVERY_RECORDS: u64 = 100;

/// Monotonically increasing total of matched-word occurrences across the
/// whole job. Advisory only, never part of the output contract.
#[derive(Debug, Default)]
pub struct MatchCounter(AtomicU64);

impl MatchCounter {
    /// Record `n` additional matches.
    #[inline]
    pub fn add(&self, n: u64) {
        self.0.fetch_add(n, Ordering::Relaxed);
    }

    /// Current total of matches recorded so far.
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Receives periodic human-readable status updates from map tasks.
pub trait StatusSink: Send + Sync {
    /// Called after a map task has processed `records` input records,
    /// matched or not.
    fn report(&self, partition: PartitionId, records: u64);
}

/// Logs status updates at `info` level.
#[derive(Debug, Default)]
pub struct LogStatusSink;

impl StatusSink for LogStatusSink {
    fn report(&self, partition: PartitionId, records: u64) {
        log::info!("partition {partition}: finished processing {records} records");
    }
}

/// Discards status updates.
#[derive(Debug, Default)]
pub struct NullStatusSink;

impl StatusSink for NullStatusSink {
    fn report(&self, _partition: PartitionId, _records: u64) {}
}
