//! Error taxonomy for a word count job.

use crate::PartitionId;
use thiserror::Error;

/// Fatal job errors.
///
/// Any of these aborts the run; the pipeline never hands partial totals
/// to the sink. Retry policy, if any, belongs to the harness.
#[derive(Error, Debug)]
pub enum JobError {
    /// The dictionary blob could not be read or decoded. Raised before any
    /// mapping starts; a partial dictionary is never used.
    #[error("failed to load dictionary: {0}")]
    Load(String),

    /// A partition's map+combine phase failed irrecoverably, e.g. its
    /// record source went away mid-stream.
    #[error("partition {partition} failed: {reason}")]
    Partition {
        partition: PartitionId,
        reason: String,
    },

    /// A partition's partial sums never arrived at the reduce barrier.
    #[error("partial sums for partition {0} never arrived")]
    Aggregation(PartitionId),
}

impl JobError {
    /// Wrap a dictionary loading failure.
    pub fn load<E: std::fmt::Display>(err: E) -> Self {
        Self::Load(err.to_string())
    }

    /// Wrap a partition failure.
    pub fn partition<E: std::fmt::Display>(partition: PartitionId, err: E) -> Self {
        Self::Partition {
            partition,
            reason: err.to_string(),
        }
    }
}

/// A single record that could not be decoded as UTF-8 text.
///
/// Recoverable: the record is skipped with a warning and the partition
/// carries on.
#[derive(Error, Debug)]
#[error("record is not valid UTF-8: {0}")]
pub struct RecordDecodeError(#[from] std::str::Utf8Error);
