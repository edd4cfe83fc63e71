//! The pipeline coordinator.
//!
//! Wires the stages into a two-phase run over N partitions: map+combine
//! per partition in parallel, a barrier once every partition has
//! delivered its partial sums, then a single reduce pass. Each phase
//! completes fully before the next starts.

use crate::aggregate::{combine, reduce};
use crate::dictionary::Dictionary;
use crate::error::JobError;
use crate::filter::TokenFilter;
use crate::progress::{MatchCounter, StatusSink};
use crate::source::Partition;
use crate::{Counts, PartitionId};
use dashmap::DashMap;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Options recognized by a job run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobOptions {
    /// Match tokens with their exact casing. When false, record text is
    /// lowercased before matching; the dictionary is left as loaded.
    pub case_sensitive: bool,
}

impl Default for JobOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
        }
    }
}

/// Partial sums keyed by the partition that produced them. Partition
/// tasks insert concurrently; the reduce phase drains it once they have
/// all been joined.
type PartialSums = DashMap<PartitionId, Counts>;

/// Run a complete job: map+combine every partition, then reduce.
///
/// The dictionary is shared read-only with every map task. Any partition
/// failure aborts the whole run; partial totals are never produced, since
/// silently omitting a partition would silently under-count.
pub async fn run_job(
    dictionary: Arc<Dictionary>,
    partitions: Vec<Partition>,
    options: JobOptions,
    status: Arc<dyn StatusSink>,
) -> Result<Counts, JobError> {
    let job_id = Uuid::new_v4();
    let n_partitions = partitions.len();
    let matched = Arc::new(MatchCounter::default());
    let partials: Arc<PartialSums> = Arc::new(PartialSums::default());
    info!(
        "job {job_id}: mapping {n_partitions} partitions against {} dictionary words",
        dictionary.len()
    );

    let mut handles = Vec::with_capacity(n_partitions);
    for (id, partition) in partitions.into_iter().enumerate() {
        let id = id as PartitionId;
        let dictionary = Arc::clone(&dictionary);
        let matched = Arc::clone(&matched);
        let status = Arc::clone(&status);
        let partials = Arc::clone(&partials);
        let options = options.clone();
        let handle = tokio::task::spawn_blocking(move || {
            let partial = run_partition(id, partition, dictionary, &options, matched, status)?;
            partials.insert(id, partial);
            Ok::<(), JobError>(())
        });
        handles.push((id, handle));
    }

    // Barrier: reduce may not start until every partition's partial sums
    // are in. A failed or panicked task aborts the job here.
    for (id, handle) in handles {
        match handle.await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => return Err(err),
            Err(join_err) => return Err(JobError::partition(id, join_err)),
        }
    }

    let mut collected = Vec::with_capacity(n_partitions);
    for id in 0..n_partitions as PartitionId {
        match partials.remove(&id) {
            Some((_, partial)) => collected.push(partial),
            None => return Err(JobError::Aggregation(id)),
        }
    }

    info!("job {job_id}: reducing {n_partitions} partial sums");
    let totals = reduce(collected);
    info!(
        "job {job_id}: done, {} matched occurrences over {} distinct words",
        matched.get(),
        totals.len()
    );
    Ok(totals)
}

/// Map+combine one partition: filter every record, then collapse the
/// events into this partition's partial sums.
fn run_partition(
    id: PartitionId,
    partition: Partition,
    dictionary: Arc<Dictionary>,
    options: &JobOptions,
    matched: Arc<MatchCounter>,
    status: Arc<dyn StatusSink>,
) -> Result<Counts, JobError> {
    debug!("partition {id}: reading records from {}", partition.source);
    let mut filter = TokenFilter::new(id, dictionary, options.case_sensitive, matched, status);
    let mut events = Vec::new();
    for record in partition.records {
        let record = record.map_err(|err| JobError::partition(id, err))?;
        match filter.filter_record(&record) {
            Ok(mut matches) => events.append(&mut matches),
            // A malformed record is skipped; the partition carries on.
            Err(err) => warn!("partition {id}: skipping record: {err}"),
        }
    }
    debug!(
        "partition {id}: combined {} events from {} records",
        events.len(),
        filter.records_seen()
    );
    Ok(combine(events))
}
