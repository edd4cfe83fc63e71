use anyhow::{Context, Result};
use bytes::Bytes;
use clap::Parser;
use dwc::cmd::{Args, Commands, Job};
use dwc::dictionary::Dictionary;
use dwc::error::JobError;
use dwc::pipeline::{self, JobOptions};
use dwc::progress::LogStatusSink;
use dwc::{sink, source};
use log::info;
use std::fs;
use std::path::Path;
use std::sync::Arc;

fn parse_args() -> Job {
    let args = Args::parse();
    match args.command {
        Commands::Submit {
            input,
            dictionary,
            output,
            ignore_case,
            format,
        } => Job {
            input,
            dictionary,
            output,
            options: JobOptions {
                case_sensitive: !ignore_case,
            },
            format,
        },
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();

    let job = parse_args();
    info!("submitted job: {}", serde_json::to_string(&job)?);

    // The dictionary must load in full before any mapping starts.
    let blob = fs::read(&job.dictionary)
        .map(Bytes::from)
        .map_err(JobError::load)?;
    let dictionary = Arc::new(Dictionary::from_blob(&blob)?);

    let partitions = source::partitions_from_glob(&job.input)
        .with_context(|| format!("failed to read inputs matching {}", job.input))?;

    let totals = pipeline::run_job(
        dictionary,
        partitions,
        job.options.clone(),
        Arc::new(LogStatusSink),
    )
    .await?;

    sink::write_counts(Path::new(&job.output), &totals, job.format)?;
    info!("wrote {} words to {}", totals.len(), job.output);
    Ok(())
}
