use crate::pipeline::JobOptions;
use crate::sink::OutputFormat;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a word count job over a set of input files
    Submit {
        /// Glob spec for the input files; one partition per file
        #[arg(short, long)]
        input: String,

        /// File holding the whitespace-separated words to count
        #[arg(short, long)]
        dictionary: String,

        /// Output file for the final counts
        #[arg(short, long)]
        output: String,

        /// Lowercase record text before matching (the dictionary is used
        /// as loaded)
        #[arg(long)]
        ignore_case: bool,

        /// How to render the final counts
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

/// A submitted job, as accepted by the standalone runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub input: String,
    pub dictionary: String,
    pub output: String,
    pub options: JobOptions,
    pub format: OutputFormat,
}
