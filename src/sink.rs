//! Output sinks for final counts.

use crate::Counts;
use anyhow::{Context, Result};
use clap::ValueEnum;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// How [`write_counts`] renders each `(word, total)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `word<TAB>count` line per word.
    #[default]
    Text,
    /// One JSON object per line: `{"word":...,"count":...}`.
    Json,
}

#[derive(Serialize)]
struct CountLine<'a> {
    word: &'a str,
    count: u64,
}

/// Write final counts to `path`.
///
/// Output order carries no meaning; lines are sorted by word only so the
/// written artifact is deterministic.
pub fn write_counts(path: &Path, counts: &Counts, format: OutputFormat) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create output file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for (word, count) in counts.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
        match format {
            OutputFormat::Text => writeln!(writer, "{word}\t{count}")?,
            OutputFormat::Json => {
                let line = serde_json::to_string(&CountLine {
                    word,
                    count: *count,
                })?;
                writeln!(writer, "{line}")?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}
