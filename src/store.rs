//! Append-only JSONL corpus of benchmark records
//!
//! One JSON object per line, each line independently parseable. Reads fail
//! on the first malformed line instead of skipping it; a silently truncated
//! corpus would bias every downstream recommendation.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::error::{AfinarError, Result};
use crate::record::BenchmarkRun;

/// Append one record to the corpus at `path`, creating parent directories
/// as needed
///
/// # Errors
///
/// Returns an error when the parent directory cannot be created, the file
/// cannot be opened for append, or the record fails to serialize.
pub fn append_run(path: &Path, run: &BenchmarkRun) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| AfinarError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }
    }

    let line = serde_json::to_string(run)?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| AfinarError::Io {
            path: path.display().to_string(),
            source,
        })?;
    writeln!(file, "{line}").map_err(|source| AfinarError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Read the full corpus at `path`
///
/// Blank lines are ignored. Record order is file order.
///
/// # Errors
///
/// Returns an error when the file cannot be read or any non-blank line is
/// not a valid benchmark record (with the 1-based line number in context).
pub fn read_runs(path: &Path) -> Result<Vec<BenchmarkRun>> {
    let file = File::open(path).map_err(|source| AfinarError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let mut runs = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|source| AfinarError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let run = serde_json::from_str(trimmed).map_err(|source| AfinarError::CorpusParse {
            path: path.display().to_string(),
            line: idx + 1,
            source,
        })?;
        runs.push(run);
    }
    Ok(runs)
}
