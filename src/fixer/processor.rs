//! Batch file processing
//!
//! The processor is the boundary between the pure per-file engine and the
//! filesystem: it reads each file, runs the engine, and (in write mode) writes
//! the fixed text back when it changed.
//!
//! Per-file fixing is side-effect-free with respect to every other file, so
//! the batch fans out over a rayon worker pool: each worker owns its file's
//! stream exclusively and shares the engine (resolved rule order included) by
//! reference. One file's failure (unreadable, unlexable, or a faulty rule)
//! is recorded in that file's report and never aborts the rest of the batch.

use crate::fixer::engine::{FileContext, FixerEngine};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// What to do with a file whose text changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorMode {
    /// Report only; never touch the file
    Check,
    /// Write the fixed text back in place
    Write,
}

/// Outcome of processing one file.
///
/// `changed`, `passes`, and `converged` mirror [FixOutcome] when fixing ran;
/// when `error` is set the file was skipped and the other fields are zeroed.
///
/// [FixOutcome]: crate::fixer::engine::FixOutcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// The processed file
    pub path: PathBuf,
    /// Whether the fixed text differs from the file's content
    pub changed: bool,
    /// Passes the engine took on this file
    pub passes: usize,
    /// Whether the file reached a fixed point within the cap
    pub converged: bool,
    /// Failure that aborted this file, if any
    pub error: Option<String>,
}

impl FileReport {
    fn failed(path: PathBuf, error: String) -> Self {
        FileReport {
            path,
            changed: false,
            passes: 0,
            converged: false,
            error: Some(error),
        }
    }

    /// True when the file was processed without error.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Drives the engine over a batch of files.
pub struct Processor<'engine> {
    engine: &'engine FixerEngine,
    mode: ProcessorMode,
}

impl<'engine> Processor<'engine> {
    /// Create a processor borrowing a constructed engine.
    pub fn new(engine: &'engine FixerEngine, mode: ProcessorMode) -> Self {
        Processor { engine, mode }
    }

    /// Process every path in parallel, returning reports in input order.
    pub fn process(&self, paths: &[PathBuf]) -> Vec<FileReport> {
        paths
            .par_iter()
            .map(|path| self.process_one(path))
            .collect()
    }

    /// Process a single file.
    pub fn process_one(&self, path: &Path) -> FileReport {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(error) => return FileReport::failed(path.to_path_buf(), error.to_string()),
        };

        let file = FileContext::new(path);
        let outcome = match self.engine.fix_text(&file, &source) {
            Ok(outcome) => outcome,
            Err(error) => return FileReport::failed(path.to_path_buf(), error.to_string()),
        };

        if self.mode == ProcessorMode::Write && outcome.changed {
            debug!(path = %path.display(), passes = outcome.passes, "writing fixed file");
            if let Err(error) = fs::write(path, &outcome.text) {
                return FileReport::failed(path.to_path_buf(), error.to_string());
            }
        }

        FileReport {
            path: path.to_path_buf(),
            changed: outcome.changed,
            passes: outcome.passes,
            converged: outcome.converged,
            error: None,
        }
    }
}
