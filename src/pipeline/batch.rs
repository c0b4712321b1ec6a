//! Folder scanning and per-run bookkeeping shared by the pipelines.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// A file that failed and why.
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub file: String,
    pub error: String,
}

/// Outcome of one pipeline run over a folder.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub pipeline: &'static str,
    pub folder: PathBuf,
    /// Inputs that matched the pipeline's filter.
    pub found: usize,
    pub processed: usize,
    pub failed: Vec<FileFailure>,
    pub outputs: Vec<PathBuf>,
}

impl BatchReport {
    pub fn new(pipeline: &'static str, folder: &Path) -> Self {
        Self {
            pipeline,
            folder: folder.to_path_buf(),
            found: 0,
            processed: 0,
            failed: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn record_success(&mut self, outputs: impl IntoIterator<Item = PathBuf>) {
        self.processed += 1;
        self.outputs.extend(outputs);
    }

    pub fn record_failure(&mut self, file: &Path, error: &anyhow::Error) {
        self.failed.push(FileFailure {
            file: display_name(file),
            error: format!("{:#}", error),
        });
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    /// Log a one-line summary of the run.
    pub fn log_summary(&self) {
        if self.has_failures() {
            warn!(
                "{}: {} of {} file(s) processed, {} failed in {:?}",
                self.pipeline,
                self.processed,
                self.found,
                self.failed.len(),
                self.folder
            );
        } else {
            info!(
                "{}: {} of {} file(s) processed in {:?}",
                self.pipeline, self.processed, self.found, self.folder
            );
        }
    }
}

/// List the regular files directly inside `dir` that satisfy `filter`.
///
/// Order is whatever the filesystem returns; it is not sorted. Only an error
/// on `dir` itself fails the scan; an unreadable entry (such as a dangling
/// symlink) is logged and skipped.
pub fn list_files(dir: &Path, filter: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .min_depth(1)
        .max_depth(1)
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(e).with_context(|| format!("Failed to list folder: {:?}", dir));
            }
            Err(e) => {
                warn!("Skipping unreadable entry in {:?}: {}", dir, e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if filter(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// File name for log lines, falling back to the full path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
