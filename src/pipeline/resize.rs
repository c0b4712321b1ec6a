//! Fixed-width resizer for image sets.
//!
//! Reads every supported image in `<source>/<set>` and writes the resized
//! copy twice: to `<work_dir>/<set>/500` and `<work_dir>/<set>/backup`. The
//! primary folder is always named `500`, whatever the configured width.

use super::batch::{display_name, list_files, BatchReport};
use anyhow::{Context, Result};
use cardprep_common::paths::is_resizable_file;
use cardprep_common::Error as CommonError;
use cardprep_imaging::resize_to_width;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Name of the primary output folder.
pub const PRIMARY_DIR: &str = "500";

/// Name of the backup output folder.
pub const BACKUP_DIR: &str = "backup";

pub struct Resizer {
    width: u32,
}

impl Resizer {
    pub fn new(width: u32) -> Self {
        Self { width }
    }

    /// Output folders for a set, relative to `work_dir`.
    pub fn output_dirs(work_dir: &Path, set: &str) -> (PathBuf, PathBuf) {
        let base = work_dir.join(set);
        (base.join(PRIMARY_DIR), base.join(BACKUP_DIR))
    }

    /// Resize the set `set` found under `source`.
    ///
    /// Fails without creating anything if `<source>/<set>` does not exist.
    /// An empty set is not an error.
    pub fn run(&self, source: &Path, set: &str, work_dir: &Path) -> Result<BatchReport> {
        let source_dir = source.join(set);
        if !source_dir.is_dir() {
            return Err(CommonError::folder_not_found(&source_dir))
                .context("Source folder does not exist");
        }

        let (primary, backup) = Self::output_dirs(work_dir, set);
        for dir in [&primary, &backup] {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output folder: {:?}", dir))?;
        }

        info!("Resizing images for set: {}", set);
        info!("Source: {:?}", source_dir);
        info!("Output 1: {:?}", primary);
        info!("Output 2: {:?}", backup);

        let files = list_files(&source_dir, is_resizable_file)?;
        let mut report = BatchReport::new("resize", &source_dir);
        report.found = files.len();

        if files.is_empty() {
            warn!("No supported images found in {:?}", source_dir);
            return Ok(report);
        }

        for file in &files {
            let name = display_name(file);
            match self.resize_one(file, &[primary.as_path(), backup.as_path()]) {
                Ok(outputs) => {
                    info!("Resized: {}", name);
                    report.record_success(outputs);
                }
                Err(e) => {
                    error!("Failed to process {}: {:#}", name, e);
                    report.record_failure(file, &e);
                }
            }
        }

        Ok(report)
    }

    fn resize_one(&self, file: &Path, targets: &[&Path]) -> Result<Vec<PathBuf>> {
        let file_name = file
            .file_name()
            .with_context(|| format!("No file name in {:?}", file))?;

        let image = image::open(file).with_context(|| format!("Failed to decode {:?}", file))?;
        let resized = resize_to_width(&image, self.width)?;

        let mut outputs = Vec::with_capacity(targets.len());
        for dir in targets {
            let path = dir.join(file_name);
            resized
                .save(&path)
                .with_context(|| format!("Failed to write {:?}", path))?;
            outputs.push(path);
        }
        Ok(outputs)
    }
}
