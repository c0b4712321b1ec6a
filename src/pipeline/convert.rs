//! HEIC to PNG conversion.
//!
//! Every `.heic` file in the input folder is decoded, written as
//! `<output>/<stem>.png` and then deleted. A file whose conversion fails is
//! left in place.

use super::batch::{display_name, list_files, BatchReport};
use anyhow::{Context, Result};
use cardprep_common::paths::{is_heic_file, png_output_path};
use cardprep_common::Error as CommonError;
use cardprep_imaging::HeicDecoder;
use image::ImageFormat;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Default output folder name, created inside the input folder.
pub const DEFAULT_OUTPUT_DIR: &str = "converted_pngs";

/// Output folder used when none is given.
pub fn default_output_dir(input: &Path) -> PathBuf {
    input.join(DEFAULT_OUTPUT_DIR)
}

pub struct HeicConverter<'a> {
    decoder: &'a dyn HeicDecoder,
}

impl<'a> HeicConverter<'a> {
    pub fn new(decoder: &'a dyn HeicDecoder) -> Self {
        Self { decoder }
    }

    /// Convert every HEIC file in `input` into `output`.
    ///
    /// Fails only if the input folder cannot be read or the output folder
    /// cannot be created; per-file errors are logged and recorded.
    pub fn run(&self, input: &Path, output: &Path) -> Result<BatchReport> {
        if !input.is_dir() {
            return Err(CommonError::folder_not_found(input))
                .context("Input folder does not exist");
        }

        std::fs::create_dir_all(output)
            .with_context(|| format!("Failed to create output folder: {:?}", output))?;

        let files = list_files(input, is_heic_file)?;
        let mut report = BatchReport::new("convert-heic", input);
        report.found = files.len();

        for heic in &files {
            let name = display_name(heic);
            match self.convert_one(heic, output) {
                Ok(png) => {
                    info!("Converted and deleted: {} -> {}", name, display_name(&png));
                    report.record_success([png]);
                }
                Err(e) => {
                    error!("Failed to convert {}: {:#}", name, e);
                    report.record_failure(heic, &e);
                }
            }
        }

        Ok(report)
    }

    fn convert_one(&self, heic: &Path, output: &Path) -> Result<PathBuf> {
        let png = png_output_path(heic, output)?;

        let image = self
            .decoder
            .decode(heic)
            .with_context(|| format!("Failed to decode {:?}", heic))?;

        image
            .save_with_format(&png, ImageFormat::Png)
            .with_context(|| format!("Failed to write {:?}", png))?;

        std::fs::remove_file(heic)
            .with_context(|| format!("Failed to delete source {:?}", heic))?;

        Ok(png)
    }
}
