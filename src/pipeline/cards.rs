//! Card pipeline: background removal, crop and template composite.
//!
//! For every source PNG in the input folder:
//!
//! 1. optional edge hint (logged only)
//! 2. background removal, written as `removed_<name>`
//! 3. optional crop to the visible card, written as `cropped_<name>`
//! 4. optional composite onto the template, written as `composited_<name>`
//!
//! All outputs go to a subfolder of the input folder. A failing file is
//! logged and the run moves on; a failed composite may leave its `removed_`
//! output behind.

use super::batch::{display_name, list_files, BatchReport};
use crate::config::{CardsConfig, EmptyCropPolicy};
use anyhow::{Context, Result};
use cardprep_common::paths::{is_card_source, variant_path};
use cardprep_common::{Error as CommonError, Variant};
use cardprep_imaging::{
    crop_to_card, edge_hint_file, edge_pixel_count, BackgroundRemover, Template,
};
use image::{ImageFormat, RgbaImage};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Raised when cropping finds nothing visible and the policy is
/// [`EmptyCropPolicy::Abort`]. Stops the whole run.
#[derive(Debug, thiserror::Error)]
#[error("{file} is fully transparent after background removal; aborting run")]
pub struct EmptyCardAbort {
    pub file: String,
}

/// Per-run switches of the card pipeline.
#[derive(Debug, Clone)]
pub struct CardOptions {
    /// Subfolder of the input folder receiving all outputs.
    pub output_dir: String,
    pub crop: bool,
    pub edge_hint: bool,
    pub empty_crop: EmptyCropPolicy,
}

impl CardOptions {
    pub fn from_config(config: &CardsConfig, crop: bool) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            crop,
            edge_hint: config.edge_hint,
            empty_crop: config.empty_crop,
        }
    }
}

impl Default for CardOptions {
    fn default() -> Self {
        Self::from_config(&CardsConfig::default(), false)
    }
}

pub struct CardPipeline<'a> {
    remover: &'a dyn BackgroundRemover,
    template: Option<&'a Template>,
    options: CardOptions,
}

impl<'a> CardPipeline<'a> {
    pub fn new(remover: &'a dyn BackgroundRemover, options: CardOptions) -> Self {
        Self {
            remover,
            template: None,
            options,
        }
    }

    /// Composite every card onto `template`.
    pub fn with_template(mut self, template: &'a Template) -> Self {
        self.template = Some(template);
        self
    }

    /// Folder the outputs for `input` are written to.
    pub fn output_dir(&self, input: &Path) -> PathBuf {
        input.join(&self.options.output_dir)
    }

    /// Process every source PNG in `input`.
    ///
    /// Per-file failures are logged and recorded in the report. The run
    /// itself fails only on setup errors or an [`EmptyCardAbort`].
    pub fn run(&self, input: &Path) -> Result<BatchReport> {
        if !input.is_dir() {
            return Err(CommonError::folder_not_found(input))
                .context("Input folder does not exist");
        }

        let output = self.output_dir(input);
        std::fs::create_dir_all(&output)
            .with_context(|| format!("Failed to create output folder: {:?}", output))?;

        info!("Scanning for .png files in: {:?}", input);
        let files = list_files(input, is_card_source)?;
        info!(
            "Found {} file(s) using {} background removal",
            files.len(),
            self.remover.name()
        );

        let mut report = BatchReport::new("cards", input);
        report.found = files.len();

        for source in &files {
            let name = display_name(source);
            info!("Processing: {}", name);

            match self.process_one(source, &output) {
                Ok(outputs) => {
                    if let Some(last) = outputs.last() {
                        info!("Saved: {:?}", last);
                    }
                    report.record_success(outputs);
                }
                Err(e) if e.is::<EmptyCardAbort>() => {
                    error!("Error processing {}: {:#}", name, e);
                    return Err(e);
                }
                Err(e) => {
                    error!("Error processing {}: {:#}", name, e);
                    report.record_failure(source, &e);
                }
            }
        }

        Ok(report)
    }

    fn process_one(&self, source: &Path, output: &Path) -> Result<Vec<PathBuf>> {
        let mut outputs = Vec::new();

        if self.options.edge_hint {
            self.log_edge_hint(source);
        }

        let removed_path = variant_path(source, output, Variant::Removed)?;
        let input_data =
            std::fs::read(source).with_context(|| format!("Failed to read {:?}", source))?;
        let removed = self
            .remover
            .remove(&input_data)
            .with_context(|| format!("{} failed", self.remover.name()))?;
        std::fs::write(&removed_path, &removed)
            .with_context(|| format!("Failed to write {:?}", removed_path))?;
        outputs.push(removed_path);

        if !self.options.crop && self.template.is_none() {
            return Ok(outputs);
        }

        let mut card = image::load_from_memory(&removed)
            .context("Failed to decode background-removed image")?
            .to_rgba8();

        if self.options.crop {
            if let Some(cropped) = self.crop(&card, source)? {
                let cropped_path = variant_path(source, output, Variant::Cropped)?;
                save_png(&cropped, &cropped_path)?;
                outputs.push(cropped_path);
                card = cropped;
            }
        }

        if let Some(template) = self.template {
            let composited_path = variant_path(source, output, Variant::Composited)?;
            save_png(&template.composite(&card), &composited_path)?;
            outputs.push(composited_path);
        }

        Ok(outputs)
    }

    /// Crop according to the empty-crop policy. `None` means continue uncropped.
    fn crop(&self, card: &RgbaImage, source: &Path) -> Result<Option<RgbaImage>> {
        match crop_to_card(card) {
            Ok(cropped) => Ok(Some(cropped)),
            Err(cardprep_imaging::Error::NoOpaquePixels) => match self.options.empty_crop {
                EmptyCropPolicy::Fail => {
                    anyhow::bail!("Nothing left to crop: image is fully transparent")
                }
                EmptyCropPolicy::Skip => {
                    warn!(
                        "{} is fully transparent after background removal; keeping it uncropped",
                        display_name(source)
                    );
                    Ok(None)
                }
                EmptyCropPolicy::Abort => Err(EmptyCardAbort {
                    file: display_name(source),
                }
                .into()),
            },
            Err(e) => Err(e).context("Failed to crop"),
        }
    }

    fn log_edge_hint(&self, source: &Path) {
        match edge_hint_file(source) {
            Ok(edges) => debug!(
                "Edge hint for {}: {} edge pixel(s)",
                display_name(source),
                edge_pixel_count(&edges)
            ),
            Err(e) => warn!("Edge hint failed for {}: {}", display_name(source), e),
        }
    }
}

fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("Failed to write {:?}", path))
}
