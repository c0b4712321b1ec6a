use cardprep_imaging::removal::DEFAULT_TOLERANCE;
use cardprep_imaging::tools::{DEFAULT_MAGICK, DEFAULT_REMBG};
use cardprep_imaging::{CardSlot, DEFAULT_TARGET_WIDTH};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub template: TemplateConfig,

    #[serde(default)]
    pub removal: RemovalConfig,

    #[serde(default)]
    pub heic: HeicConfig,

    #[serde(default)]
    pub cards: CardsConfig,

    #[serde(default)]
    pub resize: ResizeConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TemplateConfig {
    /// Background template, resolved against the working directory when relative
    #[serde(default = "default_template_path")]
    pub path: PathBuf,

    #[serde(default = "default_card_width")]
    pub card_width: u32,

    #[serde(default = "default_card_height")]
    pub card_height: u32,

    /// Declared corner radius of the card slot (not applied to the card)
    #[serde(default = "default_card_radius")]
    pub card_radius: u32,
}

fn default_template_path() -> PathBuf {
    PathBuf::from("assets/bg/background.png")
}
fn default_card_width() -> u32 {
    CardSlot::default().width
}
fn default_card_height() -> u32 {
    CardSlot::default().height
}
fn default_card_radius() -> u32 {
    CardSlot::default().radius
}

impl TemplateConfig {
    pub fn slot(&self) -> CardSlot {
        CardSlot {
            width: self.card_width,
            height: self.card_height,
            radius: self.card_radius,
        }
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            path: default_template_path(),
            card_width: default_card_width(),
            card_height: default_card_height(),
            card_radius: default_card_radius(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RemovalBackend {
    /// External `rembg` command
    #[default]
    Rembg,
    /// Built-in colour key against the top-left pixel
    ColorKey,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemovalConfig {
    #[serde(default)]
    pub backend: RemovalBackend,

    /// Program used by the `rembg` backend
    #[serde(default = "default_rembg")]
    pub program: String,

    /// Extra arguments for `rembg i`
    #[serde(default)]
    pub args: Vec<String>,

    /// Per-channel tolerance of the `color-key` backend
    #[serde(default = "default_tolerance")]
    pub tolerance: u8,
}

fn default_rembg() -> String {
    DEFAULT_REMBG.to_string()
}
fn default_tolerance() -> u8 {
    DEFAULT_TOLERANCE
}

impl Default for RemovalConfig {
    fn default() -> Self {
        Self {
            backend: RemovalBackend::default(),
            program: default_rembg(),
            args: Vec::new(),
            tolerance: default_tolerance(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HeicConfig {
    /// ImageMagick executable
    #[serde(default = "default_magick")]
    pub program: String,
}

fn default_magick() -> String {
    DEFAULT_MAGICK.to_string()
}

impl Default for HeicConfig {
    fn default() -> Self {
        Self {
            program: default_magick(),
        }
    }
}

/// What to do when cropping finds a fully transparent image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EmptyCropPolicy {
    /// Record the file as failed and continue with the next one
    #[default]
    Fail,
    /// Log a warning and continue with the uncropped card
    Skip,
    /// Stop the whole run
    Abort,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CardsConfig {
    /// Output subfolder created inside the input folder
    #[serde(default = "default_cards_output")]
    pub output_dir: String,

    /// Compute the edge hint for every card (diagnostic only)
    #[serde(default)]
    pub edge_hint: bool,

    #[serde(default)]
    pub empty_crop: EmptyCropPolicy,
}

fn default_cards_output() -> String {
    "output_cards".to_string()
}

impl Default for CardsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_cards_output(),
            edge_hint: false,
            empty_crop: EmptyCropPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResizeConfig {
    #[serde(default = "default_resize_width")]
    pub width: u32,
}

fn default_resize_width() -> u32 {
    DEFAULT_TARGET_WIDTH
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            width: default_resize_width(),
        }
    }
}
