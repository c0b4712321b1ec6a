use cardprep::config::{EmptyCropPolicy, RemovalBackend};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cardprep")]
#[command(author, version, about = "Batch image preparation for card scans")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by the subcommands that run background removal.
#[derive(Args, Debug, Clone)]
pub struct RemovalArgs {
    /// Background removal backend (overrides the config file)
    #[arg(long, value_enum)]
    pub backend: Option<RemovalBackend>,

    /// Log an edge hint for every card before removal
    #[arg(long)]
    pub edge_hint: bool,

    /// What to do when a card is fully transparent after removal
    #[arg(long, value_enum)]
    pub empty_crop: Option<EmptyCropPolicy>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert HEIC photos to PNG, then remove their backgrounds
    ConvertHeic {
        /// Folder containing the HEIC files
        #[arg(short, long, default_value = ".")]
        input: PathBuf,

        /// Folder receiving the PNG files (default: <input>/converted_pngs)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Crop every card to its visible bounding box
        #[arg(long)]
        crop: bool,

        #[command(flatten)]
        removal: RemovalArgs,

        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove backgrounds from PNG cards and composite them onto a template
    RemoveBg {
        /// Folder containing the PNG cards
        #[arg(short, long, default_value = ".")]
        input: PathBuf,

        /// Crop every card to its visible bounding box
        #[arg(long)]
        crop: bool,

        /// Template image (overrides the config file)
        #[arg(short, long, conflicts_with = "no_composite")]
        template: Option<PathBuf>,

        /// Skip compositing onto the template
        #[arg(long)]
        no_composite: bool,

        #[command(flatten)]
        removal: RemovalArgs,

        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resize a set of images to a fixed width
    Resize {
        /// Folder containing the sets
        #[arg(short, long, required = true)]
        source: PathBuf,

        /// Name of the set (subfolder of the source folder)
        #[arg(long = "set", required = true)]
        set: String,

        /// Target width in pixels (overrides the config file)
        #[arg(short, long)]
        width: Option<u32>,

        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that required external tools are available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },
}
