mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = ["./cardprep.toml", "~/.config/cardprep/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.template.card_width == 0 || config.template.card_height == 0 {
        anyhow::bail!(
            "Card slot must be at least 1x1, got {}x{}",
            config.template.card_width,
            config.template.card_height
        );
    }

    if config.resize.width == 0 {
        anyhow::bail!("Resize width cannot be 0");
    }

    if config.removal.program.trim().is_empty() {
        anyhow::bail!("Removal program cannot be empty");
    }

    if config.heic.program.trim().is_empty() {
        anyhow::bail!("HEIC program cannot be empty");
    }

    let output_dir = Path::new(&config.cards.output_dir);
    if config.cards.output_dir.is_empty() || output_dir.components().count() != 1 {
        anyhow::bail!(
            "Card output folder must be a single folder name, got {:?}",
            config.cards.output_dir
        );
    }

    if !config.template.path.exists() {
        tracing::warn!("Template does not exist: {:?}", config.template.path);
    }

    Ok(())
}
