//! External tool detection and management.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Default ImageMagick executable used for HEIC decoding.
pub const DEFAULT_MAGICK: &str = "magick";

/// Default background removal executable.
pub const DEFAULT_REMBG: &str = "rembg";

/// Information about an external tool.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    /// Name of the tool.
    pub name: String,
    /// What the tool is used for.
    pub purpose: &'static str,
    /// Whether the tool is available.
    pub available: bool,
    /// Version string if available.
    pub version: Option<String>,
    /// Path to the tool executable.
    pub path: Option<PathBuf>,
}

/// Check if a tool is available and get its information.
///
/// # Example
///
/// ```no_run
/// use cardprep_imaging::check_tool;
///
/// let info = check_tool("rembg", "--version", "background removal");
/// if info.available {
///     println!("rembg version: {:?}", info.version);
/// }
/// ```
pub fn check_tool(name: &str, version_arg: &str, purpose: &'static str) -> ToolInfo {
    let result = Command::new(name).arg(version_arg).output();

    match result {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .map(|s| s.to_string());

            let path = which::which(name).ok();

            ToolInfo {
                name: name.to_string(),
                purpose,
                available: true,
                version,
                path,
            }
        }
        _ => ToolInfo {
            name: name.to_string(),
            purpose,
            available: false,
            version: None,
            path: None,
        },
    }
}

/// Check the tools the pipelines shell out to.
///
/// `magick` and `rembg` are the program names (or paths) from configuration.
pub fn check_tools(magick: &str, rembg: &str) -> Vec<ToolInfo> {
    vec![
        check_tool(magick, "-version", "HEIC decoding"),
        check_tool(rembg, "--version", "background removal"),
    ]
}

/// Require that a tool is available, returning its path.
///
/// Accepts either a bare program name looked up on `PATH` or a path to an
/// existing executable.
///
/// # Errors
///
/// Returns an error if the tool is not found.
pub fn require_tool(name: &str) -> Result<PathBuf> {
    let as_path = Path::new(name);
    if as_path.components().count() > 1 && as_path.is_file() {
        return Ok(as_path.to_path_buf());
    }
    which::which(name).map_err(|_| Error::tool_not_found(name))
}
