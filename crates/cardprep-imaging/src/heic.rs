//! HEIC decoding.
//!
//! HEIC is not something the `image` crate decodes, so decoding goes through
//! a [`HeicDecoder`]. The default decoder pipes the file through ImageMagick
//! and reads back a PNG stream.

use crate::tools::{require_tool, DEFAULT_MAGICK};
use crate::{Error, Result};
use image::{DynamicImage, ImageFormat};
use std::path::Path;
use std::process::Command;

/// Turns a HEIC file into a raster image.
pub trait HeicDecoder {
    /// Decode the file at `path`.
    fn decode(&self, path: &Path) -> Result<DynamicImage>;
}

/// Decoder backed by the ImageMagick command line.
///
/// Runs `<program> <input> png:-` and decodes stdout. The program is resolved
/// on every call so a missing ImageMagick fails the file, not the run.
#[derive(Debug, Clone)]
pub struct MagickDecoder {
    program: String,
}

impl MagickDecoder {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for MagickDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_MAGICK)
    }
}

impl HeicDecoder for MagickDecoder {
    fn decode(&self, path: &Path) -> Result<DynamicImage> {
        if !path.exists() {
            return Err(Error::file_not_found(path));
        }
        let program = require_tool(&self.program)?;

        #[cfg(feature = "tracing")]
        tracing::debug!("Decoding {:?} with {:?}", path, program);

        let output = Command::new(&program).arg(path).arg("png:-").output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::tool_failed(
                &self.program,
                format!(
                    "exit code {:?}: {}",
                    output.status.code(),
                    stderr.trim()
                ),
            ));
        }

        image::load_from_memory_with_format(&output.stdout, ImageFormat::Png)
            .map_err(|e| Error::decode(format!("{} output", self.program), e))
    }
}
