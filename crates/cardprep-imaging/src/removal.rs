//! Background removal backends.
//!
//! A remover takes the encoded bytes of a source image and returns encoded PNG
//! bytes in which background pixels are fully transparent. The caller writes
//! the result to disk untouched.

use crate::tools::{require_tool, DEFAULT_REMBG};
use crate::{Error, Result};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::process::Command;
use tempfile::TempDir;

/// Default per-channel tolerance of [`ColorKeyRemover`].
pub const DEFAULT_TOLERANCE: u8 = 30;

/// Removes the background of an encoded image.
pub trait BackgroundRemover {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Remove the background from `input`, returning encoded PNG bytes.
    fn remove(&self, input: &[u8]) -> Result<Vec<u8>>;
}

/// Remover that shells out to the `rembg` command line.
///
/// The bytes are staged in a scratch directory and processed with
/// `rembg i [args..] <input> <output>`.
#[derive(Debug, Clone)]
pub struct RembgCommand {
    program: String,
    args: Vec<String>,
}

impl RembgCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Extra arguments placed between `i` and the file paths (e.g. `-m isnet-general-use`).
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Arguments passed to the program for the given staged files.
    fn command_args(&self, input: &str, output: &str) -> Vec<String> {
        let mut args = Vec::with_capacity(self.args.len() + 3);
        args.push("i".to_string());
        args.extend(self.args.iter().cloned());
        args.push(input.to_string());
        args.push(output.to_string());
        args
    }
}

impl Default for RembgCommand {
    fn default() -> Self {
        Self::new(DEFAULT_REMBG)
    }
}

impl BackgroundRemover for RembgCommand {
    fn name(&self) -> &str {
        "rembg"
    }

    fn remove(&self, input: &[u8]) -> Result<Vec<u8>> {
        let program = require_tool(&self.program)?;
        let scratch = TempDir::new()?;
        let input_path = scratch.path().join("input");
        let output_path = scratch.path().join("output.png");
        std::fs::write(&input_path, input)?;

        let args = self.command_args(
            &input_path.to_string_lossy(),
            &output_path.to_string_lossy(),
        );

        #[cfg(feature = "tracing")]
        tracing::debug!("Executing {:?} {:?}", program, args);

        let result = Command::new(&program).args(&args).output()?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(Error::tool_failed(
                &self.program,
                format!("exit code {:?}: {}", result.status.code(), stderr.trim()),
            ));
        }

        if !output_path.exists() {
            return Err(Error::tool_failed(
                &self.program,
                "no output file was produced",
            ));
        }

        Ok(std::fs::read(&output_path)?)
    }
}

/// Built-in remover for flat backdrops.
///
/// The top-left pixel is taken as the backdrop colour. Every pixel whose
/// red, green and blue channels all differ from it by less than the tolerance
/// becomes fully transparent.
#[derive(Debug, Clone, Copy)]
pub struct ColorKeyRemover {
    tolerance: u8,
}

impl ColorKeyRemover {
    pub fn new(tolerance: u8) -> Self {
        Self { tolerance }
    }

    /// Key out the backdrop of an already decoded image.
    pub fn key_out(&self, image: &RgbaImage) -> RgbaImage {
        let mut output = image.clone();
        if image.width() == 0 || image.height() == 0 {
            return output;
        }
        let key = *image.get_pixel(0, 0);

        for pixel in output.pixels_mut() {
            let close = (0..3).all(|c| pixel[c].abs_diff(key[c]) < self.tolerance);
            if close {
                *pixel = Rgba([0, 0, 0, 0]);
            }
        }
        output
    }
}

impl Default for ColorKeyRemover {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

impl BackgroundRemover for ColorKeyRemover {
    fn name(&self) -> &str {
        "color-key"
    }

    fn remove(&self, input: &[u8]) -> Result<Vec<u8>> {
        let image = image::load_from_memory(input)
            .map_err(|e| Error::decode("source image", e))?
            .to_rgba8();
        encode_png(&self.key_out(&image))
    }
}

/// Encode an RGBA image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| Error::encode("PNG", e))?;
    Ok(buf.into_inner())
}
