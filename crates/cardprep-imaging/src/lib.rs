//! # cardprep-imaging
//!
//! Image operations and external imaging tools for cardprep.
//!
//! This crate provides functionality for:
//! - Decoding HEIC files through ImageMagick
//! - Removing backgrounds (`rembg` or a built-in colour key)
//! - Computing an edge hint of a card against a light backdrop
//! - Cropping to the non-transparent bounding box
//! - Compositing cards onto a template
//! - Resizing to a fixed width
//!
//! ## Features
//!
//! - `tracing` - Enable tracing support
//!
//! ## Example
//!
//! ```no_run
//! use cardprep_imaging::{crop_to_card, BackgroundRemover, ColorKeyRemover};
//!
//! let bytes = std::fs::read("card.png")?;
//! let removed = ColorKeyRemover::default().remove(&bytes)?;
//! let card = image::load_from_memory(&removed).unwrap().to_rgba8();
//! let cropped = crop_to_card(&card)?;
//! println!("card is {}x{}", cropped.width(), cropped.height());
//! # Ok::<(), cardprep_imaging::Error>(())
//! ```

pub mod composite;
pub mod crop;
pub mod edges;
mod error;
pub mod heic;
pub mod removal;
pub mod resize;
pub mod tools;

// Re-exports
pub use composite::{CardSlot, Template};
pub use crop::{card_bounds, crop_file, crop_to_card, CardBounds};
pub use edges::{edge_hint, edge_hint_file, edge_pixel_count, foreground_mask};
pub use error::{Error, Result};
pub use heic::{HeicDecoder, MagickDecoder};
pub use removal::{encode_png, BackgroundRemover, ColorKeyRemover, RembgCommand};
pub use resize::{fit_width, resize_to_width, DEFAULT_TARGET_WIDTH};
pub use tools::{check_tool, check_tools, require_tool, ToolInfo};
