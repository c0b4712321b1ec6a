//! Cardprep-Common: Shared types and utilities.
//!
//! This crate provides common functionality used across cardprep:
//!
//! - **Variants**: The derived outputs of the card pipeline and their prefixes
//! - **Path Utilities**: Input selection by extension and output naming
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use cardprep_common::paths::is_card_source;
//! use cardprep_common::Variant;
//! use std::path::Path;
//!
//! assert!(is_card_source(Path::new("ace.png")));
//! assert_eq!(Variant::Removed.file_name("ace.png"), "removed_ace.png");
//! ```

pub mod error;
pub mod paths;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
