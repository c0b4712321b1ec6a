//! Core type definitions shared by the pipelines.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Derived output written by the card pipeline next to its source name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Background removed, straight from the remover.
    Removed,
    /// Cropped to the non-transparent bounding box.
    Cropped,
    /// Pasted onto the card template.
    Composited,
}

impl Variant {
    /// All variants, in pipeline order.
    pub const ALL: [Variant; 3] = [Variant::Removed, Variant::Cropped, Variant::Composited];

    /// File name prefix marking this variant.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Removed => "removed_",
            Self::Cropped => "cropped_",
            Self::Composited => "composited_",
        }
    }

    /// Output file name for a source file name.
    pub fn file_name(&self, source_name: &str) -> String {
        format!("{}{}", self.prefix(), source_name)
    }

    /// Detect the variant a file name was derived as, if any.
    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|variant| name.starts_with(variant.prefix()))
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Removed => write!(f, "removed"),
            Self::Cropped => write!(f, "cropped"),
            Self::Composited => write!(f, "composited"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_prefix() {
        assert_eq!(Variant::Removed.prefix(), "removed_");
        assert_eq!(Variant::Cropped.prefix(), "cropped_");
        assert_eq!(Variant::Composited.prefix(), "composited_");
    }

    #[test]
    fn test_variant_file_name() {
        assert_eq!(Variant::Removed.file_name("ace.png"), "removed_ace.png");
        assert_eq!(
            Variant::Composited.file_name("ace.png"),
            "composited_ace.png"
        );
    }

    #[test]
    fn test_variant_from_file_name() {
        assert_eq!(
            Variant::from_file_name("removed_ace.png"),
            Some(Variant::Removed)
        );
        assert_eq!(
            Variant::from_file_name("cropped_removed_ace.png"),
            Some(Variant::Cropped)
        );
        assert_eq!(Variant::from_file_name("ace.png"), None);
        assert_eq!(Variant::from_file_name("Removed_ace.png"), None);
    }

    #[test]
    fn test_variant_display_and_serde() {
        assert_eq!(Variant::Composited.to_string(), "composited");
        let json = serde_json::to_string(&Variant::Cropped).unwrap();
        assert_eq!(json, "\"cropped\"");
    }
}
