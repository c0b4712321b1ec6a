//! cardprep - batch image preparation for card scans
//!
//! This library crate exposes the configuration and pipelines behind the
//! `cardprep` binary for integration testing.

pub mod config;
pub mod pipeline;
