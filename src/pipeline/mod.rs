//! The batch pipelines behind each subcommand.
//!
//! Every pipeline walks one folder sequentially, isolates per-file failures
//! and returns a [`BatchReport`].

pub mod batch;
pub mod cards;
pub mod convert;
pub mod resize;

pub use batch::{BatchReport, FileFailure};
pub use cards::{CardOptions, CardPipeline, EmptyCardAbort};
pub use convert::HeicConverter;
pub use resize::Resizer;
