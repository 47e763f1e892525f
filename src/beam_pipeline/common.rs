//! Common utilities module
//!
//! Error types and the constants shared between capture readers and the decoder.

pub mod constants;
pub mod error;

pub use error::{FitError, PipelineError, Result, ShapeError, ValidationError};
