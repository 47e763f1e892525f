//! Capture loading module
//!
//! An immutable, validated record of one acquisition plus the readers that
//! produce it from persisted containers.

mod json_reader;
mod reader;
pub mod types;

pub use json_reader::JsonCaptureReader;
pub use reader::CaptureReader;
pub use types::{validate, Capture};
