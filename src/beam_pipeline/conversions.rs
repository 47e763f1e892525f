//! Pipeline conversions module
//!
//! Orchestrates reading, decoding and rendering of captures.

mod capture_to_tiff;
mod parallel;


pub use capture_to_tiff::{default_output_path, CaptureToTiffPipeline};
pub use parallel::decode_many;
