//! Stream decoding module
//!
//! Converts a capture's parallel reading/marker arrays into one intensity per pixel.

mod cleaned_stream;
mod decoder;

pub use cleaned_stream::CleanedStream;
pub use decoder::{DecodeSummary, Decoder};
