//! Names and marker codes shared by the capture readers and the decoder.

/// Top-level group holding one acquisition.
pub const DATA: &str = "data";
/// Intensity readings inside [`DATA`].
pub const SENSOR: &str = "sensor";
/// Per-reading marker codes inside [`DATA`].
pub const MAPPING: &str = "mapping";
/// Attribute table inside [`DATA`].
pub const ATTRS: &str = "attrs";
pub const IMAGE_WIDTH: &str = "image_width";
pub const IMAGE_HEIGHT: &str = "image_height";

/// Marker code for a reading that belongs to no pixel.
pub const DISCARD: i64 = 0;

/// Marker code for the last reading of the current pixel.
pub const END_OF_PIXEL: i64 = 2;
