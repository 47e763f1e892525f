//! Pixel matrix module
//!
//! Reshapes decoded per-pixel intensities into the declared image grid.

mod pixel_matrix;

pub use pixel_matrix::PixelMatrix;
