//! Rendering module
//!
//! Writes a pixel matrix as a grayscale or color-mapped TIFF raster.

mod colormap;
mod standard_tiff_writer;
pub mod types;
mod writer;

pub use colormap::{layout, Raster, LEGEND_GAP, LEGEND_WIDTH};
pub use standard_tiff_writer::StandardTiffWriter;
pub use types::{Colormap, RenderConfig, RenderConfigBuilder, TiffCompression};
pub use writer::MatrixWriter;
