//! Beam capture decoding pipeline
//!
//! Turns a detector capture (intensity readings interleaved with pixel marker
//! codes) into a pixel-intensity image, fits beam profiles over its rows, and
//! renders the image to TIFF.

pub mod capture;
pub mod common;
pub mod conversions;
pub mod decode;
pub mod matrix;
pub mod profile;
pub mod render;

pub use common::{
    constants::END_OF_PIXEL,
    FitError,
    PipelineError,
    Result,
    ShapeError,
    ValidationError,
};

pub use capture::{
    validate,
    Capture,
    CaptureReader,
    JsonCaptureReader,
};

pub use decode::{
    CleanedStream,
    DecodeSummary,
    Decoder,
};

pub use matrix::PixelMatrix;

pub use profile::{
    fit_profile,
    ProfileFit,
};

pub use render::{
    Colormap,
    MatrixWriter,
    RenderConfig,
    RenderConfigBuilder,
    StandardTiffWriter,
    TiffCompression,
};

pub use conversions::{
    decode_many,
    default_output_path,
    CaptureToTiffPipeline,
};
