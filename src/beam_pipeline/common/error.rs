use thiserror::Error;

/// Invariant violations detected while constructing a [`Capture`](crate::beam_pipeline::Capture).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Image height must be positive, got {0}")]
    NonPositiveHeight(i64),

    #[error("Image width must be positive, got {0}")]
    NonPositiveWidth(i64),

    #[error("Sensor reading at index {index} is negative: {value}")]
    NegativeSensor { index: usize, value: f64 },

    #[error("Sensor reading at index {index} is not finite: {value}")]
    NonFiniteSensor { index: usize, value: f64 },

    #[error("Marker at index {index} is negative: {value}")]
    NegativeMarker { index: usize, value: i64 },

    #[error("Sensor and marker lengths differ: sensor={sensor}, marker={marker}")]
    LengthMismatch { sensor: usize, marker: usize },
}

/// Decoded pixel count does not match the declared image dimensions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Decoded {actual} pixels, expected {} for a {width}x{height} image", *.width as u128 * *.height as u128)]
pub struct ShapeError {
    pub actual: usize,
    pub width: usize,
    pub height: usize,
}

impl ShapeError {
    /// Pixel count the dimensions call for. Widened so huge declared sizes cannot overflow.
    pub fn expected(&self) -> u128 {
        self.width as u128 * self.height as u128
    }
}

/// Profile fit cannot be computed for the given weights.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    #[error("Cannot fit an empty profile")]
    EmptyProfile,

    #[error("Cannot fit a profile whose weights sum to zero")]
    ZeroSum,

    #[error("Profile weight at index {index} is not finite: {value}")]
    NonFinite { index: usize, value: f64 },

    #[error("Profile weight at index {index} is negative: {value}")]
    NegativeWeight { index: usize, value: f64 },

    #[error("Row {row} is out of range for an image with {height} rows")]
    RowOutOfRange { row: usize, height: usize },
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode capture container: {0}")]
    Decode(String),

    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid capture: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid pixel layout: {0}")]
    Shape(#[from] ShapeError),

    #[error("Profile fit failed: {0}")]
    Fit(#[from] FitError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
