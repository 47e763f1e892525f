//! Capture data types

use crate::beam_pipeline::common::error::{Result, ValidationError};
use crate::beam_pipeline::decode::{CleanedStream, Decoder};
use crate::beam_pipeline::matrix::PixelMatrix;

/// One acquisition: raw readings, their marker codes and the declared image size.
///
/// Fields are private so every `Capture` in existence has passed [`validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Capture {
    sensor: Vec<f64>,
    marker: Vec<i64>,
    image_width: usize,
    image_height: usize,
}

/// Checks the capture invariants in a fixed order and reports the first violation.
///
/// Order: height, width, sensor readings (finite, non-negative), marker
/// non-negativity, length parity.
pub fn validate(
    sensor: &[f64],
    marker: &[i64],
    image_width: usize,
    image_height: usize,
) -> std::result::Result<(), ValidationError> {
    if image_height == 0 {
        return Err(ValidationError::NonPositiveHeight(image_height as i64));
    }

    if image_width == 0 {
        return Err(ValidationError::NonPositiveWidth(image_width as i64));
    }

    for (index, &value) in sensor.iter().enumerate() {
        if !value.is_finite() {
            return Err(ValidationError::NonFiniteSensor { index, value });
        }
        if value < 0.0 {
            return Err(ValidationError::NegativeSensor { index, value });
        }
    }

    if let Some((index, &value)) = marker.iter().enumerate().find(|(_, m)| **m < 0) {
        return Err(ValidationError::NegativeMarker { index, value });
    }

    if sensor.len() != marker.len() {
        return Err(ValidationError::LengthMismatch {
            sensor: sensor.len(),
            marker: marker.len(),
        });
    }

    Ok(())
}

impl Capture {
    pub fn new(
        sensor: Vec<f64>,
        marker: Vec<i64>,
        image_width: usize,
        image_height: usize,
    ) -> std::result::Result<Self, ValidationError> {
        validate(&sensor, &marker, image_width, image_height)?;

        Ok(Self {
            sensor,
            marker,
            image_width,
            image_height,
        })
    }

    pub fn sensor(&self) -> &[f64] {
        &self.sensor
    }

    pub fn marker(&self) -> &[i64] {
        &self.marker
    }

    pub fn image_width(&self) -> usize {
        self.image_width
    }

    pub fn image_height(&self) -> usize {
        self.image_height
    }

    /// Number of raw readings, including discarded ones.
    pub fn len(&self) -> usize {
        self.sensor.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensor.is_empty()
    }

    pub fn cleaned_stream(&self) -> CleanedStream {
        CleanedStream::from_capture(self)
    }

    /// Per-pixel intensities in stream order.
    pub fn pixels(&self) -> Vec<f64> {
        Decoder::decode(self)
    }

    /// Decodes and reshapes into `image_height` rows of `image_width` columns.
    pub fn pixel_matrix(&self) -> Result<PixelMatrix> {
        let pixels = self.pixels();
        Ok(PixelMatrix::build(pixels, self.image_width, self.image_height)?)
    }
}
