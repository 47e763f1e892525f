//! Capture reader for JSON containers.
//!
//! The document mirrors the grouped layout acquisitions are archived in: a
//! [`DATA`] group holding the [`SENSOR`] and [`MAPPING`] arrays, with the image
//! dimensions stored as integer attributes under [`ATTRS`].
//!
//! ```json
//! { "data": { "sensor": [1, 2, 2], "mapping": [1, 2, 0],
//!             "attrs": { "image_width": 1, "image_height": 1 } } }
//! ```

use serde_json::{Map, Value};
use tracing::debug;

use crate::beam_pipeline::capture::reader::CaptureReader;
use crate::beam_pipeline::capture::types::Capture;
use crate::beam_pipeline::common::constants::{
    ATTRS, DATA, IMAGE_HEIGHT, IMAGE_WIDTH, MAPPING, SENSOR,
};
use crate::beam_pipeline::common::error::{PipelineError, Result, ValidationError};

pub struct JsonCaptureReader;

fn group<'a>(parent: &'a Map<String, Value>, key: &str) -> Result<&'a Map<String, Value>> {
    parent
        .get(key)
        .ok_or_else(|| PipelineError::Decode(format!("missing group '{}'", key)))?
        .as_object()
        .ok_or_else(|| PipelineError::Decode(format!("'{}' is not a group", key)))
}

fn array<'a>(parent: &'a Map<String, Value>, key: &str) -> Result<&'a Vec<Value>> {
    parent
        .get(key)
        .ok_or_else(|| PipelineError::Decode(format!("missing array '{}'", key)))?
        .as_array()
        .ok_or_else(|| PipelineError::Decode(format!("'{}' is not an array", key)))
}

fn integer_attr(attrs: &Map<String, Value>, key: &str) -> Result<i64> {
    attrs
        .get(key)
        .ok_or_else(|| PipelineError::Decode(format!("missing attribute '{}'", key)))?
        .as_i64()
        .ok_or_else(|| PipelineError::Decode(format!("attribute '{}' is not an integer", key)))
}

fn dimension(value: i64, invalid: fn(i64) -> ValidationError) -> Result<usize> {
    match usize::try_from(value) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(invalid(value).into()),
    }
}

impl CaptureReader for JsonCaptureReader {
    fn read_capture(&self, data: &[u8]) -> Result<Capture> {
        debug!("Parsing capture container, {} bytes", data.len());

        let document: Value =
            serde_json::from_slice(data).map_err(|e| PipelineError::Decode(e.to_string()))?;
        let root = document
            .as_object()
            .ok_or_else(|| PipelineError::Decode("document root is not an object".to_string()))?;

        let data_group = group(root, DATA)?;
        let attrs = group(data_group, ATTRS)?;

        let sensor = array(data_group, SENSOR)?
            .iter()
            .enumerate()
            .map(|(i, v)| {
                v.as_f64().ok_or_else(|| {
                    PipelineError::Decode(format!("'{}'[{}] is not a number", SENSOR, i))
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        let marker = array(data_group, MAPPING)?
            .iter()
            .enumerate()
            .map(|(i, v)| {
                v.as_i64().ok_or_else(|| {
                    PipelineError::Decode(format!("'{}'[{}] is not an integer", MAPPING, i))
                })
            })
            .collect::<Result<Vec<i64>>>()?;

        // Same check order as `validate`: height first.
        let image_height = dimension(integer_attr(attrs, IMAGE_HEIGHT)?, ValidationError::NonPositiveHeight)?;
        let image_width = dimension(integer_attr(attrs, IMAGE_WIDTH)?, ValidationError::NonPositiveWidth)?;

        debug!(
            "Capture container: {} samples, {}x{} image",
            sensor.len(),
            image_width,
            image_height
        );

        Ok(Capture::new(sensor, marker, image_width, image_height)?)
    }
}
