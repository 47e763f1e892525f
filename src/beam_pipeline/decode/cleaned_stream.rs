use crate::beam_pipeline::capture::Capture;
use crate::beam_pipeline::common::constants::DISCARD;

/// Capture readings with every discarded sample removed, order preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedStream {
    sensor: Vec<f64>,
    marker: Vec<i64>,
}

impl CleanedStream {
    pub fn new(sensor: &[f64], marker: &[i64]) -> Self {
        let (sensor, marker) = sensor
            .iter()
            .zip(marker)
            .filter(|(_, m)| **m != DISCARD)
            .map(|(s, m)| (*s, *m))
            .unzip();

        Self { sensor, marker }
    }

    pub fn from_capture(capture: &Capture) -> Self {
        Self::new(capture.sensor(), capture.marker())
    }

    pub fn sensor(&self) -> &[f64] {
        &self.sensor
    }

    pub fn marker(&self) -> &[i64] {
        &self.marker
    }

    pub fn len(&self) -> usize {
        self.sensor.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensor.is_empty()
    }
}
