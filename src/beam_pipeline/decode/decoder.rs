//! Marker-delimited stream decoding.
//!
//! Each pixel's intensity is the sum of its non-discarded readings. The decoder
//! turns that into a difference of prefix sums: a running total over the cleaned
//! stream is sampled at every [`END_OF_PIXEL`] marker, and consecutive samples
//! are differenced with an implicit leading zero.
//!
//! Pixel values inherit the rounding of the running total: once the total
//! exceeds about 2^53 times a reading, that reading is lost in the difference
//! (`[1e16, 1.0]` decodes to `[1e16, 0.0]`).

use tracing::debug;

use crate::beam_pipeline::capture::Capture;
use crate::beam_pipeline::common::constants::END_OF_PIXEL;
use crate::beam_pipeline::decode::cleaned_stream::CleanedStream;

/// Counters describing one decode, for logging and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeSummary {
    /// Raw readings in the capture
    pub samples: usize,
    /// Readings dropped by a discard marker
    pub discarded: usize,
    /// Pixels produced
    pub pixels: usize,
    /// Cleaned readings after the last end-of-pixel marker, attributed to no pixel
    pub trailing: usize,
}

pub struct Decoder;

impl Decoder {
    pub fn decode(capture: &Capture) -> Vec<f64> {
        Self::decode_stream(&capture.cleaned_stream())
    }

    pub fn decode_with_summary(capture: &Capture) -> (Vec<f64>, DecodeSummary) {
        let stream = capture.cleaned_stream();
        let pixels = Self::decode_stream(&stream);

        let trailing = stream
            .marker()
            .iter()
            .rev()
            .take_while(|m| **m != END_OF_PIXEL)
            .count();

        let summary = DecodeSummary {
            samples: capture.len(),
            discarded: capture.len() - stream.len(),
            pixels: pixels.len(),
            trailing,
        };

        if trailing > 0 {
            debug!("{} trailing readings after the last pixel boundary were dropped", trailing);
        }
        debug!(
            samples = summary.samples,
            discarded = summary.discarded,
            pixels = summary.pixels,
            "Decoded capture stream"
        );

        (pixels, summary)
    }

    pub fn decode_stream(stream: &CleanedStream) -> Vec<f64> {
        let boundaries: Vec<f64> = stream
            .sensor()
            .iter()
            .scan(0.0, |cum, &s| {
                *cum += s;
                Some(*cum)
            })
            .zip(stream.marker())
            .filter(|(_, m)| **m == END_OF_PIXEL)
            .map(|(cum, _)| cum)
            .collect();

        let mut previous = 0.0;
        boundaries
            .into_iter()
            .map(|boundary| {
                let pixel = boundary - previous;
                previous = boundary;
                pixel
            })
            .collect()
    }
}
