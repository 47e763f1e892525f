use rayon::prelude::*;
use tracing::debug;

use crate::beam_pipeline::capture::Capture;
use crate::beam_pipeline::common::error::Result;
use crate::beam_pipeline::matrix::PixelMatrix;

/// Decodes independent captures concurrently. Results keep the input order.
pub fn decode_many(captures: &[Capture]) -> Vec<Result<PixelMatrix>> {
    debug!("Decoding {} captures in parallel", captures.len());
    captures.par_iter().map(Capture::pixel_matrix).collect()
}
