use std::io::Write;

use crate::beam_pipeline::common::error::Result;
use crate::beam_pipeline::matrix::PixelMatrix;
use crate::beam_pipeline::render::types::RenderConfig;

pub trait MatrixWriter {
    fn write_matrix(&self, matrix: &PixelMatrix, output: &mut dyn Write, config: &RenderConfig) -> Result<()>;
}
