use std::io::Write;

use tracing::debug;

use crate::beam_pipeline::common::error::{PipelineError, Result};
use crate::beam_pipeline::matrix::PixelMatrix;
use crate::beam_pipeline::render::colormap::{layout, Raster};
use crate::beam_pipeline::render::types::{Colormap, RenderConfig, TiffCompression};
use crate::beam_pipeline::render::writer::MatrixWriter;

pub struct StandardTiffWriter;

fn compression(config: &RenderConfig) -> tiff::encoder::Compression {
    use tiff::encoder::compression::DeflateLevel;
    use tiff::encoder::Compression;

    match config.compression {
        TiffCompression::None => Compression::Uncompressed,
        TiffCompression::Lzw => Compression::Lzw,
        TiffCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
        TiffCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
        TiffCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
    }
}

fn gray16_samples(raster: &Raster) -> Vec<u16> {
    raster
        .levels
        .iter()
        .map(|level| level.map_or(0, Colormap::gray16))
        .collect()
}

fn rgb8_samples(raster: &Raster, colormap: Colormap) -> Vec<u8> {
    raster
        .levels
        .iter()
        .flat_map(|level| level.map_or([0, 0, 0], |t| colormap.rgb(t)))
        .collect()
}

impl MatrixWriter for StandardTiffWriter {
    fn write_matrix(&self, matrix: &PixelMatrix, output: &mut dyn Write, config: &RenderConfig) -> Result<()> {
        let raster = layout(matrix, config.scale as usize, config.legend)?;
        debug!(
            "Encoding TIFF image: {}x{} ({:?})",
            raster.width, raster.height, config.colormap
        );

        let mut buffer = Vec::new();

        let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| PipelineError::EncodeError(e.to_string()))?
            .with_compression(compression(config));

        if let Some(predictor_val) = config.predictor {
            let predictor = match predictor_val {
                2 => tiff::tags::Predictor::Horizontal,
                _ => tiff::tags::Predictor::None,
            };
            encoder = encoder.with_predictor(predictor);
        }

        let width = u32::try_from(raster.width)
            .map_err(|_| PipelineError::EncodeError(format!("width {} exceeds TIFF limits", raster.width)))?;
        let height = u32::try_from(raster.height)
            .map_err(|_| PipelineError::EncodeError(format!("height {} exceeds TIFF limits", raster.height)))?;
        match config.colormap {
            Colormap::Gray => encoder
                .write_image::<tiff::encoder::colortype::Gray16>(width, height, &gray16_samples(&raster)),
            colormap => encoder
                .write_image::<tiff::encoder::colortype::RGB8>(width, height, &rgb8_samples(&raster, colormap)),
        }
        .map_err(|e| PipelineError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}
