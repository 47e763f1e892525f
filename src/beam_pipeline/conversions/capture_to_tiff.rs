use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::beam_pipeline::{
    capture::{Capture, CaptureReader, JsonCaptureReader},
    common::error::{PipelineError, Result},
    decode::Decoder,
    matrix::PixelMatrix,
    render::{MatrixWriter, RenderConfig, StandardTiffWriter},
};

/// Image path next to `input`, named after the capture file's stem.
pub fn default_output_path<P: AsRef<Path>>(input: P) -> PathBuf {
    let input = input.as_ref();
    let stem = input
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "capture".into());
    let mut name = stem;
    name.push(".tiff");
    input.with_file_name(name)
}

pub struct CaptureToTiffPipeline<R: CaptureReader, W: MatrixWriter> {
    reader: R,
    writer: W,
    config: RenderConfig,
}

impl CaptureToTiffPipeline<JsonCaptureReader, StandardTiffWriter> {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            reader: JsonCaptureReader,
            writer: StandardTiffWriter,
            config,
        }
    }
}

impl<R: CaptureReader, W: MatrixWriter> CaptureToTiffPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: RenderConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    /// Decodes and reshapes an already loaded capture.
    #[instrument(skip(self, capture), fields(samples = capture.len()))]
    pub fn decode(&self, capture: &Capture) -> Result<PixelMatrix> {
        let (pixels, summary) = {
            let _span = tracing::info_span!("decode_stream").entered();
            Decoder::decode_with_summary(capture)
        };

        let matrix = {
            let _span = tracing::info_span!(
                "build_matrix",
                width = capture.image_width(),
                height = capture.image_height()
            )
            .entered();
            PixelMatrix::build(pixels, capture.image_width(), capture.image_height())?
        };

        info!(
            pixels = summary.pixels,
            discarded = summary.discarded,
            "Capture decoded"
        );
        Ok(matrix)
    }

    pub fn render(&self, matrix: &PixelMatrix, output: &mut dyn Write) -> Result<()> {
        let _span = tracing::info_span!("encode_tiff").entered();
        self.writer.write_matrix(matrix, output, &self.config)
    }

    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert(&self, input_data: &[u8], output: &mut dyn Write) -> Result<PixelMatrix> {
        info!("Starting capture to TIFF conversion");

        let capture = {
            let _span = tracing::info_span!("read_capture").entered();
            self.reader.read_capture(input_data)?
        };

        let matrix = self.decode(&capture)?;
        self.render(&matrix, output)?;

        info!(
            width = matrix.width(),
            height = matrix.height(),
            "Conversion complete"
        );
        Ok(matrix)
    }

    #[instrument(skip(self, input_path))]
    pub fn load_file<P: AsRef<Path>>(&self, input_path: P) -> Result<Capture> {
        let input_path = input_path.as_ref();
        let input_data = std::fs::read(input_path).map_err(|e| {
            PipelineError::InputReadError(format!("{}: {}", input_path.display(), e))
        })?;
        self.reader.read_capture(&input_data)
    }

    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<PixelMatrix> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                PipelineError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        // The output file is only created once encoding has succeeded.
        let mut encoded = Vec::new();
        let matrix = self.convert(&input_data, &mut encoded)?;

        {
            let _span = tracing::info_span!("write_output_file").entered();
            std::fs::write(output_path, &encoded).map_err(|e| {
                PipelineError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?;
        }

        Ok(matrix)
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: RenderConfig) {
        self.config = config;
    }
}
