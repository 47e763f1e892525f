use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use beam_capture_rs::beam_pipeline::{
    CaptureToTiffPipeline, Colormap, JsonCaptureReader, PixelMatrix, ProfileFit, RenderConfig,
    StandardTiffWriter, TiffCompression, default_output_path,
};
use beam_capture_rs::logger;
use clap::{Parser, ValueEnum};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{error, info};

#[derive(ValueEnum, Debug, Clone, Copy)]
enum ColormapArg {
    Gray,
    Viridis,
    Inferno,
}

impl From<ColormapArg> for Colormap {
    fn from(arg: ColormapArg) -> Self {
        match arg {
            ColormapArg::Gray => Colormap::Gray,
            ColormapArg::Viridis => Colormap::Viridis,
            ColormapArg::Inferno => Colormap::Inferno,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum CompressionArg {
    None,
    Lzw,
    Deflate,
}

impl From<CompressionArg> for TiffCompression {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::None => TiffCompression::None,
            CompressionArg::Lzw => TiffCompression::Lzw,
            CompressionArg::Deflate => TiffCompression::DeflateBalanced,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "beam-capture")]
#[command(about = "Decode detector captures into beam images and fit row profiles")]
struct Cli {
    /// Capture containers (JSON) to decode
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory for the rendered images; defaults to next to each input
    #[arg(long)]
    output_dir: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ColormapArg::Viridis)]
    colormap: ColormapArg,

    #[arg(long, value_enum, default_value_t = CompressionArg::None)]
    compression: CompressionArg,

    /// Append a scale bar to the right of each image
    #[arg(long, default_value_t = false)]
    legend: bool,

    /// Integer upscale factor for the rendered image
    #[arg(long, default_value_t = 1)]
    scale: u32,

    /// Fit mean and sigma over this image row
    #[arg(long)]
    fit_row: Option<usize>,

    /// Print fit results as JSON lines
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    verbose: bool,
}

#[derive(Serialize)]
struct FitReport<'a> {
    input: &'a Path,
    row: usize,
    #[serde(flatten)]
    fit: ProfileFit,
}

fn output_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let default = default_output_path(input);
    match (output_dir, default.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => default,
    }
}

fn report_line(input: &Path, row: usize, fit: ProfileFit, json: bool) -> Result<String> {
    if json {
        let report = FitReport { input, row, fit };
        return serde_json::to_string(&report)
            .with_context(|| format!("failed to serialize fit for {}", input.display()));
    }
    Ok(format!("{}: ({}, {})", input.display(), fit.mean, fit.sigma))
}

fn process(
    pipeline: &CaptureToTiffPipeline<JsonCaptureReader, StandardTiffWriter>,
    input: &Path,
    output_dir: Option<&Path>,
) -> Result<PixelMatrix> {
    let output = output_path(input, output_dir);
    let matrix = pipeline
        .convert_file(input, &output)
        .with_context(|| format!("failed to convert {}", input.display()))?;
    info!(
        input = %input.display(),
        output = %output.display(),
        "Image written"
    );
    Ok(matrix)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        logger::init_with_default("debug");
    } else {
        logger::init();
    }

    if let Some(dir) = &cli.output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    let config = RenderConfig::builder()
        .colormap(cli.colormap.into())
        .compression(cli.compression.into())
        .legend(cli.legend)
        .scale(cli.scale)
        .build();
    let pipeline = CaptureToTiffPipeline::new(config);

    info!("Decoding {} capture(s)", cli.inputs.len());

    let results: Vec<Result<PixelMatrix>> = cli
        .inputs
        .par_iter()
        .map(|input| process(&pipeline, input, cli.output_dir.as_deref()))
        .collect();

    let mut failures = 0;
    for (input, result) in cli.inputs.iter().zip(results) {
        let matrix = match result {
            Ok(matrix) => matrix,
            Err(e) => {
                error!("{:#}", e);
                failures += 1;
                continue;
            }
        };

        let Some(row) = cli.fit_row else {
            continue;
        };

        let line = matrix
            .fit_row(row)
            .with_context(|| format!("{}: fit of row {} failed", input.display(), row))
            .and_then(|fit| report_line(input, row, fit, cli.json));

        match line {
            Ok(line) => println!("{}", line),
            Err(e) => {
                error!("{:#}", e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} capture(s) failed", failures, cli.inputs.len());
    }

    Ok(())
}
