use std::fs;

use approx::assert_relative_eq;
use beam_capture_rs::beam_pipeline::{
    decode_many, default_output_path, CaptureToTiffPipeline, Colormap, FitError, PipelineError,
    RenderConfig, ShapeError, TiffCompression, ValidationError,
};
use tiff::decoder::{Decoder, DecodingResult};

const FIXTURE: &str = r#"{
    "data": {
        "sensor": [1, 2, 2, 3, 3, 0, 1, 5, 3, 2, 1, 1, 1],
        "mapping": [1, 2, 1, 2, 1, 2, 1, 2, 0, 1, 2, 1, 2],
        "attrs": { "image_width": 2, "image_height": 3 }
    }
}"#;

/// A 5x3 beam whose middle row is a sampled peak, two readings per pixel.
fn beam_document() -> String {
    let rows = [[0.0, 1.0, 2.0, 1.0, 0.0], [1.0, 4.0, 8.0, 4.0, 1.0], [0.0, 1.0, 2.0, 1.0, 0.0]];
    let mut sensor = Vec::new();
    let mut mapping = Vec::new();
    for row in rows {
        for value in row {
            // split each pixel across an interior and a closing reading, plus a discarded one
            sensor.extend([value / 2.0, 99.0, value / 2.0]);
            mapping.extend([1, 0, 2]);
        }
    }
    serde_json::json!({
        "data": {
            "sensor": sensor,
            "mapping": mapping,
            "attrs": { "image_width": 5, "image_height": 3 }
        }
    })
    .to_string()
}

#[test]
fn convert_file_writes_readable_tiff() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("data.json");
    fs::write(&input, FIXTURE).unwrap();
    let output = default_output_path(&input);

    let config = RenderConfig::builder()
        .colormap(Colormap::Gray)
        .compression(TiffCompression::DeflateFast)
        .build();
    let pipeline = CaptureToTiffPipeline::new(config);
    let matrix = pipeline.convert_file(&input, &output).unwrap();

    assert_eq!(matrix.to_rows(), vec![vec![3.0, 5.0], vec![3.0, 6.0], vec![3.0, 2.0]]);
    assert_eq!(output.file_name().unwrap(), "data.tiff");

    let mut decoder = Decoder::new(fs::File::open(&output).unwrap()).unwrap();
    assert_eq!(decoder.dimensions().unwrap(), (2, 3));
    match decoder.read_image().unwrap() {
        DecodingResult::U16(data) => {
            assert_eq!(data.len(), 6);
            assert_eq!(data[3], u16::MAX);
            assert_eq!(data[5], 0);
        }
        _ => panic!("expected 16-bit grayscale samples"),
    }
}

#[test]
fn failed_conversion_creates_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.json");
    fs::write(
        &input,
        r#"{ "data": { "sensor": [1, 2], "mapping": [2, 2],
             "attrs": { "image_width": 3, "image_height": 3 } } }"#,
    )
    .unwrap();
    let output = dir.path().join("bad.tiff");

    let pipeline = CaptureToTiffPipeline::new(RenderConfig::default());
    let err = pipeline.convert_file(&input, &output).unwrap_err();

    assert!(matches!(err, PipelineError::Shape(ShapeError { actual: 2, width: 3, height: 3 })));
    assert!(!output.exists());
}

#[test]
fn invalid_capture_is_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("negative.json");
    fs::write(
        &input,
        r#"{ "data": { "sensor": [1, -2], "mapping": [1, 2],
             "attrs": { "image_width": 1, "image_height": 1 } } }"#,
    )
    .unwrap();

    let pipeline = CaptureToTiffPipeline::new(RenderConfig::default());
    let err = pipeline.load_file(&input).unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Validation(ValidationError::NegativeSensor { index: 1, .. })
    ));
}

#[test]
fn beam_row_fit_locates_peak() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("beam.json");
    fs::write(&input, beam_document()).unwrap();

    let pipeline = CaptureToTiffPipeline::new(RenderConfig::builder().legend(true).build());
    let matrix = pipeline
        .convert_file(&input, dir.path().join("beam.tiff"))
        .unwrap();

    assert_eq!(matrix.row(1), Some(&[1.0, 4.0, 8.0, 4.0, 1.0][..]));

    let fit = matrix.fit_row(1).unwrap();
    assert_relative_eq!(fit.mean, 2.0, epsilon = 1e-12);
    // Σ y (x - 2)^2 = 1*4 + 4*1 + 4*1 + 1*4 = 16, Σ y = 18
    assert_relative_eq!(fit.sigma, (16.0f64 / 18.0).sqrt(), epsilon = 1e-12);

    assert_eq!(matrix.fit_row(5), Err(FitError::RowOutOfRange { row: 5, height: 3 }));
}

#[test]
fn parallel_decode_of_loaded_captures() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("data.json");
    let second = dir.path().join("beam.json");
    fs::write(&first, FIXTURE).unwrap();
    fs::write(&second, beam_document()).unwrap();

    let pipeline = CaptureToTiffPipeline::new(RenderConfig::default());
    let captures = vec![
        pipeline.load_file(&first).unwrap(),
        pipeline.load_file(&second).unwrap(),
    ];

    let matrices: Vec<_> = decode_many(&captures)
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    assert_eq!((matrices[0].width(), matrices[0].height()), (2, 3));
    assert_eq!((matrices[1].width(), matrices[1].height()), (5, 3));
    assert_eq!(matrices[0], captures[0].pixel_matrix().unwrap());
}
