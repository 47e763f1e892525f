//! Colormap lookup and raster layout.

use crate::beam_pipeline::common::error::{PipelineError, Result};
use crate::beam_pipeline::matrix::PixelMatrix;
use crate::beam_pipeline::render::types::Colormap;

/// Samples per output pixel in the widest encoding (RGB).
const MAX_CHANNELS: usize = 3;

/// Columns of background between the image and the scale bar.
pub const LEGEND_GAP: usize = 2;
/// Width of the scale bar in output pixels.
pub const LEGEND_WIDTH: usize = 6;

const VIRIDIS: [[u8; 3]; 9] = [
    [68, 1, 84],
    [71, 44, 122],
    [59, 81, 139],
    [44, 113, 142],
    [33, 144, 141],
    [39, 173, 129],
    [92, 200, 99],
    [170, 220, 50],
    [253, 231, 37],
];

const INFERNO: [[u8; 3]; 9] = [
    [0, 0, 4],
    [31, 12, 72],
    [85, 15, 109],
    [136, 34, 106],
    [186, 54, 85],
    [227, 89, 51],
    [249, 140, 10],
    [249, 201, 50],
    [252, 255, 164],
];

fn interpolate(table: &[[u8; 3]], t: f64) -> [u8; 3] {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let pos = t * (table.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(table.len() - 1);
    let frac = pos - lo as f64;

    let mut out = [0u8; 3];
    for (ch, v) in out.iter_mut().enumerate() {
        let a = table[lo][ch] as f64;
        let b = table[hi][ch] as f64;
        *v = (a + (b - a) * frac).round() as u8;
    }
    out
}

impl Colormap {
    /// RGB color for a normalized level in `[0, 1]`. Gray maps to equal channels.
    pub fn rgb(&self, t: f64) -> [u8; 3] {
        match self {
            Colormap::Gray => {
                let v = (t.clamp(0.0, 1.0) * u8::MAX as f64).round() as u8;
                [v, v, v]
            }
            Colormap::Viridis => interpolate(&VIRIDIS, t),
            Colormap::Inferno => interpolate(&INFERNO, t),
        }
    }

    /// 16-bit gray level for a normalized level in `[0, 1]`.
    pub fn gray16(t: f64) -> u16 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        (t * u16::MAX as f64).round() as u16
    }
}

/// Normalized levels laid out for output. `None` marks background.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pub width: usize,
    pub height: usize,
    pub levels: Vec<Option<f64>>,
}

/// Scales intensities to `[0, 1]` against the matrix range, upscales by `scale`
/// and optionally appends the legend bar (max at the top, min at the bottom).
///
/// Output dimensions must fit the TIFF `u32` limits and the sample buffer must
/// fit in memory addressing; anything larger is an [`PipelineError::InvalidConfig`].
pub fn layout(matrix: &PixelMatrix, scale: usize, legend: bool) -> Result<Raster> {
    if scale == 0 {
        return Err(PipelineError::InvalidConfig("scale must be at least 1".to_string()));
    }

    let too_large = || {
        PipelineError::InvalidConfig(format!(
            "{}x{} image at scale {} exceeds the maximum raster size",
            matrix.width(),
            matrix.height(),
            scale
        ))
    };

    let image_width = matrix.width().checked_mul(scale).ok_or_else(too_large)?;
    let height = matrix.height().checked_mul(scale).ok_or_else(too_large)?;
    let width = if legend {
        image_width
            .checked_add(LEGEND_GAP + LEGEND_WIDTH)
            .ok_or_else(too_large)?
    } else {
        image_width
    };

    if u32::try_from(width).is_err() || u32::try_from(height).is_err() {
        return Err(too_large());
    }
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(MAX_CHANNELS))
        .ok_or_else(too_large)?;

    let (lo, hi) = matrix.min_max().unwrap_or((0.0, 0.0));
    let span = hi - lo;
    let normalize = |v: f64| if span > 0.0 { (v - lo) / span } else { 0.0 };

    let mut levels = Vec::with_capacity(width * height);
    for y in 0..height {
        let row = y / scale;
        for x in 0..image_width {
            levels.push(matrix.get(row, x / scale).map(normalize));
        }
        if legend {
            let t = if height > 1 {
                1.0 - y as f64 / (height - 1) as f64
            } else {
                1.0
            };
            levels.extend(std::iter::repeat_n(None, LEGEND_GAP));
            levels.extend(std::iter::repeat_n(Some(t), LEGEND_WIDTH));
        }
    }

    Ok(Raster {
        width,
        height,
        levels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colormap_endpoints() {
        assert_eq!(Colormap::Viridis.rgb(0.0), VIRIDIS[0]);
        assert_eq!(Colormap::Viridis.rgb(1.0), VIRIDIS[8]);
        assert_eq!(Colormap::Inferno.rgb(0.0), INFERNO[0]);
        assert_eq!(Colormap::Inferno.rgb(1.0), INFERNO[8]);
        assert_eq!(Colormap::Gray.rgb(1.0), [255, 255, 255]);
    }

    #[test]
    fn test_colormap_clamps() {
        assert_eq!(Colormap::Viridis.rgb(-3.0), VIRIDIS[0]);
        assert_eq!(Colormap::Viridis.rgb(7.0), VIRIDIS[8]);
        assert_eq!(Colormap::Viridis.rgb(f64::NAN), VIRIDIS[0]);
    }

    #[test]
    fn test_gray16_range() {
        assert_eq!(Colormap::gray16(0.0), 0);
        assert_eq!(Colormap::gray16(1.0), u16::MAX);
        assert_eq!(Colormap::gray16(0.5), 32768);
    }

    #[test]
    fn test_layout_normalizes_and_upscales() {
        let matrix = PixelMatrix::build(vec![2.0, 4.0, 6.0, 2.0], 2, 2).unwrap();
        let raster = layout(&matrix, 2, false).unwrap();

        assert_eq!(raster.width, 4);
        assert_eq!(raster.height, 4);
        assert_eq!(raster.levels[0], Some(0.0));
        assert_eq!(raster.levels[1], Some(0.0));
        assert_eq!(raster.levels[2], Some(0.5));
        assert_eq!(raster.levels[2 * 4], Some(1.0));
        assert_eq!(raster.levels[3 * 4 + 3], Some(0.0));
    }

    #[test]
    fn test_constant_matrix_renders_low() {
        let matrix = PixelMatrix::build(vec![5.0; 4], 2, 2).unwrap();
        let raster = layout(&matrix, 1, false).unwrap();
        assert!(raster.levels.iter().all(|l| *l == Some(0.0)));
    }

    #[test]
    fn test_legend_runs_max_to_min() {
        let matrix = PixelMatrix::build(vec![1.0, 2.0, 3.0], 1, 3).unwrap();
        let raster = layout(&matrix, 1, true).unwrap();

        assert_eq!(raster.width, 1 + LEGEND_GAP + LEGEND_WIDTH);
        let bar = |y: usize| raster.levels[y * raster.width + raster.width - 1];
        assert_eq!(bar(0), Some(1.0));
        assert_eq!(bar(1), Some(0.5));
        assert_eq!(bar(2), Some(0.0));
        assert_eq!(raster.levels[1], None);
    }

    #[test]
    fn test_oversized_scale_rejected() {
        let matrix = PixelMatrix::build(vec![1.0; 6], 2, 3).unwrap();

        let err = layout(&matrix, u32::MAX as usize, false).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidConfig(_)));

        // width 2^32 no longer fits a TIFF dimension
        let err = layout(&matrix, 1 << 31, false).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidConfig(_)));

        let err = layout(&matrix, usize::MAX, true).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidConfig(_)));
    }

    #[test]
    fn test_zero_scale_rejected() {
        let matrix = PixelMatrix::build(vec![1.0; 6], 2, 3).unwrap();
        assert!(matches!(layout(&matrix, 0, false), Err(PipelineError::InvalidConfig(_))));
    }
}
