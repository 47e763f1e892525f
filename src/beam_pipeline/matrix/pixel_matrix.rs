use crate::beam_pipeline::common::error::{FitError, ShapeError};
use crate::beam_pipeline::profile::{fit_profile, ProfileFit};

/// Row-major grid of pixel intensities, `height` rows by `width` columns.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelMatrix {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl PixelMatrix {
    /// Lays `pixels` out row-major. Fails unless `pixels.len() == width * height`;
    /// a product that overflows `usize` can never match.
    pub fn build(pixels: Vec<f64>, width: usize, height: usize) -> Result<Self, ShapeError> {
        if width.checked_mul(height) != Some(pixels.len()) {
            return Err(ShapeError {
                actual: pixels.len(),
                width,
                height,
            });
        }

        Ok(Self {
            width,
            height,
            data: pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.data[row * self.width + col])
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row >= self.height {
            return None;
        }
        let start = row * self.width;
        Some(&self.data[start..start + self.width])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact panics on zero; a zero-width matrix has no visible rows
        self.data.chunks_exact(self.width.max(1)).take(self.height)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }

    /// Smallest and largest intensity, `None` for an empty matrix.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.data.iter().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    /// Fits the intensity profile of one row.
    pub fn fit_row(&self, row: usize) -> Result<ProfileFit, FitError> {
        let profile = self.row(row).ok_or(FitError::RowOutOfRange {
            row,
            height: self.height,
        })?;
        fit_profile(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fixture_layout() {
        let matrix = PixelMatrix::build(vec![3.0, 5.0, 3.0, 6.0, 3.0, 2.0], 2, 3).unwrap();
        assert_eq!(
            matrix.to_rows(),
            vec![vec![3.0, 5.0], vec![3.0, 6.0], vec![3.0, 2.0]]
        );
        assert_eq!(matrix.width(), 2);
        assert_eq!(matrix.height(), 3);
    }

    #[test]
    fn test_row_major_indexing() {
        let pixels: Vec<f64> = (0..12).map(f64::from).collect();
        let matrix = PixelMatrix::build(pixels, 4, 3).unwrap();
        for r in 0..3 {
            for c in 0..4 {
                assert_eq!(matrix.get(r, c), Some((r * 4 + c) as f64));
            }
        }
        assert_eq!(matrix.get(3, 0), None);
        assert_eq!(matrix.get(0, 4), None);
        assert_eq!(matrix.row(1), Some(&[4.0, 5.0, 6.0, 7.0][..]));
        assert_eq!(matrix.row(3), None);
    }

    #[test]
    fn test_too_few_pixels() {
        let err = PixelMatrix::build(vec![1.0; 5], 2, 3).unwrap_err();
        assert_eq!(err, ShapeError { actual: 5, width: 2, height: 3 });
    }

    #[test]
    fn test_too_many_pixels_never_truncated() {
        let err = PixelMatrix::build(vec![1.0; 7], 2, 3).unwrap_err();
        assert_eq!(err.actual, 7);
        assert_eq!(err.expected(), 6);
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        // wraps to 4 under unchecked multiplication
        let width = (usize::MAX / 4) + 2;
        let err = PixelMatrix::build(vec![1.0; 4], width, 4).unwrap_err();
        assert_eq!(err, ShapeError { actual: 4, width, height: 4 });
        assert!(err.expected() > usize::MAX as u128);

        let huge = 1usize << (usize::BITS / 2 + 1);
        assert!(PixelMatrix::build(vec![], huge, huge).is_err());
    }

    #[test]
    fn test_min_max() {
        let matrix = PixelMatrix::build(vec![3.0, 5.0, 3.0, 6.0, 3.0, 2.0], 2, 3).unwrap();
        assert_eq!(matrix.min_max(), Some((2.0, 6.0)));
    }

    #[test]
    fn test_fit_row() {
        let matrix = PixelMatrix::build(vec![0.0, 0.0, 0.0, 1.0, 4.0, 1.0], 3, 2).unwrap();
        let fit = matrix.fit_row(1).unwrap();
        assert_relative_eq!(fit.mean, 1.0, epsilon = 1e-12);
        assert_relative_eq!(fit.sigma, (1.0f64 / 3.0).sqrt(), epsilon = 1e-12);

        assert_eq!(matrix.fit_row(0), Err(FitError::ZeroSum));
        assert_eq!(matrix.fit_row(2), Err(FitError::RowOutOfRange { row: 2, height: 2 }));
    }
}
