//! Discrete Gaussian moment fit for a one-dimensional intensity profile.
//!
//! Sample `i` sits at coordinate `x = i` and carries weight `y[i]`. The fit is the
//! weighted first moment (mean) and the square root of the weighted second
//! central moment (sigma). For a Gaussian beam these are its center and width.

use serde::Serialize;

use crate::beam_pipeline::common::error::FitError;

/// Moment estimate of a single peak.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfileFit {
    /// Weighted mean position, in sample units
    pub mean: f64,
    /// Weighted standard deviation, in sample units
    pub sigma: f64,
}

impl ProfileFit {
    /// Full width at half maximum of the Gaussian with this sigma.
    pub fn fwhm(&self) -> f64 {
        2.0 * (2.0 * std::f64::consts::LN_2).sqrt() * self.sigma
    }
}

/// Fits mean and sigma of `y`, treating each entry as a weight at its index.
///
/// Never yields NaN: empty, zero-sum, negative and non-finite profiles are
/// reported as [`FitError`] instead.
pub fn fit_profile(y: &[f64]) -> Result<ProfileFit, FitError> {
    if y.is_empty() {
        return Err(FitError::EmptyProfile);
    }

    for (index, &value) in y.iter().enumerate() {
        if !value.is_finite() {
            return Err(FitError::NonFinite { index, value });
        }
        if value < 0.0 {
            return Err(FitError::NegativeWeight { index, value });
        }
    }

    let total: f64 = y.iter().sum();
    if total == 0.0 {
        return Err(FitError::ZeroSum);
    }

    let mean = y
        .iter()
        .enumerate()
        .map(|(x, w)| x as f64 * w)
        .sum::<f64>()
        / total;

    let variance = y
        .iter()
        .enumerate()
        .map(|(x, w)| w * (x as f64 - mean).powi(2))
        .sum::<f64>()
        / total;

    Ok(ProfileFit {
        mean,
        sigma: variance.sqrt(),
    })
}
