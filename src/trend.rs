//! Linear trend fitting over strain component series.

use serde::{Deserialize, Serialize};
use crate::internal::scipy::linregress;
use crate::strain::StrainComponent;
use crate::{Error, Result, SequenceResult};

/// Minimum number of points for a trend fit.
pub const MIN_TREND_POINTS: usize = 2;

/// Quantity used as the independent variable of a trend fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Abscissa {
    /// Frame index within the captured sequence.
    #[default]
    FrameIndex,
    /// Applied deformation distance attached to each frame.
    DeformationDistance,
}

/// Ordinary least-squares fit of a strain series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    pub slope: f64,
    pub intercept: f64,

    /// Coefficient of determination. Exactly 1.0 for a constant series.
    pub r_squared: f64,

    /// Pearson correlation coefficient (0.0 for a constant series).
    pub r_value: f64,

    /// Two-sided p-value for the hypothesis that the slope is zero.
    pub p_value: f64,

    /// Standard error of the slope.
    pub std_err: f64,

    /// Fitted values aligned with the input points.
    pub fitted_values: Vec<f64>,

    /// Observed minus fitted values.
    pub residuals: Vec<f64>,
}

impl RegressionResult {
    /// Evaluate the fitted line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Number of points in the fit.
    pub fn len(&self) -> usize {
        self.fitted_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fitted_values.is_empty()
    }
}

/// Fit `value = slope · x + intercept` to `(x, value)` pairs.
///
/// If every value is identical the total sum of squares is zero; R² is then
/// defined as 1.0 (a perfect fit to a constant).
///
/// # Errors
/// - `InsufficientData` if fewer than two points are given
/// - `InvalidInput` for non-finite values or when all `x` are identical
pub fn fit_trend(series: &[(f64, f64)]) -> Result<RegressionResult> {
    if series.len() < MIN_TREND_POINTS {
        return Err(Error::InsufficientData {
            required: MIN_TREND_POINTS,
            got: series.len(),
        });
    }

    if let Some((i, (x, y))) = series
        .iter()
        .enumerate()
        .find(|(_, (x, y))| !x.is_finite() || !y.is_finite())
    {
        return Err(Error::InvalidInput(format!(
            "series point {} is not finite: ({}, {})",
            i, x, y
        )));
    }

    let (xs, ys): (Vec<f64>, Vec<f64>) = series.iter().copied().unzip();
    if xs.iter().all(|&x| x == xs[0]) {
        return Err(Error::InvalidInput(format!(
            "cannot fit a trend: all {} abscissa values equal {}",
            xs.len(),
            xs[0]
        )));
    }

    let fit = linregress(&xs, &ys);

    let fitted_values: Vec<f64> = xs.iter().map(|&x| fit.intercept + fit.slope * x).collect();
    let residuals: Vec<f64> = ys.iter().zip(&fitted_values).map(|(y, f)| y - f).collect();

    let y_mean = ys.iter().sum::<f64>() / ys.len() as f64;
    let ss_tot: f64 = ys.iter().map(|y| (y - y_mean).powi(2)).sum();
    let ss_res: f64 = residuals.iter().map(|r| r * r).sum();

    let constant = ys.iter().all(|&y| y == ys[0]);
    let r_squared = if constant || ss_tot == 0.0 {
        1.0
    } else {
        1.0 - ss_res / ss_tot
    };

    Ok(RegressionResult {
        slope: fit.slope,
        intercept: fit.intercept,
        r_squared,
        r_value: fit.r_value,
        p_value: fit.p_value,
        std_err: fit.std_err,
        fitted_values,
        residuals,
    })
}

/// Fit every strain component of a sequence, skipping failed frames.
///
/// Components are returned in `StrainComponent::ALL` order.
pub fn analyze_components(
    sequence: &SequenceResult,
    abscissa: Abscissa,
) -> Result<Vec<(StrainComponent, RegressionResult)>> {
    StrainComponent::ALL
        .iter()
        .map(|&component| {
            let series = sequence.component_series(component, abscissa)?;
            let fit = fit_trend(&series)?;
            tracing::debug!(
                %component,
                slope = fit.slope,
                intercept = fit.intercept,
                r_squared = fit.r_squared,
                "fitted strain trend"
            );
            Ok((component, fit))
        })
        .collect()
}
