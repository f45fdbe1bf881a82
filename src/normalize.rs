//! Scale calibration and conversion of marker coordinates to physical units.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use crate::{Error, PointSet, Result};

/// Known physical length and the distance it spans in image points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleCalibration {
    /// Physical reference length (e.g. millimeters).
    pub reference_length: f64,

    /// Measured length of the reference in pixel/point units.
    pub measured_length: f64,
}

impl ScaleCalibration {
    /// Create a calibration from a physical length and its measured distance.
    ///
    /// Both values must be finite and strictly positive.
    pub fn new(reference_length: f64, measured_length: f64) -> Result<Self> {
        if !measured_length.is_finite() || measured_length <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "measured length must be finite and > 0, got {}",
                measured_length
            )));
        }
        if !reference_length.is_finite() || reference_length <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "reference length must be finite and > 0, got {}",
                reference_length
            )));
        }

        Ok(Self {
            reference_length,
            measured_length,
        })
    }

    /// Calibrate from the two annotated scale markers.
    pub fn from_scale_points(a: [f64; 2], b: [f64; 2], reference_length: f64) -> Result<Self> {
        let measured = nalgebra::distance(&Point2::new(a[0], a[1]), &Point2::new(b[0], b[1]));
        Self::new(reference_length, measured)
    }

    /// Physical units per image point.
    pub fn scale_factor(&self) -> f64 {
        self.reference_length / self.measured_length
    }
}

fn check_scale_factor(scale_factor: f64) -> Result<()> {
    if !scale_factor.is_finite() || scale_factor <= 0.0 {
        return Err(Error::InvalidInput(format!(
            "scale factor must be finite and > 0, got {}",
            scale_factor
        )));
    }
    Ok(())
}

/// Multiply every coordinate by `scale_factor`.
///
/// Point order (and so the center index) is preserved.
///
/// # Errors
/// `InvalidInput` if `points` does not hold exactly five finite pairs or if
/// the scale factor is not strictly positive.
pub fn normalize(points: &[[f64; 2]], scale_factor: f64) -> Result<PointSet> {
    check_scale_factor(scale_factor)?;
    let set = PointSet::new(points)?;
    set.map_coords(|x, y| [x * scale_factor, y * scale_factor])
}

/// Normalize fiducials relative to two scale markers.
///
/// The first scale marker becomes the origin and coordinates are converted
/// to physical units using the distance between the scale markers.
pub fn normalize_points_by_scale(
    points: &[[f64; 2]],
    scale_points: &[[f64; 2]],
    reference_length: f64,
) -> Result<PointSet> {
    if scale_points.len() != 2 {
        return Err(Error::InvalidInput(format!(
            "expected exactly 2 scale points, got {}",
            scale_points.len()
        )));
    }

    let calibration = ScaleCalibration::from_scale_points(scale_points[0], scale_points[1], reference_length)?;
    let factor = calibration.scale_factor();
    let [ox, oy] = scale_points[0];

    let set = PointSet::new(points)?;
    set.map_coords(|x, y| [(x - ox) * factor, (y - oy) * factor])
}
