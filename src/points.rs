//! Fiducial point sets and frames supplied by the annotation layer.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use crate::{Error, Result};

/// Number of fiducial markers in a point set.
pub const NUM_POINTS: usize = 5;

/// Default index of the center marker.
pub const CENTER_INDEX: usize = 4;

/// Five fiducial markers of one frame.
///
/// Standard ordering:
/// - 0: top-left corner
/// - 1: top-right corner
/// - 2: bottom-right corner
/// - 3: bottom-left corner
/// - 4: center point
///
/// All coordinates are finite. Construction is the only place this is
/// checked, so every `PointSet` in circulation is valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<[f64; 2]>", into = "Vec<[f64; 2]>")]
pub struct PointSet {
    points: [Point2<f64>; NUM_POINTS],
}

impl PointSet {
    /// Create a point set from `(x, y)` pairs.
    ///
    /// Fails with `InvalidInput` unless exactly five finite pairs are given.
    pub fn new(points: &[[f64; 2]]) -> Result<Self> {
        if points.len() != NUM_POINTS {
            return Err(Error::InvalidInput(format!(
                "expected exactly {} points, got {}",
                NUM_POINTS,
                points.len()
            )));
        }

        let mut out = [Point2::origin(); NUM_POINTS];
        for (i, p) in points.iter().enumerate() {
            if !p[0].is_finite() || !p[1].is_finite() {
                return Err(Error::InvalidInput(format!(
                    "point {} has non-finite coordinates ({}, {})",
                    i, p[0], p[1]
                )));
            }
            out[i] = Point2::new(p[0], p[1]);
        }

        Ok(Self { points: out })
    }

    /// Create a point set from a flat row-major slice `[x0, y0, x1, y1, ...]`.
    pub fn from_slice(coords: &[f64]) -> Result<Self> {
        if coords.len() != NUM_POINTS * 2 {
            return Err(Error::InvalidInput(format!(
                "coordinate slice length {} doesn't match {}x2",
                coords.len(),
                NUM_POINTS
            )));
        }

        let pairs: Vec<[f64; 2]> = coords.chunks_exact(2).map(|c| [c[0], c[1]]).collect();
        Self::new(&pairs)
    }

    /// Get a single marker.
    pub fn point(&self, index: usize) -> Option<&Point2<f64>> {
        self.points.get(index)
    }

    /// All markers in order.
    pub fn points(&self) -> &[Point2<f64>; NUM_POINTS] {
        &self.points
    }

    /// Markers as `(x, y)` pairs.
    pub fn to_pairs(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(|p| [p.x, p.y]).collect()
    }

    /// Apply `f` to every coordinate, re-validating the result.
    pub(crate) fn map_coords<F>(&self, f: F) -> Result<Self>
    where
        F: Fn(f64, f64) -> [f64; 2],
    {
        let pairs: Vec<[f64; 2]> = self.points.iter().map(|p| f(p.x, p.y)).collect();
        Self::new(&pairs)
    }
}

impl TryFrom<Vec<[f64; 2]>> for PointSet {
    type Error = Error;

    fn try_from(value: Vec<[f64; 2]>) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<PointSet> for Vec<[f64; 2]> {
    fn from(value: PointSet) -> Self {
        value.to_pairs()
    }
}

/// A deformed frame to compare against the reference configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Position of the frame in the captured sequence (0 is the reference).
    pub frame_index: usize,

    /// Marker positions in this frame.
    pub points: PointSet,

    /// Optional applied deformation distance in physical units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deformation_distance: Option<f64>,
}

impl Frame {
    /// Create a new frame.
    pub fn new(frame_index: usize, points: PointSet) -> Self {
        Self {
            frame_index,
            points,
            deformation_distance: None,
        }
    }

    /// Attach the applied deformation distance.
    pub fn with_deformation_distance(mut self, distance: f64) -> Self {
        self.deformation_distance = Some(distance);
        self
    }
}

/// Check that frame indices are unique and strictly increasing.
pub fn validate_frame_order(frames: &[Frame]) -> Result<()> {
    for pair in frames.windows(2) {
        if pair[1].frame_index <= pair[0].frame_index {
            return Err(Error::InvalidInput(format!(
                "frame indices must be strictly increasing, got {} after {}",
                pair[1].frame_index, pair[0].frame_index
            )));
        }
    }
    Ok(())
}
