//! Deformation gradient and strain tensor computation.
//!
//! This module provides:
//! - `deformation_gradient` - least-squares `F` from reference/deformed markers
//! - `compute_strain_tensor` - small or Green-Lagrangian strain from `F`
//! - `StrainTensor`, `StrainType`, `StrainComponent` value types

mod gradient;
mod tensor;

pub use gradient::{deformation_gradient, DEFAULT_SINGULAR_TOLERANCE};
pub use tensor::{StrainComponent, StrainTensor, StrainType};

use nalgebra::Matrix2;
use crate::{PointSet, Result};

/// Strain tensor from a deformation gradient.
pub fn strain_from_gradient(f: &Matrix2<f64>, strain_type: StrainType) -> StrainTensor {
    let identity = Matrix2::identity();
    let strain = match strain_type {
        StrainType::Small => 0.5 * (f + f.transpose()) - identity,
        StrainType::GreenLagrangian => 0.5 * (f.transpose() * f - identity),
    };
    StrainTensor::from_matrix(&strain)
}

/// Compute the strain tensor between a reference and a deformed marker set.
///
/// # Arguments
/// * `reference` - Markers in the undeformed configuration
/// * `deformed` - Markers in the deformed configuration
/// * `strain_type` - Strain formulation
/// * `center_index` - Index of the center marker (usually `CENTER_INDEX`)
///
/// # Errors
/// `SingularConfiguration` for collinear or coincident corners,
/// `InvalidInput` for an out-of-range center index.
pub fn compute_strain_tensor(
    reference: &PointSet,
    deformed: &PointSet,
    strain_type: StrainType,
    center_index: usize,
) -> Result<StrainTensor> {
    compute_strain_tensor_with_tolerance(
        reference,
        deformed,
        strain_type,
        center_index,
        DEFAULT_SINGULAR_TOLERANCE,
    )
}

/// `compute_strain_tensor` with an explicit singularity tolerance.
pub fn compute_strain_tensor_with_tolerance(
    reference: &PointSet,
    deformed: &PointSet,
    strain_type: StrainType,
    center_index: usize,
    tolerance: f64,
) -> Result<StrainTensor> {
    let f = deformation_gradient(reference, deformed, center_index, tolerance)?;
    Ok(strain_from_gradient(&f, strain_type))
}
