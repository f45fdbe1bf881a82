//! Least-squares deformation gradient from the five-marker pattern.

use nalgebra::{Matrix2, SMatrix};
use crate::points::NUM_POINTS;
use crate::{Error, PointSet, Result};

/// Corner vectors (relative to the center) as columns.
type CornerMatrix = SMatrix<f64, 2, 4>;

/// Default tolerance on the normalized determinant of `V·Vᵀ`.
///
/// The normalized determinant is `det(V·Vᵀ) / (tr(V·Vᵀ)/2)²`. It lies in
/// `[0, 1]`, is 1 for an isotropic (square) marker pattern, 0 for collinear or
/// coincident corners, and does not depend on the coordinate scale.
pub const DEFAULT_SINGULAR_TOLERANCE: f64 = 1e-10;

/// Normalized determinants below this still solve but are logged.
const NEAR_SINGULAR_WARNING: f64 = 1e-6;

fn corner_vectors(points: &PointSet, center_index: usize) -> CornerMatrix {
    let pts = points.points();
    let center = pts[center_index];

    let mut v = CornerMatrix::zeros();
    for (col, (_, p)) in pts
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != center_index)
        .enumerate()
    {
        v.set_column(col, &(*p - center));
    }
    v
}

/// Scale-free conditioning measure of a symmetric 2x2 Gram matrix.
pub(crate) fn normalized_determinant(gram: &Matrix2<f64>) -> f64 {
    let half_trace = 0.5 * gram.trace();
    if !half_trace.is_finite() || half_trace <= 0.0 {
        return 0.0;
    }
    gram.determinant() / (half_trace * half_trace)
}

fn check_conditioning(gram: &Matrix2<f64>, configuration: &'static str, tolerance: f64) -> Result<f64> {
    let det = normalized_determinant(gram);
    if det.is_nan() || det <= tolerance {
        return Err(Error::SingularConfiguration {
            configuration,
            determinant: det,
            tolerance,
        });
    }
    if det < NEAR_SINGULAR_WARNING {
        tracing::warn!(
            configuration,
            normalized_determinant = det,
            "markers are nearly collinear; deformation gradient may be inaccurate"
        );
    }
    Ok(det)
}

/// Solve `V′ ≈ F·V` for the deformation gradient `F`.
///
/// Uses the normal equations `(V·Vᵀ)·Fᵀ = V·V′ᵀ` with a Cholesky solve, so the
/// exact solution is returned when the corners deform affinely.
///
/// # Errors
/// - `InvalidInput` if `center_index` is out of range or `tolerance` is not
///   a finite positive number
/// - `SingularConfiguration` if the normalized determinant of `V·Vᵀ` (or of
///   `V′·V′ᵀ`, for a frame that collapsed onto a line) is at or below
///   `tolerance`
pub fn deformation_gradient(
    reference: &PointSet,
    deformed: &PointSet,
    center_index: usize,
    tolerance: f64,
) -> Result<Matrix2<f64>> {
    if center_index >= NUM_POINTS {
        return Err(Error::InvalidInput(format!(
            "center_index must be between 0 and {}, got {}",
            NUM_POINTS - 1,
            center_index
        )));
    }
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(Error::InvalidInput(format!(
            "singular tolerance must be finite and > 0, got {}",
            tolerance
        )));
    }

    let v = corner_vectors(reference, center_index);
    let v_prime = corner_vectors(deformed, center_index);

    let gram = v * v.transpose();
    let det = check_conditioning(&gram, "reference", tolerance)?;
    check_conditioning(&(v_prime * v_prime.transpose()), "deformed", tolerance)?;

    let rhs = v * v_prime.transpose();
    let f_transpose = gram
        .cholesky()
        .map(|chol| chol.solve(&rhs))
        .ok_or(Error::SingularConfiguration {
            configuration: "reference",
            determinant: det,
            tolerance,
        })?;

    Ok(f_transpose.transpose())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> PointSet {
        PointSet::new(&[[0.0, 10.0], [10.0, 10.0], [10.0, 0.0], [0.0, 0.0], [5.0, 5.0]]).unwrap()
    }

    #[test]
    fn test_identity_gradient() {
        let f = deformation_gradient(&square(), &square(), 4, DEFAULT_SINGULAR_TOLERANCE).unwrap();
        assert_relative_eq!(f, Matrix2::identity(), epsilon = 1e-12);
    }

    #[test]
    fn test_affine_gradient_is_exact() {
        let f_true = Matrix2::new(1.2, 0.1, -0.05, 0.9);
        let deformed = square()
            .map_coords(|x, y| {
                let p = f_true * nalgebra::Vector2::new(x, y);
                [p.x + 3.0, p.y - 7.0]
            })
            .unwrap();

        let f = deformation_gradient(&square(), &deformed, 4, DEFAULT_SINGULAR_TOLERANCE).unwrap();
        assert_relative_eq!(f, f_true, epsilon = 1e-12);
    }

    #[test]
    fn test_collinear_is_singular() {
        let line = PointSet::new(&[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0], [4.0, 4.0]]).unwrap();
        let err = deformation_gradient(&line, &line, 4, DEFAULT_SINGULAR_TOLERANCE).unwrap_err();
        assert!(err.is_singular());
    }

    #[test]
    fn test_collinear_deformed_is_singular() {
        let line = PointSet::new(&[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0], [4.0, 4.0]]).unwrap();
        let err = deformation_gradient(&square(), &line, 4, DEFAULT_SINGULAR_TOLERANCE).unwrap_err();
        assert!(matches!(
            err,
            Error::SingularConfiguration { configuration: "deformed", .. }
        ));
    }

    #[test]
    fn test_coincident_is_singular() {
        let dot = PointSet::new(&[[2.0, 2.0]; 5]).unwrap();
        let err = deformation_gradient(&dot, &dot, 4, DEFAULT_SINGULAR_TOLERANCE).unwrap_err();
        assert!(matches!(err, Error::SingularConfiguration { .. }));
    }

    #[test]
    fn test_normalized_determinant_is_scale_free() {
        let small = square();
        let large = small.map_coords(|x, y| [x * 1e4, y * 1e4]).unwrap();

        let gram = |p: &PointSet| {
            let v = corner_vectors(p, 4);
            v * v.transpose()
        };
        assert_relative_eq!(normalized_determinant(&gram(&small)), 1.0, epsilon = 1e-12);
        assert_relative_eq!(normalized_determinant(&gram(&large)), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_center_and_tolerance() {
        assert!(matches!(
            deformation_gradient(&square(), &square(), 5, DEFAULT_SINGULAR_TOLERANCE),
            Err(Error::InvalidInput(_))
        ));
        assert!(deformation_gradient(&square(), &square(), 4, 0.0).is_err());
        assert!(deformation_gradient(&square(), &square(), 4, f64::NAN).is_err());
    }
}
