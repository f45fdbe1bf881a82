//! # Fiducial Strain - 2D strain analysis from tracked markers
//!
//! Computes planar strain tensors at a material point from five tracked
//! fiducial markers (four corners and a center) across an image sequence,
//! then fits linear trends to the resulting strain-vs-time series.
//!
//! ## Features
//!
//! - Scale calibration from a known reference length
//! - Least-squares deformation gradient from the marker pattern
//! - Small (infinitesimal) and Green-Lagrangian strain
//! - Sequence processing with per-frame failure markers
//! - Ordinary least-squares trend fitting with R², p-value and standard error
//! - CSV and JSON export that can be read back and refit
//!
//! ## Example
//!
//! ```rust,ignore
//! use fiducial_strain::{compute_strain_tensor, PointSet, StrainType};
//!
//! let reference = PointSet::new(&[[0.0, 10.0], [10.0, 10.0], [10.0, 0.0], [0.0, 0.0], [5.0, 5.0]])?;
//! let deformed = PointSet::new(&[[0.0, 10.5], [11.0, 11.0], [11.0, 0.5], [0.0, 0.0], [5.5, 5.5]])?;
//! let tensor = compute_strain_tensor(&reference, &deformed, StrainType::Small, 4)?;
//! assert!((tensor.xx - 0.1).abs() < 1e-12);
//! ```

// Internal modules (ports of scipy numerics)
pub(crate) mod internal;

// Public modules
pub mod points;
pub mod normalize;
pub mod strain;
pub mod sequence;
pub mod trend;
pub mod export;
pub mod config;
pub mod analysis;

// Re-exports for convenience
pub use points::{Frame, PointSet, CENTER_INDEX, NUM_POINTS};
pub use normalize::{normalize, normalize_points_by_scale, ScaleCalibration};
pub use strain::{
    compute_strain_tensor, compute_strain_tensor_with_tolerance, deformation_gradient,
    StrainComponent, StrainTensor, StrainType, DEFAULT_SINGULAR_TOLERANCE,
};
pub use sequence::{process_sequence, FrameOutcome, FrameResult, SequenceResult};
pub use trend::{analyze_components, fit_trend, Abscissa, RegressionResult};
pub use export::{format_results, format_scientific, ExportFormat, RegressionRecord, TensorRecord};
pub use config::AnalysisConfig;
pub use analysis::{run_analysis, AnalysisResults};

// Error types
pub use crate::error::{Error, Result};

mod error {
    use thiserror::Error;

    /// Errors that can occur during strain analysis
    #[derive(Error, Debug)]
    pub enum Error {
        #[error("Invalid input: {0}")]
        InvalidInput(String),

        #[error(
            "Singular {configuration} point configuration: normalized determinant {determinant:e} is below tolerance {tolerance:e}"
        )]
        SingularConfiguration {
            configuration: &'static str,
            determinant: f64,
            tolerance: f64,
        },

        #[error("Insufficient data: need at least {required} points, got {got}")]
        InsufficientData { required: usize, got: usize },

        #[error("Unsupported format: {0}")]
        UnsupportedFormat(String),

        #[error("Frame {frame_index}: {source}")]
        Frame {
            frame_index: usize,
            #[source]
            source: Box<Error>,
        },

        #[error("Parse error: {0}")]
        Parse(String),

        #[error("JSON error: {0}")]
        Json(#[from] serde_json::Error),
    }

    impl Error {
        /// Whether this error stems from degenerate marker geometry.
        pub fn is_singular(&self) -> bool {
            match self {
                Error::SingularConfiguration { .. } => true,
                Error::Frame { source, .. } => source.is_singular(),
                _ => false,
            }
        }

        pub(crate) fn in_frame(self, frame_index: usize) -> Self {
            Error::Frame {
                frame_index,
                source: Box::new(self),
            }
        }
    }

    /// Result type for strain analysis operations
    pub type Result<T> = std::result::Result<T, Error>;
}
