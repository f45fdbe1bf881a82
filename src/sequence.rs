//! Strain time series over a captured frame sequence.

use serde::{Deserialize, Serialize};
use crate::points::validate_frame_order;
use crate::strain::{compute_strain_tensor_with_tolerance, StrainComponent, StrainTensor, StrainType};
use crate::trend::Abscissa;
use crate::{AnalysisConfig, Error, Frame, PointSet, Result};

/// Outcome of the strain computation for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FrameOutcome {
    /// Tensor computed.
    Ok { tensor: StrainTensor },
    /// Marker geometry was degenerate; the frame is skipped downstream.
    Failed { error: String },
}

/// Per-frame entry of a processed sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameResult {
    /// Frame index as supplied.
    pub frame_index: usize,

    /// Applied deformation distance, if the frame carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deformation_distance: Option<f64>,

    /// Tensor or failure marker.
    #[serde(flatten)]
    pub outcome: FrameOutcome,
}

impl FrameResult {
    /// The tensor, if this frame succeeded.
    pub fn tensor(&self) -> Option<&StrainTensor> {
        match &self.outcome {
            FrameOutcome::Ok { tensor } => Some(tensor),
            FrameOutcome::Failed { .. } => None,
        }
    }

    /// Whether this frame carries a failure marker.
    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, FrameOutcome::Failed { .. })
    }
}

/// Ordered strain series, one entry per input frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SequenceResult {
    frames: Vec<FrameResult>,
}

impl SequenceResult {
    /// Wrap pre-computed results (e.g. re-imported from an export).
    pub fn from_results(frames: Vec<FrameResult>) -> Self {
        Self { frames }
    }

    /// All entries in frame-index order.
    pub fn frames(&self) -> &[FrameResult] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Number of frames with a tensor.
    pub fn ok_count(&self) -> usize {
        self.frames.iter().filter(|f| !f.is_failed()).count()
    }

    /// Indices of frames carrying a failure marker.
    pub fn failed_indices(&self) -> Vec<usize> {
        self.frames
            .iter()
            .filter(|f| f.is_failed())
            .map(|f| f.frame_index)
            .collect()
    }

    /// Successful frames with their tensors.
    pub fn successful(&self) -> impl Iterator<Item = (&FrameResult, &StrainTensor)> {
        self.frames.iter().filter_map(|f| f.tensor().map(|t| (f, t)))
    }

    /// `(abscissa, value)` pairs of one component, skipping failed frames.
    ///
    /// # Errors
    /// `InvalidInput` if `abscissa` is `DeformationDistance` and a successful
    /// frame has no distance attached.
    pub fn component_series(&self, component: StrainComponent, abscissa: Abscissa) -> Result<Vec<(f64, f64)>> {
        self.successful()
            .map(|(frame, tensor)| {
                let x = match abscissa {
                    Abscissa::FrameIndex => frame.frame_index as f64,
                    Abscissa::DeformationDistance => frame.deformation_distance.ok_or_else(|| {
                        Error::InvalidInput(format!(
                            "frame {} has no deformation distance",
                            frame.frame_index
                        ))
                    })?,
                };
                Ok((x, tensor.component(component)))
            })
            .collect()
    }
}

/// Compute the strain of each frame relative to the reference markers.
///
/// Uses the default center index and singularity tolerance.
pub fn process_sequence(reference: &PointSet, frames: &[Frame], strain_type: StrainType) -> Result<SequenceResult> {
    let config = AnalysisConfig {
        strain_type,
        ..AnalysisConfig::default()
    };
    process_sequence_with_config(reference, frames, &config)
}

/// Compute the strain of each frame using explicit settings.
///
/// A frame whose markers are degenerate is recorded as failed and processing
/// continues. Any other error aborts the call.
///
/// # Errors
/// - `InvalidInput` for an invalid configuration or out-of-order frames
/// - `Frame` wrapping any non-recoverable per-frame error
pub fn process_sequence_with_config(
    reference: &PointSet,
    frames: &[Frame],
    config: &AnalysisConfig,
) -> Result<SequenceResult> {
    config.validate()?;
    validate_frame_order(frames)?;

    let mut results = Vec::with_capacity(frames.len());
    for frame in frames {
        let computed = compute_strain_tensor_with_tolerance(
            reference,
            &frame.points,
            config.strain_type,
            config.center_index,
            config.singular_tolerance,
        );

        let outcome = match computed {
            Ok(tensor) => {
                tracing::debug!(frame_index = frame.frame_index, ?tensor, "computed strain");
                FrameOutcome::Ok { tensor }
            }
            Err(err) if err.is_singular() => {
                tracing::warn!(frame_index = frame.frame_index, error = %err, "marking frame as failed");
                FrameOutcome::Failed { error: err.to_string() }
            }
            Err(err) => return Err(err.in_frame(frame.frame_index)),
        };

        results.push(FrameResult {
            frame_index: frame.frame_index,
            deformation_distance: frame.deformation_distance,
            outcome,
        });
    }

    let sequence = SequenceResult::from_results(results);
    tracing::info!(
        strain_type = %config.strain_type,
        total = sequence.len(),
        ok = sequence.ok_count(),
        failed = sequence.len() - sequence.ok_count(),
        "processed frame sequence"
    );
    Ok(sequence)
}
