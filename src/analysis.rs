//! End-to-end analysis: sequence processing followed by trend fits.

use crate::export::format_results;
use crate::sequence::process_sequence_with_config;
use crate::strain::StrainComponent;
use crate::trend::analyze_components;
use crate::{AnalysisConfig, Frame, PointSet, RegressionResult, Result, SequenceResult};

/// Outputs of a complete analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResults {
    /// Settings the run used.
    pub config: AnalysisConfig,

    /// Per-frame tensors and failure markers.
    pub sequence: SequenceResult,

    /// One fit per component, over successful frames only.
    pub regressions: Vec<(StrainComponent, RegressionResult)>,
}

impl AnalysisResults {
    /// Fit for a single component.
    pub fn regression(&self, component: StrainComponent) -> Option<&RegressionResult> {
        self.regressions
            .iter()
            .find(|(c, _)| *c == component)
            .map(|(_, r)| r)
    }

    /// Render in the configured export format.
    pub fn export(&self) -> Result<String> {
        format_results(&self.sequence, &self.regressions, self.config.export_format)
    }
}

/// Process all frames against the reference and fit every component.
///
/// # Errors
/// Configuration and input errors from sequence processing, and
/// `InsufficientData` when fewer than two frames succeed.
pub fn run_analysis(config: &AnalysisConfig, reference: &PointSet, frames: &[Frame]) -> Result<AnalysisResults> {
    let sequence = process_sequence_with_config(reference, frames, config)?;
    let regressions = analyze_components(&sequence, config.abscissa)?;

    Ok(AnalysisResults {
        config: config.clone(),
        sequence,
        regressions,
    })
}
