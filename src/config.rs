//! Analysis configuration.

use serde::{Deserialize, Serialize};
use crate::points::NUM_POINTS;
use crate::strain::DEFAULT_SINGULAR_TOLERANCE;
use crate::{Abscissa, Error, ExportFormat, Result, StrainType, CENTER_INDEX};

/// Settings for a strain analysis run.
///
/// All settings are explicit; nothing is read from global state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Strain formulation.
    pub strain_type: StrainType,

    /// Index of the center marker within each point set.
    pub center_index: usize,

    /// Normalized-determinant threshold below which marker geometry is
    /// treated as singular.
    pub singular_tolerance: f64,

    /// Output format for `format_results`.
    pub export_format: ExportFormat,

    /// Independent variable for trend fits.
    pub abscissa: Abscissa,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            strain_type: StrainType::Small,
            center_index: CENTER_INDEX,
            singular_tolerance: DEFAULT_SINGULAR_TOLERANCE,
            export_format: ExportFormat::Csv,
            abscissa: Abscissa::FrameIndex,
        }
    }
}

impl AnalysisConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.center_index >= NUM_POINTS {
            return Err(Error::InvalidInput(format!(
                "center_index must be between 0 and {}, got {}",
                NUM_POINTS - 1,
                self.center_index
            )));
        }

        if !self.singular_tolerance.is_finite() || self.singular_tolerance <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "singular_tolerance must be finite and > 0, got {}",
                self.singular_tolerance
            )));
        }

        Ok(())
    }
}
