//! Tabular and structured export of strain results.
//!
//! This module provides:
//! - `TensorRecord` / `RegressionRecord` - flat records for I/O collaborators
//! - `format_results` - render records as CSV or JSON
//! - `parse_tensor_csv` / `parse_json` - read exports back for refitting
//! - `format_scientific` - compact number display

mod csv;
mod display;
mod json;

pub use self::csv::{parse_tensor_csv, REGRESSION_HEADER, TENSOR_HEADER};
pub use display::format_scientific;
pub use json::{parse_json, ExportDocument};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use crate::sequence::{FrameOutcome, FrameResult};
use crate::strain::{StrainComponent, StrainTensor};
use crate::{Error, RegressionResult, Result, SequenceResult};

/// Output format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ExportFormat {
    /// Tensor table followed by a regression table.
    #[default]
    Csv,
    /// Pretty-printed JSON document.
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(Error::UnsupportedFormat(s.to_string())),
        }
    }
}

impl TryFrom<String> for ExportFormat {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ExportFormat> for String {
    fn from(value: ExportFormat) -> Self {
        value.as_str().to_string()
    }
}

/// Status column of a tensor record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TensorStatus {
    Ok,
    Failed,
}

impl TensorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TensorStatus::Ok => "ok",
            TensorStatus::Failed => "failed",
        }
    }
}

/// One row of the tensor table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TensorRecord {
    pub frame_index: usize,
    #[serde(default)]
    pub deformation_distance: Option<f64>,
    pub epsilon_xx: Option<f64>,
    pub epsilon_yy: Option<f64>,
    pub epsilon_xy: Option<f64>,
    pub status: TensorStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&FrameResult> for TensorRecord {
    fn from(frame: &FrameResult) -> Self {
        let (tensor, status, error) = match &frame.outcome {
            FrameOutcome::Ok { tensor } => (Some(*tensor), TensorStatus::Ok, None),
            FrameOutcome::Failed { error } => (None, TensorStatus::Failed, Some(error.clone())),
        };

        Self {
            frame_index: frame.frame_index,
            deformation_distance: frame.deformation_distance,
            epsilon_xx: tensor.map(|t| t.xx),
            epsilon_yy: tensor.map(|t| t.yy),
            epsilon_xy: tensor.map(|t| t.xy),
            status,
            error,
        }
    }
}

impl TensorRecord {
    /// Convert back into a sequence entry.
    ///
    /// # Errors
    /// `Parse` if an `ok` record is missing a component.
    pub fn to_frame_result(&self) -> Result<FrameResult> {
        let outcome = match self.status {
            TensorStatus::Ok => match (self.epsilon_xx, self.epsilon_yy, self.epsilon_xy) {
                (Some(xx), Some(yy), Some(xy)) => FrameOutcome::Ok {
                    tensor: StrainTensor::new(xx, yy, xy),
                },
                _ => {
                    return Err(Error::Parse(format!(
                        "frame {} is marked ok but has missing components",
                        self.frame_index
                    )))
                }
            },
            TensorStatus::Failed => FrameOutcome::Failed {
                error: self.error.clone().unwrap_or_default(),
            },
        };

        Ok(FrameResult {
            frame_index: self.frame_index,
            deformation_distance: self.deformation_distance,
            outcome,
        })
    }
}

/// Rebuild a sequence from exported tensor records.
pub fn records_to_sequence(records: &[TensorRecord]) -> Result<SequenceResult> {
    let frames = records
        .iter()
        .map(TensorRecord::to_frame_result)
        .collect::<Result<Vec<_>>>()?;
    Ok(SequenceResult::from_results(frames))
}

/// One regression summary per strain component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionRecord {
    pub component: StrainComponent,
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub p_value: f64,
    pub std_err: f64,
    pub fitted_values: Vec<f64>,
}

impl RegressionRecord {
    pub fn new(component: StrainComponent, result: &RegressionResult) -> Self {
        Self {
            component,
            slope: result.slope,
            intercept: result.intercept,
            r_squared: result.r_squared,
            p_value: result.p_value,
            std_err: result.std_err,
            fitted_values: result.fitted_values.clone(),
        }
    }
}

/// Render tensors and regression summaries in the requested format.
pub fn format_results(
    tensors: &SequenceResult,
    regressions: &[(StrainComponent, RegressionResult)],
    format: ExportFormat,
) -> Result<String> {
    let tensor_records: Vec<TensorRecord> = tensors.frames().iter().map(TensorRecord::from).collect();
    let regression_records: Vec<RegressionRecord> = regressions
        .iter()
        .map(|(component, result)| RegressionRecord::new(*component, result))
        .collect();

    match format {
        ExportFormat::Csv => Ok(csv::write_csv(&tensor_records, &regression_records)),
        ExportFormat::Json => json::write_json(&ExportDocument {
            tensors: tensor_records,
            regressions: regression_records,
        }),
    }
}
