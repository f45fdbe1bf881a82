//! JSON export document.

use serde::{Deserialize, Serialize};
use super::{RegressionRecord, TensorRecord};
use crate::Result;

/// Top-level JSON export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub tensors: Vec<TensorRecord>,
    pub regressions: Vec<RegressionRecord>,
}

pub(crate) fn write_json(document: &ExportDocument) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Read a JSON export back.
pub fn parse_json(text: &str) -> Result<ExportDocument> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::TensorStatus;
    use crate::strain::StrainComponent;

    #[test]
    fn test_json_document_shape() {
        let document = ExportDocument {
            tensors: vec![TensorRecord {
                frame_index: 5,
                deformation_distance: None,
                epsilon_xx: None,
                epsilon_yy: None,
                epsilon_xy: None,
                status: TensorStatus::Failed,
                error: Some("degenerate".to_string()),
            }],
            regressions: vec![RegressionRecord {
                component: StrainComponent::Xx,
                slope: 0.01,
                intercept: 0.0,
                r_squared: 0.99,
                p_value: 1e-8,
                std_err: 1e-4,
                fitted_values: vec![0.0, 0.01],
            }],
        };

        let text = write_json(&document).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["tensors"][0]["status"], "failed");
        assert!(value["tensors"][0]["epsilon_xx"].is_null());
        assert_eq!(value["tensors"][0]["error"], "degenerate");
        assert_eq!(value["regressions"][0]["component"], "x_axis");
        assert_eq!(value["regressions"][0]["fitted_values"][1], 0.01);

        assert_eq!(parse_json(&text).unwrap(), document);
    }

    #[test]
    fn test_parse_json_invalid() {
        assert!(matches!(parse_json("{\"tensors\": 3}"), Err(crate::Error::Json(_))));
    }
}
