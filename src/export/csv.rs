//! CSV tables for tensors and regression summaries.

use std::fmt::Write;

use super::display::format_float;
use super::{RegressionRecord, TensorRecord, TensorStatus};
use crate::{Error, Result};

/// Header of the tensor table.
pub const TENSOR_HEADER: &str = "frame_index,deformation_distance,epsilon_xx,epsilon_yy,epsilon_xy,status";

/// Header of the regression table.
pub const REGRESSION_HEADER: &str = "component,slope,intercept,r_squared,p_value,std_err";

fn opt_cell(value: Option<f64>) -> String {
    value.map(format_float).unwrap_or_default()
}

/// Write the tensor table, a blank line, then the regression table.
///
/// Missing values and the components of failed frames are empty cells.
pub(crate) fn write_csv(tensors: &[TensorRecord], regressions: &[RegressionRecord]) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "{}", TENSOR_HEADER);
    for record in tensors {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{}",
            record.frame_index,
            opt_cell(record.deformation_distance),
            opt_cell(record.epsilon_xx),
            opt_cell(record.epsilon_yy),
            opt_cell(record.epsilon_xy),
            record.status.as_str()
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", REGRESSION_HEADER);
    for record in regressions {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{}",
            record.component.name(),
            format_float(record.slope),
            format_float(record.intercept),
            format_float(record.r_squared),
            format_float(record.p_value),
            format_float(record.std_err)
        );
    }

    out
}

fn parse_opt(cell: &str, column: &str, line_no: usize) -> Result<Option<f64>> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(None);
    }
    cell.parse::<f64>()
        .map(Some)
        .map_err(|e| Error::Parse(format!("line {}: invalid {} '{}': {}", line_no, column, cell, e)))
}

/// Read the tensor table of a CSV export.
///
/// Parsing stops at the first blank line, so a full export (tensor table
/// followed by the regression table) can be passed as is.
///
/// # Errors
/// `Parse` for a missing or unexpected header, wrong column count, or an
/// unparseable cell.
pub fn parse_tensor_csv(text: &str) -> Result<Vec<TensorRecord>> {
    let mut lines = text.lines().enumerate();

    match lines.next() {
        Some((_, header)) if header.trim() == TENSOR_HEADER => {}
        Some((_, header)) => {
            return Err(Error::Parse(format!("unexpected tensor header: '{}'", header.trim())));
        }
        None => return Err(Error::Parse("empty tensor table".to_string())),
    }

    let mut records = Vec::new();
    for (idx, line) in lines {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            break;
        }

        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() != 6 {
            return Err(Error::Parse(format!(
                "line {}: expected 6 columns, got {}",
                line_no,
                parts.len()
            )));
        }

        let frame_index: usize = parts[0].trim().parse().map_err(|e| {
            Error::Parse(format!("line {}: invalid frame_index '{}': {}", line_no, parts[0].trim(), e))
        })?;

        let status = match parts[5].trim() {
            "ok" => TensorStatus::Ok,
            "failed" => TensorStatus::Failed,
            other => {
                return Err(Error::Parse(format!("line {}: invalid status '{}'", line_no, other)));
            }
        };

        records.push(TensorRecord {
            frame_index,
            deformation_distance: parse_opt(parts[1], "deformation_distance", line_no)?,
            epsilon_xx: parse_opt(parts[2], "epsilon_xx", line_no)?,
            epsilon_yy: parse_opt(parts[3], "epsilon_yy", line_no)?,
            epsilon_xy: parse_opt(parts[4], "epsilon_xy", line_no)?,
            status,
            error: None,
        });
    }

    Ok(records)
}
