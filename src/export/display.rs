//! Number formatting for tables and reports.

/// Format a number in scientific notation with two mantissa decimals.
///
/// The exponent is signed and at least two digits wide (`1.23e+06`,
/// `4.50e-03`), and `unit` is appended after a space when non-empty.
pub fn format_scientific(value: f64, unit: &str) -> String {
    let number = if value.is_finite() {
        let raw = format!("{:.2e}", value);
        match raw.split_once('e') {
            Some((mantissa, exponent)) => {
                let exp: i32 = exponent.parse().unwrap_or(0);
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", mantissa, sign, exp.abs())
            }
            None => raw,
        }
    } else if value.is_nan() {
        "nan".to_string()
    } else if value > 0.0 {
        "inf".to_string()
    } else {
        "-inf".to_string()
    };

    if unit.is_empty() {
        number
    } else {
        format!("{} {}", number, unit)
    }
}

/// Shortest round-trip representation, switching to exponent form for
/// very small or very large magnitudes.
pub(crate) fn format_float(value: f64) -> String {
    let magnitude = value.abs();
    if value != 0.0 && value.is_finite() && !(1e-4..1e15).contains(&magnitude) {
        format!("{:e}", value)
    } else {
        format!("{}", value)
    }
}
