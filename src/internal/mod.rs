//! Internal modules ported from external libraries.
//!
//! These modules contain code adapted from:
//! - scipy: Linear regression and the special functions behind its p-values

pub mod scipy;
