//! SciPy functions port.
//!
//! Ported from:
//! - scipy.stats (linregress)
//! - scipy.special (gammaln, betainc)

mod stats;

pub use stats::*;
