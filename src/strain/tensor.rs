//! Strain tensor value types.

use std::fmt;
use std::str::FromStr;

use nalgebra::Matrix2;
use serde::{Deserialize, Serialize};
use crate::{Error, Result};

/// Strain formulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrainType {
    /// Linearized infinitesimal strain `½(F + Fᵀ) − I`.
    #[default]
    Small,
    /// Finite Green-Lagrangian strain `½(FᵀF − I)`.
    GreenLagrangian,
}

impl StrainType {
    /// Identifier used in configuration and export.
    pub fn as_str(&self) -> &'static str {
        match self {
            StrainType::Small => "small",
            StrainType::GreenLagrangian => "green_lagrangian",
        }
    }
}

impl fmt::Display for StrainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrainType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "small" => Ok(StrainType::Small),
            "green_lagrangian" => Ok(StrainType::GreenLagrangian),
            _ => Err(Error::InvalidInput(format!("unknown strain type: {}", s))),
        }
    }
}

/// One of the three independent components of a planar strain tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrainComponent {
    /// Normal strain along x (εxx).
    #[serde(rename = "x_axis", alias = "xx")]
    Xx,
    /// Normal strain along y (εyy).
    #[serde(rename = "y_axis", alias = "yy")]
    Yy,
    /// Shear strain (εxy).
    #[serde(rename = "shear", alias = "xy")]
    Xy,
}

impl StrainComponent {
    /// All components in export order.
    pub const ALL: [StrainComponent; 3] = [StrainComponent::Xx, StrainComponent::Yy, StrainComponent::Xy];

    /// Name used in regression records.
    pub fn name(&self) -> &'static str {
        match self {
            StrainComponent::Xx => "x_axis",
            StrainComponent::Yy => "y_axis",
            StrainComponent::Xy => "shear",
        }
    }

    /// Display symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            StrainComponent::Xx => "εxx",
            StrainComponent::Yy => "εyy",
            StrainComponent::Xy => "εxy",
        }
    }
}

impl fmt::Display for StrainComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrainComponent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "xx" | "x_axis" => Ok(StrainComponent::Xx),
            "yy" | "y_axis" => Ok(StrainComponent::Yy),
            "xy" | "shear" => Ok(StrainComponent::Xy),
            _ => Err(Error::InvalidInput(format!("unknown strain component: {}", s))),
        }
    }
}

/// Symmetric 2x2 strain tensor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StrainTensor {
    /// εxx
    pub xx: f64,
    /// εyy
    pub yy: f64,
    /// εxy (= εyx)
    pub xy: f64,
}

impl StrainTensor {
    /// Create a tensor from its components.
    pub fn new(xx: f64, yy: f64, xy: f64) -> Self {
        Self { xx, yy, xy }
    }

    /// Build from a symmetric matrix. Off-diagonal terms are averaged.
    pub fn from_matrix(m: &Matrix2<f64>) -> Self {
        Self {
            xx: m[(0, 0)],
            yy: m[(1, 1)],
            xy: 0.5 * (m[(0, 1)] + m[(1, 0)]),
        }
    }

    /// Full matrix form `[[εxx, εxy], [εxy, εyy]]`.
    pub fn to_matrix(&self) -> Matrix2<f64> {
        Matrix2::new(self.xx, self.xy, self.xy, self.yy)
    }

    /// Value of a single component.
    pub fn component(&self, component: StrainComponent) -> f64 {
        match component {
            StrainComponent::Xx => self.xx,
            StrainComponent::Yy => self.yy,
            StrainComponent::Xy => self.xy,
        }
    }

    /// Largest absolute component.
    pub fn max_abs(&self) -> f64 {
        self.xx.abs().max(self.yy.abs()).max(self.xy.abs())
    }
}
