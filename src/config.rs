use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("radius limits must be finite, found [{0}, {1}]")]
    NonFiniteRadius(f64, f64),
    #[error("minimum radius {0} is negative")]
    NegativeRadius(f64),
    #[error("minimum radius {0} must be smaller than maximum radius {1}")]
    RadiusOrder(f64, f64),
    #[error("detector component name is empty")]
    NoDetector,
}
type Result<T> = std::result::Result<T, ConfigError>;

/// Display-only multipliers applied to the beam centre coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleFactors {
    pub x: f64,
    pub y: f64,
}
impl Default for ScaleFactors {
    fn default() -> Self {
        Self { x: 1f64, y: 1f64 }
    }
}
impl From<(f64, f64)> for ScaleFactors {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Axes along which the beam centre is searched
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, EnumIter, Display, EnumString, Serialize, Deserialize,
)]
pub enum FindDirection {
    #[default]
    All,
    LeftRight,
    UpDown,
}
impl FindDirection {
    /// Left vs Right comparison is requested
    pub fn searches_x(&self) -> bool {
        matches!(self, FindDirection::All | FindDirection::LeftRight)
    }
    /// Up vs Down comparison is requested
    pub fn searches_y(&self) -> bool {
        matches!(self, FindDirection::All | FindDirection::UpDown)
    }
}

/// Reduction settings handed to every centre finding trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReductionConfig {
    /// the detector component moved to the trial position
    pub detector: String,
    /// inner radius of the quadrant masks
    pub radius_min: f64,
    /// outer radius of the quadrant masks
    pub radius_max: f64,
    pub scale_factors: ScaleFactors,
    pub find_direction: FindDirection,
    /// phi masking of the wider reduction
    pub mask_phi: bool,
}
impl Default for ReductionConfig {
    fn default() -> Self {
        Self {
            detector: String::from("rear-detector"),
            radius_min: 0.06,
            radius_max: 0.28,
            scale_factors: Default::default(),
            find_direction: Default::default(),
            mask_phi: true,
        }
    }
}
impl ReductionConfig {
    pub fn detector<S: Into<String>>(self, detector: S) -> Self {
        Self {
            detector: detector.into(),
            ..self
        }
    }
    pub fn radius_min(self, radius_min: f64) -> Self {
        Self { radius_min, ..self }
    }
    pub fn radius_max(self, radius_max: f64) -> Self {
        Self { radius_max, ..self }
    }
    pub fn radius_range(self, radius_min: f64, radius_max: f64) -> Self {
        Self {
            radius_min,
            radius_max,
            ..self
        }
    }
    pub fn scale_factors<S: Into<ScaleFactors>>(self, scale_factors: S) -> Self {
        Self {
            scale_factors: scale_factors.into(),
            ..self
        }
    }
    pub fn find_direction(self, find_direction: FindDirection) -> Self {
        Self {
            find_direction,
            ..self
        }
    }
    pub fn mask_phi(self, mask_phi: bool) -> Self {
        Self { mask_phi, ..self }
    }
    /// Checks the radius limits and the detector name
    pub fn validate(&self) -> Result<()> {
        let (r_min, r_max) = (self.radius_min, self.radius_max);
        if !(r_min.is_finite() && r_max.is_finite()) {
            return Err(ConfigError::NonFiniteRadius(r_min, r_max));
        }
        if r_min < 0f64 {
            return Err(ConfigError::NegativeRadius(r_min));
        }
        if r_min >= r_max {
            return Err(ConfigError::RadiusOrder(r_min, r_max));
        }
        if self.detector.trim().is_empty() {
            return Err(ConfigError::NoDetector);
        }
        Ok(())
    }
    /// Copy of the configuration used within a centre finding trial
    ///
    /// Phi masks remove the detector regions the quadrants are built from,
    /// so they are always switched off.
    pub fn for_centre_finding(&self) -> Self {
        Self {
            mask_phi: false,
            ..self.clone()
        }
    }
}
