//! Settings for one shadow computation.

use std::path::Path;

use polyshade_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShadowError};

/// Gap lengths at or below this are treated as numerical noise when
/// classifying facets.
pub const DEFAULT_NOISE_FLOOR: f64 = 0.0009;

/// Half side of the centred square whose facets are left out of the
/// perimeter (a reference base facet sits there).
pub const DEFAULT_EXCLUSION_HALF_EXTENT: f64 = 0.5;

/// Shadow computation parameters.
///
/// Every [`Polyhedron`](crate::Polyhedron) owns its own copy, so independent
/// computations never share projection or scale state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowConfig {
    /// Projection direction, pointing toward the viewer.
    pub projection: [f64; 3],
    /// Homothety coefficient the vertices were scaled by.
    pub homothety: f64,
    /// Noise floor for partially clipped edges.
    pub noise_floor: f64,
    /// Half side of the perimeter exclusion square.
    pub exclusion_half_extent: f64,
    /// Run the shadow pass in parallel across edges.
    pub parallel: bool,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            projection: [0.0, 0.0, 1.0],
            homothety: 1.0,
            noise_floor: DEFAULT_NOISE_FLOOR,
            exclusion_half_extent: DEFAULT_EXCLUSION_HALF_EXTENT,
            parallel: true,
        }
    }
}

impl ShadowConfig {
    /// Default settings with the given homothety coefficient.
    pub fn with_homothety(homothety: f64) -> Self {
        Self {
            homothety,
            ..Default::default()
        }
    }

    /// Projection direction as a vector.
    pub fn direction(&self) -> Vec3 {
        Vec3::new(self.projection[0], self.projection[1], self.projection[2])
    }

    /// Parse settings from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        let direction = self.direction();
        if !direction.iter().all(|c| c.is_finite()) || direction.norm_squared() == 0.0 {
            return Err(ShadowError::InvalidSettings(
                "projection must be a finite non-zero vector".into(),
            ));
        }
        if !self.homothety.is_finite() || self.homothety <= 0.0 {
            return Err(ShadowError::InvalidSettings(
                "homothety must be positive".into(),
            ));
        }
        if !(0.0..1.0).contains(&self.noise_floor) {
            return Err(ShadowError::InvalidSettings(
                "noise_floor must be in [0, 1)".into(),
            ));
        }
        if !(self.exclusion_half_extent >= 0.0) {
            return Err(ShadowError::InvalidSettings(
                "exclusion_half_extent must be non-negative".into(),
            ));
        }
        Ok(())
    }
}
