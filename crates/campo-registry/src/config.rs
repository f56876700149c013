//! # Registry Configuration
//!
//! Controls how strictly [`review`](crate::review) treats area problems.
//! The identifier rules are not configurable.
//!
//! ```yaml
//! area_policy: blocking        # or: advisory (default)
//! require_positive_areas: true # default
//! ```

use campo_core::AreaTriple;
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::review::Severity;

/// What an `agricultural + vegetation > total` violation does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaPolicy {
    /// Report a warning and let the submission through.
    #[default]
    Advisory,
    /// Report an error and block the submission.
    Blocking,
}

impl AreaPolicy {
    /// Severity assigned to area-sum violations under this policy.
    pub fn severity(self) -> Severity {
        match self {
            Self::Advisory => Severity::Warning,
            Self::Blocking => Severity::Error,
        }
    }
}

/// Review settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Treatment of area-sum violations.
    pub area_policy: AreaPolicy,
    /// Reject zero, negative, or non-finite area figures.
    pub require_positive_areas: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            area_policy: AreaPolicy::Advisory,
            require_positive_areas: true,
        }
    }
}

impl RegistryConfig {
    /// Default settings with area-sum violations blocking submission.
    pub fn blocking() -> Self {
        Self {
            area_policy: AreaPolicy::Blocking,
            ..Self::default()
        }
    }

    /// Whether the area-sum rule applies to `areas` yet.
    ///
    /// Under [`AreaPolicy::Advisory`] the sum is only checked once all three
    /// figures are non-zero, so a half-filled farm raises no warning.
    /// [`AreaPolicy::Blocking`] checks every farm, zeros included.
    pub fn checks_area_sum(&self, areas: &AreaTriple) -> bool {
        match self.area_policy {
            AreaPolicy::Advisory => areas.is_filled(),
            AreaPolicy::Blocking => true,
        }
    }

    /// Parse settings from YAML. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Config`] on malformed YAML or unknown
    /// policy names.
    pub fn from_yaml(yaml: &str) -> Result<Self, RegistryError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        tracing::debug!(
            area_policy = ?config.area_policy,
            require_positive_areas = config.require_positive_areas,
            "registry configuration loaded"
        );
        Ok(config)
    }
}
