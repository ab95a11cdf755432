//! Navigation overlay configuration (`overnav.toml`)

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NavError, Result};

/// Behavior knobs for the overlay controller
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NavConfig {
    /// Maximum accepted drift after a restore, in scroll units
    #[serde(default = "default_restore_tolerance")]
    pub restore_tolerance: f32,
    /// Maximum difference between open and close durations
    #[serde(default = "default_symmetry_budget_ms")]
    pub symmetry_budget_ms: u64,
    /// Lock background scrolling while open
    #[serde(default = "default_true")]
    pub lock_scroll: bool,
    /// Escape closes the overlay
    #[serde(default = "default_true")]
    pub dismiss_on_escape: bool,
    /// Activating the backdrop closes the overlay
    #[serde(default = "default_true")]
    pub dismiss_on_backdrop: bool,
    /// Viewport width at and above which the mobile overlay is unavailable
    #[serde(default = "default_breakpoint_width")]
    pub breakpoint_width: f32,
    /// Transitions kept for debugging
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_restore_tolerance() -> f32 {
    1.0
}

fn default_symmetry_budget_ms() -> u64 {
    180
}

fn default_true() -> bool {
    true
}

fn default_breakpoint_width() -> f32 {
    1024.0
}

fn default_history_limit() -> usize {
    32
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            restore_tolerance: default_restore_tolerance(),
            symmetry_budget_ms: default_symmetry_budget_ms(),
            lock_scroll: true,
            dismiss_on_escape: true,
            dismiss_on_backdrop: true,
            breakpoint_width: default_breakpoint_width(),
            history_limit: default_history_limit(),
        }
    }
}

impl NavConfig {
    /// Parse and validate TOML text
    pub fn from_toml(input: &str) -> Result<Self> {
        let config: NavConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| NavError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw)
    }

    /// Reject values the controller cannot honor
    pub fn validate(&self) -> Result<()> {
        if !self.restore_tolerance.is_finite() || self.restore_tolerance <= 0.0 {
            return Err(NavError::InvalidConfig {
                field: "restore_tolerance",
                reason: format!("must be a positive number, got {}", self.restore_tolerance),
            });
        }
        if self.symmetry_budget_ms == 0 {
            return Err(NavError::InvalidConfig {
                field: "symmetry_budget_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if !self.breakpoint_width.is_finite() || self.breakpoint_width <= 0.0 {
            return Err(NavError::InvalidConfig {
                field: "breakpoint_width",
                reason: format!("must be a positive number, got {}", self.breakpoint_width),
            });
        }
        Ok(())
    }
}
