//! Overnav configuration file handling

use anyhow::{Context, Result};
use overnav_headless::{HeadlessRunConfig, RunSettings};
use overnav_nav::NavConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "overnav.toml";

/// Top-level overnav configuration (overnav.toml)
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OvernavConfig {
    #[serde(default)]
    pub nav: NavConfig,
    #[serde(default)]
    pub headless: HeadlessConfig,
}

/// Headless run configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct HeadlessConfig {
    /// Viewport width in CSS pixels
    #[serde(default = "default_width")]
    pub width: u32,
    /// Viewport height in CSS pixels
    #[serde(default = "default_height")]
    pub height: u32,
    /// Logical milliseconds per frame
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Directory for suite reports (relative)
    #[serde(default)]
    pub report_dir: Option<String>,
}

fn default_width() -> u32 {
    390
}

fn default_height() -> u32 {
    844
}

fn default_tick_ms() -> u64 {
    16
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            tick_ms: default_tick_ms(),
            report_dir: None,
        }
    }
}

impl OvernavConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: OvernavConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config.nav.validate()?;
        Ok(config)
    }

    /// Load an explicit config, else `overnav.toml` if present, else defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let default = Path::new(DEFAULT_CONFIG_FILE);
        if default.exists() {
            tracing::debug!("using {}", DEFAULT_CONFIG_FILE);
            return Self::load(default);
        }
        Ok(Self::default())
    }

    /// Settings for the headless runner
    pub fn run_settings(&self) -> RunSettings {
        RunSettings {
            runtime: HeadlessRunConfig {
                width: self.headless.width,
                height: self.headless.height,
                tick_ms: self.headless.tick_ms,
                ..Default::default()
            },
            nav: self.nav.clone(),
            ..Default::default()
        }
    }
}
