//! Scenario definition for headless navigation checks.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Named sequence of headless steps.
#[derive(Debug, Clone, Deserialize)]
pub struct HeadlessScenario {
    #[serde(default)]
    pub name: Option<String>,
    pub steps: Vec<ScenarioStep>,
}

impl HeadlessScenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("parsing scenario {}", path.display()))
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }
}

fn default_true() -> bool {
    true
}

/// Steps a scenario can take.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Load a route in a fresh page with a fresh controller
    Goto {
        route: String,
        #[serde(default = "default_true")]
        scroll_container: bool,
    },
    /// User scroll to an offset
    ScrollTo { y: f32 },
    /// Remember the current offset for a later `assert_scroll_near`
    MarkScroll,
    /// Pointer activation of a control, by element id or label
    Click { target: String },
    /// Key press, on a control or the document
    Press {
        key: String,
        #[serde(default)]
        target: Option<String>,
    },
    Resize { width: f32, height: f32 },
    Tick { frames: u32 },
    Wait { ms: u64 },
    /// Run frames until `data-state` equals `value` and deferred work settled
    WaitForState {
        value: String,
        #[serde(default = "default_timeout_ms")]
        timeout_ms: u64,
    },
    AssertState { value: String },
    AssertAttribute {
        id: String,
        name: String,
        value: String,
    },
    AssertExists { id: String },
    /// Compare the offset to `y`, or to the marked offset when `y` is absent
    AssertScrollNear {
        #[serde(default)]
        y: Option<f32>,
        #[serde(default)]
        tolerance: Option<f32>,
    },
    AssertScrollUnlocked,
    AssertTransitionSymmetry {
        #[serde(default)]
        max_delta_ms: Option<u64>,
    },
}

fn default_timeout_ms() -> u64 {
    2000
}
