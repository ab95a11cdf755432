//! Report output model for headless scenario runs.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Component, Path};

/// Report status for a headless scenario run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Passed,
    Failed,
}

/// Measurements taken at the end of a run (or at the failing step).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    pub elapsed_frames: u64,
    pub elapsed_ms: u64,
    pub route: Option<String>,
    pub data_state: Option<String>,
    pub scroll_offset: Option<f32>,
    pub open_ms: Option<u64>,
    pub close_ms: Option<u64>,
}

/// Machine-readable result of a headless scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlessReport {
    pub scenario: String,
    pub status: ReportStatus,
    pub failed_step_index: Option<usize>,
    pub assertion: Option<String>,
    pub code: Option<String>,
    pub message: Option<String>,
    #[serde(flatten)]
    pub metrics: RunMetrics,
}

impl HeadlessReport {
    pub fn passed(scenario: &str, metrics: RunMetrics) -> Self {
        Self {
            scenario: scenario.to_string(),
            status: ReportStatus::Passed,
            failed_step_index: None,
            assertion: None,
            code: None,
            message: None,
            metrics,
        }
    }

    pub fn failed(
        scenario: &str,
        assertion: &str,
        failed_step_index: usize,
        code: String,
        message: String,
        metrics: RunMetrics,
    ) -> Self {
        Self {
            scenario: scenario.to_string(),
            status: ReportStatus::Failed,
            failed_step_index: Some(failed_step_index),
            assertion: Some(assertion.to_string()),
            code: Some(code),
            message: Some(message),
            metrics,
        }
    }

    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        if path.is_absolute() || path.has_root() {
            bail!("report path must be relative and must not start with a separator");
        }
        if path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            bail!("report path cannot contain '..' or drive prefixes");
        }
        let payload = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, payload)?;
        Ok(())
    }

    pub fn write_to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        let payload = serde_json::to_string_pretty(self)?;
        writer.write_all(payload.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}
