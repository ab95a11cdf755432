//! Scenario runner that executes headless navigation checks.

use crate::assert::{
    evaluate_assert_attribute, evaluate_assert_exists, evaluate_assert_scroll_near,
    evaluate_assert_scroll_unlocked, evaluate_assert_state, evaluate_assert_transition_symmetry,
    AssertionResult, DiagnosticsSnapshot,
};
use crate::page::RouteTable;
use crate::report::{HeadlessReport, RunMetrics};
use crate::runtime::{wait_frames, HeadlessRunConfig, HeadlessRuntime};
use crate::scenario::{HeadlessScenario, ScenarioStep};
use crate::session::HeadlessSession;
use anyhow::{anyhow, bail, Result};
use overnav_nav::{NavConfig, NavigationState};

/// Everything a run needs besides the scenario itself.
#[derive(Debug, Clone, Default)]
pub struct RunSettings {
    pub runtime: HeadlessRunConfig,
    pub nav: NavConfig,
    pub routes: RouteTable,
}

/// Final outcome of a scenario run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Passed { report: HeadlessReport },
    Failed { report: HeadlessReport },
}

impl RunOutcome {
    pub fn report(&self) -> &HeadlessReport {
        match self {
            RunOutcome::Passed { report } => report,
            RunOutcome::Failed { report } => report,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }
}

/// Execute scenario JSON.
pub fn run_scenario(input: &str, settings: &RunSettings) -> Result<RunOutcome> {
    let scenario = HeadlessScenario::from_json(input)?;
    run_loaded_scenario(&scenario, settings)
}

/// Mutable state threaded through the steps of one run
struct RunState<'a> {
    settings: &'a RunSettings,
    session: Option<HeadlessSession>,
    elapsed_frames: u64,
    marked_offset: Option<f32>,
}

impl RunState<'_> {
    fn session(&mut self, step_index: usize) -> Result<&mut HeadlessSession> {
        self.session.as_mut().ok_or_else(|| {
            anyhow!("step {step_index} needs a page; start the scenario with `goto`")
        })
    }

    fn snapshot(&mut self, step_index: usize) -> Result<DiagnosticsSnapshot> {
        let session = self.session(step_index)?;
        Ok(DiagnosticsSnapshot::capture(session))
    }

    /// Run up to `frames` frames, stopping once `done` holds. Returns whether it held.
    fn run_frames<D>(&mut self, step_index: usize, frames: u32, mut done: D) -> Result<bool>
    where
        D: FnMut(&HeadlessSession) -> bool,
    {
        let tick_ms = self.settings.runtime.tick_ms;
        let mut cfg = self.settings.runtime;
        cfg.max_frames = frames;

        let session = self.session(step_index)?;
        if done(session) {
            return Ok(true);
        }
        if frames == 0 {
            return Ok(false);
        }

        let mut reached = false;
        let ran = HeadlessRuntime::run(cfg, |_| {
            session.frame(tick_ms);
            reached = done(session);
            !reached
        })?;
        self.elapsed_frames = self.elapsed_frames.saturating_add(u64::from(ran));
        Ok(reached)
    }

    fn metrics(&self) -> RunMetrics {
        let mut metrics = RunMetrics {
            elapsed_frames: self.elapsed_frames,
            ..Default::default()
        };
        if let Some(session) = &self.session {
            let nav = session.nav();
            metrics.elapsed_ms = session.clock_ms();
            metrics.route = Some(session.page().route().to_string());
            metrics.data_state = Some(nav.data_state().to_string());
            metrics.scroll_offset = session.scroll_offset();
            metrics.open_ms = nav.last_open_timing().and_then(|t| t.completed_ms());
            metrics.close_ms = nav.last_close_timing().and_then(|t| t.completed_ms());
        }
        metrics
    }
}

/// Execute a pre-loaded scenario.
pub fn run_loaded_scenario(
    scenario: &HeadlessScenario,
    settings: &RunSettings,
) -> Result<RunOutcome> {
    settings.runtime.validate()?;
    settings.nav.validate()?;

    let name = scenario.display_name();
    let mut state = RunState {
        settings,
        session: None,
        elapsed_frames: 0,
        marked_offset: None,
    };

    for (step_index, step) in scenario.steps.iter().enumerate() {
        tracing::trace!(scenario = name, step_index, ?step, "running step");

        let (assertion, result) = match step {
            ScenarioStep::Goto {
                route,
                scroll_container,
            } => {
                let profile = settings.routes.get(route)?.clone();
                let clock = state.session.as_ref().map_or(0, HeadlessSession::clock_ms);
                let viewport = (settings.runtime.width as f32, settings.runtime.height as f32);
                let mut session =
                    HeadlessSession::load(profile, viewport, settings.nav.clone(), clock);
                if !scroll_container {
                    session = session.without_scroll_container();
                }
                state.session = Some(session);
                state.marked_offset = None;
                continue;
            }
            ScenarioStep::ScrollTo { y } => {
                state.session(step_index)?.user_scroll(*y);
                continue;
            }
            ScenarioStep::MarkScroll => {
                state.marked_offset = state.session(step_index)?.scroll_offset();
                continue;
            }
            ScenarioStep::Click { target } => {
                state.session(step_index)?.click(target)?;
                continue;
            }
            ScenarioStep::Press { key, target } => {
                state.session(step_index)?.press(key, target.as_deref())?;
                continue;
            }
            ScenarioStep::Resize { width, height } => {
                state.session(step_index)?.resize(*width, *height);
                continue;
            }
            ScenarioStep::Tick { frames } => {
                state.run_frames(step_index, *frames, |_| false)?;
                continue;
            }
            ScenarioStep::Wait { ms } => {
                let frames = wait_frames(*ms, settings.runtime.tick_ms);
                state.run_frames(step_index, frames, |_| false)?;
                continue;
            }
            ScenarioStep::WaitForState { value, timeout_ms } => {
                let Some(target) = NavigationState::from_attr(value) else {
                    bail!("step {step_index}: '{value}' is not a navigation state");
                };
                let frames = wait_frames(*timeout_ms, settings.runtime.tick_ms).max(1);
                let reached = state.run_frames(step_index, frames, |s| {
                    s.nav().state() == target && s.nav().is_settled()
                })?;
                let result = if reached {
                    AssertionResult::Passed
                } else {
                    AssertionResult::Failed {
                        code: "timeout".to_string(),
                        message: format!(
                            "data-state did not settle on '{value}' within {timeout_ms}ms"
                        ),
                    }
                };
                ("wait_for_state", result)
            }
            ScenarioStep::AssertState { value } => {
                ("assert_state", evaluate_assert_state(value, &state.snapshot(step_index)?))
            }
            ScenarioStep::AssertAttribute { id, name, value } => (
                "assert_attribute",
                evaluate_assert_attribute(id, name, value, &state.snapshot(step_index)?),
            ),
            ScenarioStep::AssertExists { id } => {
                ("assert_exists", evaluate_assert_exists(id, &state.snapshot(step_index)?))
            }
            ScenarioStep::AssertScrollNear { y, tolerance } => {
                let Some(expected) = y.or(state.marked_offset) else {
                    bail!(
                        "step {step_index}: assert_scroll_near without `y` needs mark_scroll first"
                    );
                };
                let tolerance = tolerance.unwrap_or(settings.nav.restore_tolerance);
                (
                    "assert_scroll_near",
                    evaluate_assert_scroll_near(expected, tolerance, &state.snapshot(step_index)?),
                )
            }
            ScenarioStep::AssertScrollUnlocked => (
                "assert_scroll_unlocked",
                evaluate_assert_scroll_unlocked(&state.snapshot(step_index)?),
            ),
            ScenarioStep::AssertTransitionSymmetry { max_delta_ms } => {
                let limit = max_delta_ms.unwrap_or(settings.nav.symmetry_budget_ms);
                (
                    "assert_transition_symmetry",
                    evaluate_assert_transition_symmetry(limit, &state.snapshot(step_index)?),
                )
            }
        };

        if let AssertionResult::Failed { code, message } = result {
            tracing::warn!(
                scenario = name,
                step_index,
                assertion,
                %message,
                "scenario step failed"
            );
            let report =
                HeadlessReport::failed(name, assertion, step_index, code, message, state.metrics());
            return Ok(RunOutcome::Failed { report });
        }
    }

    Ok(RunOutcome::Passed {
        report: HeadlessReport::passed(name, state.metrics()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_before_goto_is_an_error() {
        let err = run_scenario(
            r#"{ "steps": [ { "type": "click", "target": "open-menu" } ] }"#,
            &RunSettings::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("goto"));
    }

    #[test]
    fn test_unknown_route_is_an_error() {
        let result = run_scenario(
            r#"{ "steps": [ { "type": "goto", "route": "/blog" } ] }"#,
            &RunSettings::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_failed_assertion_reports_step() {
        let outcome = run_scenario(
            r#"{
                "name": "wrong-state",
                "steps": [
                    { "type": "goto", "route": "/" },
                    { "type": "assert_state", "value": "open" }
                ]
            }"#,
            &RunSettings::default(),
        )
        .unwrap();

        assert!(outcome.is_failed());
        let report = outcome.report();
        assert_eq!(report.failed_step_index, Some(1));
        assert_eq!(report.assertion.as_deref(), Some("assert_state"));
        assert_eq!(report.code.as_deref(), Some("attribute_mismatch"));
        assert_eq!(report.metrics.route.as_deref(), Some("/"));
    }

    #[test]
    fn test_wait_for_state_times_out() {
        let outcome = run_scenario(
            r#"{
                "steps": [
                    { "type": "goto", "route": "/" },
                    { "type": "wait_for_state", "value": "open", "timeout_ms": 48 }
                ]
            }"#,
            &RunSettings::default(),
        )
        .unwrap();

        let report = outcome.report();
        assert_eq!(report.code.as_deref(), Some("timeout"));
        assert_eq!(report.metrics.elapsed_frames, 3);
    }

    #[test]
    fn test_mark_then_restore() {
        let outcome = run_scenario(
            r#"{
                "name": "mark",
                "steps": [
                    { "type": "goto", "route": "/kontakt" },
                    { "type": "scroll_to", "y": 1200 },
                    { "type": "mark_scroll" },
                    { "type": "click", "target": "Open menu" },
                    { "type": "wait_for_state", "value": "open" },
                    { "type": "click", "target": "Close menu" },
                    { "type": "wait_for_state", "value": "closed" },
                    { "type": "assert_scroll_near" }
                ]
            }"#,
            &RunSettings::default(),
        )
        .unwrap();

        assert!(!outcome.is_failed(), "{:?}", outcome.report());
        assert_eq!(outcome.report().metrics.scroll_offset, Some(1200.0));
    }
}
