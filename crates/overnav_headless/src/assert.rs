//! Assertion helpers for headless navigation checks.

use std::collections::HashMap;

use overnav_nav::{Control, ScrollHost};

use crate::session::HeadlessSession;

/// Element id of the overlay root carrying `data-state`
pub const OVERLAY_ID: &str = "mobile-nav";

/// Snapshot of page-observable state used for headless assertions.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticsSnapshot {
    pub elements: HashMap<String, DiagnosticsElement>,
    pub scroll_offset: Option<f32>,
    pub scroll_locked: bool,
    pub open_ms: Option<u64>,
    pub close_ms: Option<u64>,
}

/// Minimal element representation for diagnostics checks.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticsElement {
    pub text: Option<String>,
    pub attributes: HashMap<String, String>,
}

impl DiagnosticsElement {
    fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }
}

impl DiagnosticsSnapshot {
    /// Capture what a browser test could observe on the page
    pub fn capture(session: &HeadlessSession) -> Self {
        let nav = session.nav();
        let attrs = nav.attributes();
        let mut elements = HashMap::new();

        elements.insert(
            Control::OpenMenu.name().to_string(),
            DiagnosticsElement {
                text: Some(Control::OpenMenu.label().to_string()),
                ..Default::default()
            }
            .with_attr("aria-expanded", attrs.aria_expanded()),
        );

        let mut overlay = DiagnosticsElement::default();
        for (name, value) in attrs.pairs() {
            overlay = overlay.with_attr(name, value);
        }
        elements.insert(OVERLAY_ID.to_string(), overlay);

        for control in [Control::CloseMenu, Control::Backdrop] {
            if session.is_present(control) {
                elements.insert(
                    control.name().to_string(),
                    DiagnosticsElement {
                        text: Some(control.label().to_string()),
                        ..Default::default()
                    },
                );
            }
        }

        Self {
            elements,
            scroll_offset: session.scroll_offset(),
            scroll_locked: session.page().is_scroll_locked(),
            open_ms: nav.last_open_timing().and_then(|t| t.completed_ms()),
            close_ms: nav.last_close_timing().and_then(|t| t.completed_ms()),
        }
    }
}

/// Assertion result with structured failure details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionResult {
    Passed,
    Failed { code: String, message: String },
}

impl AssertionResult {
    fn failed(code: &str, message: String) -> Self {
        AssertionResult::Failed {
            code: code.to_string(),
            message,
        }
    }
}

pub fn evaluate_assert_exists(id: &str, snapshot: &DiagnosticsSnapshot) -> AssertionResult {
    if snapshot.elements.contains_key(id) {
        AssertionResult::Passed
    } else {
        AssertionResult::failed("missing_element", format!("{id}: element not found"))
    }
}

pub fn evaluate_assert_attribute(
    id: &str,
    name: &str,
    expected: &str,
    snapshot: &DiagnosticsSnapshot,
) -> AssertionResult {
    let Some(element) = snapshot.elements.get(id) else {
        return AssertionResult::failed("missing_element", format!("{id}: element not found"));
    };
    match element.attributes.get(name) {
        Some(value) if value == expected => AssertionResult::Passed,
        Some(value) => AssertionResult::failed(
            "attribute_mismatch",
            format!("{id}[{name}]: expected '{expected}', got '{value}'"),
        ),
        None => AssertionResult::failed(
            "missing_attribute",
            format!("{id}: attribute '{name}' not set"),
        ),
    }
}

pub fn evaluate_assert_state(expected: &str, snapshot: &DiagnosticsSnapshot) -> AssertionResult {
    evaluate_assert_attribute(OVERLAY_ID, overnav_nav::state::DATA_STATE, expected, snapshot)
}

pub fn evaluate_assert_scroll_near(
    expected: f32,
    tolerance: f32,
    snapshot: &DiagnosticsSnapshot,
) -> AssertionResult {
    let Some(offset) = snapshot.scroll_offset else {
        return AssertionResult::failed(
            "missing_scroll_container",
            "page has no scroll container".to_string(),
        );
    };
    let drift = (offset - expected).abs();
    if drift < tolerance {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "scroll_drift",
            format!("expected offset {expected} (±{tolerance}), got {offset}"),
        )
    }
}

pub fn evaluate_assert_scroll_unlocked(snapshot: &DiagnosticsSnapshot) -> AssertionResult {
    if snapshot.scroll_locked {
        AssertionResult::failed("scroll_locked", "background scroll is still locked".to_string())
    } else {
        AssertionResult::Passed
    }
}

pub fn evaluate_assert_transition_symmetry(
    max_delta_ms: u64,
    snapshot: &DiagnosticsSnapshot,
) -> AssertionResult {
    let (Some(open), Some(close)) = (snapshot.open_ms, snapshot.close_ms) else {
        return AssertionResult::failed(
            "missing_timing",
            "need one settled open and one settled close".to_string(),
        );
    };
    let delta = open.abs_diff(close);
    if delta < max_delta_ms {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "asymmetric_transition",
            format!("open took {open}ms, close took {close}ms (limit {max_delta_ms}ms)"),
        )
    }
}
