//! Route-level checks for the navigation overlay
//!
//! These replay the site's mobile menu checks headlessly and verify that
//! the overlay behaves identically on every route.

use overnav_headless::{
    builtin_scenarios, run_builtin_suite, run_scenario, HeadlessRunConfig, ReportStatus,
    RunSettings,
};
use overnav_nav::NavConfig;

fn round_trip(route: &str, y: u32) -> String {
    format!(
        r#"{{
            "name": "round-trip {route}",
            "steps": [
                {{ "type": "goto", "route": "{route}" }},
                {{ "type": "scroll_to", "y": {y} }},
                {{ "type": "mark_scroll" }},
                {{ "type": "click", "target": "Open menu" }},
                {{ "type": "wait_for_state", "value": "open" }},
                {{ "type": "assert_state", "value": "open" }},
                {{ "type": "click", "target": "Close menu" }},
                {{ "type": "wait_for_state", "value": "closed" }},
                {{ "type": "assert_state", "value": "closed" }},
                {{ "type": "assert_scroll_near" }},
                {{ "type": "assert_transition_symmetry" }},
                {{ "type": "assert_scroll_unlocked" }}
            ]
        }}"#
    )
}

#[test]
fn test_builtin_suite_passes() {
    let outcomes = run_builtin_suite(&RunSettings::default()).unwrap();
    assert_eq!(outcomes.len(), 2);
    for outcome in &outcomes {
        assert!(!outcome.is_failed(), "{:#?}", outcome.report());
    }
}

#[test]
fn test_builtin_scenarios_parse_with_names() {
    let names: Vec<String> = builtin_scenarios()
        .unwrap()
        .iter()
        .map(|s| s.display_name().to_string())
        .collect();
    assert_eq!(names, vec!["mobile-menu-debug", "scroll-restore"]);
}

#[test]
fn test_round_trip_holds_on_every_route() {
    for (route, y) in [("/", 1800), ("/kontakt", 1200), ("/", 0), ("/kontakt", 2556)] {
        let outcome = run_scenario(&round_trip(route, y), &RunSettings::default()).unwrap();
        let report = outcome.report();
        assert_eq!(report.status, ReportStatus::Passed, "{route}@{y}: {report:#?}");
        assert_eq!(report.metrics.open_ms, report.metrics.close_ms);
    }
}

#[test]
fn test_symmetry_independent_of_frame_rate() {
    for tick_ms in [8, 16, 33, 100] {
        let settings = RunSettings {
            runtime: HeadlessRunConfig {
                tick_ms,
                ..Default::default()
            },
            ..Default::default()
        };
        let outcome = run_scenario(&round_trip("/", 1800), &settings).unwrap();
        assert!(!outcome.is_failed(), "tick {tick_ms}: {:#?}", outcome.report());
        assert_eq!(outcome.report().metrics.open_ms, Some(tick_ms));
    }
}

#[test]
fn test_missing_scroll_container_degrades_gracefully() {
    let outcome = run_scenario(
        r#"{
            "steps": [
                { "type": "goto", "route": "/", "scroll_container": false },
                { "type": "click", "target": "open-menu" },
                { "type": "wait_for_state", "value": "open" },
                { "type": "click", "target": "close-menu" },
                { "type": "wait_for_state", "value": "closed" },
                { "type": "assert_state", "value": "closed" },
                { "type": "assert_scroll_unlocked" }
            ]
        }"#,
        &RunSettings::default(),
    )
    .unwrap();

    assert!(!outcome.is_failed(), "{:#?}", outcome.report());
    assert_eq!(outcome.report().metrics.scroll_offset, None);
}

#[test]
fn test_rapid_toggle_restores_original_offset() {
    let outcome = run_scenario(
        r#"{
            "steps": [
                { "type": "goto", "route": "/" },
                { "type": "scroll_to", "y": 1800 },
                { "type": "click", "target": "open-menu" },
                { "type": "press", "key": "Escape" },
                { "type": "click", "target": "open-menu" },
                { "type": "tick", "frames": 1 },
                { "type": "click", "target": "close-menu" },
                { "type": "click", "target": "open-menu" },
                { "type": "tick", "frames": 1 },
                { "type": "click", "target": "close-menu" },
                { "type": "wait_for_state", "value": "closed" },
                { "type": "assert_scroll_near", "y": 1800 },
                { "type": "assert_scroll_unlocked" }
            ]
        }"#,
        &RunSettings::default(),
    )
    .unwrap();

    assert!(!outcome.is_failed(), "{:#?}", outcome.report());
}

#[test]
fn test_close_click_before_reveal_is_rejected() {
    let result = run_scenario(
        r#"{
            "steps": [
                { "type": "goto", "route": "/kontakt" },
                { "type": "click", "target": "Open menu" },
                { "type": "click", "target": "Close menu" }
            ]
        }"#,
        &RunSettings::default(),
    );

    let err = result.unwrap_err();
    assert!(err.to_string().contains("not in the DOM"), "{err}");
}

#[test]
fn test_resize_to_desktop_closes_and_restores() {
    let outcome = run_scenario(
        r#"{
            "steps": [
                { "type": "goto", "route": "/kontakt" },
                { "type": "scroll_to", "y": 900 },
                { "type": "click", "target": "Open menu" },
                { "type": "wait_for_state", "value": "open" },
                { "type": "resize", "width": 1280, "height": 844 },
                { "type": "wait_for_state", "value": "closed" },
                { "type": "assert_scroll_near", "y": 900 },
                { "type": "click", "target": "Open menu" },
                { "type": "assert_state", "value": "closed" }
            ]
        }"#,
        &RunSettings::default(),
    )
    .unwrap();

    assert!(!outcome.is_failed(), "{:#?}", outcome.report());
}

#[test]
fn test_backdrop_dismiss_can_be_disabled() {
    let settings = RunSettings {
        nav: NavConfig {
            dismiss_on_backdrop: false,
            ..NavConfig::default()
        },
        ..Default::default()
    };
    let outcome = run_scenario(
        r#"{
            "steps": [
                { "type": "goto", "route": "/" },
                { "type": "click", "target": "Open menu" },
                { "type": "wait_for_state", "value": "open" },
                { "type": "click", "target": "backdrop" },
                { "type": "tick", "frames": 2 },
                { "type": "assert_state", "value": "open" }
            ]
        }"#,
        &settings,
    )
    .unwrap();

    assert!(!outcome.is_failed(), "{:#?}", outcome.report());
}

#[test]
fn test_failing_report_carries_metrics() {
    let outcome = run_scenario(
        r#"{
            "name": "expects-drift",
            "steps": [
                { "type": "goto", "route": "/" },
                { "type": "scroll_to", "y": 1800 },
                { "type": "assert_scroll_near", "y": 1000, "tolerance": 1 }
            ]
        }"#,
        &RunSettings::default(),
    )
    .unwrap();

    let report = outcome.report();
    assert_eq!(report.status, ReportStatus::Failed);
    assert_eq!(report.code.as_deref(), Some("scroll_drift"));
    assert_eq!(report.metrics.scroll_offset, Some(1800.0));
    assert_eq!(report.scenario, "expects-drift");
}
