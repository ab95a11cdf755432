//! Built-in scenarios replaying the site's browser checks on every route.

use anyhow::Result;

use crate::runner::{run_loaded_scenario, RunOutcome, RunSettings};
use crate::scenario::HeadlessScenario;

/// Scenario sources shipped with the crate, by name
pub const BUILTIN_SCENARIOS: [(&str, &str); 2] = [
    (
        "mobile-menu-debug",
        include_str!("../scenarios/mobile_menu_debug.json"),
    ),
    (
        "scroll-restore",
        include_str!("../scenarios/scroll_restore.json"),
    ),
];

/// Parse every built-in scenario
pub fn builtin_scenarios() -> Result<Vec<HeadlessScenario>> {
    BUILTIN_SCENARIOS
        .iter()
        .map(|(_, source)| HeadlessScenario::from_json(source))
        .collect()
}

/// Run every built-in scenario, in order, without stopping at failures
pub fn run_builtin_suite(settings: &RunSettings) -> Result<Vec<RunOutcome>> {
    builtin_scenarios()?
        .iter()
        .map(|scenario| run_loaded_scenario(scenario, settings))
        .collect()
}
