//! Overnav Headless Harness
//!
//! Deterministic, browser-free checks for the navigation overlay. A
//! scenario loads simulated pages, scrolls, clicks the menu controls and
//! asserts on what a browser test would observe: the `data-state`
//! attribute, the document scroll offset, the scroll lock, and how long
//! each transition took.
//!
//! # Example
//!
//! ```rust
//! use overnav_headless::{run_scenario, RunSettings};
//!
//! let outcome = run_scenario(
//!     r#"{
//!         "steps": [
//!             { "type": "goto", "route": "/" },
//!             { "type": "scroll_to", "y": 1800 },
//!             { "type": "click", "target": "Open menu" },
//!             { "type": "wait_for_state", "value": "open" },
//!             { "type": "click", "target": "Close menu" },
//!             { "type": "wait_for_state", "value": "closed" },
//!             { "type": "assert_scroll_near", "y": 1800 }
//!         ]
//!     }"#,
//!     &RunSettings::default(),
//! )?;
//! assert!(!outcome.is_failed());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod assert;
pub mod page;
pub mod report;
pub mod runner;
pub mod runtime;
pub mod scenario;
pub mod session;
pub mod suite;

pub use page::{RouteProfile, RouteTable, SimPage};
pub use report::{HeadlessReport, ReportStatus, RunMetrics};
pub use runner::{run_loaded_scenario, run_scenario, RunOutcome, RunSettings};
pub use runtime::{HeadlessRunConfig, HeadlessRuntime};
pub use scenario::{HeadlessScenario, ScenarioStep};
pub use session::HeadlessSession;
pub use suite::{builtin_scenarios, run_builtin_suite, BUILTIN_SCENARIOS};
