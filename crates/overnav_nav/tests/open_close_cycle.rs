//! Integration tests for the navigation overlay cycle
//!
//! These tests verify that:
//! - A full open/close cycle returns the page to where it was
//! - Redundant triggers are ignored rather than stacked
//! - Open and close take the same number of frames
//! - The background scroll lock never outlives the overlay

use overnav_core::events::{Event, KeyCode, DOCUMENT_TARGET};
use overnav_nav::{Control, NavConfig, NavigationState, OverlayNavController, ScrollHost};

const FRAME_MS: u64 = 16;

/// Document that resets to the top while locked, as a fixed-position body does
struct Document {
    offset: f32,
    content_height: f32,
    viewport_height: f32,
    locked: bool,
}

impl Document {
    fn new(content_height: f32) -> Self {
        Self {
            offset: 0.0,
            content_height,
            viewport_height: 844.0,
            locked: false,
        }
    }

    fn user_scroll(&mut self, offset: f32) {
        if !self.locked {
            self.scroll_to(offset);
        }
    }
}

impl ScrollHost for Document {
    fn scroll_offset(&self) -> Option<f32> {
        Some(self.offset)
    }

    fn scroll_to(&mut self, offset: f32) -> bool {
        let max = (self.content_height - self.viewport_height).max(0.0);
        self.offset = offset.clamp(0.0, max);
        true
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.locked = locked;
        if locked {
            self.offset = 0.0;
        }
    }

    fn is_scroll_locked(&self) -> bool {
        self.locked
    }
}

/// Drive frames until the controller has no deferred work
fn settle(nav: &mut OverlayNavController, doc: &mut Document, clock: &mut u64) {
    for _ in 0..4 {
        if nav.is_settled() {
            return;
        }
        *clock += FRAME_MS;
        nav.on_frame(doc, *clock);
    }
}

fn cycle(start: f32, content_height: f32) -> (f32, OverlayNavController, Document) {
    let mut doc = Document::new(content_height);
    doc.user_scroll(start);
    let mut nav = OverlayNavController::default();
    let mut clock = 0;

    nav.handle_event(&mut doc, &Event::pointer_up(Control::OpenMenu.id(), clock));
    settle(&mut nav, &mut doc, &mut clock);
    assert_eq!(nav.data_state(), "open");

    nav.handle_event(&mut doc, &Event::pointer_up(Control::CloseMenu.id(), clock));
    settle(&mut nav, &mut doc, &mut clock);
    assert_eq!(nav.data_state(), "closed");

    (doc.offset, nav, doc)
}

#[test]
fn test_round_trip_on_home_route() {
    let (restored, _, _) = cycle(1800.0, 7200.0);
    assert!((restored - 1800.0).abs() < 1.0, "restored to {restored}");
}

#[test]
fn test_round_trip_on_contact_route() {
    let (restored, _, _) = cycle(1200.0, 3400.0);
    assert!((restored - 1200.0).abs() < 1.0, "restored to {restored}");
}

#[test]
fn test_round_trip_at_top_and_bottom() {
    let (top, _, _) = cycle(0.0, 3000.0);
    assert_eq!(top, 0.0);

    let bottom = 3000.0 - 844.0;
    let (restored, _, _) = cycle(bottom, 3000.0);
    assert!((restored - bottom).abs() < 1.0);
}

#[test]
fn test_symmetry_within_budget() {
    let (_, nav, _) = cycle(1800.0, 7200.0);
    let delta = nav.symmetry_delta_ms().expect("both transitions timed");
    assert!(delta < nav.config().symmetry_budget_ms);
    assert_eq!(
        nav.last_open_timing().unwrap().duration_ms(),
        nav.last_close_timing().unwrap().duration_ms()
    );
}

#[test]
fn test_no_residual_lock_after_close() {
    let (_, nav, mut doc) = cycle(500.0, 4000.0);
    assert!(!doc.is_scroll_locked());
    assert!(!nav.holds_scroll_lock());

    doc.user_scroll(900.0);
    assert_eq!(doc.offset, 900.0);
}

#[test]
fn test_rapid_double_open_is_ignored() {
    let mut doc = Document::new(5000.0);
    doc.user_scroll(1500.0);
    let mut nav = OverlayNavController::default();

    let open = Event::pointer_up(Control::OpenMenu.id(), 0);
    assert!(nav.handle_event(&mut doc, &open));
    let anchor = nav.anchor();
    assert!(!nav.handle_event(&mut doc, &open));
    let space = Event::key_down(Control::OpenMenu.id(), KeyCode::SPACE, 1);
    assert!(!nav.handle_event(&mut doc, &space));

    assert_eq!(nav.anchor(), anchor);
    assert_eq!(nav.history().len(), 1);
    assert_eq!(nav.state(), NavigationState::Open);
}

#[test]
fn test_escape_restores_like_close_button() {
    let mut doc = Document::new(5000.0);
    doc.user_scroll(2222.0);
    let mut nav = OverlayNavController::new(NavConfig::default());
    let mut clock = 0;

    nav.open(&mut doc, clock);
    settle(&mut nav, &mut doc, &mut clock);
    nav.handle_event(&mut doc, &Event::key_down(DOCUMENT_TARGET, KeyCode::ESCAPE, clock));
    settle(&mut nav, &mut doc, &mut clock);

    assert_eq!(doc.offset, 2222.0);
    assert_eq!(nav.attributes().aria_hidden(), "true");
}

#[test]
fn test_toggle_storm_never_reapplies_stale_anchor() {
    let mut doc = Document::new(6000.0);
    doc.user_scroll(1800.0);
    let mut nav = OverlayNavController::default();
    let mut clock = 0;

    // Toggle faster than frames arrive
    for _ in 0..7 {
        clock += 3;
        nav.toggle(&mut doc, clock);
    }
    assert!(nav.is_open());
    nav.close(&mut doc, clock);
    settle(&mut nav, &mut doc, &mut clock);

    assert_eq!(doc.offset, 1800.0);
    assert!(!doc.locked);
}
