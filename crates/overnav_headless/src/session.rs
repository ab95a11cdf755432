//! A loaded page with its navigation controller and a logical clock.

use anyhow::{anyhow, bail, Result};
use overnav_core::events::{Event, KeyCode, DOCUMENT_TARGET};
use overnav_core::frame::FrameInfo;
use overnav_nav::{Control, NavConfig, OverlayNavController, ScrollHost};

use crate::page::{RouteProfile, SimPage};

/// Page + controller pair driven by a scenario
pub struct HeadlessSession {
    page: SimPage,
    nav: OverlayNavController,
    clock_ms: u64,
}

impl HeadlessSession {
    /// Load a route. The clock starts at `clock_ms` so timings stay monotonic
    /// across navigations.
    pub fn load(
        route: RouteProfile,
        viewport: (f32, f32),
        nav_config: NavConfig,
        clock_ms: u64,
    ) -> Self {
        let mut page = SimPage::load(route, viewport.0, viewport.1);
        let mut nav = OverlayNavController::new(nav_config);
        // Sync availability with the initial viewport
        nav.handle_event(&mut page, &Event::resize(viewport.0, viewport.1, clock_ms));
        tracing::debug!(route = page.route(), "page loaded");
        Self {
            page,
            nav,
            clock_ms,
        }
    }

    pub fn without_scroll_container(mut self) -> Self {
        self.page = self.page.without_scroll_container();
        self
    }

    pub fn page(&self) -> &SimPage {
        &self.page
    }

    pub fn nav(&self) -> &OverlayNavController {
        &self.nav
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn scroll_offset(&self) -> Option<f32> {
        self.page.scroll_offset()
    }

    pub fn user_scroll(&mut self, y: f32) -> bool {
        self.page.user_scroll(y)
    }

    /// Control is in the DOM. Overlay content only exists once revealed.
    pub fn is_present(&self, control: Control) -> bool {
        match control {
            Control::OpenMenu => true,
            Control::CloseMenu | Control::Backdrop => self.nav.overlay_visible(),
        }
    }

    /// Activate a control by element id or label
    pub fn click(&mut self, target: &str) -> Result<bool> {
        let control = self.present_control(target)?;
        let event = Event::pointer_up(control.id(), self.clock_ms);
        Ok(self.nav.handle_event(&mut self.page, &event))
    }

    /// Press a key on a control, or on the document when `target` is `None`
    pub fn press(&mut self, key: &str, target: Option<&str>) -> Result<bool> {
        let key = KeyCode::from_name(key)?;
        let target = match target {
            Some(name) => self.present_control(name)?.id(),
            None => DOCUMENT_TARGET,
        };
        let event = Event::key_down(target, key, self.clock_ms);
        Ok(self.nav.handle_event(&mut self.page, &event))
    }

    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        self.page.set_viewport(width, height);
        let event = Event::resize(width, height, self.clock_ms);
        self.nav.handle_event(&mut self.page, &event)
    }

    /// Advance the clock by one frame and run the controller's frame work
    pub fn frame(&mut self, tick_ms: u64) -> FrameInfo {
        self.clock_ms = self.clock_ms.saturating_add(tick_ms);
        self.nav.on_frame(&mut self.page, self.clock_ms)
    }

    fn present_control(&self, name: &str) -> Result<Control> {
        let control = resolve_control(name)?;
        if !self.is_present(control) {
            bail!("'{name}' is not in the DOM yet");
        }
        Ok(control)
    }
}

fn resolve_control(name: &str) -> Result<Control> {
    Control::from_name(name).ok_or_else(|| anyhow!("unknown control '{name}'"))
}
