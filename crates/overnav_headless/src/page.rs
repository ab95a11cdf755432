//! Simulated host pages
//!
//! A [`SimPage`] stands in for a browser document: it has a route, a
//! viewport, a scrollable content height, and a body scroll lock that pins
//! the document at the top while engaged (the fixed-body technique). Leaving
//! the lock does not bring the offset back by itself; that is the
//! controller's job.

use anyhow::{bail, Result};
use overnav_nav::ScrollHost;
use rustc_hash::FxHashMap;

/// Static description of a route's page
#[derive(Debug, Clone, PartialEq)]
pub struct RouteProfile {
    pub path: String,
    /// Total document height in CSS pixels
    pub content_height: f32,
}

impl RouteProfile {
    pub fn new(path: impl Into<String>, content_height: f32) -> Self {
        Self {
            path: path.into(),
            content_height,
        }
    }
}

/// Known routes by path
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: FxHashMap<String, RouteProfile>,
}

impl RouteTable {
    pub fn empty() -> Self {
        Self {
            routes: FxHashMap::default(),
        }
    }

    /// Home and contact pages of the agency site
    pub fn site() -> Self {
        let mut table = Self::empty();
        table.insert(RouteProfile::new("/", 7200.0));
        table.insert(RouteProfile::new("/kontakt", 3400.0));
        table
    }

    pub fn insert(&mut self, profile: RouteProfile) {
        self.routes.insert(profile.path.clone(), profile);
    }

    pub fn get(&self, path: &str) -> Result<&RouteProfile> {
        match self.routes.get(path) {
            Some(profile) => Ok(profile),
            None => bail!("unknown route '{path}'"),
        }
    }

    /// Registered paths, sorted
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::site()
    }
}

/// One loaded page
#[derive(Debug, Clone)]
pub struct SimPage {
    route: RouteProfile,
    viewport_width: f32,
    viewport_height: f32,
    offset: f32,
    locked: bool,
    has_scroll_container: bool,
}

impl SimPage {
    pub fn load(route: RouteProfile, viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            route,
            viewport_width,
            viewport_height,
            offset: 0.0,
            locked: false,
            has_scroll_container: true,
        }
    }

    /// Page whose scroll container is missing
    pub fn without_scroll_container(mut self) -> Self {
        self.has_scroll_container = false;
        self
    }

    pub fn route(&self) -> &str {
        &self.route.path
    }

    pub fn viewport(&self) -> (f32, f32) {
        (self.viewport_width, self.viewport_height)
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn max_offset(&self) -> f32 {
        (self.route.content_height - self.viewport_height).max(0.0)
    }

    /// Scroll as the user would (wheel/touch). Ignored while locked.
    pub fn user_scroll(&mut self, offset: f32) -> bool {
        if self.locked || !self.has_scroll_container {
            return false;
        }
        self.offset = offset.clamp(0.0, self.max_offset());
        true
    }
}

impl ScrollHost for SimPage {
    fn scroll_offset(&self) -> Option<f32> {
        self.has_scroll_container.then_some(self.offset)
    }

    fn scroll_to(&mut self, offset: f32) -> bool {
        if self.locked || !self.has_scroll_container {
            return false;
        }
        self.offset = offset.clamp(0.0, self.max_offset());
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_routes() {
        let table = RouteTable::site();
        assert_eq!(table.paths(), vec!["/", "/kontakt"]);
        assert!(table.get("/impressum").is_err());
    }

    #[test]
    fn test_scroll_clamps_to_content() {
        let mut page = SimPage::load(RouteProfile::new("/", 2000.0), 390.0, 844.0);
        page.user_scroll(5000.0);
        assert_eq!(page.scroll_offset(), Some(1156.0));
        page.user_scroll(-20.0);
        assert_eq!(page.scroll_offset(), Some(0.0));
    }

    #[test]
    fn test_lock_pins_page_and_blocks_scroll() {
        let mut page = SimPage::load(RouteProfile::new("/", 7200.0), 390.0, 844.0);
        page.user_scroll(1800.0);
        page.set_scroll_locked(true);

        assert_eq!(page.scroll_offset(), Some(0.0));
        assert!(!page.user_scroll(400.0));
        assert!(!page.scroll_to(1800.0));

        page.set_scroll_locked(false);
        assert_eq!(page.scroll_offset(), Some(0.0));
        assert!(page.scroll_to(1800.0));
    }

    #[test]
    fn test_missing_container() {
        let mut page =
            SimPage::load(RouteProfile::new("/", 7200.0), 390.0, 844.0).without_scroll_container();
        assert_eq!(page.scroll_offset(), None);
        assert!(!page.user_scroll(100.0));
    }
}
