//! Scroll host seam, scroll anchor and background scroll lock
//!
//! The host document owns the scroll container; the controller only reads
//! and writes it through [`ScrollHost`]. A host without a scroll container
//! reports `None` from [`ScrollHost::scroll_offset`], which turns capture
//! and restore into no-ops.

/// Vertical scroll container of the host document
pub trait ScrollHost {
    /// Current vertical offset, or `None` when there is no scroll container
    fn scroll_offset(&self) -> Option<f32>;

    /// Scroll to `offset`. Returns false when the host could not apply it.
    fn scroll_to(&mut self, offset: f32) -> bool;

    /// Lock or unlock background (page) scrolling
    fn set_scroll_locked(&mut self, locked: bool);

    fn is_scroll_locked(&self) -> bool;
}

/// Host with no scroll container at all
#[derive(Clone, Copy, Debug, Default)]
pub struct NoScrollContainer;

impl ScrollHost for NoScrollContainer {
    fn scroll_offset(&self) -> Option<f32> {
        None
    }

    fn scroll_to(&mut self, _offset: f32) -> bool {
        false
    }

    fn set_scroll_locked(&mut self, _locked: bool) {}

    fn is_scroll_locked(&self) -> bool {
        false
    }
}

/// Scroll offset saved before the overlay covers the page
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollAnchor {
    offset: f32,
}

impl ScrollAnchor {
    pub fn new(offset: f32) -> Self {
        Self { offset }
    }

    /// Capture the host's current offset (`None` without a scroll container)
    pub fn capture<H: ScrollHost + ?Sized>(host: &H) -> Option<Self> {
        let offset = host.scroll_offset()?;
        if !offset.is_finite() {
            tracing::warn!(offset, "ignoring non-finite scroll offset");
            return None;
        }
        Some(Self { offset })
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Reapply the saved offset
    pub fn restore<H: ScrollHost + ?Sized>(&self, host: &mut H) -> bool {
        if host.scroll_offset().is_none() {
            return false;
        }
        host.scroll_to(self.offset)
    }
}

/// Tracks whether this controller holds the background scroll lock
#[derive(Debug, Default)]
pub struct ScrollLock {
    engaged: bool,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock background scrolling; no-op when already held
    pub fn engage<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        if self.engaged {
            return;
        }
        host.set_scroll_locked(true);
        self.engaged = true;
    }

    /// Release the lock; no-op when not held
    pub fn release<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        if !self.engaged {
            return;
        }
        host.set_scroll_locked(false);
        self.engaged = false;
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }
}
