//! Navigation state, requests, and observable attributes

use std::fmt;

/// Open/closed state of the navigation overlay
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NavigationState {
    /// Overlay hidden, page interactive (initial)
    #[default]
    Closed,
    /// Overlay shown, background scroll locked
    Open,
}

impl NavigationState {
    /// Value of the `data-state` attribute
    pub fn as_str(self) -> &'static str {
        match self {
            NavigationState::Closed => "closed",
            NavigationState::Open => "open",
        }
    }

    /// Parse a `data-state` attribute value
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "closed" => Some(NavigationState::Closed),
            "open" => Some(NavigationState::Open),
            _ => None,
        }
    }

    pub fn is_open(self) -> bool {
        self == NavigationState::Open
    }
}

impl fmt::Display for NavigationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request sent to the navigation state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavRequest {
    Open,
    Close,
}

/// Controls the overlay listens to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    /// The "Open menu" button in the page header
    OpenMenu,
    /// The "Close menu" button inside the overlay
    CloseMenu,
    /// The dimmed area behind the overlay panel
    Backdrop,
}

impl Control {
    pub const ALL: [Control; 3] = [Control::OpenMenu, Control::CloseMenu, Control::Backdrop];

    /// Event target id for this control
    pub fn id(self) -> u64 {
        match self {
            Control::OpenMenu => 1,
            Control::CloseMenu => 2,
            Control::Backdrop => 3,
        }
    }

    /// Element id used by hosts and diagnostics
    pub fn name(self) -> &'static str {
        match self {
            Control::OpenMenu => "open-menu",
            Control::CloseMenu => "close-menu",
            Control::Backdrop => "backdrop",
        }
    }

    /// Accessible label
    pub fn label(self) -> &'static str {
        match self {
            Control::OpenMenu => "Open menu",
            Control::CloseMenu => "Close menu",
            Control::Backdrop => "Dismiss menu",
        }
    }

    pub fn from_id(id: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    /// Look up a control by element id or accessible label
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == name || c.label().eq_ignore_ascii_case(name))
    }
}

/// Attribute name carrying the overlay state
pub const DATA_STATE: &str = "data-state";
/// Attribute on the open control
pub const ARIA_EXPANDED: &str = "aria-expanded";
/// Attribute on the overlay panel
pub const ARIA_HIDDEN: &str = "aria-hidden";

/// Externally observable attributes of the overlay
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavAttributes {
    pub state: NavigationState,
    /// Overlay panel is rendered (false until the reveal frame)
    pub visible: bool,
}

impl NavAttributes {
    pub fn data_state(&self) -> &'static str {
        self.state.as_str()
    }

    pub fn aria_expanded(&self) -> &'static str {
        if self.state.is_open() {
            "true"
        } else {
            "false"
        }
    }

    pub fn aria_hidden(&self) -> &'static str {
        if self.visible {
            "false"
        } else {
            "true"
        }
    }

    /// Attribute lookup by name
    pub fn get(&self, name: &str) -> Option<&'static str> {
        match name {
            DATA_STATE => Some(self.data_state()),
            ARIA_EXPANDED => Some(self.aria_expanded()),
            ARIA_HIDDEN => Some(self.aria_hidden()),
            _ => None,
        }
    }

    /// All attributes as (name, value) pairs
    pub fn pairs(&self) -> [(&'static str, &'static str); 3] {
        [
            (DATA_STATE, self.data_state()),
            (ARIA_EXPANDED, self.aria_expanded()),
            (ARIA_HIDDEN, self.aria_hidden()),
        ]
    }
}
