//! Overnav Navigation Overlay
//!
//! Controller for a mobile navigation overlay. Opening the overlay saves
//! where the page was scrolled and locks background scrolling; closing it
//! releases the lock and puts the page back where it was.
//!
//! - [`OverlayNavController`]: the two-state controller (`closed` / `open`)
//! - [`ScrollHost`]: seam to the host document's scroll container
//! - [`NavConfig`]: `overnav.toml` settings
//!
//! Requests are idempotent: opening an open overlay or closing a closed one
//! changes nothing.

pub mod config;
pub mod controller;
pub mod error;
pub mod scroll;
pub mod state;

pub use config::NavConfig;
pub use controller::{OverlayNavController, SubscriptionId, TransitionTiming};
pub use error::{NavError, Result};
pub use scroll::{NoScrollContainer, ScrollAnchor, ScrollHost, ScrollLock};
pub use state::{Control, NavAttributes, NavRequest, NavigationState};
