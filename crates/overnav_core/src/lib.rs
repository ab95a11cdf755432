//! Overnav Core Runtime
//!
//! This crate provides the foundational primitives for the overnav controller:
//!
//! - **State Machines**: flat statecharts with guards for UI states
//! - **Event Dispatch**: platform-neutral input events and handlers
//! - **Frame Continuations**: single-tick deferred work driven by the host frame loop
//!
//! # Example
//!
//! ```rust
//! use overnav_core::fsm::{StateMachine, Transition};
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! enum Door { Shut, Ajar }
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! enum Push { Open, Close }
//!
//! let mut fsm = StateMachine::new(
//!     Door::Shut,
//!     vec![
//!         Transition::new(Door::Shut, Push::Open, Door::Ajar),
//!         Transition::new(Door::Ajar, Push::Close, Door::Shut),
//!     ],
//! );
//!
//! assert!(fsm.send(Push::Open).is_some());
//! // Already open: nothing fires
//! assert!(fsm.send(Push::Open).is_none());
//! assert_eq!(fsm.current_state(), Door::Ajar);
//! ```

pub mod error;
pub mod events;
pub mod frame;
pub mod fsm;

pub use error::{CoreError, Result};
pub use events::{Event, EventData, EventDispatcher, EventType, KeyCode};
pub use frame::{FrameCallbackId, FrameInfo, FrameScheduler};
pub use fsm::{StateMachine, Transition, TransitionRecord};
