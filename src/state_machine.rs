//! Flow page state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::{Event, RequestKind};
pub use state::{PageState, DEFAULT_FLOW_ID};
pub use transition::{is_final_message, transition, TransitionError};
