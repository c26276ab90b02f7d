//! Session state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions: the
//! runtime feeds events in and carries out the effects that come back.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::FormPhase;
pub use transition::{transition, TransitionError};
