//! Per-session chat state
//!
//! Holds the transcript, the opaque conversation state round-tripped with the
//! RAG backend, and the selected platform for a single user session.

mod message;
mod platform;
mod state;
mod store;

pub use message::{Message, Role};
pub use platform::{Platform, UnknownPlatform};
pub use state::ConversationState;
pub use store::{PendingAction, SessionError, SessionStore};
