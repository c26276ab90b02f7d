//! HTTP API for the chat widget
//!
//! JSON endpoints driving sessions, plus the embedded single-page UI.

mod assets;
mod handlers;
mod markdown;
mod types;

pub use handlers::create_router;

use crate::rag::ChatTransport;
use crate::runtime::SessionManager;
use std::sync::Arc;
use std::time::Duration;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionManager>,
}

impl AppState {
    pub fn new(transport: ChatTransport, session_idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(SessionManager::new(transport, session_idle_timeout)),
        }
    }
}
