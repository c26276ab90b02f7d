//! Service configuration
//!
//! Read once from the environment at startup. Every key has a default, so a
//! bare `gouv_bot` talks to the sandbox backend on port 8000.

use std::time::Duration;

const DEFAULT_RAG_URL: &str = "https://chat-services.sandbox.gouv.tg/rag-chat";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_TIMEOUT_SECS: u64 = 300;
const DEFAULT_SESSION_IDLE_SECS: u64 = 3600;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// RAG chat endpoint (`GOUV_BOT_RAG_URL`)
    pub rag_url: String,
    /// Listen port (`GOUV_BOT_PORT`)
    pub port: u16,
    /// Outbound request timeout (`GOUV_BOT_TIMEOUT_SECS`)
    pub request_timeout: Duration,
    /// Idle time after which a session is ended (`GOUV_BOT_SESSION_IDLE_SECS`)
    pub session_idle_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rag_url: DEFAULT_RAG_URL.to_string(),
            port: DEFAULT_PORT,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session_idle_timeout: Duration::from_secs(DEFAULT_SESSION_IDLE_SECS),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            rag_url: lookup("GOUV_BOT_RAG_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.rag_url),
            port: lookup("GOUV_BOT_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            request_timeout: lookup("GOUV_BOT_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .map_or(defaults.request_timeout, Duration::from_secs),
            session_idle_timeout: lookup("GOUV_BOT_SESSION_IDLE_SECS")
                .and_then(|s| s.parse().ok())
                .map_or(defaults.session_idle_timeout, Duration::from_secs),
        }
    }
}
