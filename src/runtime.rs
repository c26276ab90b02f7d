//! Runtime for executing sessions
//!
//! Every session is owned by exactly one `SessionRuntime`, kept behind its
//! own async mutex. An interaction holds that mutex from the user event
//! until the backend reply has been merged, so at most one request per
//! session is ever in flight.

mod executor;

pub use executor::{Outcome, SessionRuntime};

use crate::rag::ChatTransport;
use crate::session::SessionStore;
use crate::state_machine::{Event, TransitionError};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Session not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("Session task failed: {0}")]
    Task(String),
}

/// Copy of a session's store taken after an interaction
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub id: String,
    pub store: SessionStore,
}

/// Registry of all live sessions
pub struct SessionManager {
    transport: ChatTransport,
    idle_timeout: Duration,
    sessions: RwLock<HashMap<String, Arc<Mutex<SessionRuntime>>>>,
}

impl SessionManager {
    pub fn new(transport: ChatTransport, idle_timeout: Duration) -> Self {
        Self {
            transport,
            idle_timeout,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Start a fresh session, ending any that sat idle past the timeout
    pub async fn create(&self) -> SessionSnapshot {
        let id = uuid::Uuid::new_v4().to_string();
        let runtime = SessionRuntime::new(id.clone(), self.transport.clone());
        let snapshot = runtime.snapshot();

        let (active, expired) = {
            let mut sessions = self.sessions.write().await;
            let expired = self.sweep_idle(&mut sessions);
            sessions.insert(id.clone(), Arc::new(Mutex::new(runtime)));
            (sessions.len(), expired)
        };
        tracing::info!(session = %id, active, expired, "Session created");

        snapshot
    }

    /// Drop sessions idle for longer than the timeout. A session that is
    /// locked is in use and always survives.
    fn sweep_idle(&self, sessions: &mut HashMap<String, Arc<Mutex<SessionRuntime>>>) -> usize {
        let before = sessions.len();
        sessions.retain(|_, session| match session.try_lock() {
            Ok(runtime) => runtime.idle_for() < self.idle_timeout,
            Err(_) => true,
        });
        before - sessions.len()
    }

    /// End a session explicitly
    pub async fn remove(&self, id: &str) -> Result<(), RuntimeError> {
        if self.sessions.write().await.remove(id).is_none() {
            return Err(RuntimeError::NotFound(id.to_string()));
        }
        tracing::info!(session = %id, "Session ended");
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Arc<Mutex<SessionRuntime>>, RuntimeError> {
        self.sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| RuntimeError::NotFound(id.to_string()))
    }

    /// Current store. Waits for an in-flight interaction to finish.
    pub async fn snapshot(&self, id: &str) -> Result<SessionSnapshot, RuntimeError> {
        let session = self.get(id).await?;
        let mut runtime = session.lock().await;
        runtime.touch();
        Ok(runtime.snapshot())
    }

    /// Run one interaction to completion.
    ///
    /// A second interaction on a session that is already working is rejected
    /// with `Busy` instead of being queued. The work runs on its own task so
    /// a caller going away mid-request cannot leave the session half-updated.
    pub async fn dispatch(
        &self,
        id: &str,
        event: Event,
    ) -> Result<(Outcome, SessionSnapshot), RuntimeError> {
        let session = self.get(id).await?;
        let Ok(mut runtime) = session.try_lock_owned() else {
            tracing::warn!(session = %id, event = event.kind(), "Session busy, rejecting event");
            return Err(TransitionError::Busy.into());
        };

        tokio::spawn(async move {
            runtime.touch();
            let result = runtime.dispatch(event).await;
            runtime.touch();
            Ok::<_, RuntimeError>((result?, runtime.snapshot()))
        })
        .await
        .map_err(|e| RuntimeError::Task(e.to_string()))?
    }
}
