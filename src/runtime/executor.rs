//! Session executor
//!
//! Applies transitions and carries out their effects. The only effect with
//! I/O is `RequestChat`, whose reply is fed straight back in as the next
//! event, so one `dispatch` covers a whole interaction.

use super::SessionSnapshot;
use crate::form::ValidationError;
use crate::rag::ChatTransport;
use crate::session::{PendingAction, SessionStore};
use crate::state_machine::{transition, Effect, Event, TransitionError};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// What an interaction produced besides the new store
#[derive(Debug, Default)]
pub struct Outcome {
    /// Non-empty when a form submission was rejected locally
    pub validation_errors: Vec<ValidationError>,
    /// Number of backend round trips made
    pub requests: usize,
}

pub struct SessionRuntime {
    id: String,
    store: SessionStore,
    transport: ChatTransport,
    last_active: Instant,
}

impl SessionRuntime {
    pub fn new(id: String, transport: ChatTransport) -> Self {
        Self {
            id,
            store: SessionStore::initialize(),
            transport,
            last_active: Instant::now(),
        }
    }

    /// Mark the session as used by its owner
    pub fn touch(&mut self) {
        self.last_active = Instant::now();
    }

    pub fn idle_for(&self) -> Duration {
        self.last_active.elapsed()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id.clone(),
            store: self.store.clone(),
        }
    }

    pub async fn dispatch(&mut self, event: Event) -> Result<Outcome, TransitionError> {
        let mut outcome = Outcome::default();
        let mut queue = VecDeque::from([event]);

        while let Some(event) = queue.pop_front() {
            let kind = event.kind();
            let result = transition(&self.store, event)?;
            self.store = result.store;

            tracing::debug!(
                session = %self.id,
                event = kind,
                effects = result.effects.len(),
                messages = self.store.messages().len(),
                state_keys = self.store.state().len(),
                "Transition applied"
            );

            for effect in result.effects {
                if let Some(next) = self.execute(effect, &mut outcome).await {
                    queue.push_back(next);
                }
            }
        }

        Ok(outcome)
    }

    async fn execute(&self, effect: Effect, outcome: &mut Outcome) -> Option<Event> {
        match effect {
            Effect::RequestChat {
                question,
                history,
                state,
                images_base64,
            } => {
                tracing::info!(
                    session = %self.id,
                    platform = %self.store.platform(),
                    pending = self.store.pending().map_or("", PendingAction::as_str),
                    "Sending chat request"
                );
                outcome.requests += 1;
                let reply = self
                    .transport
                    .send(
                        self.store.platform(),
                        &question,
                        &history,
                        state,
                        images_base64,
                    )
                    .await;
                Some(Event::ReplyReceived { reply })
            }
            Effect::ShowValidationErrors { errors } => {
                tracing::info!(
                    session = %self.id,
                    errors = errors.len(),
                    "Form submission rejected by validation"
                );
                outcome.validation_errors.extend(errors);
                None
            }
            Effect::Rerender => None,
        }
    }
}
