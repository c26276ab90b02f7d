//! Pure state transition function
//!
//! Given the same store and event this always produces the same outputs and
//! performs no I/O. Validation and image encoding happen here; the network
//! call is left to the runtime as an effect.

use super::{Effect, Event, FormPhase};
use crate::form::{
    encode_images, validate, FormSchema, FormValues, UploadedImage, FORM_SUBMISSION_QUESTION,
};
use crate::rag::ChatReply;
use crate::session::{PendingAction, Platform, Role, SessionError, SessionStore};
use std::collections::HashMap;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub store: SessionStore,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(store: SessionStore) -> Self {
        Self {
            store,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("A request is already in progress for this session")]
    Busy,
    #[error("No form is open")]
    NoFormOpen,
    #[error("No request is pending")]
    UnexpectedReply,
    #[error(transparent)]
    Session(#[from] SessionError),
}

pub fn transition(store: &SessionStore, event: Event) -> Result<TransitionResult, TransitionError> {
    match event {
        Event::ReplyReceived { reply } => reply_received(store, reply),
        // One interaction in flight at a time
        _ if store.pending().is_some() => Err(TransitionError::Busy),
        Event::PlatformSelected { platform } => platform_selected(store, platform),
        Event::UserMessage { text } => user_message(store, text),
        Event::FormSubmitted { values, images } => form_submitted(store, &values, images),
    }
}

fn platform_selected(
    store: &SessionStore,
    platform: Platform,
) -> Result<TransitionResult, TransitionError> {
    let mut next = store.clone();
    if next.set_platform(platform) {
        Ok(TransitionResult::new(next).with_effect(Effect::Rerender))
    } else {
        Ok(TransitionResult::new(next))
    }
}

/// Free text is forwarded untouched, with the transcript as it was before it.
fn user_message(store: &SessionStore, text: String) -> Result<TransitionResult, TransitionError> {
    let history = store.messages().to_vec();
    let mut next = store.clone();
    next.append_message(Role::User, text.clone())?;
    next.set_pending(Some(PendingAction::Chat));

    Ok(TransitionResult::new(next).with_effect(Effect::request_chat(
        text,
        history,
        store.state().clone(),
        None,
    )))
}

fn form_submitted(
    store: &SessionStore,
    submitted: &HashMap<String, String>,
    images: Vec<UploadedImage>,
) -> Result<TransitionResult, TransitionError> {
    if FormPhase::of(store.state()) == FormPhase::Idle {
        return Err(TransitionError::NoFormOpen);
    }

    let schema = FormSchema::from_state(store.state());
    let values = FormValues::collect(&schema, submitted);

    if let Err(errors) = validate(&schema, &values, images.len()) {
        return Ok(TransitionResult::new(store.clone())
            .with_effect(Effect::ShowValidationErrors { errors }));
    }

    // The local state keeps the form open until the backend says otherwise
    let mut outgoing = store.state().clone();
    outgoing.set_form_data(values.into_map());
    outgoing.set_show_ui_form(false);

    // No picker is rendered unless a proof is required
    let images_base64 = if schema.requires_proof() {
        encode_images(images)
    } else {
        None
    };

    let mut next = store.clone();
    next.set_pending(Some(PendingAction::FormSubmission));

    Ok(TransitionResult::new(next).with_effect(Effect::request_chat(
        FORM_SUBMISSION_QUESTION,
        store.messages().to_vec(),
        outgoing,
        images_base64,
    )))
}

fn reply_received(
    store: &SessionStore,
    reply: ChatReply,
) -> Result<TransitionResult, TransitionError> {
    if store.pending().is_none() {
        return Err(TransitionError::UnexpectedReply);
    }

    let mut next = store.clone();
    next.set_pending(None);
    next.replace_state(reply.state);
    next.append_message(Role::Assistant, reply.answer)?;

    Ok(TransitionResult::new(next).with_effect(Effect::Rerender))
}
