//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::*;
use crate::form::ValidationError;
use crate::rag::ChatReply;
use crate::session::{ConversationState, Message, Platform, Role, SessionStore};
use proptest::prelude::*;
use serde_json::{json, Map, Value};
use std::collections::HashMap;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_platform() -> impl Strategy<Value = Platform> {
    prop_oneof![Just(Platform::ServicePublic), Just(Platform::Voyage)]
}

fn arb_message() -> impl Strategy<Value = Message> {
    (any::<bool>(), "[a-zA-Z ]{1,30}").prop_map(|(user, content)| {
        if user {
            Message::user(content)
        } else {
            Message::assistant(content)
        }
    })
}

fn arb_json_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9 ]{0,20}".prop_map(Value::String),
    ]
}

fn arb_state() -> impl Strategy<Value = ConversationState> {
    proptest::collection::vec(("[a-z_]{1,12}", arb_json_leaf()), 0..6).prop_map(|entries| {
        let map: Map<String, Value> = entries.into_iter().collect();
        ConversationState::from(map)
    })
}

/// Idle store: some platform, some transcript, some state, nothing pending
fn arb_store() -> impl Strategy<Value = SessionStore> {
    (
        arb_platform(),
        proptest::collection::vec(arb_message(), 0..8),
        arb_state(),
    )
        .prop_map(|(platform, messages, state)| {
            let mut store = SessionStore::initialize();
            store.set_platform(platform);
            for message in messages {
                store.append_message(message.role, message.content).unwrap();
            }
            store.replace_state(state);
            store
        })
}

/// Plain text field ids; `telephone` is left out since it has a format check
fn arb_field_ids() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::btree_set("[a-z]{3,10}", 1..5)
        .prop_filter("no format-checked ids", |ids| !ids.contains("telephone"))
        .prop_map(|ids| ids.into_iter().collect())
}

/// Store with an open form whose fields are all required
fn arb_open_form_store() -> impl Strategy<Value = (SessionStore, Vec<String>, bool)> {
    (arb_store(), arb_field_ids(), any::<bool>()).prop_map(|(mut store, ids, proof)| {
        let fields: Map<String, Value> = ids
            .iter()
            .map(|id| (id.clone(), json!({ "label": id.to_uppercase() })))
            .collect();
        let mut required: Vec<String> = ids.clone();
        if proof {
            required.push("captures_preuves".to_string());
        }
        let mut state = store.state().clone();
        state.set_show_ui_form(true);
        state.insert(
            "form_schema",
            json!({ "title": "T", "fields": fields, "required_fields": required }),
        );
        store.replace_state(state);
        (store, ids, proof)
    })
}

proptest! {
    /// Switching to a different platform always yields an empty transcript
    /// and a state holding only the new platform
    #[test]
    fn prop_platform_switch_resets(store in arb_store(), platform in arb_platform()) {
        prop_assume!(store.platform() != platform);

        let result = transition(&store, Event::PlatformSelected { platform }).unwrap();

        prop_assert!(result.store.messages().is_empty());
        prop_assert_eq!(result.store.state().keys().collect::<Vec<_>>(), vec!["platform"]);
        prop_assert_eq!(result.store.state().platform(), Some(platform.label()));
        prop_assert_eq!(result.store.platform(), platform);
        prop_assert_eq!(result.effects, vec![Effect::Rerender]);
    }

    /// Re-selecting the current platform leaves everything as it was
    #[test]
    fn prop_same_platform_noop(store in arb_store()) {
        let platform = store.platform();
        let result = transition(&store, Event::PlatformSelected { platform }).unwrap();
        prop_assert_eq!(result.store, store);
        prop_assert!(result.effects.is_empty());
    }

    /// Any empty required field blocks submission: errors, no request, no change
    #[test]
    fn prop_empty_required_field_blocks_submission(
        (store, ids, proof) in arb_open_form_store(),
        blank in any::<proptest::sample::Index>(),
    ) {
        let blank_id = ids[blank.index(ids.len())].clone();
        let values: HashMap<String, String> = ids
            .iter()
            .map(|id| {
                let value = if *id == blank_id { String::new() } else { "x".to_string() };
                (id.clone(), value)
            })
            .collect();

        let result = transition(&store, Event::FormSubmitted { values, images: vec![] }).unwrap();

        prop_assert_eq!(&result.store, &store);
        prop_assert_eq!(result.effects.len(), 1);
        let Effect::ShowValidationErrors { errors } = &result.effects[0] else {
            return Err(TestCaseError::fail("expected validation errors"));
        };
        let expected = if proof { 2 } else { 1 };
        prop_assert_eq!(errors.len(), expected);
        prop_assert!(errors.iter().any(|e| e.field() == blank_id));
        prop_assert_eq!(
            errors.contains(&ValidationError::MissingProof),
            proof
        );
    }

    /// Chat turns carry the transcript as it was before the new message
    #[test]
    fn prop_chat_history_excludes_new_message(store in arb_store(), text in "[a-zA-Z ]{1,30}") {
        let result = transition(&store, Event::UserMessage { text: text.clone() }).unwrap();

        let Effect::RequestChat { question, history, state, images_base64 } = &result.effects[0] else {
            return Err(TestCaseError::fail("expected RequestChat"));
        };
        prop_assert_eq!(question, &text);
        prop_assert_eq!(history.as_slice(), store.messages());
        prop_assert_eq!(state, store.state());
        prop_assert!(images_base64.is_none());
        prop_assert_eq!(result.store.messages().last(), Some(&Message::user(text)));
    }

    /// A reply replaces the state wholesale and appends exactly one bubble
    #[test]
    fn prop_reply_replaces_state(
        store in arb_store(),
        reply_state in arb_state(),
        answer in "[a-zA-Z ]{0,30}",
    ) {
        let pending = transition(&store, Event::UserMessage { text: "q".to_string() })
            .unwrap()
            .store;
        let reply = ChatReply::new(answer.clone(), reply_state.clone());

        let result = transition(&pending, Event::ReplyReceived { reply }).unwrap();

        prop_assert_eq!(result.store.state(), &reply_state);
        prop_assert_eq!(result.store.messages().len(), store.messages().len() + 2);
        let last = result.store.messages().last().unwrap();
        prop_assert_eq!(last.role, Role::Assistant);
        prop_assert_eq!(&last.content, &answer);
        prop_assert!(result.store.pending().is_none());
    }

    /// Nothing but a reply gets through while a request is pending
    #[test]
    fn prop_busy_rejects_user_events(store in arb_store(), platform in arb_platform()) {
        let pending = transition(&store, Event::UserMessage { text: "q".to_string() })
            .unwrap()
            .store;

        for event in [
            Event::UserMessage { text: "again".to_string() },
            Event::PlatformSelected { platform },
            Event::FormSubmitted { values: HashMap::new(), images: vec![] },
        ] {
            prop_assert_eq!(transition(&pending, event).unwrap_err(), TransitionError::Busy);
        }
    }
}
