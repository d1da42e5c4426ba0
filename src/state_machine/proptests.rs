//! Property-based tests for the page state machine
//!
//! These tests verify the reconciliation invariants hold across all inputs.

use super::transition::{apply_advance, apply_init};
use super::*;
use crate::flow::{Choice, FlowResult, Member, Message, MessageType};
use crate::view::InputSlot;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_message_type() -> impl Strategy<Value = MessageType> {
    prop_oneof![
        4 => Just(MessageType::Message),
        1 => Just(MessageType::GetInfo),
        1 => Just(MessageType::MultipleChoice),
        1 => "[a-z]{3,8}".prop_map(MessageType::from),
    ]
}

fn arb_choice() -> impl Strategy<Value = Choice> {
    "[A-Za-z]{1,10}".prop_map(Choice::Label)
}

fn arb_message() -> impl Strategy<Value = Message> {
    (
        arb_message_type(),
        "[a-zA-Z ?!]{0,30}",
        proptest::collection::vec(arb_choice(), 0..4),
    )
        .prop_map(|(kind, text, responses)| Message {
            kind,
            text: Some(text),
            responses,
            ..Message::default()
        })
}

fn arb_plain_messages(range: std::ops::Range<usize>) -> impl Strategy<Value = Vec<Message>> {
    proptest::collection::vec(
        "[a-z ]{0,20}".prop_map(|text| Message::new(MessageType::Message, text)),
        range,
    )
}

fn arb_member() -> impl Strategy<Value = Member> {
    (proptest::option::of(1i64..1000), "[a-z]{1,10}", any::<bool>()).prop_map(
        |(id, name, is_subscribed)| Member {
            id,
            name,
            is_subscribed,
            ..Member::default()
        },
    )
}

fn arb_flow_result() -> impl Strategy<Value = FlowResult> {
    (
        proptest::option::of("[A-Za-z ]{1,20}"),
        proptest::collection::vec(arb_message(), 0..6),
        0i64..500,
        proptest::option::of(arb_member()),
    )
        .prop_map(|(flow_name, messages, stop_index, member)| FlowResult {
            flow_name,
            messages,
            stop_index,
            member,
        })
}

/// A page that has loaded a flow and possibly advanced a few times
fn arb_page_state() -> impl Strategy<Value = PageState> {
    (
        1u64..20,
        0u64..5,
        arb_flow_result(),
        proptest::collection::vec(arb_flow_result(), 0..4),
    )
        .prop_map(|(flow_id, session, init, advances)| {
            let page = PageState {
                session,
                ..PageState::new(flow_id)
            };
            advances
                .into_iter()
                .fold(apply_init(&page, init), |state, result| {
                    apply_advance(&state, result)
                })
        })
}

// ============================================================================
// isFinalMessage
// ============================================================================

proptest! {
    #[test]
    fn prop_short_batches_are_final(messages in proptest::collection::vec(arb_message(), 0..=1)) {
        prop_assert!(is_final_message(&messages));
    }

    #[test]
    fn prop_plain_batches_keep_talking(messages in arb_plain_messages(2..8)) {
        prop_assert!(!is_final_message(&messages));
    }

    #[test]
    fn prop_any_prompt_makes_batch_final(
        mut messages in arb_plain_messages(1..8),
        prompt in arb_message().prop_filter("non-message type", |m| m.kind != MessageType::Message),
        position in any::<prop::sample::Index>(),
    ) {
        let at = position.index(messages.len() + 1);
        messages.insert(at, prompt);
        prop_assert!(is_final_message(&messages));
    }
}

// ============================================================================
// Reconciliation
// ============================================================================

proptest! {
    #[test]
    fn prop_advance_moves_cursor_and_grows_feed(
        state in arb_page_state(),
        result in arb_flow_result(),
    ) {
        let feed_before = state.message_feed.len();
        let scripted_before = state.scripted_messages.len();
        let event = Event::FlowAdvanced { session: state.session, result: result.clone() };
        let new_state = transition(&state, event).unwrap().new_state;

        prop_assert_eq!(new_state.is_awaiting_user_input, is_final_message(&result.messages));
        prop_assert!(!new_state.advance_pending);

        if result.messages.is_empty() {
            prop_assert_eq!(new_state.cursor_index, state.cursor_index);
            prop_assert_eq!(new_state.message_feed.len(), feed_before);
        } else {
            prop_assert_eq!(new_state.cursor_index, result.stop_index + 1);
            prop_assert_eq!(new_state.message_feed.len(), feed_before + result.messages.len());
            prop_assert_eq!(
                new_state.scripted_messages.len(),
                scripted_before + result.messages.len()
            );
            prop_assert_eq!(&new_state.message_feed[feed_before..], &result.messages[..]);
        }

        match result.member {
            Some(member) => prop_assert_eq!(new_state.member, member),
            None => prop_assert_eq!(new_state.member, state.member),
        }
    }

    #[test]
    fn prop_advance_never_rewrites_history(
        state in arb_page_state(),
        result in arb_flow_result(),
    ) {
        let event = Event::FlowAdvanced { session: state.session, result };
        let new_state = transition(&state, event).unwrap().new_state;
        prop_assert!(new_state.message_feed.starts_with(&state.message_feed));
        prop_assert!(new_state.scripted_messages.starts_with(&state.scripted_messages));
    }

    #[test]
    fn prop_reload_replaces_collections(
        state in arb_page_state(),
        result in arb_flow_result(),
    ) {
        let event = Event::FlowLoaded { session: state.session, result: result.clone() };
        let new_state = transition(&state, event).unwrap().new_state;

        prop_assert_eq!(&new_state.message_feed, &result.messages);
        prop_assert_eq!(&new_state.scripted_messages, &result.messages);
        prop_assert_eq!(new_state.cursor_index, result.stop_index + 1);
        prop_assert_eq!(new_state.flow_header, result.flow_name.unwrap_or_default());
    }

    #[test]
    fn prop_stale_responses_change_nothing(
        state in arb_page_state(),
        result in arb_flow_result(),
        offset in 1u64..10,
        advanced in any::<bool>(),
    ) {
        let session = state.session.wrapping_add(offset);
        let event = if advanced {
            Event::FlowAdvanced { session, result }
        } else {
            Event::FlowLoaded { session, result }
        };
        prop_assert_eq!(
            transition(&state, event).unwrap_err(),
            TransitionError::StaleResponse(session)
        );
    }

    #[test]
    fn prop_input_slot_follows_last_message(state in arb_page_state()) {
        let slot = state.input_slot();
        match state.message_feed.last() {
            None => prop_assert_eq!(slot, InputSlot::Empty),
            Some(_) if !state.is_awaiting_user_input => prop_assert_eq!(slot, InputSlot::Empty),
            Some(last) => match &last.kind {
                MessageType::Message | MessageType::GetInfo => {
                    prop_assert_eq!(slot, InputSlot::TextInput);
                }
                MessageType::MultipleChoice => {
                    prop_assert_eq!(slot, InputSlot::MultipleChoice { responses: last.responses.clone() });
                }
                _ => prop_assert_eq!(slot, InputSlot::ThankYou),
            },
        }
    }

    #[test]
    fn prop_accepted_submission_targets_cursor(state in arb_page_state(), text in "[a-z]{1,12}") {
        let event = Event::SubmitText { text: text.clone() };
        if let Ok(result) = transition(&state, event) {
            prop_assert_eq!(state.input_slot(), InputSlot::TextInput);
            prop_assert!(result.new_state.advance_pending);
            prop_assert_eq!(result.new_state.message_feed.len(), state.message_feed.len() + 1);
            let simulated = result.effects.iter().find_map(|effect| match effect {
                Effect::SimulateFlow { params, .. } => Some(params.clone()),
                _ => None,
            });
            let params = simulated.unwrap();
            prop_assert_eq!(params.start_index, state.cursor_index);
            prop_assert_eq!(params.message, text);
            prop_assert_eq!(params.member, state.member);
        }
    }
}
