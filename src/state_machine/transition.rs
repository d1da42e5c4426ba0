//! Pure state transition function

use super::event::RequestKind;
use super::{Effect, Event, PageState};
use crate::flow::{FlowResult, Message, MessageType, SimulateParams};
use crate::view::InputSlot;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: PageState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: PageState) -> Self {
        Self {
            new_state: state,
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
    #[error("Still waiting for the previous answer")]
    AdvancePending,
    #[error("The flow is not waiting for input")]
    NotAwaitingInput,
    #[error("This step expects a choice, not free text")]
    ExpectedChoice,
    #[error("This step expects free text, not a choice")]
    ExpectedText,
    #[error("Message cannot be empty")]
    EmptyMessage,
    #[error("No choice number {0}")]
    ChoiceOutOfRange(usize),
    #[error("Response for superseded session {0}")]
    StaleResponse(u64),
}

/// Whether a batch of flow messages hands control back to the user.
///
/// Only a batch of several plain `message` entries keeps the flow talking;
/// a single message, an empty batch, or any prompt-type entry stops it.
pub fn is_final_message(messages: &[Message]) -> bool {
    !(messages.len() > 1 && messages.iter().all(|m| m.kind == MessageType::Message))
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs, with no I/O.
pub fn transition(state: &PageState, event: Event) -> Result<TransitionResult, TransitionError> {
    match event {
        Event::Mount => Ok(TransitionResult::new(state.clone())
            .with_effect(Effect::init_flow(state.session, state.flow_id))),

        Event::SwitchFlow { flow_id } => {
            let new_state = PageState {
                flow_id,
                session: state.session + 1,
                message_feed: Vec::new(),
                is_awaiting_user_input: true,
                advance_pending: false,
                ..state.clone()
            };
            let session = new_state.session;
            Ok(TransitionResult::new(new_state)
                .with_effect(Effect::init_flow(session, flow_id))
                .with_effect(Effect::Render))
        }

        Event::SubmitText { text } => {
            check_accepting_input(state)?;
            match state.input_slot() {
                InputSlot::TextInput => {}
                InputSlot::MultipleChoice { .. } => return Err(TransitionError::ExpectedChoice),
                InputSlot::Empty | InputSlot::ThankYou => {
                    return Err(TransitionError::NotAwaitingInput)
                }
            }
            let text = text.trim();
            if text.is_empty() {
                return Err(TransitionError::EmptyMessage);
            }
            Ok(submit(state, text.to_string()))
        }

        Event::SelectChoice { index } => {
            check_accepting_input(state)?;
            let label = match state.input_slot() {
                InputSlot::MultipleChoice { responses } => responses
                    .get(index)
                    .map(|choice| choice.label().into_owned())
                    .ok_or(TransitionError::ChoiceOutOfRange(index + 1))?,
                InputSlot::TextInput => return Err(TransitionError::ExpectedText),
                InputSlot::Empty | InputSlot::ThankYou => {
                    return Err(TransitionError::NotAwaitingInput)
                }
            };
            Ok(submit(state, label))
        }

        Event::FlowLoaded { session, result } => {
            check_session(state, session)?;
            Ok(TransitionResult::new(apply_init(state, result)).with_effect(Effect::Render))
        }

        Event::FlowAdvanced { session, result } => {
            check_session(state, session)?;
            Ok(TransitionResult::new(apply_advance(state, result)).with_effect(Effect::Render))
        }

        Event::RequestFailed {
            session,
            request,
            message,
        } => {
            check_session(state, session)?;
            let mut new_state = state.clone();
            let message = match request {
                RequestKind::Init => format!("Could not load flow {}: {message}", state.flow_id),
                RequestKind::Simulate => {
                    // Drop the unanswered echo and give the widget back so the
                    // answer can be resent.
                    if new_state
                        .message_feed
                        .last()
                        .is_some_and(|m| m.kind == MessageType::UserReply)
                    {
                        new_state.message_feed.pop();
                    }
                    new_state.advance_pending = false;
                    new_state.is_awaiting_user_input = true;
                    format!("Could not send your answer: {message}")
                }
            };
            Ok(TransitionResult::new(new_state)
                .with_effect(Effect::report_error(message))
                .with_effect(Effect::Render))
        }
    }
}

fn check_accepting_input(state: &PageState) -> Result<(), TransitionError> {
    if state.advance_pending {
        return Err(TransitionError::AdvancePending);
    }
    if !state.is_awaiting_user_input || state.message_feed.is_empty() {
        return Err(TransitionError::NotAwaitingInput);
    }
    Ok(())
}

fn check_session(state: &PageState, session: u64) -> Result<(), TransitionError> {
    if session == state.session {
        Ok(())
    } else {
        Err(TransitionError::StaleResponse(session))
    }
}

/// Echo the reply into the feed and ask the server for the next step
fn submit(state: &PageState, message: String) -> TransitionResult {
    let mut new_state = state.clone();
    new_state.message_feed.push(Message::user_reply(message.clone()));
    new_state.advance_pending = true;
    new_state.is_awaiting_user_input = false;

    let params = SimulateParams {
        flow_id: state.flow_id,
        member: state.member.clone(),
        start_index: state.cursor_index,
        message,
    };
    TransitionResult::new(new_state)
        .with_effect(Effect::SimulateFlow {
            session: state.session,
            params,
        })
        .with_effect(Effect::Render)
}

/// Replace the page content with a freshly loaded flow
pub fn apply_init(state: &PageState, result: FlowResult) -> PageState {
    PageState {
        flow_header: result.flow_name.unwrap_or_default(),
        scripted_messages: result.messages.clone(),
        message_feed: result.messages,
        cursor_index: result.stop_index.saturating_add(1),
        ..state.clone()
    }
}

/// Merge the incremental messages of a simulate response
pub fn apply_advance(state: &PageState, result: FlowResult) -> PageState {
    let mut new_state = state.clone();
    new_state.advance_pending = false;
    new_state.is_awaiting_user_input = is_final_message(&result.messages);
    if let Some(member) = result.member {
        new_state.member = member;
    }
    if !result.messages.is_empty() {
        new_state.cursor_index = result.stop_index.saturating_add(1);
        new_state.scripted_messages.extend(result.messages.iter().cloned());
        new_state.message_feed.extend(result.messages);
    }
    new_state
}
