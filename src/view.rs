//! Render selection for the flow page

use crate::flow::{Choice, FlowId, Member, Message, MessageType};

/// Shown once the flow ends on a message the user cannot answer
pub const THANK_YOU_TEXT: &str = "（ ^_^）Thank you for your submission!（^_^ ）";

/// What goes in the input area below the feed
#[derive(Debug, Clone, PartialEq)]
pub enum InputSlot {
    /// Nothing to show
    Empty,
    /// Free-text box
    TextInput,
    /// Choice list built from the last message's `responses`
    MultipleChoice { responses: Vec<Choice> },
    /// Terminal thank-you text
    ThankYou,
}

/// Pick the input widget from the last message in the feed.
pub fn select_input(feed: &[Message], is_awaiting_user_input: bool) -> InputSlot {
    let Some(last) = feed.last() else {
        return InputSlot::Empty;
    };
    if !is_awaiting_user_input {
        return InputSlot::Empty;
    }
    match &last.kind {
        MessageType::Message | MessageType::GetInfo => InputSlot::TextInput,
        MessageType::MultipleChoice => InputSlot::MultipleChoice {
            responses: last.responses.clone(),
        },
        MessageType::UserReply | MessageType::Other(_) => InputSlot::ThankYou,
    }
}

/// Snapshot of the page handed to the front end after every change
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub flow_id: FlowId,
    pub flow_header: String,
    pub feed: Vec<Message>,
    pub input: InputSlot,
    pub member: Member,
    pub advance_pending: bool,
}
