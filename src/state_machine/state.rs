//! Page state types

use crate::flow::{FlowId, Member, Message};
use crate::view::{select_input, InputSlot, PageView};

/// Flow shown when no other flow is configured
pub const DEFAULT_FLOW_ID: FlowId = 1;

/// Everything the flow page holds in memory
#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    pub flow_id: FlowId,
    /// Bumped on every flow switch; responses for older sessions are dropped
    pub session: u64,
    pub flow_header: String,
    /// Messages produced by the flow script, in order received
    pub scripted_messages: Vec<Message>,
    /// What the user sees: scripted messages interleaved with reply echoes
    pub message_feed: Vec<Message>,
    /// `stopIndex + 1` of the latest response; next call's `startIndex`
    pub cursor_index: i64,
    pub is_awaiting_user_input: bool,
    pub member: Member,
    /// A simulate call is in flight
    pub advance_pending: bool,
}

impl PageState {
    pub fn new(flow_id: FlowId) -> Self {
        Self {
            flow_id,
            session: 0,
            flow_header: String::new(),
            scripted_messages: Vec::new(),
            message_feed: Vec::new(),
            cursor_index: 0,
            is_awaiting_user_input: true,
            member: Member::guest(),
            advance_pending: false,
        }
    }

    /// Widget to show below the feed
    pub fn input_slot(&self) -> InputSlot {
        select_input(&self.message_feed, self.is_awaiting_user_input)
    }

    pub fn view(&self) -> PageView {
        PageView {
            flow_id: self.flow_id,
            flow_header: self.flow_header.clone(),
            feed: self.message_feed.clone(),
            input: self.input_slot(),
            member: self.member.clone(),
            advance_pending: self.advance_pending,
        }
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_FLOW_ID)
    }
}
