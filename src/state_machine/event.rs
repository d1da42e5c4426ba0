//! Events that can occur on the flow page

use crate::flow::{FlowId, FlowResult};

/// Which server call a response belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Init,
    Simulate,
}

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    // Page events
    /// The page was displayed; load the current flow
    Mount,

    // User events
    /// Picked another flow in the chooser
    SwitchFlow { flow_id: FlowId },
    /// Free text typed into the text widget
    SubmitText { text: String },
    /// Index into the `responses` of the last message
    SelectChoice { index: usize },

    // Server events
    FlowLoaded {
        session: u64,
        result: FlowResult,
    },
    FlowAdvanced {
        session: u64,
        result: FlowResult,
    },
    RequestFailed {
        session: u64,
        request: RequestKind,
        message: String,
    },
}
