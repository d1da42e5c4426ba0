//! Effects produced by state transitions

use crate::flow::{FlowId, Member, SimulateParams};

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch the initial state of a flow
    InitFlow {
        session: u64,
        flow_id: FlowId,
        member: Member,
    },

    /// Submit user input to the flow
    SimulateFlow { session: u64, params: SimulateParams },

    /// Redraw the page from the new state
    Render,

    /// Tell the user something went wrong
    ReportError { message: String },
}

impl Effect {
    pub fn init_flow(session: u64, flow_id: FlowId) -> Self {
        // The page always loads a flow anonymously.
        Effect::InitFlow {
            session,
            flow_id,
            member: Member::default(),
        }
    }

    pub fn report_error(message: impl Into<String>) -> Self {
        Effect::ReportError {
            message: message.into(),
        }
    }
}
