//! Flow page runtime executor

use super::PageUpdate;
use crate::flow::FlowApi;
use crate::state_machine::{transition, Effect, Event, PageState, RequestKind, TransitionError};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};

/// Owns the page state and runs the effects its transitions produce
pub struct PageRuntime<A>
where
    A: FlowApi + 'static,
{
    state: PageState,
    api: Arc<A>,
    event_rx: mpsc::Receiver<Event>,
    /// Weak so the loop ends once every handle and in-flight request is gone
    event_tx: mpsc::WeakSender<Event>,
    update_tx: broadcast::Sender<PageUpdate>,
}

impl<A> PageRuntime<A>
where
    A: FlowApi + 'static,
{
    pub fn new(
        state: PageState,
        api: Arc<A>,
        event_rx: mpsc::Receiver<Event>,
        event_tx: &mpsc::Sender<Event>,
        update_tx: broadcast::Sender<PageUpdate>,
    ) -> Self {
        Self {
            state,
            api,
            event_rx,
            event_tx: event_tx.downgrade(),
            update_tx,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(flow_id = self.state.flow_id, "Starting flow page runtime");

        self.process_event(Event::Mount);

        while let Some(event) = self.event_rx.recv().await {
            self.process_event(event);
        }

        tracing::info!(flow_id = self.state.flow_id, "Flow page runtime stopped");
    }

    fn process_event(&mut self, event: Event) {
        let result = match transition(&self.state, event) {
            Ok(r) => r,
            Err(TransitionError::StaleResponse(session)) => {
                tracing::debug!(
                    session,
                    current = self.state.session,
                    "Discarding response for superseded flow session"
                );
                return;
            }
            Err(e) => {
                // Rejected user input is user-facing (e.g. "still waiting")
                tracing::info!(error = %e, "Event rejected");
                let _ = self.update_tx.send(PageUpdate::Rejected {
                    message: e.to_string(),
                });
                return;
            }
        };

        self.state = result.new_state;

        for effect in result.effects {
            self.execute_effect(effect);
        }
    }

    /// Execute an effect. Requests run as background tasks and report back as events.
    fn execute_effect(&self, effect: Effect) {
        match effect {
            Effect::InitFlow {
                session,
                flow_id,
                member,
            } => {
                let Some(event_tx) = self.event_tx.upgrade() else {
                    return;
                };
                let api = self.api.clone();
                tokio::spawn(async move {
                    let event = match api.init_flow(flow_id, &member).await {
                        Ok(result) => Event::FlowLoaded { session, result },
                        Err(e) => Event::RequestFailed {
                            session,
                            request: RequestKind::Init,
                            message: e.to_string(),
                        },
                    };
                    let _ = event_tx.send(event).await;
                });
            }

            Effect::SimulateFlow { session, params } => {
                let Some(event_tx) = self.event_tx.upgrade() else {
                    return;
                };
                let api = self.api.clone();
                tokio::spawn(async move {
                    let event = match api.simulate_flow(&params).await {
                        Ok(result) => Event::FlowAdvanced { session, result },
                        Err(e) => Event::RequestFailed {
                            session,
                            request: RequestKind::Simulate,
                            message: e.to_string(),
                        },
                    };
                    let _ = event_tx.send(event).await;
                });
            }

            Effect::Render => {
                let _ = self.update_tx.send(PageUpdate::View(self.state.view()));
            }

            Effect::ReportError { message } => {
                tracing::warn!(flow_id = self.state.flow_id, error = %message, "Flow request failed");
                let _ = self.update_tx.send(PageUpdate::Error { message });
            }
        }
    }
}
