//! Runtime for the flow page
//!
//! Drives the pure state machine: events come in over a channel, effects run
//! as background requests, and every redraw is broadcast to the front end.

mod executor;


pub use executor::PageRuntime;

use crate::flow::{FlowApi, FlowId};
use crate::state_machine::{Event, PageState};
use crate::view::PageView;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};

/// Updates sent to the front end
#[derive(Debug, Clone)]
pub enum PageUpdate {
    /// Fresh snapshot after a state change
    View(PageView),
    /// User input the page refused
    Rejected { message: String },
    /// A flow request failed
    Error { message: String },
}

/// Handle to interact with a running page
pub struct PageHandle {
    pub event_tx: mpsc::Sender<Event>,
}

impl PageHandle {
    /// Send an event to the page
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.event_tx
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {e}"))
    }
}

/// Start a page runtime for `flow_id` in the background.
///
/// The returned receiver sees every update, starting with the initial load.
pub fn spawn_page<A>(api: Arc<A>, flow_id: FlowId) -> (PageHandle, broadcast::Receiver<PageUpdate>)
where
    A: FlowApi + 'static,
{
    let (event_tx, event_rx) = mpsc::channel(32);
    let (update_tx, update_rx) = broadcast::channel(128);

    let runtime = PageRuntime::new(
        PageState::new(flow_id),
        api,
        event_rx,
        &event_tx,
        update_tx,
    );

    tokio::spawn(async move {
        runtime.run().await;
        tracing::info!(flow_id, "Flow page runtime finished");
    });

    (
        PageHandle { event_tx },
        update_rx,
    )
}
