//! Flow server abstraction
//!
//! Wire types and the client used to initialize and advance scripted flows.

mod client;
mod error;
mod types;

pub use client::HttpFlowClient;
pub use error::{FlowError, FlowErrorKind};
pub use types::*;

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for flow servers
#[async_trait]
pub trait FlowApi: Send + Sync {
    /// Fetch the initial state of a flow for a member
    async fn init_flow(&self, flow_id: FlowId, member: &Member) -> Result<FlowResult, FlowError>;

    /// Submit a user message and receive the messages it produced
    async fn simulate_flow(&self, params: &SimulateParams) -> Result<FlowResult, FlowError>;
}

#[async_trait]
impl<T: FlowApi + ?Sized> FlowApi for Arc<T> {
    async fn init_flow(&self, flow_id: FlowId, member: &Member) -> Result<FlowResult, FlowError> {
        (**self).init_flow(flow_id, member).await
    }

    async fn simulate_flow(&self, params: &SimulateParams) -> Result<FlowResult, FlowError> {
        (**self).simulate_flow(params).await
    }
}

/// Logging wrapper for flow clients
pub struct LoggingFlowApi<T> {
    inner: T,
}

impl<T: FlowApi> LoggingFlowApi<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    fn log_outcome(
        operation: &'static str,
        flow_id: FlowId,
        started: std::time::Instant,
        result: &Result<FlowResult, FlowError>,
    ) {
        let duration = started.elapsed();
        match result {
            Ok(response) => {
                tracing::info!(
                    operation,
                    flow_id,
                    duration_ms = %duration.as_millis(),
                    messages = response.messages.len(),
                    stop_index = response.stop_index,
                    "Flow request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    operation,
                    flow_id,
                    duration_ms = %duration.as_millis(),
                    kind = ?e.kind,
                    error = %e.message,
                    "Flow request failed"
                );
            }
        }
    }
}

#[async_trait]
impl<T: FlowApi> FlowApi for LoggingFlowApi<T> {
    async fn init_flow(&self, flow_id: FlowId, member: &Member) -> Result<FlowResult, FlowError> {
        let start = std::time::Instant::now();
        let result = self.inner.init_flow(flow_id, member).await;
        Self::log_outcome("init", flow_id, start, &result);
        result
    }

    async fn simulate_flow(&self, params: &SimulateParams) -> Result<FlowResult, FlowError> {
        let start = std::time::Instant::now();
        let result = self.inner.simulate_flow(params).await;
        Self::log_outcome("simulate", params.flow_id, start, &result);
        result
    }
}
