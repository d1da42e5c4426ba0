//! HTTP flow client

use super::types::{FlowId, FlowResult, Member, SimulateBody, SimulateParams};
use super::{FlowApi, FlowError};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use std::time::Duration;

/// Talks to a flow server over `/api/flows`
pub struct HttpFlowClient {
    client: Client,
    base_url: String,
}

impl HttpFlowClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FlowError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FlowError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn init_url(&self, flow_id: FlowId, member: &Member) -> String {
        format!("{}/api/flows/{flow_id}/{}", self.base_url, member.path_id())
    }

    fn simulate_url(&self, flow_id: FlowId) -> String {
        format!("{}/api/flows/{flow_id}/simulate", self.base_url)
    }

    async fn send(request: RequestBuilder) -> Result<FlowResult, FlowError> {
        let response = request
            .header("content-type", "application/json")
            .send()
            .await
            .map_err(|e| FlowError::from_reqwest(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FlowError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(FlowError::from_status(status.as_u16(), &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| FlowError::decode(format!("Failed to parse flow response: {e}")))
    }
}

#[async_trait]
impl FlowApi for HttpFlowClient {
    async fn init_flow(&self, flow_id: FlowId, member: &Member) -> Result<FlowResult, FlowError> {
        let url = self.init_url(flow_id, member);
        tracing::debug!(%url, "Initializing flow");
        Self::send(self.client.get(&url)).await
    }

    async fn simulate_flow(&self, params: &SimulateParams) -> Result<FlowResult, FlowError> {
        let url = self.simulate_url(params.flow_id);
        tracing::debug!(%url, start_index = params.start_index, "Advancing flow");
        Self::send(self.client.post(&url).json(&SimulateBody::from(params))).await
    }
}
