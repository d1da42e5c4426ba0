//! Runtime configuration read from the environment

use crate::flow::FlowId;
use crate::state_machine::DEFAULT_FLOW_ID;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the flow console
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowConfig {
    /// Base URL of the flow server, without the `/api/flows` suffix
    pub api_url: String,
    /// Flow shown on start
    pub flow_id: FlowId,
    pub request_timeout: Duration,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            flow_id: DEFAULT_FLOW_ID,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl FlowConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            api_url: lookup("FLOW_API_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.api_url),
            flow_id: lookup("FLOW_ID")
                .and_then(|id| id.trim().parse().ok())
                .unwrap_or(defaults.flow_id),
            request_timeout: lookup("FLOW_REQUEST_TIMEOUT_SECS")
                .and_then(|secs| secs.trim().parse().ok())
                .filter(|secs| *secs > 0)
                .map_or(defaults.request_timeout, Duration::from_secs),
        }
    }
}
