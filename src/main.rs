//! Flow console - terminal client for scripted conversational flows
//!
//! Loads a flow from a flow server, shows its messages, and advances it with
//! the user's answers.

mod config;
mod console;
mod flow;
mod runtime;
mod state_machine;
mod view;

use config::FlowConfig;
use flow::{HttpFlowClient, LoggingFlowApi};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout is the conversation.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flow_console=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = FlowConfig::from_env();
    tracing::info!(
        api_url = %config.api_url,
        flow_id = config.flow_id,
        timeout_secs = config.request_timeout.as_secs(),
        "Starting flow console"
    );

    let client = HttpFlowClient::new(&config.api_url, config.request_timeout)?;
    let api = Arc::new(LoggingFlowApi::new(client));

    let (handle, updates) = runtime::spawn_page(api, config.flow_id);
    console::run_console(handle, updates).await?;

    Ok(())
}
