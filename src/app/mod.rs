use crate::api::{ApiServer, AppState};
use crate::config::Config;
use crate::insight;
use crate::meeting::AssistantSettings;
use anyhow::Result;
use tracing::{error, info};

/// Run the HTTP service until it fails or the process is interrupted.
pub async fn run_service(port_override: Option<u16>) -> Result<()> {
    info!("Starting facilitator service");

    let config = Config::load()?;
    let provider = insight::from_config(&config.insight)?;
    let state = AppState::new(provider, AssistantSettings::from_config(&config.insight));

    let port = port_override.unwrap_or(config.server.port);
    let api_server = ApiServer::new(config.server.host.clone(), port, state);

    info!("facilitator is ready!");
    info!(
        "Start a meeting: curl -X POST http://{}:{}/meeting -H 'Content-Type: application/json' -d '{{\"title\":\"Weekly sync\"}}'",
        config.server.host, port
    );

    tokio::select! {
        result = api_server.start() => {
            if let Err(e) = &result {
                error!("API server failed: {:#}", e);
            }
            result
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down");
            Ok(())
        }
    }
}
