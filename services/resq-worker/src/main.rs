use resq_config::{ServiceConfig, VisionConfig};
use resq_lifecycle::Orchestrator;
use resq_observability::{init, log_startup, ObservabilityConfig};
use resq_storage_memory::MemoryStore;
use resq_vision::{HttpVisionClient, VisionClientConfig};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let config = ServiceConfig::from_env("resq-worker");
    let obs_config = ObservabilityConfig {
        service_name: config.service_name.clone(),
        environment: config.environment.to_string(),
        log_level: config.log_level.clone(),
        metrics_addr: config.metrics_addr.clone(),
    };
    let handle = init(&obs_config);
    log_startup(&handle, &obs_config.environment);

    let store = Arc::new(MemoryStore::new());
    let mut orchestrator = Orchestrator::new(store);

    let vision_config = VisionConfig::from_env();
    if let Some(endpoint) = vision_config.endpoint.clone() {
        match HttpVisionClient::new(&VisionClientConfig {
            endpoint,
            api_key: vision_config.api_key.clone(),
            timeout_secs: vision_config.timeout_secs,
        }) {
            Ok(client) => {
                orchestrator = orchestrator.with_vision(Arc::new(client));
                tracing::info!("vision collaborator configured");
            }
            Err(err) => {
                tracing::warn!(error = %err, "vision collaborator unavailable, continuing without");
            }
        }
    }

    let mut ticker = tokio::time::interval(Duration::from_secs(config.monitor_interval_secs));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(err) = orchestrator.monitor_pending().await {
                    tracing::warn!(error = %err, "pending sweep failed");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutdown signal received");
                break;
            }
        }
    }
}
