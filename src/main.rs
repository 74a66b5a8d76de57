// src/main.rs
use load_planner::config::{AppConfig, TelemetryConfig};
use load_planner::{api, telemetry};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let dotenv_result = dotenvy::dotenv();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    if let Err(err) = dotenv_result {
        if !matches!(err, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            warn!("Could not load .env: {}", err);
        }
    }

    let app_config = AppConfig::from_env();

    info!("🚀 Load planner starting...");
    if let Err(err) = api::start_api_server(app_config.api, app_config.planner).await {
        error!("❌ API server terminated with an error: {}", err);
        std::process::exit(1);
    }
}
