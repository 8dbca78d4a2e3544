use domain::gateway::gemini::GeminiClient;
use log::{error, info};
use service::{config::Config, logging::Logger};
use std::sync::Arc;
use web::AppState;

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config);

    info!("Runtime environment: {}", config.runtime_env());

    // Constructing the gateway validates the credential, so a missing
    // GEMINI_API_KEY aborts startup before the server accepts requests.
    let completion_model = match GeminiClient::new(&config) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to initialize Gemini client: {e}");
            std::process::exit(1);
        }
    };

    let app_state = AppState::new(config, completion_model);

    if let Err(e) = web::init_server(app_state).await {
        error!("Failed to start server: {e}");
        std::process::exit(1);
    }
}
