//! HTTP surface of the meeting minutes extractor: routing, request input
//! selection, and translation of domain failures into response envelopes.

use domain::gateway::CompletionModel;
use log::info;
use service::config::Config;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

pub(crate) mod controller;
pub mod error;
pub(crate) mod params;
pub mod router;

pub use error::{Error, Result};

/// Shared state handed to request handlers.
/// Needs to implement Clone to be able to be passed into Router as State.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub completion_model: Arc<dyn CompletionModel>,
}

impl AppState {
    pub fn new(config: Config, completion_model: Arc<dyn CompletionModel>) -> Self {
        Self {
            config,
            completion_model,
        }
    }
}

/// Binds the listener and serves the API until the process is stopped.
pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let listen_addr = format!("{}:{}", app_state.config.interface, app_state.config.port);
    let port = app_state.config.port;

    info!("Server starting on {listen_addr}");
    info!("Health check: http://localhost:{port}/api/health");
    info!("Process meeting: POST http://localhost:{port}/api/process-meeting");

    let cors = CorsLayer::new()
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .allow_origin(allowed_origins(&app_state.config));

    let app = router::define_routes(app_state).layer(cors);

    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    axum::serve(listener, app).await
}

fn allowed_origins(config: &Config) -> AllowOrigin {
    AllowOrigin::list(
        config
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok()),
    )
}
