use std::{net::SocketAddr, path::Path, str::FromStr, sync::Arc};

use axum::{
    Extension, Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    Res, api,
    config::Config,
    info,
    management::SessionStore,
    smartcar::{Gateway, SmartcarClient},
    warning,
};

/// State shared by every handler: the gateway client and the session store.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn Gateway>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            gateway,
            sessions: SessionStore::new(),
        }
    }
}

/// Builds the router for the demo flow. Unmatched paths are served from
/// `static_dir`.
pub fn router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(api::home))
        .route("/callback", get(api::callback))
        .route("/vehicles", get(api::vehicles))
        .route("/request", post(api::request))
        .route("/error", get(api::error_page))
        .route("/health", get(api::health))
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .layer(Extension(state))
}

pub async fn start_api_server(config: Config, open_browser: bool) -> Res<()> {
    let client = SmartcarClient::new(&config)?;
    let state = AppState::new(Arc::new(client));
    let app = router(state, &config.static_dir);

    let addr = SocketAddr::from_str(&config.server_addr())?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        "smartcar-demo server listening on port {} ({} mode)",
        config.port, config.mode
    );

    if open_browser && webbrowser::open(&config.local_url()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            config.local_url()
        );
    }

    axum::serve(listener, app).await?;
    Ok(())
}
