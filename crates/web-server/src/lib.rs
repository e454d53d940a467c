use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use configuration::Settings;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
///
/// The engines themselves are stateless, so this is just the settings they
/// are constructed from per request.
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
}

/// Builds the application router.
///
/// Split out from [`run_server`] so tests can drive the routes with
/// `tower::ServiceExt::oneshot` without binding a socket.
pub fn app(settings: Settings) -> Router {
    let app_state = Arc::new(AppState { settings });

    // The dashboard is served from a different origin, so allow any.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    // --- DEFINE THE APPLICATION ROUTES ---
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/forecast", post(handlers::post_forecast))
        .route("/api/inventory", post(handlers::post_inventory))
        .route("/api/financials", post(handlers::post_financials))
        .with_state(app_state)
        .layer(cors)
        // This middleware will automatically log information about every
        // incoming request.
        .layer(TraceLayer::new_for_http())
        // Record arrays, not file uploads: 2 MB is plenty.
        .layer(DefaultBodyLimit::max(1024 * 1024 * 2))
}

/// The main function to configure and run the web server.
///
/// Every request is stateless and independently timeout-able by the host;
/// no session or connection state is held between calls.
pub async fn run_server(addr: SocketAddr, settings: Settings) -> anyhow::Result<()> {
    let app = app(settings);

    tracing::info!("Analytics API listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
