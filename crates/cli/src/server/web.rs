use axum::{http::HeaderValue, Router};
use certwatch_api::{create_api_routes, AppState};
use certwatch_domain::config::ServerConfig;
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

pub async fn start_web_server(
    bind_addr: SocketAddr,
    state: AppState,
    server: &ServerConfig,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let app = create_app(state, &server.cors_allowed_origins);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!(bind_address = %bind_addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

fn create_app(state: AppState, cors_origins: &[String]) -> Router {
    create_api_routes(state)
        .layer(CompressionLayer::new())
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}

/// Resolves on Ctrl+C or when `token` is cancelled elsewhere, and cancels
/// `token` either way so background jobs stop with the server.
async fn shutdown_signal(token: CancellationToken) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => match result {
            Ok(()) => info!("Shutdown signal received"),
            Err(e) => {
                error!(error = %e, "Failed to listen for Ctrl+C");
                token.cancelled().await;
            }
        },
        _ = token.cancelled() => {}
    }

    token.cancel();
}
