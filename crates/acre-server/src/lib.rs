//! # acre-server
//!
//! JSON HTTP API over [`AcreService`]. One collection per registry entity,
//! plus the change history, the wildlife report, and a health check.

pub mod error;
pub mod extract;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method};
use axum::routing::get;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use acre_db::service::AcreService;

use error::ServerError;
use extract::ACTING_USER_HEADER;

/// Build the application router.
pub fn router(service: Arc<AcreService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(ACTING_USER_HEADER)]);

    Router::new()
        .route("/health", get(routes::health))
        .route("/history", get(routes::history))
        .route("/reports/wildlife", get(routes::wildlife_report))
        .merge(routes::collections())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(service)
}

/// Serve the API on `addr` until Ctrl-C or SIGTERM.
///
/// # Errors
///
/// Returns `ServerError` if the address cannot be bound or serving fails.
pub async fn serve(service: Arc<AcreService>, addr: SocketAddr) -> Result<(), ServerError> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "acre server listening");

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("acre server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
        tracing::info!("received Ctrl-C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("received SIGTERM, shutting down");
            }
            Err(error) => {
                tracing::warn!(%error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
