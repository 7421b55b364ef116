//! HTTP layer exposing question extraction.

pub mod routes;
pub mod types;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::nlp::Extractor;

#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<Extractor>,
}

/// Build the router; split out so tests can drive it without a socket.
pub fn router(extractor: Arc<Extractor>) -> Router {
    Router::new()
        .route("/extract", post(routes::extract))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { extractor })
}

pub async fn serve(extractor: Arc<Extractor>, host: &str, port: u16) -> Result<()> {
    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!(%addr, "serving kbqa-nlu API");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router(extractor).into_make_service()).await?;
    Ok(())
}
