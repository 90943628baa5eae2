//! HTTP transport
//!
//! `POST /api/search` runs a search, `GET /api/search` answers a liveness
//! message and `GET /api/sources` lists the registered catalogue.

pub mod handlers;

use crate::search::Coordinator;
use axum::{Router, routing::get};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<Coordinator>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/search",
            get(handlers::search_status).post(handlers::search),
        )
        .route("/api/sources", get(handlers::list_sources))
        .with_state(state)
}

pub async fn serve(bind_addr: &str, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind_addr).await?;
    info!("🌐 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await
}
