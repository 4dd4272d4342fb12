//! HTTP front end: routes page requests to the renderer.
//!
//! - `GET /` serves the entry page, or redirects `?username=` to that user's page
//! - `GET /{username}` fetches stats from the backend and renders the profile,
//!   or the not-found fallback with a 404

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::backend::BackendClient;
use crate::config::Config;
use crate::render::{HomePage, NotFoundPage, ProfilePage};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: BackendClient,
    pub year: i32,
}

impl AppState {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = BackendClient::new(
            &config.backend_url,
            config.backend_auth_token.clone(),
            config.request_timeout(),
        )?;
        Ok(Self {
            client,
            year: config.year,
        })
    }
}

/// Build the router with tracing and a per-request timeout.
#[allow(deprecated)]
pub fn build_router(state: AppState, page_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/{username}", get(profile_handler))
        .with_state(state)
        .layer(TimeoutLayer::new(page_timeout))
        .layer(TraceLayer::new_for_http())
}

/// Serve `router` on `listener` until Ctrl+C.
pub async fn run(listener: TcpListener, router: Router) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(address = %addr, "HTTP server starting");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    username: Option<String>,
}

async fn home_handler(State(state): State<AppState>, Query(query): Query<HomeQuery>) -> Response {
    match query.username.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
        Some(username) => Redirect::to(&profile_path(username)).into_response(),
        None => HomePage::new(state.year).into_response(),
    }
}

async fn profile_handler(State(state): State<AppState>, Path(username): Path<String>) -> Response {
    match state.client.fetch_stats(&username).await {
        Some(data) => {
            tracing::debug!(username = %username, "Rendering profile");
            ProfilePage::new(&username, &data, state.year).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            NotFoundPage::new(&username, state.year),
        )
            .into_response(),
    }
}

/// `/{username}` with the name percent-encoded as a single path segment.
pub fn profile_path(username: &str) -> String {
    let Ok(mut url) = Url::parse("http://localhost/") else {
        return "/".to_string();
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().push(username);
    }
    url.path().to_string()
}
