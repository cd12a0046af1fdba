//! Credential-injecting proxy for museum APIs that need a server-held key
//!
//! `GET /louvre` and `GET /science-museum` forward to the configured upstream
//! with `Authorization: Bearer <key>` and hand back the upstream JSON
//! untouched. A missing key or failed upstream call becomes a `500` with a
//! plain-text message.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use reqwest::Client;
use serde_json::Value;

use crate::error::AppError;
use crate::settings::ProxySettings;

/// One proxied upstream
#[derive(Debug, Clone)]
pub struct ProxyEndpoint {
    /// Used in log lines and error bodies ("Louvre", "Science Museum")
    pub name: &'static str,
    pub upstream_url: String,
    pub api_key: Option<String>,
}

impl ProxyEndpoint {
    /// Endpoint whose key is read from `env_var` (blank counts as missing)
    pub fn from_env(name: &'static str, env_var: &str, upstream_url: &str) -> Self {
        Self {
            name,
            upstream_url: upstream_url.to_string(),
            api_key: std::env::var(env_var).ok().filter(|k| !k.trim().is_empty()),
        }
    }
}

#[derive(Clone)]
pub struct ProxyState {
    client: Client,
    louvre: Arc<ProxyEndpoint>,
    science_museum: Arc<ProxyEndpoint>,
}

impl ProxyState {
    pub fn new(client: Client, louvre: ProxyEndpoint, science_museum: ProxyEndpoint) -> Self {
        Self {
            client,
            louvre: Arc::new(louvre),
            science_museum: Arc::new(science_museum),
        }
    }

    /// Upstreams from settings, keys from `LOUVRE_API_KEY` / `SCIENCE_MUSEUM_API_KEY`
    pub fn from_settings(settings: &ProxySettings) -> Self {
        Self::new(
            Client::new(),
            ProxyEndpoint::from_env("Louvre", "LOUVRE_API_KEY", &settings.louvre_upstream_url),
            ProxyEndpoint::from_env(
                "Science Museum",
                "SCIENCE_MUSEUM_API_KEY",
                &settings.science_upstream_url,
            ),
        )
    }
}

pub fn create_router(state: ProxyState) -> Router {
    Router::new()
        .route("/louvre", get(get_louvre_data))
        .route("/science-museum", get(get_science_museum_data))
        .with_state(state)
}

pub async fn get_louvre_data(State(state): State<ProxyState>) -> Response {
    forward(&state.client, &state.louvre).await
}

pub async fn get_science_museum_data(State(state): State<ProxyState>) -> Response {
    forward(&state.client, &state.science_museum).await
}

async fn forward(client: &Client, endpoint: &ProxyEndpoint) -> Response {
    let Some(api_key) = endpoint.api_key.as_deref() else {
        tracing::error!("Proxy: {} API key is missing!", endpoint.name);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("{} API key is not configured.", endpoint.name),
        )
            .into_response();
    };

    match fetch_upstream(client, &endpoint.upstream_url, api_key).await {
        Ok(body) => Json(body).into_response(),
        Err(e) => {
            tracing::error!("Proxy: Error fetching {} data: {}", endpoint.name, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error fetching {} data: {}", endpoint.name, e),
            )
                .into_response()
        }
    }
}

async fn fetch_upstream(client: &Client, url: &str, api_key: &str) -> reqwest::Result<Value> {
    client
        .get(url)
        .bearer_auth(api_key)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
}

/// Bind `settings.bind_address` and serve the proxy until the process exits.
pub async fn serve(settings: &ProxySettings) -> Result<(), AppError> {
    let addr: SocketAddr = settings
        .bind_address
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid bind address '{}': {}", settings.bind_address, e)))?;

    let router = create_router(ProxyState::from_settings(settings));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Proxy: Listening on {}", addr);
    axum::serve(listener, router).await?;
    Ok(())
}
