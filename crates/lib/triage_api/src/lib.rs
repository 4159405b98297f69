//! # triage_api
//!
//! HTTP API library for the support triage relay.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use triage_core::analysis::CompletionProvider;
use triage_core::analysis::groq::GroqProvider;
use triage_core::webhook::WebhookClient;

use crate::config::ApiConfig;
use crate::handlers::{analysis, health, support_triage};

/// Shared application state passed to all handlers.
///
/// Everything here is immutable; requests share nothing else.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: ApiConfig,
    /// Client for the n8n workflow webhook.
    pub webhook: WebhookClient,
    /// Language-model backend for the analysis endpoints.
    pub completions: Arc<dyn CompletionProvider>,
}

impl AppState {
    /// Builds state with the Groq provider described by `config`.
    pub fn new(config: ApiConfig) -> Self {
        let client = reqwest::Client::new();
        let completions = Arc::new(GroqProvider::new(
            client.clone(),
            config.groq_base_url.clone(),
            config.groq_model.clone(),
            config.groq_api_key.clone(),
        ));
        Self::with_provider(config, client, completions)
    }

    /// Builds state around an explicit completion provider.
    pub fn with_provider(
        config: ApiConfig,
        client: reqwest::Client,
        completions: Arc<dyn CompletionProvider>,
    ) -> Self {
        let webhook = WebhookClient::new(client, config.webhook_url.clone());
        Self {
            config,
            webhook,
            completions,
        }
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(routes::GET_HEALTH, get(health::health_check))
        .route(
            routes::POST_API_SUPPORT_TRIAGE,
            post(support_triage::support_triage_handler),
        )
        .route(
            routes::POST_ANALYZE_SUPPORT_REQUEST,
            post(analysis::analyze_handler),
        )
        .route(
            routes::POST_GENERATE_RESPONSE,
            post(analysis::generate_response_handler),
        )
        .layer(cors)
        .with_state(state)
}
