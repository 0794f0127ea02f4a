use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod db;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

use config::Config;
use db::Store;
use services::ai::AiClient;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub config: Arc<Config>,
    pub ai: AiClient,
}

impl AppState {
    pub fn new(store: Store, config: Config) -> anyhow::Result<Self> {
        let ai = AiClient::from_config(&config)?;
        Ok(Self {
            store,
            config: Arc::new(config),
            ai,
        })
    }
}

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Entries
        .route("/api/entries", get(handlers::entries::list_entries))
        .route("/api/entries", post(handlers::entries::save_entry))
        .route("/api/entries/:date", get(handlers::entries::get_entry))
        .route(
            "/api/entries/:date/image",
            post(handlers::insights::generate_entry_image),
        )
        // Targets. GET takes a period key, PATCH/DELETE an id.
        .route("/api/targets", post(handlers::targets::create_target))
        .route("/api/targets/:key", get(handlers::targets::list_targets))
        .route(
            "/api/targets/:key",
            patch(handlers::targets::set_target_completed),
        )
        .route("/api/targets/:key", delete(handlers::targets::delete_target))
        // Tasks. GET takes a date, PATCH/DELETE an id.
        .route("/api/tasks", post(handlers::tasks::create_task))
        .route("/api/tasks/:key", get(handlers::tasks::list_tasks))
        .route("/api/tasks/:key", patch(handlers::tasks::set_task_completed))
        .route("/api/tasks/:key", delete(handlers::tasks::delete_task))
        // Routine templates
        .route(
            "/api/routine-templates",
            get(handlers::routines::list_templates),
        )
        .route(
            "/api/routine-templates",
            post(handlers::routines::create_template),
        )
        .route(
            "/api/routine-templates/:id",
            delete(handlers::routines::delete_template),
        )
        .route(
            "/api/apply-template",
            post(handlers::routines::apply_template),
        )
        // Analysis & trends
        .route("/api/analysis", post(handlers::insights::analyze_patterns))
        .route("/api/trends", get(handlers::trends::get_trends));

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz));

    let cors = cors_layer(&state.config);
    let body_limit = DefaultBodyLimit::max(state.config.max_body_bytes);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(body_limit)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = std::iter::once(&config.frontend_url)
        .chain(config.cors_extra_origins.iter())
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(hv) => Some(hv),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring unparsable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}
