pub mod adapters;
pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod ports;
pub mod services;
pub mod upi;
pub mod use_cases;
pub mod utils;
pub mod validation;

use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::adapters::{InMemoryTransactionRepository, PostgresTransactionRepository};
use crate::config::Config;
use crate::middleware::request_logger::{request_logger_middleware, RequestLogConfig};
use crate::ports::TransactionRepository;
use crate::upi::LaunchTimings;

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn TransactionRepository>,
    pub launch_timings: LaunchTimings,
    pub storage: &'static str,
    pub request_log: RequestLogConfig,
}

impl AppState {
    /// State backed by the in-process repository.
    pub fn in_memory() -> Self {
        Self {
            repository: Arc::new(InMemoryTransactionRepository::new()),
            launch_timings: LaunchTimings::default(),
            storage: "memory",
            request_log: RequestLogConfig { log_body: false },
        }
    }

    /// Connects to Postgres when `DATABASE_URL` is set, otherwise stays in memory.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let mut state = Self::in_memory();
        state.launch_timings = config.launch_timings;
        state.request_log = RequestLogConfig {
            log_body: config.log_request_body,
        };

        match &config.database_url {
            Some(url) => {
                let pool = db::create_pool(url, config.database_max_connections).await?;
                db::run_migrations(&pool).await?;
                state.repository = Arc::new(PostgresTransactionRepository::new(pool));
                state.storage = "postgres";
            }
            None => {
                tracing::warn!("DATABASE_URL not set; transactions are kept in memory only");
            }
        }

        Ok(state)
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api-docs/openapi.json", get(handlers::openapi))
        .route(
            "/learners/:user_id/transactions",
            post(handlers::transactions::create_transaction)
                .get(handlers::transactions::list_transactions),
        )
        .route(
            "/learners/:user_id/transactions/flagged",
            get(handlers::transactions::list_flagged),
        )
        .route(
            "/learners/:user_id/transactions/stats",
            get(handlers::transactions::transaction_stats),
        )
        .route(
            "/learners/:user_id/transactions/:id/status",
            patch(handlers::transactions::update_status),
        )
        .route("/upi/decode", post(handlers::upi::decode))
        .route("/upi/prepare", post(handlers::upi::prepare))
        .route("/assistant/ask", post(handlers::assistant::ask))
        .layer(axum::middleware::from_fn_with_state(
            state.request_log,
            request_logger_middleware,
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
