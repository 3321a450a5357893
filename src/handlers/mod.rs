pub mod assistant;
pub mod transactions;
pub mod upi;

use crate::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub storage: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is running", body = HealthStatus)),
    tag = "Health"
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "OK".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: state.storage.to_string(),
    })
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        transactions::create_transaction,
        transactions::list_transactions,
        transactions::list_flagged,
        transactions::transaction_stats,
        transactions::update_status,
        upi::decode,
        upi::prepare,
        assistant::ask,
    ),
    components(schemas(
        HealthStatus,
        crate::domain::Transaction,
        crate::domain::Category,
        crate::domain::Status,
        crate::domain::CategoryStat,
        crate::domain::TransactionStats,
        transactions::CreateTransactionRequest,
        transactions::UpdateStatusRequest,
        transactions::TransactionList,
        transactions::TransactionEnvelope,
        crate::upi::PaymentIntent,
        crate::upi::IntentSource,
        crate::upi::LaunchPlan,
        crate::upi::launch::LaunchAttempt,
        crate::upi::Platform,
        upi::DecodeRequest,
        upi::PrepareRequest,
        upi::PrepareResponse,
        assistant::AskRequest,
        crate::services::AssistantReply,
    )),
    tags(
        (name = "Transactions", description = "Learner payment records and risk flags"),
        (name = "UPI", description = "Payment code decoding and app launch planning"),
    )
)]
pub struct ApiDoc;

pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
