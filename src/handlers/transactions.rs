use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use bigdecimal::BigDecimal;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{month_start, Category, Status, Transaction, TransactionStats};
use crate::error::AppError;
use crate::use_cases::{RecordTransaction, RecordTransactionInput, UpdateTransactionStatus};
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub payee: String,
    #[schema(value_type = String, example = "450.00")]
    pub amount: BigDecimal,
    pub category: Option<Category>,
    pub upi_id: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: Status,
    pub transaction_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionList {
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionEnvelope {
    pub transaction: Transaction,
}

#[utoipa::path(
    post,
    path = "/learners/{user_id}/transactions",
    params(("user_id" = Uuid, Path, description = "Learner id")),
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction recorded and classified", body = TransactionEnvelope),
        (status = 400, description = "Invalid payee, amount or UPI id")
    ),
    tag = "Transactions"
)]
pub async fn create_transaction(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<CreateTransactionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let transaction = RecordTransaction::new(state.repository.clone())
        .execute(RecordTransactionInput {
            user_id,
            payee: payload.payee,
            amount: payload.amount,
            category: payload.category,
            upi_id: payload.upi_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(TransactionEnvelope { transaction })))
}

#[utoipa::path(
    get,
    path = "/learners/{user_id}/transactions",
    params(("user_id" = Uuid, Path, description = "Learner id")),
    responses((status = 200, description = "Newest first", body = TransactionList)),
    tag = "Transactions"
)]
pub async fn list_transactions(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<TransactionList>, AppError> {
    let transactions = state.repository.list_for_user(user_id).await?;
    Ok(Json(TransactionList { transactions }))
}

#[utoipa::path(
    get,
    path = "/learners/{user_id}/transactions/flagged",
    params(("user_id" = Uuid, Path, description = "Learner id")),
    responses((status = 200, description = "Flagged transactions, newest first", body = TransactionList)),
    tag = "Transactions"
)]
pub async fn list_flagged(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<TransactionList>, AppError> {
    let transactions = state.repository.list_flagged(user_id).await?;
    Ok(Json(TransactionList { transactions }))
}

#[utoipa::path(
    get,
    path = "/learners/{user_id}/transactions/stats",
    params(("user_id" = Uuid, Path, description = "Learner id")),
    responses((status = 200, description = "Current month summary", body = TransactionStats)),
    tag = "Transactions"
)]
pub async fn transaction_stats(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<TransactionStats>, AppError> {
    let stats = state
        .repository
        .monthly_stats(user_id, month_start(Utc::now()))
        .await?;
    Ok(Json(stats))
}

#[utoipa::path(
    patch,
    path = "/learners/{user_id}/transactions/{id}/status",
    params(
        ("user_id" = Uuid, Path, description = "Learner id"),
        ("id" = Uuid, Path, description = "Transaction id")
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = TransactionEnvelope),
        (status = 404, description = "Transaction not found")
    ),
    tag = "Transactions"
)]
pub async fn update_status(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<TransactionEnvelope>, AppError> {
    let transaction = UpdateTransactionStatus::new(state.repository.clone())
        .execute(user_id, id, payload.status, payload.transaction_id)
        .await?;
    Ok(Json(TransactionEnvelope { transaction }))
}
