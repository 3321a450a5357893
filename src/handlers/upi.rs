use axum::{
    extract::State,
    http::{header::USER_AGENT, HeaderMap},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::upi::{self, LaunchPlan, PaymentIntent, Platform};
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct DecodeRequest {
    /// Text produced by the QR decoder or typed by the learner.
    pub raw: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrepareRequest {
    pub raw: String,
    /// Amount exactly as entered; validated and rendered with two decimals.
    pub amount: String,
    /// Overrides the request's `User-Agent` for platform detection.
    pub user_agent: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrepareResponse {
    pub raw_uri: String,
    pub payee_name: String,
    pub amount: String,
    /// Scanned query with only `am` written and `cu` ensured.
    pub query: String,
    pub platform: Platform,
    pub plan: LaunchPlan,
}

#[utoipa::path(
    post,
    path = "/upi/decode",
    request_body = DecodeRequest,
    responses(
        (status = 200, description = "Recognized payment code", body = PaymentIntent),
        (status = 422, description = "Not a UPI payment code; the message echoes the scanned text")
    ),
    tag = "UPI"
)]
pub async fn decode(Json(payload): Json<DecodeRequest>) -> Result<Json<PaymentIntent>, AppError> {
    let intent = upi::scan(&payload.raw).into_result()?;
    Ok(Json(intent))
}

#[utoipa::path(
    post,
    path = "/upi/prepare",
    request_body = PrepareRequest,
    responses(
        (status = 200, description = "Final query and launch plan", body = PrepareResponse),
        (status = 400, description = "Invalid amount"),
        (status = 422, description = "Not a UPI payment code")
    ),
    tag = "UPI"
)]
pub async fn prepare(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<PrepareRequest>,
) -> Result<Json<PrepareResponse>, AppError> {
    let user_agent = payload.user_agent.clone().unwrap_or_else(|| {
        headers
            .get(USER_AGENT)
            .and_then(|h| h.to_str().ok())
            .unwrap_or_default()
            .to_string()
    });
    let platform = Platform::from_user_agent(&user_agent);

    let prepared = upi::prepare_payment(
        &payload.raw,
        &payload.amount,
        platform,
        &state.launch_timings,
    )?;

    Ok(Json(PrepareResponse {
        raw_uri: prepared.intent.raw_uri,
        payee_name: prepared.intent.payee_name,
        amount: prepared.amount.to_string(),
        query: prepared.query,
        platform,
        plan: prepared.plan,
    }))
}
