use axum::Json;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::services::assistant::{self, AssistantReply};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AskRequest {
    pub question: String,
}

#[utoipa::path(
    post,
    path = "/assistant/ask",
    request_body = AskRequest,
    responses(
        (status = 200, description = "Canned answer", body = AssistantReply),
        (status = 400, description = "Question is required")
    ),
    tag = "Assistant"
)]
pub async fn ask(Json(payload): Json<AskRequest>) -> Result<Json<AssistantReply>, AppError> {
    Ok(Json(assistant::ask(&payload.question)?))
}
