//! Email dispatch handlers.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::types::MessageResponse;

/// Test email payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TestEmailRequest {
    /// Recipient address
    #[validate(length(min = 1, message = "Email is required"))]
    #[schema(example = "user@example.com")]
    pub email: String,
}

/// Feedback email payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SendFeedbackRequest {
    /// Primary recipient
    #[validate(length(min = 1, message = "Recipient is required"))]
    #[schema(example = "user@example.com")]
    pub to: String,
    /// Carbon copies
    #[serde(default)]
    pub cc: Vec<String>,
    /// Subject line
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,
    /// Body HTML; wrapped in the shared layout before sending
    pub body: String,
}

/// Create email routes
pub fn email_routes() -> Router<AppState> {
    Router::new()
        .route("/test", post(send_test_email))
        .route("/send-feedback", post(send_feedback))
}

/// Send a test email
#[utoipa::path(
    post,
    path = "/email/test",
    tag = "Email",
    security(("bearer_auth" = [])),
    request_body = TestEmailRequest,
    responses(
        (status = 200, description = "Email sent", body = MessageResponse),
        (status = 400, description = "Invalid address"),
        (status = 500, description = "Transport failure with underlying message")
    )
)]
pub async fn send_test_email(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<TestEmailRequest>,
) -> AppResult<Json<MessageResponse>> {
    state.email_service.send_test_email(payload.email).await?;
    Ok(Json(MessageResponse::new("Test email sent")))
}

/// Send a feedback email with carbon copies
#[utoipa::path(
    post,
    path = "/email/send-feedback",
    tag = "Email",
    security(("bearer_auth" = [])),
    request_body = SendFeedbackRequest,
    responses(
        (status = 200, description = "Email sent", body = MessageResponse),
        (status = 400, description = "Invalid recipient"),
        (status = 500, description = "Transport failure with underlying message")
    )
)]
pub async fn send_feedback(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SendFeedbackRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .email_service
        .send_with_cc(payload.to, payload.cc, payload.subject, payload.body)
        .await?;
    Ok(Json(MessageResponse::new("Email sent")))
}
