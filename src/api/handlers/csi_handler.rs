//! Public CSI feedback submission handler.
//!
//! The survey token is the only credential; the route stays outside the
//! JWT-protected surface.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::CsiFeedbackResponse;
use crate::errors::AppResult;

/// Feedback submission payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitFeedbackRequest {
    /// Rating 1-5
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    #[schema(example = 4)]
    pub rating: i16,
    /// Free-text comment
    pub comment: Option<String>,
}

/// Create CSI routes
pub fn csi_routes() -> Router<AppState> {
    Router::new().route("/:token", post(submit_feedback))
}

/// Submit satisfaction feedback through a survey token
#[utoipa::path(
    post,
    path = "/csi/{token}",
    tag = "CSI",
    request_body = SubmitFeedbackRequest,
    params(("token" = Uuid, Path, description = "Survey token")),
    responses(
        (status = 201, description = "Feedback recorded", body = CsiFeedbackResponse),
        (status = 404, description = "Unknown token"),
        (status = 409, description = "Feedback already submitted")
    )
)]
pub async fn submit_feedback(
    State(state): State<AppState>,
    Path(token): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<SubmitFeedbackRequest>,
) -> AppResult<(StatusCode, Json<CsiFeedbackResponse>)> {
    let feedback = state
        .csi_service
        .submit(token, payload.rating, payload.comment)
        .await?;

    Ok((StatusCode::CREATED, Json(CsiFeedbackResponse::from(feedback))))
}
