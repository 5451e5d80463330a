//! Contract handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::ContractResponse;
use crate::errors::AppResult;
use crate::services::ContractIngest;
use crate::types::{Created, Paginated, PaginationParams};

/// Contract ingest payload with externally supplied supplier tax ids
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct IngestContractRequest {
    /// Contract number
    #[validate(length(min = 1, message = "Contract number is required"))]
    #[schema(example = "D-2025/117")]
    pub number: String,
    /// Supplier tax payer number for matching
    pub inn: Option<String>,
    /// Supplier tax registration reason code for matching
    pub kpp: Option<String>,
    /// External id of the linked purchase request
    pub id_purchase_request: Option<String>,
    pub subject: Option<String>,
    pub amount: Option<f64>,
    pub concluded_at: Option<NaiveDate>,
}

/// Create contract routes
pub fn contract_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_contracts).post(ingest_contract))
        .route("/:id", get(get_contract))
}

/// List contracts (paginated)
pub async fn list_contracts(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<ContractResponse>>> {
    let (page, per_page) = (params.page, params.per_page);
    let (contracts, total) = state.contract_service.list(params).await?;

    Ok(Json(Paginated::new(
        contracts.into_iter().map(ContractResponse::from).collect(),
        page,
        per_page,
        total,
    )))
}

/// Get a contract by id
pub async fn get_contract(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ContractResponse>> {
    let contract = state.contract_service.get(id).await?;
    Ok(Json(ContractResponse::from(contract)))
}

/// Ingest an externally supplied contract, matching the supplier by inn/kpp
#[utoipa::path(
    post,
    path = "/contracts",
    tag = "Contracts",
    security(("bearer_auth" = [])),
    request_body = IngestContractRequest,
    responses(
        (status = 201, description = "Contract ingested", body = ContractResponse),
        (status = 409, description = "Contract number already exists")
    )
)]
pub async fn ingest_contract(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<IngestContractRequest>,
) -> AppResult<Created<ContractResponse>> {
    let contract = state
        .contract_service
        .ingest(ContractIngest {
            number: payload.number,
            inn: payload.inn,
            kpp: payload.kpp,
            external_request_id: payload.id_purchase_request,
            subject: payload.subject,
            amount: payload.amount,
            concluded_at: payload.concluded_at,
        })
        .await?;

    Ok(Created(ContractResponse::from(contract)))
}
