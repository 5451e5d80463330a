//! Supplier handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::SupplierResponse;
use crate::errors::{AppError, AppResult};
use crate::infra::SupplierFilter;
use crate::types::{Created, Paginated, PaginationParams};

/// Supplier listing query.
///
/// Pagination fields are spelled out because `serde(flatten)` does not
/// survive query-string deserialization for numeric fields.
#[derive(Debug, Deserialize)]
pub struct SupplierListParams {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub code: Option<String>,
    pub name: Option<String>,
    pub inn: Option<String>,
    pub kpp: Option<String>,
}

impl SupplierListParams {
    fn pagination(&self) -> PaginationParams {
        let defaults = PaginationParams::default();
        PaginationParams {
            page: self.page.unwrap_or(defaults.page),
            per_page: self.per_page.unwrap_or(defaults.per_page),
        }
    }
}

/// Tax-identifier matching query
#[derive(Debug, Deserialize)]
pub struct MatchParams {
    pub inn: String,
    pub kpp: Option<String>,
}

/// New supplier payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSupplierRequest {
    /// Unique supplier code
    #[validate(length(min = 1, message = "Code is required"))]
    #[schema(example = "SUP-00042")]
    pub code: String,
    /// Supplier display name
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub inn: Option<String>,
    pub kpp: Option<String>,
}

/// Create supplier routes
pub fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_suppliers).post(create_supplier))
        .route("/match", get(match_supplier))
        .route("/:code", get(get_supplier))
}

/// List suppliers with filters and pagination
#[utoipa::path(
    get,
    path = "/suppliers",
    tag = "Suppliers",
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<u64>, Query, description = "Page number"),
        ("per_page" = Option<u64>, Query, description = "Page size"),
        ("code" = Option<String>, Query, description = "Exact code filter"),
        ("name" = Option<String>, Query, description = "Name substring filter"),
        ("inn" = Option<String>, Query, description = "Exact INN filter"),
        ("kpp" = Option<String>, Query, description = "Exact KPP filter")
    ),
    responses((status = 200, description = "Paginated suppliers"))
)]
pub async fn list_suppliers(
    State(state): State<AppState>,
    Query(params): Query<SupplierListParams>,
) -> AppResult<Json<Paginated<SupplierResponse>>> {
    let pagination = params.pagination();
    let filter = SupplierFilter {
        code: params.code,
        name: params.name,
        inn: params.inn,
        kpp: params.kpp,
    };

    let (page, per_page) = (pagination.page, pagination.per_page);
    let (suppliers, total) = state.supplier_service.list(filter, pagination).await?;

    Ok(Json(Paginated::new(
        suppliers.into_iter().map(SupplierResponse::from).collect(),
        page,
        per_page,
        total,
    )))
}

/// Get a supplier by its unique code
pub async fn get_supplier(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<Json<SupplierResponse>> {
    let supplier = state.supplier_service.get_by_code(&code).await?;
    Ok(Json(SupplierResponse::from(supplier)))
}

/// Register a supplier
#[utoipa::path(
    post,
    path = "/suppliers",
    tag = "Suppliers",
    security(("bearer_auth" = [])),
    request_body = CreateSupplierRequest,
    responses(
        (status = 201, description = "Supplier created", body = SupplierResponse),
        (status = 409, description = "Code already exists")
    )
)]
pub async fn create_supplier(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateSupplierRequest>,
) -> AppResult<Created<SupplierResponse>> {
    let supplier = state
        .supplier_service
        .create(payload.code, payload.name, payload.inn, payload.kpp)
        .await?;

    Ok(Created(SupplierResponse::from(supplier)))
}

/// Match a supplier by tax identifiers (exact inn+kpp, then inn alone)
#[utoipa::path(
    get,
    path = "/suppliers/match",
    tag = "Suppliers",
    security(("bearer_auth" = [])),
    params(
        ("inn" = String, Query, description = "Tax payer number"),
        ("kpp" = Option<String>, Query, description = "Tax registration reason code")
    ),
    responses(
        (status = 200, description = "Matched supplier", body = SupplierResponse),
        (status = 404, description = "No supplier matches")
    )
)]
pub async fn match_supplier(
    State(state): State<AppState>,
    Query(params): Query<MatchParams>,
) -> AppResult<Json<SupplierResponse>> {
    let supplier = state
        .supplier_service
        .match_by_tax_ids(params.inn, params.kpp)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(SupplierResponse::from(supplier)))
}
