//! Supplier domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Supplier domain entity, uniquely keyed by `code`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    pub id: i64,
    pub code: String,
    pub name: String,
    /// Tax payer number, used for matching external contract data
    pub inn: Option<String>,
    /// Tax registration reason code
    pub kpp: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Supplier response DTO
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SupplierResponse {
    /// Unique supplier code
    #[schema(example = "SUP-00042")]
    pub code: String,
    /// Supplier display name
    pub name: String,
    /// Tax payer number
    #[schema(example = "7707083893")]
    pub inn: Option<String>,
    /// Tax registration reason code
    #[schema(example = "770701001")]
    pub kpp: Option<String>,
}

impl From<Supplier> for SupplierResponse {
    fn from(supplier: Supplier) -> Self {
        Self {
            code: supplier.code,
            name: supplier.name,
            inn: supplier.inn,
            kpp: supplier.kpp,
        }
    }
}
