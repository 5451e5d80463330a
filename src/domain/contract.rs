//! Contract domain entity.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Contract domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    pub id: i64,
    pub number: String,
    /// Supplier resolved by inn/kpp matching at ingest, if any
    pub supplier_id: Option<i64>,
    pub purchase_request_id: Option<i64>,
    pub subject: Option<String>,
    pub amount: Option<f64>,
    pub concluded_at: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Contract response DTO
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ContractResponse {
    pub id: i64,
    /// Contract number
    #[schema(example = "D-2025/117")]
    pub number: String,
    /// Matched supplier id
    pub supplier_id: Option<i64>,
    /// Linked purchase request id
    pub purchase_request_id: Option<i64>,
    pub subject: Option<String>,
    pub amount: Option<f64>,
    pub concluded_at: Option<NaiveDate>,
}

impl From<Contract> for ContractResponse {
    fn from(contract: Contract) -> Self {
        Self {
            id: contract.id,
            number: contract.number,
            supplier_id: contract.supplier_id,
            purchase_request_id: contract.purchase_request_id,
            subject: contract.subject,
            amount: contract.amount,
            concluded_at: contract.concluded_at,
        }
    }
}
