//! Domain layer - Core business entities and logic
//!
//! Plain domain models plus their response DTOs, independent of
//! infrastructure concerns.

pub mod approval;
pub mod contract;
pub mod csi;
pub mod overview;
pub mod password;
pub mod payment;
pub mod plan;
pub mod purchase_request;
pub mod supplier;
pub mod user;

pub use approval::{Approval, ApprovalResponse};
pub use contract::{Contract, ContractResponse};
pub use csi::{CsiFeedback, CsiFeedbackResponse};
pub use overview::{Overview, SlaStat};
pub use password::Password;
pub use payment::{Payment, PaymentResponse, PaymentStatus};
pub use plan::{PlanItem, PlanItemResponse, PlanVersion, PlanVersionResponse};
pub use purchase_request::{PurchaseRequest, PurchaseRequestResponse, RequestStatus};
pub use supplier::{Supplier, SupplierResponse};
pub use user::{User, UserResponse, UserRole};
