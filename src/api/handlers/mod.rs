//! HTTP request handlers.

pub mod auth_handler;
pub mod contract_handler;
pub mod csi_handler;
pub mod email_handler;
pub mod overview_handler;
pub mod payment_handler;
pub mod plan_handler;
pub mod request_handler;
pub mod supplier_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use contract_handler::contract_routes;
pub use csi_handler::csi_routes;
pub use email_handler::email_routes;
pub use overview_handler::overview_routes;
pub use payment_handler::payment_routes;
pub use plan_handler::plan_routes;
pub use request_handler::request_routes;
pub use supplier_handler::supplier_routes;
pub use user_handler::user_routes;

use crate::errors::{AppError, AppResult};

/// Parse a comma-separated month list (`"1,2,3"`); empty or absent means
/// no month restriction.
pub(crate) fn parse_months(csv: Option<&str>) -> AppResult<Vec<i16>> {
    let csv = match csv {
        Some(csv) if !csv.trim().is_empty() => csv,
        _ => return Ok(Vec::new()),
    };

    let mut months = Vec::new();
    for part in csv.split(',') {
        let month: i16 = part
            .trim()
            .parse()
            .map_err(|_| AppError::BadRequest(format!("Invalid month: {}", part.trim())))?;
        if !(1..=12).contains(&month) {
            return Err(AppError::BadRequest(format!("Month out of range: {}", month)));
        }
        months.push(month);
    }
    Ok(months)
}

#[cfg(test)]
mod tests {
    use super::parse_months;

    #[test]
    fn parses_month_csv() {
        assert_eq!(parse_months(Some("1,2,12")).unwrap(), vec![1, 2, 12]);
        assert_eq!(parse_months(Some(" 3 , 4 ")).unwrap(), vec![3, 4]);
    }

    #[test]
    fn empty_means_no_restriction() {
        assert!(parse_months(None).unwrap().is_empty());
        assert!(parse_months(Some("")).unwrap().is_empty());
    }

    #[test]
    fn rejects_out_of_range_and_garbage() {
        assert!(parse_months(Some("0")).is_err());
        assert!(parse_months(Some("13")).is_err());
        assert!(parse_months(Some("abc")).is_err());
    }
}
