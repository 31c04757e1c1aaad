use bigdecimal::BigDecimal;
use serde::Serialize;

use crate::models::{RegisterRequest, UpsertStockRequest};

/// One field-level failure. Requests are checked as a whole so the caller
/// gets every problem in a single response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

pub const MAX_PAGE_SIZE: i64 = 100;

pub fn validate_page(page_number: i64, page_size: i64) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if page_number < 1 {
        errors.push(FieldError::new("page_number", "page_number must be at least 1"));
    }
    if page_size < 1 {
        errors.push(FieldError::new("page_size", "page_size must be at least 1"));
    }
    if page_size > MAX_PAGE_SIZE {
        errors.push(FieldError::new(
            "page_size",
            format!("page_size must not exceed {MAX_PAGE_SIZE}"),
        ));
    }
    errors
}

pub fn validate_stock(payload: &UpsertStockRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if payload.symbol.trim().is_empty() {
        errors.push(FieldError::new("symbol", "symbol is required"));
    } else if payload.symbol.len() > 12 {
        errors.push(FieldError::new("symbol", "symbol must not exceed 12 characters"));
    }
    if payload.company_name.trim().is_empty() {
        errors.push(FieldError::new("company_name", "company_name is required"));
    }
    check_money(&mut errors, "price", &payload.price);
    check_money(&mut errors, "divs", &payload.divs);
    if payload.market_cap < 0 {
        errors.push(FieldError::new("market_cap", "market_cap must not be negative"));
    }
    errors
}

/// Shared by create and update: both carry a full title/content pair.
pub fn validate_comment(title: &str, content: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if title.trim().len() < 5 {
        errors.push(FieldError::new("title", "title must be at least 5 characters"));
    }
    if title.len() > 280 {
        errors.push(FieldError::new("title", "title must not exceed 280 characters"));
    }
    if content.trim().is_empty() {
        errors.push(FieldError::new("content", "content is required"));
    }
    errors
}

pub fn validate_registration(payload: &RegisterRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();
    let username = payload.user_name.trim();
    if username.len() < 3 || username.len() > 32 {
        errors.push(FieldError::new(
            "user_name",
            "user_name must be between 3 and 32 characters",
        ));
    }
    if !payload.email.contains('@') {
        errors.push(FieldError::new("email", "email must be a valid address"));
    }
    errors.extend(validate_password(&payload.password));
    errors
}

// Password policy matches the account provider's requirements: length plus
// one of each character class.
fn validate_password(password: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if password.len() < 12 {
        errors.push(FieldError::new(
            "password",
            "password must be at least 12 characters",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push(FieldError::new("password", "password must contain a digit"));
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        errors.push(FieldError::new(
            "password",
            "password must contain a lowercase letter",
        ));
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        errors.push(FieldError::new(
            "password",
            "password must contain an uppercase letter",
        ));
    }
    if password.chars().all(|c| c.is_alphanumeric()) {
        errors.push(FieldError::new(
            "password",
            "password must contain a non-alphanumeric character",
        ));
    }
    errors
}

/// Monetary fields are exact decimals with at most 2 fractional digits.
/// `with_scale` truncates, so equality holds only when nothing was cut off.
fn check_money(errors: &mut Vec<FieldError>, field: &'static str, value: &BigDecimal) {
    if value < &BigDecimal::from(0) {
        errors.push(FieldError::new(field, format!("{field} must not be negative")));
    }
    if value.with_scale(2) != *value {
        errors.push(FieldError::new(
            field,
            format!("{field} must have at most 2 decimal places"),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn stock_payload() -> UpsertStockRequest {
        UpsertStockRequest {
            symbol: "AAPL".to_string(),
            company_name: "Apple Inc.".to_string(),
            price: BigDecimal::from_str("150.00").unwrap(),
            divs: BigDecimal::from_str("0.24").unwrap(),
            industry: "Technology".to_string(),
            market_cap: 3_000_000_000_000,
        }
    }

    #[test]
    fn valid_stock_passes() {
        assert!(validate_stock(&stock_payload()).is_empty());
    }

    #[test]
    fn blank_symbol_is_rejected() {
        let mut payload = stock_payload();
        payload.symbol = "  ".to_string();
        let errors = validate_stock(&payload);
        assert!(errors.iter().any(|e| e.field == "symbol"));
    }

    #[test]
    fn price_with_three_decimals_is_rejected() {
        let mut payload = stock_payload();
        payload.price = BigDecimal::from_str("150.005").unwrap();
        let errors = validate_stock(&payload);
        assert!(errors.iter().any(|e| e.field == "price"));
    }

    #[test]
    fn trailing_zero_scale_is_accepted() {
        let mut payload = stock_payload();
        // 150.00 and 150.0 are the same number; scale alone must not fail it.
        payload.price = BigDecimal::from_str("150.0").unwrap();
        assert!(validate_stock(&payload).is_empty());
    }

    #[test]
    fn negative_money_is_rejected() {
        let mut payload = stock_payload();
        payload.divs = BigDecimal::from_str("-0.10").unwrap();
        let errors = validate_stock(&payload);
        assert!(errors.iter().any(|e| e.field == "divs"));
    }

    #[test]
    fn all_stock_problems_are_reported_together() {
        let payload = UpsertStockRequest {
            symbol: String::new(),
            company_name: String::new(),
            price: BigDecimal::from_str("-1.005").unwrap(),
            divs: BigDecimal::from_str("0.10").unwrap(),
            industry: String::new(),
            market_cap: -5,
        };
        let errors = validate_stock(&payload);
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert!(fields.contains(&"symbol"));
        assert!(fields.contains(&"company_name"));
        assert!(fields.contains(&"price"));
        assert!(fields.contains(&"market_cap"));
    }

    #[test]
    fn short_comment_title_is_rejected() {
        let errors = validate_comment("hey", "Looks like a good entry point");
        assert!(errors.iter().any(|e| e.field == "title"));
    }

    #[test]
    fn blank_comment_content_is_rejected() {
        let errors = validate_comment("Good buy", "   ");
        assert!(errors.iter().any(|e| e.field == "content"));
    }

    #[test]
    fn valid_comment_passes() {
        assert!(validate_comment("Good buy", "Undervalued at current levels").is_empty());
    }

    #[test]
    fn weak_passwords_are_rejected_per_rule() {
        let payload = RegisterRequest {
            user_name: "investor1".to_string(),
            email: "investor@example.com".to_string(),
            password: "alllowercase".to_string(),
        };
        let errors = validate_registration(&payload);
        let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
        assert!(messages.iter().any(|m| m.contains("digit")));
        assert!(messages.iter().any(|m| m.contains("uppercase")));
        assert!(messages.iter().any(|m| m.contains("non-alphanumeric")));
    }

    #[test]
    fn strong_password_passes() {
        let payload = RegisterRequest {
            user_name: "investor1".to_string(),
            email: "investor@example.com".to_string(),
            password: "Str0ng&Secure!pw".to_string(),
        };
        assert!(validate_registration(&payload).is_empty());
    }

    #[test]
    fn page_bounds_are_enforced() {
        assert!(validate_page(1, 20).is_empty());
        assert!(!validate_page(0, 20).is_empty());
        assert!(!validate_page(1, 0).is_empty());
        assert!(!validate_page(1, MAX_PAGE_SIZE + 1).is_empty());
    }
}
