//! Input validation helpers
//!
//! Checkout field rules shared by the client form and the order endpoint.
//! Every error is tagged with the offending field in `details.field`.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Customer name, cohort, nickname
pub const MAX_NAME_LEN: usize = 200;

/// Product names copied into order items
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Proof URLs
pub const MAX_URL_LEN: usize = 2048;

/// Payment proof images (5 MiB)
pub const MAX_PROOF_BYTES: usize = 5 * 1024 * 1024;

/// Optional leading `+`, then 10 to 15 digits
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+]?[0-9]{10,15}$").expect("phone regex"));

// ── Field names (wire + form) ───────────────────────────────────────

pub const FIELD_CUSTOMER_NAME: &str = "customer_name";
pub const FIELD_WHATSAPP_NUMBER: &str = "whatsapp_number";
pub const FIELD_COHORT: &str = "cohort";
pub const FIELD_NICKNAME: &str = "nickname";
pub const FIELD_PAYMENT_PROOF: &str = "payment_proof";

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(
    value: &str,
    field: &str,
    label: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::required_field(field, format!("{label} is required")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{label} is too long ({} chars, max {max_len})",
            value.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Strip all whitespace from a phone number
pub fn normalize_phone(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}

/// WhatsApp number: required, and `^[+]?[0-9]{10,15}$` once whitespace is removed
pub fn validate_whatsapp_number(value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::required_field(
            FIELD_WHATSAPP_NUMBER,
            "WhatsApp number is required",
        ));
    }
    if !PHONE_RE.is_match(&normalize_phone(value)) {
        return Err(AppError::with_message(
            ErrorCode::InvalidPhoneNumber,
            "Please enter a valid WhatsApp number (e.g., 08012345678)",
        )
        .with_detail("field", FIELD_WHATSAPP_NUMBER));
    }
    Ok(())
}

/// Validate the four customer contact fields, collecting every failure
pub fn validate_customer_fields(
    customer_name: &str,
    whatsapp_number: &str,
    cohort: &str,
    nickname: &str,
) -> Vec<AppError> {
    [
        validate_required_text(customer_name, FIELD_CUSTOMER_NAME, "Name", MAX_NAME_LEN),
        validate_whatsapp_number(whatsapp_number),
        validate_required_text(cohort, FIELD_COHORT, "Cohort", MAX_NAME_LEN),
        validate_required_text(nickname, FIELD_NICKNAME, "Nickname", MAX_NAME_LEN),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_accepts_local_and_international() {
        assert!(validate_whatsapp_number("08012345678").is_ok());
        assert!(validate_whatsapp_number("+2348012345678").is_ok());
        assert!(validate_whatsapp_number("0801 234 5678").is_ok());
    }

    #[test]
    fn test_phone_rejects_malformed() {
        for bad in ["12345", "080-1234-5678", "+234801234567890123", "phone"] {
            let err = validate_whatsapp_number(bad).unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidPhoneNumber, "{bad}");
            assert_eq!(err.field(), Some(FIELD_WHATSAPP_NUMBER));
        }
    }

    #[test]
    fn test_phone_required() {
        let err = validate_whatsapp_number("   ").unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.message, "WhatsApp number is required");
    }

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Ada", FIELD_COHORT, "Cohort", 10).is_ok());

        let err = validate_required_text("  ", FIELD_COHORT, "Cohort", 10).unwrap_err();
        assert_eq!(err.message, "Cohort is required");
        assert_eq!(err.field(), Some(FIELD_COHORT));

        let err = validate_required_text("abcdefghijk", FIELD_COHORT, "Cohort", 10).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_customer_fields_collects_all() {
        let errors = validate_customer_fields("", "nope", "", "nick");
        let fields: Vec<_> = errors.iter().filter_map(|e| e.field()).collect();
        assert_eq!(
            fields,
            vec![FIELD_CUSTOMER_NAME, FIELD_WHATSAPP_NUMBER, FIELD_COHORT]
        );
        assert!(validate_customer_fields("Ada", "08012345678", "C4", "ada").is_empty());
    }
}
