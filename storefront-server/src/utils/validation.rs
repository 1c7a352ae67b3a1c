//! Checkout payload validation
//!
//! Field rules come from `shared::validation` so the client form and the
//! order endpoint reject the same input. The first failure wins.

use shared::models::{OrderCreate, OrderItemInput};
use shared::money::{
    MAX_QUANTITY, money_eq, sum_lines, validate_price, validate_quantity, validate_total,
};
use shared::validation::{
    FIELD_PAYMENT_PROOF, MAX_PRODUCT_NAME_LEN, MAX_URL_LEN, validate_customer_fields,
    validate_required_text,
};

use crate::utils::{AppError, AppResult, ErrorCode};

/// Validate one cart line
pub fn validate_item(item: &OrderItemInput) -> AppResult<()> {
    validate_required_text(
        &item.product_name,
        "product_name",
        "Product name",
        MAX_PRODUCT_NAME_LEN,
    )?;
    validate_price(item.unit_price, "unit_price")?;
    validate_quantity(item.quantity)?;
    Ok(())
}

/// Validate everything about a checkout that does not need storage access
///
/// Order: customer fields, items, declared total, then the proof URL shape.
/// The declared total must match the item sum within 0.01.
pub fn validate_order_create(data: &OrderCreate) -> AppResult<()> {
    if let Some(err) = validate_customer_fields(
        &data.customer_name,
        &data.whatsapp_number,
        &data.cohort,
        &data.nickname,
    )
    .into_iter()
    .next()
    {
        return Err(err);
    }

    if data.items.is_empty() {
        return Err(AppError::new(ErrorCode::CartEmpty));
    }
    for item in &data.items {
        validate_item(item)?;
    }

    validate_total(data.total_amount, data.items.len(), "total_amount")?;
    let computed = sum_lines(data.items.iter().map(|i| (i.unit_price, i.quantity)));
    if !money_eq(data.total_amount, computed) {
        return Err(AppError::with_message(
            ErrorCode::OrderTotalMismatch,
            format!(
                "Order total {:.2} does not match item total {:.2}",
                data.total_amount, computed
            ),
        )
        .with_detail("declared", data.total_amount)
        .with_detail("computed", computed));
    }

    if data.proof_of_payment_url.trim().is_empty() {
        return Err(AppError::new(ErrorCode::ProofRequired).with_detail("field", FIELD_PAYMENT_PROOF));
    }
    if data.proof_of_payment_url.len() > MAX_URL_LEN {
        return Err(AppError::validation(format!(
            "Proof URL is too long ({} chars, max {MAX_URL_LEN})",
            data.proof_of_payment_url.len()
        ))
        .with_detail("field", FIELD_PAYMENT_PROOF));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> OrderCreate {
        OrderCreate {
            customer_name: "Ada".to_string(),
            whatsapp_number: "08012345678".to_string(),
            cohort: "C4".to_string(),
            nickname: "ada".to_string(),
            total_amount: 1700.0,
            proof_of_payment_url: "http://localhost:3000/api/proofs/a.jpg".to_string(),
            items: vec![
                OrderItemInput {
                    product_name: "Visionary Popcorn".to_string(),
                    quantity: 2,
                    unit_price: 600.0,
                },
                OrderItemInput {
                    product_name: "Sachet Water".to_string(),
                    quantity: 1,
                    unit_price: 500.0,
                },
            ],
        }
    }

    #[test]
    fn test_valid_order_passes() {
        assert!(validate_order_create(&valid()).is_ok());
    }

    #[test]
    fn test_customer_field_errors_first() {
        let mut data = valid();
        data.customer_name = " ".to_string();
        data.items.clear();
        let err = validate_order_create(&data).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.field(), Some("customer_name"));
    }

    #[test]
    fn test_bad_phone_rejected() {
        let mut data = valid();
        data.whatsapp_number = "12-34".to_string();
        let err = validate_order_create(&data).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPhoneNumber);
    }

    #[test]
    fn test_empty_items_rejected() {
        let mut data = valid();
        data.items.clear();
        data.total_amount = 0.0;
        assert_eq!(validate_order_create(&data).unwrap_err().code, ErrorCode::CartEmpty);
    }

    #[test]
    fn test_item_rules() {
        let mut data = valid();
        data.items[0].quantity = 0;
        assert_eq!(
            validate_order_create(&data).unwrap_err().code,
            ErrorCode::InvalidQuantity
        );

        let mut data = valid();
        data.items[1].unit_price = -1.0;
        assert_eq!(
            validate_order_create(&data).unwrap_err().code,
            ErrorCode::InvalidAmount
        );
    }

    #[test]
    fn test_total_mismatch_rejected() {
        let mut data = valid();
        data.total_amount = 1600.0;
        let err = validate_order_create(&data).unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderTotalMismatch);

        // within tolerance
        data.total_amount = 1700.004;
        assert!(validate_order_create(&data).is_ok());
    }

    #[test]
    fn test_total_above_unit_price_cap_accepted() {
        let mut data = valid();
        data.items = vec![OrderItemInput {
            product_name: "Visionary Popcorn".to_string(),
            quantity: MAX_QUANTITY,
            unit_price: 600.0,
        }];
        data.total_amount = 600.0 * f64::from(MAX_QUANTITY);
        assert!(validate_order_create(&data).is_ok());

        data.items[0].quantity = 1700;
        data.total_amount = 1_020_000.0;
        assert!(validate_order_create(&data).is_ok());

        data.total_amount = -1.0;
        assert_eq!(
            validate_order_create(&data).unwrap_err().code,
            ErrorCode::InvalidAmount
        );
    }

    #[test]
    fn test_proof_required() {
        let mut data = valid();
        data.proof_of_payment_url = String::new();
        let err = validate_order_create(&data).unwrap_err();
        assert_eq!(err.code, ErrorCode::ProofRequired);
        assert_eq!(err.field(), Some(FIELD_PAYMENT_PROOF));
    }
}
