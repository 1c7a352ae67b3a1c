//! Checkout flow
//!
//! Validate the form locally, upload the payment proof, then create the
//! order from the cart. The cart is only cleared once the order exists.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use shared::error::AppError;
use shared::models::{OrderCreate, OrderDetail};
use shared::validation::{FIELD_PAYMENT_PROOF, MAX_PROOF_BYTES, normalize_phone, validate_customer_fields};
use shared::whatsapp;

use crate::cart::CartStore;
use crate::http::HttpClient;
use crate::storage::{LAST_ORDER_KEY, LocalStorage, StorageError};
use crate::tracker::track_path;
use crate::{ClientError, ClientResult};

/// Form field for cart-level errors
pub const FIELD_CART: &str = "cart";

/// Field-level validation failures, in form order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutErrors {
    errors: Vec<(String, String)>,
}

impl CheckoutErrors {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.insert(field, message);
        errors
    }

    /// Record an error; the first message for a field wins
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        if self.get(&field).is_none() {
            self.errors.push((field, message.into()));
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, m)| m.as_str())
    }

    /// Message shown in the form banner
    pub fn first(&self) -> Option<&str> {
        self.errors.first().map(|(_, m)| m.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|(f, _)| f.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    fn push_app_error(&mut self, err: AppError) {
        let field = err.field().unwrap_or(FIELD_CART).to_string();
        self.insert(field, err.message);
    }
}

impl fmt::Display for CheckoutErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Payment proof image picked by the customer
#[derive(Clone, PartialEq, Eq)]
pub struct PaymentProof {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for PaymentProof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentProof")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

impl PaymentProof {
    /// Accept an image of at most 5 MiB
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, CheckoutErrors> {
        let content_type = content_type.into();
        if bytes.len() > MAX_PROOF_BYTES {
            return Err(CheckoutErrors::single(
                FIELD_PAYMENT_PROOF,
                "File size must be less than 5MB",
            ));
        }
        if !content_type.starts_with("image/") {
            return Err(CheckoutErrors::single(
                FIELD_PAYMENT_PROOF,
                "Please upload an image file",
            ));
        }
        Ok(Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        })
    }

    /// Read a proof from disk, guessing its MIME type from the extension
    pub fn from_path(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(StorageError::from)?;
        let content_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or("application/octet-stream");
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "proof".to_string());
        Self::new(file_name, content_type, bytes).map_err(ClientError::Validation)
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Checkout form contents
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    pub customer_name: String,
    pub whatsapp_number: String,
    pub cohort: String,
    pub nickname: String,
    pub payment_proof: Option<PaymentProof>,
}

impl CheckoutForm {
    pub fn validate(&self) -> Result<(), CheckoutErrors> {
        let mut errors = CheckoutErrors::default();
        for err in validate_customer_fields(
            &self.customer_name,
            &self.whatsapp_number,
            &self.cohort,
            &self.nickname,
        ) {
            errors.push_app_error(err);
        }
        if self.payment_proof.is_none() {
            errors.insert(FIELD_PAYMENT_PROOF, "Proof of payment is required");
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Most recent order, kept so the confirmation view survives a restart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastOrder {
    pub id: String,
    pub total_amount: f64,
}

/// Order confirmed view
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmedOrder {
    pub order_id: String,
    pub total_amount: f64,
    /// Present right after checkout; a restored confirmation only knows id and total
    pub order: Option<OrderDetail>,
    /// `/track?id={id}`
    pub tracking_path: String,
    /// Pre-filled "please confirm my payment" chat
    pub whatsapp_link: String,
}

impl ConfirmedOrder {
    pub fn from_last_order(last: &LastOrder, merchant_number: &str) -> Self {
        Self {
            order_id: last.id.clone(),
            total_amount: last.total_amount,
            order: None,
            tracking_path: track_path(&last.id),
            whatsapp_link: whatsapp::confirmation_link(merchant_number, &last.id, last.total_amount),
        }
    }

    fn from_detail(detail: OrderDetail, merchant_number: &str) -> Self {
        let last = LastOrder {
            id: detail.order.id.clone(),
            total_amount: detail.order.total_amount,
        };
        Self {
            order: Some(detail),
            ..Self::from_last_order(&last, merchant_number)
        }
    }
}

/// Place an order for the current cart
///
/// Nothing is sent when local validation fails. When the order itself is
/// rejected the uploaded proof is left behind and the cart is untouched.
pub async fn submit(
    client: &HttpClient,
    cart: &mut CartStore,
    form: &CheckoutForm,
    storage: &LocalStorage,
    merchant_number: &str,
) -> ClientResult<ConfirmedOrder> {
    if cart.is_empty() {
        return Err(ClientError::Validation(CheckoutErrors::single(
            FIELD_CART,
            "Your cart is empty",
        )));
    }
    form.validate().map_err(ClientError::Validation)?;
    let Some(proof) = &form.payment_proof else {
        return Err(ClientError::Validation(CheckoutErrors::single(
            FIELD_PAYMENT_PROOF,
            "Proof of payment is required",
        )));
    };

    let upload = client
        .upload_proof(&proof.file_name, &proof.content_type, proof.bytes.clone())
        .await?;
    tracing::debug!(file_name = %upload.file_name, size = upload.size, "Payment proof uploaded");

    let order = OrderCreate {
        customer_name: form.customer_name.trim().to_string(),
        whatsapp_number: normalize_phone(&form.whatsapp_number),
        cohort: form.cohort.trim().to_string(),
        nickname: form.nickname.trim().to_string(),
        total_amount: cart.total_price(),
        proof_of_payment_url: upload.url.clone(),
        items: cart.order_items(),
    };

    let detail = match client.create_order(&order).await {
        Ok(detail) => detail,
        Err(e) => {
            tracing::warn!(
                proof = %upload.file_name,
                error = %e,
                "Order creation failed; uploaded proof is orphaned"
            );
            return Err(e);
        }
    };

    tracing::info!(order_id = %detail.order.id, total = detail.order.total_amount, "Order placed");

    cart.clear();
    let last = LastOrder {
        id: detail.order.id.clone(),
        total_amount: detail.order.total_amount,
    };
    if let Err(e) = storage.save(LAST_ORDER_KEY, &last) {
        tracing::warn!(error = %e, "Failed to persist last order");
    }

    Ok(ConfirmedOrder::from_detail(detail, merchant_number))
}
