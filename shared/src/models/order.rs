//! Order Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AppError, ErrorCode};

/// Order lifecycle status
///
/// Stored as its variant name (`Pending`, `Confirmed`, `Cancelled`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "PascalCase"))]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [Self::Pending, Self::Confirmed, Self::Cancelled];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Status transitions the admin console offers from this status.
    ///
    /// The server accepts any transition; only pending orders get buttons.
    pub fn admin_actions(&self) -> &'static [OrderStatus] {
        match self {
            Self::Pending => &[Self::Confirmed, Self::Cancelled],
            Self::Confirmed | Self::Cancelled => &[],
        }
    }

    /// Badge text shown by the tracker
    pub fn badge(&self) -> &'static str {
        match self {
            Self::Pending => "Awaiting Confirmation",
            Self::Confirmed => "Payment Confirmed!",
            Self::Cancelled => "Order Cancelled",
        }
    }

    /// Headline of the tracker status panel
    pub fn headline(&self) -> &'static str {
        match self {
            Self::Pending => "Order Received",
            Self::Confirmed => "Payment Confirmed!",
            Self::Cancelled => "Order Cancelled",
        }
    }

    /// Body text of the tracker status panel
    pub fn description(&self) -> &'static str {
        match self {
            Self::Pending => {
                "Your order has been received and is awaiting payment verification. \
                 We'll confirm your payment shortly!"
            }
            Self::Confirmed => {
                "Great news! Your payment has been confirmed and your order is being prepared. \
                 We'll contact you for delivery soon!"
            }
            Self::Cancelled => {
                "This order has been cancelled. If you believe this is a mistake, \
                 please contact us below."
            }
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Confirmed" => Ok(Self::Confirmed),
            "Cancelled" => Ok(Self::Cancelled),
            other => Err(AppError::with_message(
                ErrorCode::InvalidOrderStatus,
                format!("Unknown order status: {other}"),
            )),
        }
    }
}

/// Order row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    /// UUID v4 string assigned by the server
    pub id: String,
    pub customer_name: String,
    pub whatsapp_number: String,
    pub cohort: String,
    pub nickname: String,
    /// Naira, 2dp
    pub total_amount: f64,
    pub status: OrderStatus,
    pub proof_of_payment_url: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order line item row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: String,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub created_at: i64,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        crate::money::to_f64(crate::money::line_total(self.unit_price, self.quantity))
    }
}

/// Order with its line items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// Admin dashboard counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderStats {
    pub total: i64,
    pub pending: i64,
    pub confirmed: i64,
    pub cancelled: i64,
    /// Sum of `total_amount` over orders that are not cancelled
    pub revenue: f64,
}

/// One cart line submitted at checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: f64,
}

/// Checkout payload for `POST /api/orders`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCreate {
    pub customer_name: String,
    pub whatsapp_number: String,
    pub cohort: String,
    pub nickname: String,
    pub total_amount: f64,
    /// URL returned by the proof upload
    pub proof_of_payment_url: String,
    pub items: Vec<OrderItemInput>,
}

/// Payload for `PUT /api/admin/orders/{id}/status`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_order() -> Order {
        Order {
            id: "3f2b8c1a-9d4e-4f6a-8b2c-1d2e3f4a5b6c".to_string(),
            customer_name: "Ada".to_string(),
            whatsapp_number: "08012345678".to_string(),
            cohort: "C4".to_string(),
            nickname: "ada".to_string(),
            total_amount: 1700.0,
            status: OrderStatus::Pending,
            proof_of_payment_url: None,
            created_at: 1,
            updated_at: 1,
        }
    }

    #[test]
    fn test_status_parse_and_display() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
            assert_eq!(status.to_string(), status.as_str());
        }
        let err = "Shipped".parse::<OrderStatus>().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidOrderStatus);
    }

    #[test]
    fn test_status_serde_uses_variant_name() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Cancelled).unwrap(),
            "\"Cancelled\""
        );
        let parsed: OrderStatusUpdate =
            serde_json::from_str(r#"{"status":"Confirmed"}"#).unwrap();
        assert_eq!(parsed.status, OrderStatus::Confirmed);
        assert!(serde_json::from_str::<OrderStatusUpdate>(r#"{"status":"confirmed"}"#).is_err());
    }

    #[test]
    fn test_admin_actions_only_from_pending() {
        assert_eq!(
            OrderStatus::Pending.admin_actions(),
            &[OrderStatus::Confirmed, OrderStatus::Cancelled]
        );
        assert!(OrderStatus::Confirmed.admin_actions().is_empty());
        assert!(OrderStatus::Cancelled.admin_actions().is_empty());
    }

    #[test]
    fn test_status_text() {
        assert_eq!(OrderStatus::Pending.badge(), "Awaiting Confirmation");
        assert_eq!(OrderStatus::Pending.headline(), "Order Received");
        assert!(OrderStatus::Cancelled.description().contains("cancelled"));
    }

    #[test]
    fn test_detail_flattens_order() {
        let detail = OrderDetail {
            order: sample_order(),
            items: vec![OrderItem {
                id: 1,
                order_id: sample_order().id,
                product_name: "Visionary Popcorn".to_string(),
                quantity: 2,
                unit_price: 600.0,
                created_at: 1,
            }],
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["customer_name"], "Ada");
        assert_eq!(json["status"], "Pending");
        assert_eq!(json["items"][0]["quantity"], 2);

        let back: OrderDetail = serde_json::from_value(json).unwrap();
        assert_eq!(back, detail);
        assert_eq!(back.items[0].line_total(), 1200.0);
    }
}
