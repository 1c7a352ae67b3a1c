//! `wa.me` deep links
//!
//! Orders are confirmed by chatting with the merchant on WhatsApp; these
//! helpers build the pre-filled links shown after checkout and on the tracker.

use crate::money::round_money;
use crate::util::short_id;

/// Default merchant number, international format without `+`
pub const DEFAULT_MERCHANT_NUMBER: &str = "2347086879592";

const WA_BASE: &str = "https://wa.me";

/// Plain chat link without a message
pub fn chat_link(merchant_number: &str) -> String {
    format!("{WA_BASE}/{merchant_number}")
}

/// Link with a percent-encoded pre-filled message
pub fn message_link(merchant_number: &str, message: &str) -> String {
    format!(
        "{WA_BASE}/{merchant_number}?text={}",
        urlencoding::encode(message)
    )
}

/// Message the customer sends after placing an order
pub fn confirmation_message(order_id: &str, total: f64) -> String {
    format!(
        "Hello, I just placed an order!\nOrder ID: {order_id}\nTotal: ₦{:.2}\nPlease confirm my payment.",
        round_money(total)
    )
}

pub fn confirmation_link(merchant_number: &str, order_id: &str, total: f64) -> String {
    message_link(merchant_number, &confirmation_message(order_id, total))
}

/// Tracker support link referencing the short order id
pub fn support_link(merchant_number: &str, order_id: &str) -> String {
    message_link(
        merchant_number,
        &format!("Hi, I have a question about my order {}", short_id(order_id)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_message() {
        let msg = confirmation_message("abc-123", 1700.0);
        assert_eq!(
            msg,
            "Hello, I just placed an order!\nOrder ID: abc-123\nTotal: ₦1700.00\nPlease confirm my payment."
        );
    }

    #[test]
    fn test_confirmation_link_is_encoded() {
        let link = confirmation_link(DEFAULT_MERCHANT_NUMBER, "abc-123", 1700.0);
        assert!(link.starts_with("https://wa.me/2347086879592?text="));
        assert!(link.contains("Hello%2C%20I%20just%20placed%20an%20order%21"));
        assert!(link.contains("%0AOrder%20ID%3A%20abc-123"));
        assert!(link.contains("%E2%82%A61700.00"));
        assert!(!link.contains(' '));
        assert!(!link.contains('\n'));
    }

    #[test]
    fn test_support_link_uses_short_id() {
        let link = support_link("2340000000000", "3f2b8c1a-9d4e-4f6a-8b2c-1d2e3f4a5b6c");
        assert!(link.starts_with("https://wa.me/2340000000000?text="));
        assert!(link.ends_with("order%203f2b8c1a..."));
    }

    #[test]
    fn test_chat_link() {
        assert_eq!(chat_link("2347086879592"), "https://wa.me/2347086879592");
    }
}
