//! Store Info Model

use serde::{Deserialize, Serialize};

/// Merchant details shown at checkout (bank transfer + WhatsApp contact)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreInfo {
    pub name: String,
    pub bank_name: String,
    pub account_number: String,
    /// International format without `+`, e.g. `2347086879592`
    pub whatsapp_number: String,
    /// `https://wa.me/{whatsapp_number}`
    pub whatsapp_url: String,
}
