//! Order tracker
//!
//! Every lookup is a fresh `GET /api/orders/{id}`; nothing is cached.

use shared::models::{OrderDetail, OrderStatus};
use shared::util::short_id;
use shared::whatsapp;

use crate::ClientError;
use crate::http::HttpClient;

/// Shown for any failure other than not-found
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch order. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum TrackState {
    Loading,
    NotFound,
    Error(String),
    Found(OrderDetail),
}

impl TrackState {
    pub fn order(&self) -> Option<&OrderDetail> {
        match self {
            TrackState::Found(detail) => Some(detail),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<OrderStatus> {
        self.order().map(|d| d.order.status)
    }
}

/// Tracking page path for an order
pub fn track_path(order_id: &str) -> String {
    format!("/track?id={}", urlencoding::encode(order_id))
}

/// Order id from a `?id=...` query string; blank ids are ignored
pub fn order_id_from_query(query: &str) -> Option<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "id")
        .and_then(|(_, value)| urlencoding::decode(value).ok())
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
}

/// Tracker text and links for a found order
#[derive(Debug, Clone, PartialEq)]
pub struct TrackView {
    pub short_id: String,
    pub badge: &'static str,
    pub headline: &'static str,
    pub description: &'static str,
    pub support_link: String,
}

impl TrackView {
    pub fn new(detail: &OrderDetail, merchant_number: &str) -> Self {
        let status = detail.order.status;
        Self {
            short_id: short_id(&detail.order.id),
            badge: status.badge(),
            headline: status.headline(),
            description: status.description(),
            support_link: whatsapp::support_link(merchant_number, &detail.order.id),
        }
    }
}

pub struct OrderTracker {
    client: HttpClient,
    state: Option<TrackState>,
}

impl OrderTracker {
    pub fn new(client: HttpClient) -> Self {
        Self { client, state: None }
    }

    /// Last lookup result
    pub fn state(&self) -> Option<&TrackState> {
        self.state.as_ref()
    }

    /// Look up an order; blank input leaves the tracker untouched
    pub async fn track(&mut self, input: &str) -> Option<&TrackState> {
        let id = input.trim();
        if id.is_empty() {
            return None;
        }

        self.state = Some(TrackState::Loading);
        let next = match self.client.get_order(id).await {
            Ok(detail) => TrackState::Found(detail),
            Err(ClientError::NotFound(_)) => TrackState::NotFound,
            Err(e) => {
                tracing::warn!(order_id = %id, error = %e, "Order lookup failed");
                TrackState::Error(FETCH_FAILED_MESSAGE.to_string())
            }
        };
        self.state = Some(next);
        self.state.as_ref()
    }
}
