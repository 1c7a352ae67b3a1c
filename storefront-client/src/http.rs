//! HTTP client for the storefront API
//!
//! Success bodies are the bare payload; failures carry an [`ApiResponse`]
//! envelope that is turned back into the server's [`AppError`].

use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use shared::ApiResponse;
use shared::catalog::Product;
use shared::client::{DeleteResponse, HealthResponse, LoginRequest, LoginResponse, ProofUploadResponse};
use shared::models::{OrderCreate, OrderDetail, OrderStats, OrderStatus, OrderStatusUpdate, Order, StoreInfo};

use crate::{ClientConfig, ClientError, ClientResult};

/// Multipart field the proof endpoint reads
const PROOF_FIELD: &str = "file";

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Attach an admin bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let request = self.client.request(method, self.url(path));
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.request(reqwest::Method::GET, path).send().await?;
        Self::handle_response(response).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ClientResult<T> {
        let response = self
            .request(reqwest::Method::POST, path)
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ClientResult<T> {
        let response = self
            .request(reqwest::Method::PUT, path)
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.request(reqwest::Method::DELETE, path).send().await?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return match serde_json::from_slice::<ApiResponse>(&body) {
                Ok(envelope) => Err(envelope.into_error().into()),
                Err(_) => Err(ClientError::InvalidResponse(format!(
                    "HTTP {status}: {}",
                    String::from_utf8_lossy(&body)
                ))),
            };
        }

        serde_json::from_slice(&body)
            .map_err(|e| ClientError::InvalidResponse(format!("Failed to decode response: {e}")))
    }

    // ========== Public API ==========

    pub async fn health(&self) -> ClientResult<HealthResponse> {
        self.get("/health").await
    }

    pub async fn products(&self) -> ClientResult<Vec<Product>> {
        self.get("/api/products").await
    }

    pub async fn store_info(&self) -> ClientResult<StoreInfo> {
        self.get("/api/store").await
    }

    /// Upload a payment proof image; the returned URL goes on the order
    pub async fn upload_proof(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> ClientResult<ProofUploadResponse> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)?;
        let form = Form::new().part(PROOF_FIELD, part);

        let response = self
            .request(reqwest::Method::POST, "/api/proofs")
            .multipart(form)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    pub async fn create_order(&self, order: &OrderCreate) -> ClientResult<OrderDetail> {
        self.post("/api/orders", order).await
    }

    pub async fn get_order(&self, id: &str) -> ClientResult<OrderDetail> {
        self.get(&format!("/api/orders/{}", urlencoding::encode(id)))
            .await
    }

    // ========== Admin API ==========

    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.post("/api/admin/login", &request).await
    }

    pub async fn list_orders(&self) -> ClientResult<Vec<Order>> {
        self.get("/api/admin/orders").await
    }

    pub async fn order_stats(&self) -> ClientResult<OrderStats> {
        self.get("/api/admin/orders/stats").await
    }

    pub async fn admin_order(&self, id: &str) -> ClientResult<OrderDetail> {
        self.get(&format!("/api/admin/orders/{}", urlencoding::encode(id)))
            .await
    }

    pub async fn update_order_status(&self, id: &str, status: OrderStatus) -> ClientResult<Order> {
        self.put(
            &format!("/api/admin/orders/{}/status", urlencoding::encode(id)),
            &OrderStatusUpdate { status },
        )
        .await
    }

    pub async fn delete_order(&self, id: &str) -> ClientResult<DeleteResponse> {
        self.delete(&format!("/api/admin/orders/{}", urlencoding::encode(id)))
            .await
    }
}
