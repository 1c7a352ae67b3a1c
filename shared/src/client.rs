//! Client-related types shared between server and client
//!
//! Request/response types used in API communication that are not database
//! rows. Row types live in [`crate::models`].

use serde::{Deserialize, Serialize};

// =============================================================================
// Admin Auth API DTOs
// =============================================================================

/// Admin login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Admin login response data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    /// Unix millis
    pub expires_at: i64,
    pub username: String,
}

// =============================================================================
// Payment proof API DTOs
// =============================================================================

/// Result of `POST /api/proofs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofUploadResponse {
    /// Randomized object name inside the proof bucket
    pub file_name: String,
    /// Public URL to attach to the order
    pub url: String,
    pub size: usize,
    pub content_type: String,
}

// =============================================================================
// Misc
// =============================================================================

/// Result of `DELETE` endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub id: String,
    pub deleted: bool,
}

/// `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
