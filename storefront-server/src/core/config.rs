use std::path::PathBuf;

use argon2::PasswordHash;
use shared::models::StoreInfo;
use shared::validation::MAX_PROOF_BYTES;
use shared::whatsapp::{self, DEFAULT_MERCHANT_NUMBER};

use crate::auth::jwt::{MIN_SECRET_LEN, generate_printable_secret};
use crate::auth::password::hash_password;
use crate::auth::JwtConfig;
use crate::core::ServerError;

/// Name of the proof bucket directory under `work_dir`
pub const PROOF_BUCKET: &str = "proof-of-payment";

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Notes |
/// |----------|---------|-------|
/// | WORK_DIR | ./data | database, proof bucket |
/// | HTTP_PORT | 3000 | |
/// | DATABASE_PATH | {WORK_DIR}/storefront.db | |
/// | PUBLIC_BASE_URL | http://localhost:{HTTP_PORT} | prefix of proof URLs |
/// | ENVIRONMENT | development | development / staging / production |
/// | LOG_LEVEL | info | |
/// | LOG_DIR | - | daily rolling files when set |
/// | JWT_SECRET | random in development | required elsewhere, min 32 chars |
/// | JWT_EXPIRATION_MINUTES | 480 | |
/// | ADMIN_USERNAME | admin | |
/// | ADMIN_PASSWORD_HASH | - | Argon2 PHC string, required outside development |
/// | ADMIN_PASSWORD | admin | development only, hashed at startup |
/// | LOGIN_DELAY_MS | 500 | fixed delay on every login attempt |
/// | MAX_UPLOAD_BYTES | 5242880 | |
/// | MERCHANT_WHATSAPP | 2347086879592 | |
/// | STORE_NAME | Visionary | |
/// | BANK_NAME | Opay | |
/// | BANK_ACCOUNT_NUMBER | 7086879592 | |
/// | REQUEST_TIMEOUT_MS | 30000 | |
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub http_port: u16,
    pub database_path: String,
    /// Scheme + host the proof URLs are built on, without trailing slash
    pub public_base_url: String,
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub jwt: JwtConfig,
    pub admin_username: String,
    pub admin_password_hash: String,
    pub login_delay_ms: u64,
    pub max_upload_bytes: usize,
    pub merchant_whatsapp: String,
    pub store_name: String,
    pub bank_name: String,
    pub bank_account_number: String,
    pub request_timeout_ms: u64,
}

impl Config {
    /// Read a secret; outside development it must be set and non-empty.
    ///
    /// Returns `None` in development when unset so the caller can pick a
    /// throwaway value.
    fn require_secret(name: &str, environment: &str) -> Result<Option<String>, ServerError> {
        match std::env::var(name) {
            Ok(v) if !v.is_empty() => Ok(Some(v)),
            _ if environment == "development" => Ok(None),
            Ok(_) => Err(ServerError::Config(format!(
                "{name} must not be empty in {environment} environment"
            ))),
            Err(_) => Err(ServerError::Config(format!(
                "{name} must be set in {environment} environment"
            ))),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ServerError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let http_port = std::env::var("HTTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let jwt_secret = match Self::require_secret("JWT_SECRET", &environment)? {
            Some(secret) => {
                if secret.len() < MIN_SECRET_LEN && environment != "development" {
                    return Err(ServerError::Config(format!(
                        "JWT_SECRET must be at least {MIN_SECRET_LEN} characters long"
                    )));
                }
                secret
            }
            None => {
                tracing::warn!("JWT_SECRET not set, using a random key; sessions end on restart");
                generate_printable_secret()
            }
        };
        let mut jwt = JwtConfig::new(jwt_secret);
        if let Some(minutes) = std::env::var("JWT_EXPIRATION_MINUTES")
            .ok()
            .and_then(|m| m.parse().ok())
        {
            jwt.expiration_minutes = minutes;
        }

        let admin_password_hash = match Self::require_secret("ADMIN_PASSWORD_HASH", &environment)? {
            Some(hash) => {
                PasswordHash::new(&hash).map_err(|e| {
                    ServerError::Config(format!("ADMIN_PASSWORD_HASH is not a valid PHC string: {e}"))
                })?;
                hash
            }
            None => {
                let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin".into());
                tracing::warn!("ADMIN_PASSWORD_HASH not set, hashing ADMIN_PASSWORD for development");
                hash_password(&password)
                    .map_err(|e| ServerError::Config(format!("Failed to hash admin password: {e}")))?
            }
        };

        Ok(Self {
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| format!("{work_dir}/storefront.db")),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| format!("http://localhost:{http_port}")),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            admin_username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into()),
            login_delay_ms: std::env::var("LOGIN_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(500),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(MAX_PROOF_BYTES),
            merchant_whatsapp: std::env::var("MERCHANT_WHATSAPP")
                .unwrap_or_else(|_| DEFAULT_MERCHANT_NUMBER.into()),
            store_name: std::env::var("STORE_NAME").unwrap_or_else(|_| "Visionary".into()),
            bank_name: std::env::var("BANK_NAME").unwrap_or_else(|_| "Opay".into()),
            bank_account_number: std::env::var("BANK_ACCOUNT_NUMBER")
                .unwrap_or_else(|_| "7086879592".into()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30000),
            work_dir,
            http_port,
            environment,
            jwt,
            admin_password_hash,
        })
    }

    /// Development configuration rooted at `work_dir`, with no login delay
    ///
    /// Used by tests and local tooling.
    pub fn local(
        work_dir: impl Into<String>,
        admin_username: &str,
        admin_password: &str,
    ) -> Result<Self, ServerError> {
        let work_dir = work_dir.into();
        let admin_password_hash = hash_password(admin_password)
            .map_err(|e| ServerError::Config(format!("Failed to hash admin password: {e}")))?;
        Ok(Self {
            database_path: format!("{work_dir}/storefront.db"),
            work_dir,
            http_port: 3000,
            public_base_url: "http://localhost:3000".to_string(),
            environment: "development".to_string(),
            log_level: "info".to_string(),
            log_dir: None,
            jwt: JwtConfig::new(generate_printable_secret()),
            admin_username: admin_username.to_string(),
            admin_password_hash,
            login_delay_ms: 0,
            max_upload_bytes: MAX_PROOF_BYTES,
            merchant_whatsapp: DEFAULT_MERCHANT_NUMBER.to_string(),
            store_name: "Visionary".to_string(),
            bank_name: "Opay".to_string(),
            bank_account_number: "7086879592".to_string(),
            request_timeout_ms: 30000,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Directory holding uploaded payment proofs
    pub fn proofs_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(PROOF_BUCKET)
    }

    /// Merchant details served by `GET /api/store`
    pub fn store_info(&self) -> StoreInfo {
        StoreInfo {
            name: self.store_name.clone(),
            bank_name: self.bank_name.clone(),
            account_number: self.bank_account_number.clone(),
            whatsapp_number: self.merchant_whatsapp.clone(),
            whatsapp_url: whatsapp::chat_link(&self.merchant_whatsapp),
        }
    }
}
