//! Visionary storefront server
//!
//! # Modules
//!
//! ```text
//! storefront-server/src/
//! ├── core/      # config, state, server lifecycle
//! ├── auth/      # admin JWT + Argon2, admin guard
//! ├── api/       # HTTP routes and handlers
//! ├── db/        # SQLite pool, order repository
//! ├── storage/   # payment proof bucket
//! └── utils/     # errors, logger, checkout validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod storage;
pub mod utils;

pub use crate::auth::{AdminUser, JwtService};
pub use crate::core::{Config, Server, ServerError, ServerState};
pub use crate::utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

pub use crate::utils::logger::{init_logger, init_logger_with_file};

// Security logging macro, target "security"
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
 _   ___     _
| | / (_)__ (_)__  ___  ___ _______ __
| |/ / (_-</ / _ \/ _ \/ _ `/ __/ // /
|___/_/___/_/\___/_//_/\_,_/_/  \_, /
                               /___/
    "#
    );
}
