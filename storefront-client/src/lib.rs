//! Storefront client
//!
//! Client-side state and flows for the Visionary storefront: a persisted
//! cart, checkout with proof-of-payment upload, order tracking and the admin
//! console, all talking to `storefront-server` over HTTP.

pub mod admin;
pub mod app;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod http;
pub mod storage;
pub mod tracker;

pub use admin::{AdminConsole, AdminSession};
pub use app::Storefront;
pub use cart::CartStore;
pub use checkout::{CheckoutErrors, CheckoutForm, ConfirmedOrder, LastOrder, PaymentProof};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use storage::{LocalStorage, StorageError};
pub use tracker::{OrderTracker, TrackState, TrackView};

// Re-export shared types for convenience
pub use shared::client::{LoginResponse, ProofUploadResponse};
pub use shared::{ApiResponse, OrderDetail, OrderStatus, Product};
