//! Core: configuration, shared state, server lifecycle and startup errors
//!
//! - [`Config`] - environment-driven settings
//! - [`ServerState`] - services shared by every handler
//! - [`Server`] - HTTP listener
//! - [`ServerError`] - startup failures

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
