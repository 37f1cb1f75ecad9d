//! Core module - server configuration, state and errors
//!
//! - [`Config`] - server configuration
//! - [`ServerState`] - shared state (device handle, readiness latch)
//! - [`Server`] - HTTP server
//! - [`ServerError`] - request-level errors

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::{Readiness, ServerState};
