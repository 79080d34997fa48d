//! OrgChart HTTP server
//!
//! Load/save sink for the organization document plus a REST surface over
//! the core tree operations.
//!
//! - [`config`] - Environment configuration
//! - [`api`] - Router, shared state and endpoints

pub mod api;
pub mod config;

pub use api::{create_router, start_server, AppState, HttpError};
pub use config::{ConfigError, ServerConfig};
