//! cocktaildb-server: JSON API over a cocktail and ingredient database
//!
//! Create, read, update and delete cocktails, look them up by name or by
//! ingredient. Backed by SQLite through sqlx.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{ConfigError, Settings};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
