//! Database layer - connection pool, migrations and repositories
//!
//! # Design Principles
//!
//! - Connection pool, no Arc<Mutex<Connection>>
//! - List operations use a single JOIN, no N+1 queries
//! - Transactions for multi-step mutations

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_memory_pool, create_pool, create_pool_with_options};
pub use repos::*;
