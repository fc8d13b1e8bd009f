//! PostgreSQL persistence adapters built on Diesel and `diesel-async`.
//!
//! - `DbPool` / `PoolConfig`: bb8 connection pool.
//! - `DieselProductRepository`: `ProductRepository` over the `products` table.
//!
//! Row structs and the table definition are private; only domain types cross
//! the module boundary.

mod diesel_error_mapping;
mod diesel_product_repository;
mod models;
mod pool;
mod schema;

pub use diesel_product_repository::{DEFAULT_QUERY_TIMEOUT, DieselProductRepository};
pub use pool::{DbPool, PoolConfig, PoolError};
