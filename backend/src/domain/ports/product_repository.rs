//! Driven port for product persistence and its errors.
//!
//! The Diesel adapter in `outbound::persistence` is the production
//! implementation. [`InMemoryProductRepository`] backs HTTP behaviour tests
//! and local runs that do not need PostgreSQL.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{NewProduct, Product};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by product repository adapters.
    pub enum ProductRepositoryError {
        /// No row matched the requested identifier.
        NotFound { id: i64 } => "product {id} not found",
        /// A connection could not be checked out or was lost mid-operation.
        Connection { message: String } => "product repository connection failed: {message}",
        /// The statement failed (constraint violation, driver error, bad row).
        Query { message: String } => "product repository query failed: {message}",
        /// The identifier generator could not mint an id for a new row.
        Generation { message: String } => "product id generation failed: {message}",
        /// The operation exceeded the configured query timeout.
        Timeout { millis: u64 } => "product repository operation timed out after {millis}ms",
    }
}

/// Port for reading and writing products.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Fetch exactly one product; `NotFound` when no row matches.
    async fn get_one(&self, id: i64) -> Result<Product, ProductRepositoryError>;

    /// Fetch every product ordered by id ascending.
    async fn get_all(&self) -> Result<Vec<Product>, ProductRepositoryError>;

    /// Mint an id and insert a new row.
    async fn create(&self, product: &NewProduct) -> Result<(), ProductRepositoryError>;

    /// Remove the row with `id`; `NotFound` when it does not exist.
    async fn delete(&self, id: i64) -> Result<(), ProductRepositoryError>;
}

/// Process-local repository keyed by sequential ids starting at 1.
#[derive(Debug)]
pub struct InMemoryProductRepository {
    rows: Mutex<BTreeMap<i64, Product>>,
    next_id: AtomicI64,
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn rows(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, BTreeMap<i64, Product>>, ProductRepositoryError> {
        self.rows
            .lock()
            .map_err(|_| ProductRepositoryError::query("in-memory product store poisoned"))
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn get_one(&self, id: i64) -> Result<Product, ProductRepositoryError> {
        self.rows()?
            .get(&id)
            .cloned()
            .ok_or_else(|| ProductRepositoryError::not_found(id))
    }

    async fn get_all(&self) -> Result<Vec<Product>, ProductRepositoryError> {
        Ok(self.rows()?.values().cloned().collect())
    }

    async fn create(&self, product: &NewProduct) -> Result<(), ProductRepositoryError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let now = Utc::now();
        self.rows()?.insert(
            id,
            Product {
                id,
                name: product.name().to_owned(),
                price: product.price(),
                created_at: now,
                updated_at: now,
                deleted_at: None,
            },
        );
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), ProductRepositoryError> {
        self.rows()?
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ProductRepositoryError::not_found(id))
    }
}
