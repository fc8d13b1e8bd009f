//! Driving port used by the product HTTP handlers.
//!
//! Handlers depend on this trait rather than the repository so business rules
//! can be added in `domain::ProductServiceImpl` without touching the adapters.

use async_trait::async_trait;

use crate::domain::{NewProduct, Product};

use super::ProductRepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductService: Send + Sync {
    async fn get_one(&self, id: i64) -> Result<Product, ProductRepositoryError>;

    async fn get_all(&self) -> Result<Vec<Product>, ProductRepositoryError>;

    async fn create(&self, product: &NewProduct) -> Result<(), ProductRepositoryError>;

    async fn delete(&self, id: i64) -> Result<(), ProductRepositoryError>;
}
