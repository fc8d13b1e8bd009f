//! Product use-cases behind the `ProductService` driving port.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{ProductRepository, ProductRepositoryError, ProductService};
use crate::domain::{NewProduct, Product};

/// Forwards each operation to the repository and returns its result untouched.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use product_backend::domain::ProductServiceImpl;
/// use product_backend::domain::ports::{InMemoryProductRepository, ProductService};
///
/// let service = ProductServiceImpl::new(Arc::new(InMemoryProductRepository::new()));
/// let _: &dyn ProductService = &service;
/// ```
pub struct ProductServiceImpl<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: ?Sized> ProductServiceImpl<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> ProductService for ProductServiceImpl<R>
where
    R: ProductRepository + ?Sized,
{
    async fn get_one(&self, id: i64) -> Result<Product, ProductRepositoryError> {
        self.repository.get_one(id).await
    }

    async fn get_all(&self) -> Result<Vec<Product>, ProductRepositoryError> {
        self.repository.get_all().await
    }

    async fn create(&self, product: &NewProduct) -> Result<(), ProductRepositoryError> {
        self.repository.create(product).await
    }

    async fn delete(&self, id: i64) -> Result<(), ProductRepositoryError> {
        self.repository.delete(id).await
    }
}
