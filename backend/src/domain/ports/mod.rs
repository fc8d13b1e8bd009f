//! Hexagonal ports for the product domain.
//!
//! Driven ports (`ProductRepository`, `IdGenerator`) are implemented by
//! outbound adapters; the driving port (`ProductService`) is consumed by the
//! HTTP handlers.

mod macros;
pub(crate) use macros::define_port_error;

mod id_generator;
mod product_repository;
mod product_service;

#[cfg(test)]
pub use id_generator::MockIdGenerator;
pub use id_generator::{IdGenerationError, IdGenerator};
#[cfg(test)]
pub use product_repository::MockProductRepository;
pub use product_repository::{InMemoryProductRepository, ProductRepository, ProductRepositoryError};
#[cfg(test)]
pub use product_service::MockProductService;
pub use product_service::ProductService;
