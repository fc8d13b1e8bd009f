//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see the driving port,
//! so they can be exercised with mocks or the in-memory repository.

use std::sync::Arc;

use crate::domain::ports::ProductService;

/// Dependency bundle for the product handlers.
#[derive(Clone)]
pub struct HttpState {
    pub products: Arc<dyn ProductService>,
}

impl HttpState {
    /// Bundle the product service for handlers.
    pub fn new(products: Arc<dyn ProductService>) -> Self {
        Self { products }
    }
}
