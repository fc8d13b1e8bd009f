//! Domain entities, ports, and use-cases.
//!
//! Public surface:
//! - Product / NewProduct — the single persisted resource and its validated
//!   creation payload.
//! - Error / ErrorCode — transport-agnostic error handed to inbound adapters.
//! - ProductServiceImpl — default `ProductService` implementation.
//! - TraceId — task-local request correlation identifier.

pub mod error;
pub mod ports;
pub mod product;
pub mod product_service;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::product::{NewProduct, Product, ProductValidationError};
pub use self::product_service::ProductServiceImpl;
pub use self::trace_id::TraceId;

/// HTTP header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
