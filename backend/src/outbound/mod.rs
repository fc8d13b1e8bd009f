//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed product repository using Diesel ORM
//! - **id**: flake identifier generator used when creating products
//!
//! Adapters translate between domain types and infrastructure representations
//! and contain no business rules.

pub mod id;
pub mod persistence;
