//! Request middleware.
//!
//! Authentication lives with the HTTP adapter in
//! [`crate::inbound::http::auth`]; this module holds the concerns applied to
//! every route.

pub mod trace;

pub use trace::Trace;
