//! `{"Code": int, "Description": string}` response body.
//!
//! Written for every non-2xx response and for create/delete
//! acknowledgements. The field names are part of the public contract.

use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Status code and description pair returned to clients.
///
/// # Examples
/// ```
/// use product_backend::inbound::http::Envelope;
///
/// let body = serde_json::to_string(&Envelope::ok("Product created")).expect("serialises");
/// assert_eq!(body, r#"{"Code":200,"Description":"Product created"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Envelope {
    /// HTTP status code repeated in the body.
    #[serde(rename = "Code")]
    #[schema(example = 400)]
    pub code: u16,
    /// Human-readable outcome.
    #[serde(rename = "Description")]
    #[schema(example = "Invalid id")]
    pub description: String,
}

impl Envelope {
    /// Envelope carrying `status` as its code.
    pub fn new(status: StatusCode, description: impl Into<String>) -> Self {
        Self {
            code: status.as_u16(),
            description: description.into(),
        }
    }

    /// Acknowledgement with status 200.
    pub fn ok(description: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, description)
    }
}
