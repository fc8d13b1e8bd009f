//! Product CRUD endpoints.
//!
//! ```text
//! GET    /products
//! GET    /products/{id}
//! POST   /product
//! DELETE /products/{id}
//! ```
//!
//! Validation failures are answered here with a 400 envelope; service errors
//! are classified by [`map_product_error`].

use actix_web::{HttpResponse, delete, get, post, web};
use chrono::{DateTime, Utc};
use futures_util::StreamExt as _;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use utoipa::ToSchema;

use crate::domain::ports::ProductRepositoryError;
use crate::domain::{Error, NewProduct, Product};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::state::HttpState;

/// Product as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct ProductResponse {
    #[serde(rename = "ID")]
    #[schema(example = 412316860416_i64)]
    pub id: i64,
    #[schema(example = "Desk lamp")]
    pub name: String,
    #[schema(example = 1299)]
    pub price: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Always `null` while deletes remove rows.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            created_at: product.created_at,
            updated_at: product.updated_at,
            deleted_at: product.deleted_at,
        }
    }
}

/// Largest create body read; anything bigger is answered like an undecodable one.
pub const MAX_CREATE_BODY_BYTES: usize = 1024 * 1024;

/// Creation request body.
///
/// Accepts `name`/`Name` and `price`/`Price`; absent fields default to empty
/// and zero so they surface as "Missing field" rather than a decode error.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    #[serde(default, alias = "Name")]
    #[schema(example = "Desk lamp")]
    pub name: String,
    #[serde(default, alias = "Price")]
    #[schema(example = 1299)]
    pub price: i64,
}

/// Parse a path id: base-10 `i64`, not negative.
///
/// A trailing format suffix such as `.json` is dropped before parsing.
fn parse_product_id(raw: &str) -> Result<i64, Error> {
    let digits = raw.rsplit_once('.').map_or(raw, |(id, _format)| id);
    let id: i64 = digits
        .parse()
        .map_err(|_| Error::invalid_request("Cannot convert id to integer"))?;
    if id < 0 {
        return Err(Error::invalid_request("Invalid id"));
    }
    Ok(id)
}

/// Classify a service failure for the client.
///
/// `NotFound` is the only failure the client may act on; everything else is an
/// internal error whose text is logged and then redacted.
pub fn map_product_error(error: ProductRepositoryError) -> Error {
    match error {
        ProductRepositoryError::NotFound { id } => {
            debug!(product_id = id, "product not found");
            Error::not_found("Product not found")
        }
        ProductRepositoryError::Connection { .. }
        | ProductRepositoryError::Query { .. }
        | ProductRepositoryError::Generation { .. }
        | ProductRepositoryError::Timeout { .. } => Error::internal(error.to_string()),
    }
}

/// List every product ordered by id.
#[utoipa::path(
    get,
    path = "/products",
    tags = ["products"],
    responses(
        (status = 200, description = "All products", body = [ProductResponse]),
        (status = 401, description = "Missing or invalid bearer token", body = Envelope),
        (status = 500, description = "Internal server error", body = Envelope)
    )
)]
#[get("")]
pub async fn list_products(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let products = state.products.get_all().await.map_err(map_product_error)?;
    let body: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Fetch one product by id.
#[utoipa::path(
    get,
    path = "/products/{id}",
    tags = ["products"],
    params(("id" = String, Path, description = "Non-negative product id")),
    responses(
        (status = 200, description = "The product", body = ProductResponse),
        (status = 400, description = "Malformed or negative id", body = Envelope),
        (status = 401, description = "Missing or invalid bearer token", body = Envelope),
        (status = 404, description = "No product with this id", body = Envelope),
        (status = 500, description = "Internal server error", body = Envelope)
    )
)]
#[get("/{id}")]
pub async fn get_product(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_product_id(&path)?;
    let product = state.products.get_one(id).await.map_err(map_product_error)?;
    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// Create a product with a freshly minted id.
#[utoipa::path(
    post,
    path = "/product",
    tags = ["products"],
    request_body = CreateProductRequest,
    responses(
        (status = 200, description = "Product created", body = Envelope),
        (status = 400, description = "Undecodable body or invalid field", body = Envelope),
        (status = 401, description = "Missing or invalid bearer token", body = Envelope),
        (status = 500, description = "Internal server error", body = Envelope)
    )
)]
#[post("")]
pub async fn create_product(
    state: web::Data<HttpState>,
    payload: web::Payload,
) -> ApiResult<HttpResponse> {
    let body = read_create_body(payload).await?;
    let request: CreateProductRequest = serde_json::from_slice(&body).map_err(|err| {
        warn!(error = %err, "product body could not be decoded");
        Error::invalid_request("Invalid product")
    })?;
    let product = NewProduct::new(request.name, request.price)
        .map_err(|err| Error::invalid_request(err.to_string()))?;

    state
        .products
        .create(&product)
        .await
        .map_err(map_product_error)?;
    Ok(HttpResponse::Ok().json(Envelope::ok("Product created")))
}

async fn read_create_body(mut payload: web::Payload) -> Result<web::BytesMut, Error> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|err| {
            warn!(error = %err, "product body could not be read");
            Error::invalid_request("Invalid product")
        })?;
        if body.len() + chunk.len() > MAX_CREATE_BODY_BYTES {
            warn!(limit = MAX_CREATE_BODY_BYTES, "product body exceeds size limit");
            return Err(Error::invalid_request("Invalid product"));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

/// Delete a product by id.
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tags = ["products"],
    params(("id" = String, Path, description = "Non-negative product id")),
    responses(
        (status = 200, description = "Product deleted", body = Envelope),
        (status = 400, description = "Malformed or negative id", body = Envelope),
        (status = 401, description = "Missing or invalid bearer token", body = Envelope),
        (status = 404, description = "No product with this id", body = Envelope),
        (status = 500, description = "Internal server error", body = Envelope)
    )
)]
#[delete("/{id}")]
pub async fn delete_product(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_product_id(&path)?;
    state.products.delete(id).await.map_err(map_product_error)?;
    Ok(HttpResponse::Ok().json(Envelope::ok("Product deleted")))
}
