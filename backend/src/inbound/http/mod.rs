//! HTTP inbound adapter exposing the product REST endpoints.

pub mod auth;
pub mod envelope;
pub mod error;
pub mod health;
pub mod products;
pub mod root;
pub mod state;

use actix_web::web;

pub use envelope::Envelope;
pub use error::ApiResult;

use auth::BearerAuth;
use health::{live, ready};
use products::{create_product, delete_product, get_product, list_products};

/// Register every HTTP route.
///
/// `/`, `/health/live` and `/health/ready` are open; the product routes sit
/// behind `auth`. Callers supply `HttpState` and `HealthState` as app data.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use product_backend::inbound::http::{auth::BearerAuth, routes};
///
/// let _app = App::new().configure(routes(BearerAuth::new(b"secret")));
/// ```
pub fn routes(auth: BearerAuth) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.service(root::root)
            .service(live)
            .service(ready)
            .service(
                web::scope("/products")
                    .wrap(auth.clone())
                    .service(list_products)
                    .service(get_product)
                    .service(delete_product),
            )
            .service(web::scope("/product").wrap(auth).service(create_product));
    }
}
