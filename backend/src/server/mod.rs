//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod state_builders;

pub use config::{AppSettings, BuildMode, ConfigError};
pub(crate) use state_builders::build_http_state;

#[cfg(feature = "metrics")]
use metrics::MetricsLayer;

use std::net::SocketAddr;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use product_backend::Trace;
#[cfg(debug_assertions)]
use product_backend::doc::ApiDoc;
use product_backend::inbound::http::auth::BearerAuth;
use product_backend::inbound::http::health::HealthState;
use product_backend::inbound::http::routes;
use product_backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Everything the server factory clones into each worker.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) http_state: web::Data<HttpState>,
    pub(crate) auth: BearerAuth,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, http_state: HttpState, auth: BearerAuth) -> Self {
        Self {
            bind_addr,
            http_state: web::Data::new(http_state),
            auth,
        }
    }
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    auth: BearerAuth,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(routes(auth));

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig {
        bind_addr,
        http_state,
        auth,
    } = config;

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::build();

    let server = HttpServer::new(move || {
        let app = build_app(
            server_health_state.clone(),
            http_state.clone(),
            auth.clone(),
        );

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test;
    use product_backend::domain::ProductServiceImpl;
    use product_backend::domain::ports::InMemoryProductRepository;
    use rstest::rstest;

    #[rstest]
    #[actix_web::test]
    async fn app_serves_open_routes_and_guards_products() {
        let health = web::Data::new(HealthState::new());
        health.mark_ready();
        let service = ProductServiceImpl::new(Arc::new(InMemoryProductRepository::new()));
        let http_state = web::Data::new(HttpState::new(Arc::new(service)));
        let app = test::init_service(build_app(health, http_state, BearerAuth::new(b"secret")))
            .await;

        for (uri, expected) in [
            ("/", StatusCode::OK),
            ("/health/ready", StatusCode::OK),
            ("/health/live", StatusCode::OK),
            ("/products", StatusCode::UNAUTHORIZED),
        ] {
            let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request())
                .await;
            assert_eq!(res.status(), expected, "unexpected status for {uri}");
            assert!(res.headers().contains_key("trace-id"));
        }
    }
}
