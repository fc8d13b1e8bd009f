//! Optional Prometheus metrics middleware.
//!
//! Request counts and latencies are exported at `/metrics` under the
//! `products` namespace. When registration fails the server still starts with
//! [`MetricsLayer::Disabled`] so the response body type stays the same.

use actix_service::{
    Service, ServiceExt as _, Transform,
    boxed::{self, BoxService},
};
use actix_web::body::BoxBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use futures_util::future::LocalBoxFuture;
use std::sync::Arc;
use tracing::warn;

const NAMESPACE: &str = "products";
const ENDPOINT: &str = "/metrics";

#[derive(Clone)]
pub(crate) enum MetricsLayer {
    Enabled(Arc<PrometheusMetrics>),
    Disabled,
}

impl MetricsLayer {
    /// Register the Prometheus middleware, falling back to a pass-through.
    #[must_use]
    pub(crate) fn build() -> Self {
        match PrometheusMetricsBuilder::new(NAMESPACE)
            .endpoint(ENDPOINT)
            .build()
        {
            Ok(metrics) => Self::Enabled(Arc::new(metrics)),
            Err(error) => {
                warn!(error = %error, "prometheus registration failed; metrics disabled");
                Self::Disabled
            }
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for MetricsLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        match self.clone() {
            MetricsLayer::Enabled(metrics) => {
                let fut = Compat::new((*metrics).clone()).new_transform(service);
                Box::pin(async move {
                    let svc = fut.await?;
                    Ok(boxed::service(svc))
                })
            }
            MetricsLayer::Disabled => Box::pin(async move {
                let svc = service.map(|res: ServiceResponse<B>| res.map_into_boxed_body());
                Ok(boxed::service(svc))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, http::StatusCode, test, web};
    use rstest::rstest;

    #[rstest]
    #[actix_web::test]
    async fn disabled_layer_passes_responses_through() {
        let app = test::init_service(
            App::new()
                .wrap(MetricsLayer::Disabled)
                .route("/", web::get().to(|| async { HttpResponse::Ok().body("root.") })),
        )
        .await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "root.");
    }

    #[rstest]
    #[actix_web::test]
    async fn enabled_layer_serves_metrics_endpoint() {
        let metrics = PrometheusMetricsBuilder::new("products_test")
            .registry(prometheus::Registry::new())
            .endpoint(ENDPOINT)
            .build()
            .expect("metrics register");
        let app = test::init_service(
            App::new()
                .wrap(MetricsLayer::Enabled(Arc::new(metrics)))
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;
        test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri(ENDPOINT).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        let body = std::str::from_utf8(&body).expect("utf8 body");
        assert!(body.contains("products_test_http_requests_total"));
    }
}
