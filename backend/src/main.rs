//! Backend entry-point: reads configuration, wires the product service, and
//! serves the REST endpoints.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use product_backend::inbound::http::auth::BearerAuth;
use product_backend::inbound::http::health::HealthState;
use server::{AppSettings, BuildMode, ServerConfig, build_http_state, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(|e| {
            error!(error = %e, "invalid configuration");
            std::io::Error::other(e)
        })?;

    let http_state = build_http_state(&settings).await.map_err(|e| {
        error!(error = %e, "failed to build persistence layer");
        std::io::Error::other(e)
    })?;

    let auth = BearerAuth::new(settings.jwt_secret.as_bytes());
    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(settings.bind_addr(), http_state, auth);
    let server = create_server(health_state, config)?;
    server.await
}
