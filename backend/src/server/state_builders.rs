//! Builders wiring the outbound adapters into the HTTP state.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::{error, info};

use product_backend::domain::ProductServiceImpl;
use product_backend::domain::ports::IdGenerator;
use product_backend::inbound::http::state::HttpState;
use product_backend::outbound::id::{FlakeIdGenerator, UnavailableIdGenerator};
use product_backend::outbound::persistence::{
    DbPool, DieselProductRepository, PoolConfig, PoolError,
};

use super::AppSettings;

/// Build the id generator, degrading to [`UnavailableIdGenerator`] when the
/// machine id or clock cannot be used. Reads keep working; creates fail with
/// a generation error.
pub(crate) fn build_id_generator(
    machine_id: Option<u16>,
    clock: Arc<dyn Clock>,
) -> Arc<dyn IdGenerator> {
    match FlakeIdGenerator::from_config(machine_id, clock) {
        Ok(generator) => {
            info!(machine_id = generator.machine_id(), "id generator ready");
            Arc::new(generator)
        }
        Err(err) => {
            error!(error = %err, "id generator unavailable; creates will fail");
            Arc::new(UnavailableIdGenerator::new(err.to_string()))
        }
    }
}

/// Build the product service stack on top of a fresh connection pool.
///
/// # Errors
/// [`PoolError::Build`] when the pool cannot be constructed.
pub(crate) async fn build_http_state(settings: &AppSettings) -> Result<HttpState, PoolError> {
    let pool = DbPool::new(
        PoolConfig::new(settings.database_url.clone()).with_max_size(settings.max_connections),
    )
    .await?;
    let ids = build_id_generator(settings.machine_id, Arc::new(DefaultClock));
    let repository =
        DieselProductRepository::new(pool, ids).with_query_timeout(settings.query_timeout);
    Ok(HttpState::new(Arc::new(ProductServiceImpl::new(Arc::new(
        repository,
    )))))
}
