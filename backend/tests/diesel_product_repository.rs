//! Integration tests for `DieselProductRepository` against embedded PostgreSQL.
//!
//! Opt-in: `RUN_PG_EMBEDDED=1 cargo test -- --ignored`. The products migration
//! is applied to a fresh cluster before the repository contract is exercised.

use std::sync::Arc;

use async_trait::async_trait;
use diesel_async::{AsyncConnection, AsyncPgConnection, SimpleAsyncConnection};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use product_backend::domain::NewProduct;
use product_backend::domain::ports::{
    IdGenerationError, IdGenerator, ProductRepository, ProductRepositoryError,
};
use product_backend::outbound::id::{FlakeIdGenerator, decompose};
use product_backend::outbound::persistence::{DbPool, DieselProductRepository, PoolConfig};
use tokio::runtime::Runtime;

const CREATE_PRODUCTS: &str =
    include_str!("../migrations/2024-05-01-000000_create_products/up.sql");

/// Hands out the same id every time so the second insert collides.
struct FixedIdGenerator(u64);

#[async_trait]
impl IdGenerator for FixedIdGenerator {
    async fn next_id(&self) -> Result<u64, IdGenerationError> {
        Ok(self.0)
    }
}

fn should_run() -> bool {
    if std::env::var("RUN_PG_EMBEDDED").as_deref() != Ok("1") {
        eprintln!("SKIP-TEST-CLUSTER: set RUN_PG_EMBEDDED=1 to run");
        return false;
    }
    true
}

async fn migrated_pool(database_url: &str) -> DbPool {
    let mut conn = AsyncPgConnection::establish(database_url)
        .await
        .expect("connect to embedded Postgres");
    conn.batch_execute(CREATE_PRODUCTS)
        .await
        .expect("apply products migration");

    DbPool::new(
        PoolConfig::new(database_url)
            .with_max_size(4)
            .with_min_idle(Some(1)),
    )
    .await
    .expect("build pool")
}

#[test]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn repository_honours_the_product_contract() {
    if !should_run() {
        return;
    }

    let cluster = TestCluster::new().expect("embedded Postgres should start");
    let database_url = cluster.connection().database_url("postgres");
    let runtime = Runtime::new().expect("runtime");

    runtime.block_on(async {
        let pool = migrated_pool(&database_url).await;
        let ids = FlakeIdGenerator::new(42, Arc::new(DefaultClock)).expect("generator");
        let repository = DieselProductRepository::new(pool.clone(), Arc::new(ids));

        assert!(repository.get_all().await.expect("empty list").is_empty());

        for (name, price) in [("lamp", 1299), ("desk", 15000), ("chair", 4999)] {
            let product = NewProduct::new(name, price).expect("valid product");
            repository.create(&product).await.expect("create product");
        }

        let products = repository.get_all().await.expect("list products");
        assert_eq!(products.len(), 3);
        assert!(products.windows(2).all(|pair| pair[0].id < pair[1].id));
        assert_eq!(
            products.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            ["lamp", "desk", "chair"]
        );
        for product in &products {
            let id = u64::try_from(product.id).expect("positive id");
            assert_eq!(decompose(id).machine_id, 42);
            assert!(product.deleted_at.is_none());
        }

        let first = &products[0];
        let fetched = repository.get_one(first.id).await.expect("fetch product");
        assert_eq!(&fetched, first);

        repository.delete(first.id).await.expect("delete product");
        assert_eq!(
            repository.get_one(first.id).await,
            Err(ProductRepositoryError::not_found(first.id))
        );
        assert_eq!(
            repository.delete(first.id).await,
            Err(ProductRepositoryError::not_found(first.id))
        );
        assert_eq!(repository.get_all().await.expect("list").len(), 2);

        let colliding = DieselProductRepository::new(pool, Arc::new(FixedIdGenerator(7)));
        let product = NewProduct::new("twin", 1).expect("valid product");
        colliding.create(&product).await.expect("first insert");
        assert!(matches!(
            colliding.create(&product).await,
            Err(ProductRepositoryError::Query { .. })
        ));
    });
}
