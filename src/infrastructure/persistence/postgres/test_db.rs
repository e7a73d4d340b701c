use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use testcontainers::ImageExt;
use testcontainers_modules::postgres::Postgres;
use testcontainers_modules::testcontainers::{ContainerAsync, runners::AsyncRunner};
use uuid::Uuid;

/// Starts a throwaway PostgreSQL and runs the migrations against it.
pub async fn setup_test_db() -> (PgPool, ContainerAsync<Postgres>) {
  let container = Postgres::default()
    .with_tag("16-alpine")
    .start()
    .await
    .expect("Failed to start postgres container");

  let host = container.get_host().await.expect("Failed to get host");
  let port = container
    .get_host_port_ipv4(5432)
    .await
    .expect("Failed to get port");
  let database_url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

  let pool = PgPoolOptions::new()
    .max_connections(5)
    .connect(&database_url)
    .await
    .expect("Failed to connect to test database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  (pool, container)
}

pub async fn insert_customer(pool: &PgPool, name: &str, email: &str) -> Uuid {
  sqlx::query_scalar::<_, Uuid>("INSERT INTO customers (name, email) VALUES ($1, $2) RETURNING id")
    .bind(name)
    .bind(email)
    .fetch_one(pool)
    .await
    .expect("Failed to insert customer")
}
