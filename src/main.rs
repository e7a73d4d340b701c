use actix_files as fs;
use actix_web::{App, HttpServer, middleware::Logger};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use invoice_dashboard::{
  adapters::http::{
    RequestIdMiddleware, SessionCookieSettings, TemplateEngine, WebRouteDependencies,
    configure_web_routes,
  },
  application::auth::{AuthenticateUseCase, SignOutUseCase},
  application::dashboard::GetOverviewUseCase,
  application::invoice::{
    CreateInvoiceUseCase, DeleteInvoiceUseCase, GetInvoiceFormUseCase, ListInvoicesUseCase,
    UpdateInvoiceUseCase,
  },
  domain::auth::services::AuthService,
  domain::dashboard::{PathRevalidator, ViewCache},
  infrastructure::{
    cache::{InMemoryViewCache, RedisViewCache},
    config::{Config, RedisConfig},
    persistence::postgres::{
      PostgresDashboardRepository, PostgresInvoiceRepository, PostgresSessionRepository,
      PostgresUserRepository,
    },
    security::Argon2PasswordHasher,
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "invoice_dashboard=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting invoice dashboard");

  let config = Config::load().map_err(|e| {
    tracing::error!("Failed to load configuration: {}", e);
    std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
  })?;
  tracing::info!("Configuration loaded successfully");

  // Set up database connection pool with timeout
  tracing::info!("Connecting to database");

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Database connection timed out after {} seconds",
        config.database.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to database: {}", e);
    match e {
      sqlx::Error::Io(_) => std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "Could not connect to database. Is PostgreSQL running?",
      ),
      _ => std::io::Error::other(format!("Database error: {}", e)),
    }
  })?;

  tracing::info!("Database connection pool created");

  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to run database migrations: {}", e);
      std::io::Error::other(format!("Migration error: {}", e))
    })?;
  tracing::info!("Database migrations completed");

  // Rendered-page cache: Redis when configured, otherwise in process
  let view_ttl = config.view_cache.ttl_seconds;
  let (view_cache, revalidator): (Arc<dyn ViewCache>, Arc<dyn PathRevalidator>) =
    match &config.redis {
      Some(redis_config) => {
        let cache = Arc::new(connect_view_cache(redis_config, view_ttl).await?);
        (cache.clone() as Arc<dyn ViewCache>, cache as Arc<dyn PathRevalidator>)
      }
      None => {
        tracing::info!("No [redis] section configured, caching views in process");
        let cache = Arc::new(InMemoryViewCache::new(Duration::from_secs(view_ttl)));
        (cache.clone() as Arc<dyn ViewCache>, cache as Arc<dyn PathRevalidator>)
      }
    };

  // Initialize repositories
  let user_repo = Arc::new(PostgresUserRepository::new(db_pool.clone()));
  let session_repo = Arc::new(PostgresSessionRepository::new(db_pool.clone()));
  let invoice_repo = Arc::new(PostgresInvoiceRepository::new(db_pool.clone()));
  let dashboard_repo = Arc::new(PostgresDashboardRepository::new(db_pool.clone()));

  // Initialize security services
  let password_hasher = Arc::new(Argon2PasswordHasher::new().map_err(|e| {
    tracing::error!("Failed to create password hasher: {}", e);
    std::io::Error::other(e.to_string())
  })?);

  let session_ttl_seconds = i64::try_from(config.security.session_ttl_seconds).map_err(|_| {
    std::io::Error::new(
      std::io::ErrorKind::InvalidInput,
      "security.session_ttl_seconds is out of range",
    )
  })?;

  let auth_service = Arc::new(AuthService::new(
    user_repo,
    session_repo,
    password_hasher,
    chrono::Duration::seconds(session_ttl_seconds),
  ));

  if let Some(bootstrap) = &config.security.bootstrap_user {
    let user = auth_service
      .ensure_user(&bootstrap.name, &bootstrap.email, &bootstrap.password)
      .await
      .map_err(|e| {
        tracing::error!("Failed to provision bootstrap user: {}", e);
        std::io::Error::other(e.to_string())
      })?;
    tracing::info!("Bootstrap user available: {}", user.email);
  }

  // Initialize use cases
  let deps = WebRouteDependencies {
    templates: TemplateEngine::new().map_err(|e| {
      tracing::error!("Failed to load templates: {:?}", e);
      std::io::Error::other(e.to_string())
    })?,
    auth_service: auth_service.clone(),
    session_cookie: SessionCookieSettings {
      max_age_seconds: session_ttl_seconds,
      secure: config.security.secure_cookies,
    },
    view_cache,
    authenticate_use_case: Arc::new(AuthenticateUseCase::new(auth_service.clone())),
    sign_out_use_case: Arc::new(SignOutUseCase::new(auth_service)),
    overview_use_case: Arc::new(GetOverviewUseCase::new(dashboard_repo.clone())),
    list_invoices_use_case: Arc::new(ListInvoicesUseCase::new(dashboard_repo.clone())),
    invoice_form_use_case: Arc::new(GetInvoiceFormUseCase::new(dashboard_repo)),
    create_invoice_use_case: Arc::new(CreateInvoiceUseCase::new(
      invoice_repo.clone(),
      revalidator.clone(),
    )),
    update_invoice_use_case: Arc::new(UpdateInvoiceUseCase::new(
      invoice_repo.clone(),
      revalidator.clone(),
    )),
    delete_invoice_use_case: Arc::new(DeleteInvoiceUseCase::new(invoice_repo, revalidator)),
  };

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    let deps = deps.clone();
    App::new()
      .wrap(Logger::default())
      .wrap(RequestIdMiddleware::new())
      .configure(|cfg| configure_web_routes(cfg, deps))
      // Static files
      .service(fs::Files::new("/static", "./static"))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await
}

async fn connect_view_cache(
  config: &RedisConfig,
  ttl_seconds: u64,
) -> std::io::Result<RedisViewCache> {
  tracing::info!("Connecting to Redis");

  let redis_client = redis::Client::open(config.url.clone()).map_err(|e| {
    tracing::error!("Failed to create Redis client: {}", e);
    std::io::Error::new(
      std::io::ErrorKind::InvalidInput,
      format!("Invalid Redis URL: {}", e),
    )
  })?;

  let redis_conn = tokio::time::timeout(
    Duration::from_secs(config.connect_timeout_seconds),
    redis_client.get_connection_manager(),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Redis connection timed out after {} seconds. Is Redis running?",
      config.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Redis connection timed out after {} seconds",
        config.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to Redis: {}", e);
    std::io::Error::new(
      std::io::ErrorKind::ConnectionRefused,
      "Could not connect to Redis. Is Redis running?",
    )
  })?;

  tracing::info!("Redis connection established");
  Ok(RedisViewCache::new(redis_conn, ttl_seconds))
}
