pub mod dashboard_repository;
pub mod invoice_repository;
pub mod session_repository;
pub mod user_repository;

#[cfg(test)]
pub(crate) mod test_db;

pub use dashboard_repository::PostgresDashboardRepository;
pub use invoice_repository::PostgresInvoiceRepository;
pub use session_repository::PostgresSessionRepository;
pub use user_repository::PostgresUserRepository;
