use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{CardData, CustomerField, InvoiceTableRow, LatestInvoice, Revenue};
use crate::domain::invoice::{Invoice, InvoiceError};

/// Read-side queries backing the dashboard pages.
#[async_trait]
pub trait DashboardRepository: Send + Sync {
  async fn fetch_card_data(&self) -> Result<CardData, InvoiceError>;

  async fn fetch_revenue(&self) -> Result<Vec<Revenue>, InvoiceError>;

  async fn fetch_latest_invoices(&self) -> Result<Vec<LatestInvoice>, InvoiceError>;

  /// One page (1-based) of invoices matching `query`, newest first.
  async fn fetch_filtered_invoices(
    &self,
    query: &str,
    page: i64,
  ) -> Result<Vec<InvoiceTableRow>, InvoiceError>;

  /// Number of pages needed to list every invoice matching `query`.
  async fn fetch_invoices_pages(&self, query: &str) -> Result<i64, InvoiceError>;

  async fn fetch_invoice_by_id(&self, id: Uuid) -> Result<Option<Invoice>, InvoiceError>;

  async fn fetch_customers(&self) -> Result<Vec<CustomerField>, InvoiceError>;
}

/// Marks the cached rendering of a route as stale.
///
/// This is a one-way signal: implementations log their own failures.
#[async_trait]
pub trait PathRevalidator: Send + Sync {
  async fn revalidate_path(&self, path: &str);
}

/// Rendered-page cache keyed by route path and a per-path variant (e.g. query string).
///
/// Every revalidation advances the generation of its path. A page is only
/// stored when the generation read before rendering it is still current, so a
/// render that overlapped a revalidation is dropped.
#[async_trait]
pub trait ViewCache: PathRevalidator {
  async fn get(&self, path: &str, variant: &str) -> Option<String>;

  /// Current generation of `path`, or `None` when the cache cannot tell.
  async fn generation(&self, path: &str) -> Option<u64>;

  /// Stores `html` unless `path` was revalidated after `generation` was read.
  async fn put(&self, path: &str, variant: &str, generation: u64, html: &str);
}
