use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{InvoiceChanges, NewInvoice};
use super::errors::InvoiceError;

/// Write side of the invoice store. Each call issues exactly one statement.
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
  async fn insert(&self, invoice: NewInvoice) -> Result<(), InvoiceError>;

  /// Rewrites customer, amount and status. Updating a missing id is not an error.
  async fn update(&self, id: Uuid, changes: InvoiceChanges) -> Result<(), InvoiceError>;

  async fn delete(&self, id: Uuid) -> Result<(), InvoiceError>;
}
