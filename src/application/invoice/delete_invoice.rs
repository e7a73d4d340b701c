use std::sync::Arc;
use uuid::Uuid;

use super::action_state::{ActionOutcome, FormState, INVOICES_PATH};
use crate::domain::dashboard::PathRevalidator;
use crate::domain::invoice::InvoiceRepository;

pub const DELETE_FAILED: &str = "Failed to delete invoice";

pub struct DeleteInvoiceUseCase {
  invoice_repo: Arc<dyn InvoiceRepository>,
  revalidator: Arc<dyn PathRevalidator>,
}

impl DeleteInvoiceUseCase {
  pub fn new(
    invoice_repo: Arc<dyn InvoiceRepository>,
    revalidator: Arc<dyn PathRevalidator>,
  ) -> Self {
    Self {
      invoice_repo,
      revalidator,
    }
  }

  /// Deletes the invoice and invalidates the list view. Does not redirect.
  pub async fn execute(&self, id: Uuid) -> ActionOutcome {
    if let Err(e) = self.invoice_repo.delete(id).await {
      tracing::error!("Failed to delete invoice {}: {}", id, e);
      return ActionOutcome::Failed(FormState::message(DELETE_FAILED));
    }

    tracing::info!("Invoice {} deleted", id);
    self.revalidator.revalidate_path(INVOICES_PATH).await;
    ActionOutcome::Revalidated
  }
}
