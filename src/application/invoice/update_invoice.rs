use std::sync::Arc;
use uuid::Uuid;

use super::action_state::{ActionOutcome, FormState, INVOICES_PATH};
use crate::domain::dashboard::PathRevalidator;
use crate::domain::form_data::FormData;
use crate::domain::invoice::{InvoiceChanges, InvoiceRepository, InvoiceSubmission};

pub const UPDATE_INVALID: &str = "Unable to update invoice";
pub const UPDATE_FAILED: &str = "Failed to update invoice";

/// Replaces customer, amount and status of an existing invoice. The date is kept.
pub struct UpdateInvoiceUseCase {
  invoice_repo: Arc<dyn InvoiceRepository>,
  revalidator: Arc<dyn PathRevalidator>,
}

impl UpdateInvoiceUseCase {
  pub fn new(
    invoice_repo: Arc<dyn InvoiceRepository>,
    revalidator: Arc<dyn PathRevalidator>,
  ) -> Self {
    Self {
      invoice_repo,
      revalidator,
    }
  }

  pub async fn execute(&self, id: Uuid, form: &FormData) -> ActionOutcome {
    let submission = match InvoiceSubmission::parse(form) {
      Ok(submission) => submission,
      Err(errors) => {
        tracing::debug!("Update of invoice {} rejected: {:?}", id, errors);
        return ActionOutcome::Failed(FormState::invalid(errors, UPDATE_INVALID));
      }
    };

    // A missing id updates zero rows and still counts as success.
    if let Err(e) = self
      .invoice_repo
      .update(id, InvoiceChanges::from(submission))
      .await
    {
      tracing::error!("Failed to update invoice {}: {}", id, e);
      return ActionOutcome::Failed(FormState::message(UPDATE_FAILED));
    }

    tracing::info!("Invoice {} updated", id);
    self.revalidator.revalidate_path(INVOICES_PATH).await;
    ActionOutcome::Redirect(INVOICES_PATH.to_string())
  }
}
