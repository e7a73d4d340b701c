use chrono::Utc;
use std::sync::Arc;

use super::action_state::{ActionOutcome, FormState, INVOICES_PATH};
use crate::domain::dashboard::PathRevalidator;
use crate::domain::form_data::FormData;
use crate::domain::invoice::{InvoiceRepository, InvoiceSubmission, NewInvoice};

pub const VALIDATION_FAILED: &str = "Failed validating fields";
pub const CREATE_FAILED: &str = "Failed to create invoice";

/// Validates a submitted invoice form and inserts it dated today.
pub struct CreateInvoiceUseCase {
  invoice_repo: Arc<dyn InvoiceRepository>,
  revalidator: Arc<dyn PathRevalidator>,
}

impl CreateInvoiceUseCase {
  pub fn new(
    invoice_repo: Arc<dyn InvoiceRepository>,
    revalidator: Arc<dyn PathRevalidator>,
  ) -> Self {
    Self {
      invoice_repo,
      revalidator,
    }
  }

  pub async fn execute(&self, form: &FormData) -> ActionOutcome {
    let submission = match InvoiceSubmission::parse(form) {
      Ok(submission) => submission,
      Err(errors) => {
        tracing::debug!("Invoice creation rejected: {:?}", errors);
        return ActionOutcome::Failed(FormState::invalid(errors, VALIDATION_FAILED));
      }
    };

    let invoice = NewInvoice::from_submission(submission, Utc::now().date_naive());

    if let Err(e) = self.invoice_repo.insert(invoice).await {
      tracing::error!("Failed to create invoice: {}", e);
      return ActionOutcome::Failed(FormState::message(CREATE_FAILED));
    }

    tracing::info!("Invoice created");
    self.revalidator.revalidate_path(INVOICES_PATH).await;
    ActionOutcome::Redirect(INVOICES_PATH.to_string())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::invoice::test_support::{FakeInvoices, Recorded, RecordingRevalidator};
  use crate::domain::invoice::InvoiceStatus;

  fn valid_form() -> FormData {
    FormData::new()
      .with("customerId", "3958dc9e-712f-4377-85e9-fec4b6a6442a")
      .with("amount", "157.95")
      .with("status", "pending")
  }

  #[tokio::test]
  async fn test_valid_create_inserts_revalidates_and_redirects() {
    let repo = Arc::new(FakeInvoices::default());
    let revalidator = Arc::new(RecordingRevalidator::default());
    let use_case = CreateInvoiceUseCase::new(repo.clone(), revalidator.clone());

    let outcome = use_case.execute(&valid_form()).await;

    assert_eq!(outcome, ActionOutcome::Redirect("/dashboard/invoices".to_string()));
    let calls = repo.calls();
    assert_eq!(calls.len(), 1);
    match &calls[0] {
      Recorded::Insert(invoice) => {
        assert_eq!(invoice.customer_id, "3958dc9e-712f-4377-85e9-fec4b6a6442a");
        assert_eq!(invoice.amount_in_cents, 15795);
        assert_eq!(invoice.status, InvoiceStatus::Pending);
        assert_eq!(invoice.date, Utc::now().date_naive());
      }
      other => panic!("unexpected call {:?}", other),
    }
    assert_eq!(revalidator.paths(), vec!["/dashboard/invoices"]);
  }

  #[tokio::test]
  async fn test_invalid_create_touches_nothing() {
    let repo = Arc::new(FakeInvoices::default());
    let revalidator = Arc::new(RecordingRevalidator::default());
    let use_case = CreateInvoiceUseCase::new(repo.clone(), revalidator.clone());
    let form = FormData::new()
      .with("customerId", "cust-1")
      .with("amount", "0")
      .with("status", "overdue");

    let outcome = use_case.execute(&form).await;

    let ActionOutcome::Failed(state) = outcome else {
      panic!("expected a failed outcome");
    };
    assert_eq!(state.message.as_deref(), Some("Failed validating fields"));
    assert_eq!(state.errors.get("amount"), ["Enter a number > 0"]);
    assert_eq!(state.errors.get("status"), ["Select a status"]);
    assert!(repo.calls().is_empty());
    assert!(revalidator.paths().is_empty());
  }

  #[tokio::test]
  async fn test_store_failure_returns_message_without_redirect() {
    let repo = Arc::new(FakeInvoices::failing());
    let revalidator = Arc::new(RecordingRevalidator::default());
    let use_case = CreateInvoiceUseCase::new(repo.clone(), revalidator.clone());

    let outcome = use_case.execute(&valid_form()).await;

    assert_eq!(
      outcome,
      ActionOutcome::Failed(FormState::message("Failed to create invoice"))
    );
    assert!(revalidator.paths().is_empty());
  }
}
