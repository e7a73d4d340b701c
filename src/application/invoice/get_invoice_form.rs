use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::dashboard::{CustomerField, DashboardRepository};
use crate::domain::invoice::{Amount, InvoiceError};

/// Values pre-filled into the edit form
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceFormValues {
  pub id: Uuid,
  pub customer_id: String,
  pub amount: String,
  pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceFormResponse {
  pub customers: Vec<CustomerField>,
  pub invoice: Option<InvoiceFormValues>,
}

/// Loads what the create and edit forms need to render.
pub struct GetInvoiceFormUseCase {
  dashboard_repo: Arc<dyn DashboardRepository>,
}

impl GetInvoiceFormUseCase {
  pub fn new(dashboard_repo: Arc<dyn DashboardRepository>) -> Self {
    Self { dashboard_repo }
  }

  /// With an id, fails with `InvoiceNotFound` when no such invoice exists.
  pub async fn execute(&self, id: Option<Uuid>) -> Result<InvoiceFormResponse, InvoiceError> {
    let customers = self.dashboard_repo.fetch_customers().await?;

    let invoice = match id {
      None => None,
      Some(id) => {
        let invoice = self
          .dashboard_repo
          .fetch_invoice_by_id(id)
          .await?
          .ok_or(InvoiceError::InvoiceNotFound(id))?;

        Some(InvoiceFormValues {
          id: invoice.id,
          customer_id: invoice.customer_id.to_string(),
          amount: Amount::from_cents(invoice.amount_in_cents).normalize().to_string(),
          status: invoice.status.to_string(),
        })
      }
    };

    Ok(InvoiceFormResponse { customers, invoice })
  }
}
