use chrono::NaiveDate;
use uuid::Uuid;

use super::submission::InvoiceSubmission;
use super::value_objects::InvoiceStatus;

/// Row values for a newly created invoice. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoice {
  pub customer_id: String,
  pub amount_in_cents: i64,
  pub status: InvoiceStatus,
  pub date: NaiveDate,
}

impl NewInvoice {
  pub fn from_submission(submission: InvoiceSubmission, date: NaiveDate) -> Self {
    Self {
      amount_in_cents: submission.amount.in_cents(),
      customer_id: submission.customer_id.into_inner(),
      status: submission.status,
      date,
    }
  }
}

/// Columns rewritten by an update. The invoice date is never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceChanges {
  pub customer_id: String,
  pub amount_in_cents: i64,
  pub status: InvoiceStatus,
}

impl From<InvoiceSubmission> for InvoiceChanges {
  fn from(submission: InvoiceSubmission) -> Self {
    Self {
      amount_in_cents: submission.amount.in_cents(),
      customer_id: submission.customer_id.into_inner(),
      status: submission.status,
    }
  }
}

/// Stored invoice as loaded for the edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoice {
  pub id: Uuid,
  pub customer_id: Uuid,
  pub amount_in_cents: i64,
  pub status: InvoiceStatus,
  pub date: NaiveDate,
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::invoice::value_objects::{Amount, CustomerId};
  use rust_decimal_macros::dec;

  fn submission() -> InvoiceSubmission {
    InvoiceSubmission {
      customer_id: CustomerId::new("cust-1").unwrap(),
      amount: Amount::new(dec!(12.34)).unwrap(),
      status: InvoiceStatus::Pending,
    }
  }

  #[test]
  fn test_new_invoice_from_submission() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let invoice = NewInvoice::from_submission(submission(), date);

    assert_eq!(invoice.customer_id, "cust-1");
    assert_eq!(invoice.amount_in_cents, 1234);
    assert_eq!(invoice.status, InvoiceStatus::Pending);
    assert_eq!(invoice.date, date);
  }

  #[test]
  fn test_changes_from_submission() {
    let changes = InvoiceChanges::from(submission());

    assert_eq!(changes.customer_id, "cust-1");
    assert_eq!(changes.amount_in_cents, 1234);
  }
}
