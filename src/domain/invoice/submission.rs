use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use validator::{ValidationError, ValidationErrors};

use super::value_objects::{Amount, CustomerId, InvoiceStatus, ValueObjectError};
use crate::domain::form_data::FormData;

pub const CUSTOMER_ID_FIELD: &str = "customerId";
pub const AMOUNT_FIELD: &str = "amount";
pub const STATUS_FIELD: &str = "status";

/// Field name -> violation messages, in the order they were detected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
    self.0.entry(field.into()).or_default().push(message.into());
  }

  pub fn get(&self, field: &str) -> &[String] {
    self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn fields(&self) -> impl Iterator<Item = &str> {
    self.0.keys().map(String::as_str)
  }
}

impl From<ValidationErrors> for FieldErrors {
  fn from(errors: ValidationErrors) -> Self {
    let mut field_errors = FieldErrors::new();
    for (field, errors) in errors.field_errors() {
      for error in errors.iter() {
        let message = error
          .message
          .as_ref()
          .map(|m| m.to_string())
          .unwrap_or_else(|| format!("Invalid field: {}", field));
        field_errors.add(field.to_string(), message);
      }
    }
    field_errors
  }
}

/// A validated invoice submission, as accepted by the create and update actions.
///
/// The invoice id and date are never taken from the submitted form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceSubmission {
  pub customer_id: CustomerId,
  pub amount: Amount,
  pub status: InvoiceStatus,
}

impl InvoiceSubmission {
  /// Validates raw form input. Either every field is valid or none of the
  /// typed values are produced.
  pub fn parse(form: &FormData) -> Result<Self, FieldErrors> {
    let customer_id = form
      .get(CUSTOMER_ID_FIELD)
      .ok_or(ValueObjectError::InvalidCustomerId)
      .and_then(CustomerId::new);

    let amount = Amount::parse(form.get(AMOUNT_FIELD).unwrap_or_default());

    let status = form
      .get(STATUS_FIELD)
      .ok_or(ValueObjectError::InvalidStatus)
      .and_then(str::parse::<InvoiceStatus>);

    match (customer_id, amount, status) {
      (Ok(customer_id), Ok(amount), Ok(status)) => Ok(Self {
        customer_id,
        amount,
        status,
      }),
      (customer_id, amount, status) => {
        let mut errors = ValidationErrors::new();
        record(&mut errors, CUSTOMER_ID_FIELD, customer_id.err());
        record(&mut errors, AMOUNT_FIELD, amount.err());
        record(&mut errors, STATUS_FIELD, status.err());
        Err(errors.into())
      }
    }
  }
}

fn record(errors: &mut ValidationErrors, field: &'static str, error: Option<ValueObjectError>) {
  let Some(error) = error else {
    return;
  };

  let code = match error {
    ValueObjectError::InvalidCustomerId => "invalid_type",
    ValueObjectError::AmountNotANumber => "invalid_number",
    ValueObjectError::AmountNotPositive => "too_small",
    ValueObjectError::AmountTooLarge => "too_big",
    ValueObjectError::InvalidStatus => "invalid_enum_value",
  };

  let mut validation_error = ValidationError::new(code);
  validation_error.message = Some(Cow::Owned(error.to_string()));
  errors.add(field, validation_error);
}
