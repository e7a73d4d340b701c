use serde::Serialize;

use crate::domain::invoice::FieldErrors;

pub const INVOICES_PATH: &str = "/dashboard/invoices";

/// State handed back to a form after a failed action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormState {
  pub errors: FieldErrors,
  pub message: Option<String>,
}

impl FormState {
  pub fn message(message: impl Into<String>) -> Self {
    Self {
      errors: FieldErrors::default(),
      message: Some(message.into()),
    }
  }

  pub fn invalid(errors: FieldErrors, message: impl Into<String>) -> Self {
    Self {
      errors,
      message: Some(message.into()),
    }
  }
}

/// What a form action asks the caller to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
  /// Navigate to the given path. Nothing after this point runs.
  Redirect(String),
  /// The change was stored and cached views were invalidated.
  Revalidated,
  /// Re-render the form with this state.
  Failed(FormState),
}
