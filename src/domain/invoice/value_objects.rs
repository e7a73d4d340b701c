use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Customer ID must be a valid string")]
  InvalidCustomerId,
  #[error("Enter a valid number")]
  AmountNotANumber,
  #[error("Enter a number > 0")]
  AmountNotPositive,
  #[error("Amount is too large")]
  AmountTooLarge,
  #[error("Select a status")]
  InvalidStatus,
}

// Customer reference as submitted by the form select
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerId(String);

impl CustomerId {
  pub fn new(value: impl Into<String>) -> Result<Self, ValueObjectError> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidCustomerId);
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for CustomerId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Invoice amount in major currency units, strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
  pub fn new(value: Decimal) -> Result<Self, ValueObjectError> {
    if value <= Decimal::ZERO {
      return Err(ValueObjectError::AmountNotPositive);
    }
    // Decided on whole cents, since that is what gets stored.
    match Self::cents_of(value) {
      None => Err(ValueObjectError::AmountTooLarge),
      Some(0) => Err(ValueObjectError::AmountNotPositive),
      Some(_) => Ok(Self(value)),
    }
  }

  /// Parses raw form input. Empty input coerces to zero, like a numeric form coercion would.
  pub fn parse(raw: &str) -> Result<Self, ValueObjectError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::AmountNotPositive);
    }

    let value = Decimal::from_str(trimmed)
      .or_else(|_| Decimal::from_scientific(trimmed))
      .map_err(|_| ValueObjectError::AmountNotANumber)?;

    Self::new(value)
  }

  /// Converts a stored minor-unit amount back to major units.
  pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
  }

  pub fn value(&self) -> Decimal {
    self.0
  }

  /// Amount in minor currency units, rounded half away from zero.
  pub fn in_cents(&self) -> i64 {
    Self::cents_of(self.0).unwrap_or(i64::MAX)
  }

  fn cents_of(value: Decimal) -> Option<i64> {
    value
      .checked_mul(Decimal::ONE_HUNDRED)?
      .round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
      .to_i64()
  }
}

impl fmt::Display for Amount {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
  Pending,
  Paid,
}

impl InvoiceStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      InvoiceStatus::Pending => "pending",
      InvoiceStatus::Paid => "paid",
    }
  }
}

// Exact match only: the form submits lowercase values.
impl FromStr for InvoiceStatus {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "pending" => Ok(InvoiceStatus::Pending),
      "paid" => Ok(InvoiceStatus::Paid),
      _ => Err(ValueObjectError::InvalidStatus),
    }
  }
}

impl fmt::Display for InvoiceStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Formats minor units as a dollar string, e.g. `123456` -> `$1,234.56`.
pub fn format_currency(cents: i64) -> String {
  let negative = cents < 0;
  let abs = cents.unsigned_abs();
  let whole = (abs / 100).to_string();
  let fraction = abs % 100;

  let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
  for (i, c) in whole.chars().enumerate() {
    if i > 0 && (whole.len() - i) % 3 == 0 {
      grouped.push(',');
    }
    grouped.push(c);
  }

  format!(
    "{}${}.{:02}",
    if negative { "-" } else { "" },
    grouped,
    fraction
  )
}
