use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::invoice::{InvoiceStatus, format_currency};

pub const INVOICES_PER_PAGE: i64 = 6;
pub const LATEST_INVOICES_LIMIT: i64 = 5;

/// Totals shown on the overview cards. Sums are in minor units.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardData {
  pub number_of_invoices: i64,
  pub number_of_customers: i64,
  pub total_paid_invoices: i64,
  pub total_pending_invoices: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revenue {
  pub month: String,
  pub revenue_in_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestInvoice {
  pub id: Uuid,
  pub name: String,
  pub email: String,
  pub amount_in_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceTableRow {
  pub id: Uuid,
  pub customer_id: Uuid,
  pub name: String,
  pub email: String,
  pub date: NaiveDate,
  pub amount_in_cents: i64,
  pub status: InvoiceStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerField {
  pub id: Uuid,
  pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevenueBar {
  pub month: String,
  pub revenue: String,
  /// Bar height as a percentage of the chart's top label.
  pub height_percent: u32,
}

/// Revenue chart scaled to a y-axis in steps of 1000 currency units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RevenueChart {
  pub y_axis_labels: Vec<String>,
  pub top_label: i64,
  pub bars: Vec<RevenueBar>,
}

impl RevenueChart {
  const STEP: i64 = 1000;

  pub fn from_revenue(revenue: &[Revenue]) -> Self {
    if revenue.is_empty() {
      return Self::default();
    }

    let highest = revenue
      .iter()
      .map(|r| r.revenue_in_cents.max(0) / 100)
      .max()
      .unwrap_or(0);
    let top_label = ((highest + Self::STEP - 1) / Self::STEP).max(1) * Self::STEP;

    let y_axis_labels = (0..=top_label / Self::STEP)
      .rev()
      .map(|step| format!("${}K", step * Self::STEP / 1000))
      .collect();

    let bars = revenue
      .iter()
      .map(|r| {
        let units = r.revenue_in_cents.max(0) / 100;
        RevenueBar {
          month: r.month.clone(),
          revenue: format_currency(r.revenue_in_cents),
          height_percent: ((units * 100) / top_label) as u32,
        }
      })
      .collect();

    Self {
      y_axis_labels,
      top_label,
      bars,
    }
  }
}

/// Number of pages needed to show `total` invoices.
pub fn total_pages(total: i64) -> i64 {
  if total <= 0 {
    return 0;
  }
  (total + INVOICES_PER_PAGE - 1) / INVOICES_PER_PAGE
}

/// Rows to skip before the 1-based `page`. `None` when the page lies beyond
/// any representable offset, which can only mean it is empty.
pub fn page_offset(page: i64) -> Option<i64> {
  (page.max(1) - 1).checked_mul(INVOICES_PER_PAGE)
}
