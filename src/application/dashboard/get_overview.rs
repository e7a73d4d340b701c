use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::dashboard::{CardData, DashboardRepository, RevenueChart};
use crate::domain::invoice::{InvoiceError, format_currency};

#[derive(Debug, Clone, Serialize)]
pub struct CardsDto {
  pub number_of_invoices: i64,
  pub number_of_customers: i64,
  pub total_paid_invoices: String,
  pub total_pending_invoices: String,
}

impl From<CardData> for CardsDto {
  fn from(cards: CardData) -> Self {
    Self {
      number_of_invoices: cards.number_of_invoices,
      number_of_customers: cards.number_of_customers,
      total_paid_invoices: format_currency(cards.total_paid_invoices),
      total_pending_invoices: format_currency(cards.total_pending_invoices),
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct LatestInvoiceDto {
  pub id: Uuid,
  pub name: String,
  pub email: String,
  pub amount: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverviewResponse {
  pub cards: CardsDto,
  pub revenue: RevenueChart,
  pub latest_invoices: Vec<LatestInvoiceDto>,
}

/// Everything the dashboard landing page shows, fetched in parallel.
pub struct GetOverviewUseCase {
  dashboard_repo: Arc<dyn DashboardRepository>,
}

impl GetOverviewUseCase {
  pub fn new(dashboard_repo: Arc<dyn DashboardRepository>) -> Self {
    Self { dashboard_repo }
  }

  pub async fn execute(&self) -> Result<OverviewResponse, InvoiceError> {
    let (cards, revenue, latest) = tokio::try_join!(
      self.dashboard_repo.fetch_card_data(),
      self.dashboard_repo.fetch_revenue(),
      self.dashboard_repo.fetch_latest_invoices(),
    )?;

    Ok(OverviewResponse {
      cards: cards.into(),
      revenue: RevenueChart::from_revenue(&revenue),
      latest_invoices: latest
        .into_iter()
        .map(|invoice| LatestInvoiceDto {
          id: invoice.id,
          name: invoice.name,
          email: invoice.email,
          amount: format_currency(invoice.amount_in_cents),
        })
        .collect(),
    })
  }
}
