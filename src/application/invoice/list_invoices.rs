use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::dashboard::{DashboardRepository, InvoiceTableRow};
use crate::domain::invoice::{InvoiceError, format_currency};

#[derive(Debug, Clone, Default)]
pub struct ListInvoicesQuery {
  pub query: String,
  pub page: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceListItemDto {
  pub id: Uuid,
  pub name: String,
  pub email: String,
  pub amount: String,
  pub date: String,
  pub status: String,
}

impl From<InvoiceTableRow> for InvoiceListItemDto {
  fn from(row: InvoiceTableRow) -> Self {
    Self {
      id: row.id,
      name: row.name,
      email: row.email,
      amount: format_currency(row.amount_in_cents),
      date: row.date.format("%b %-d, %Y").to_string(),
      status: row.status.to_string(),
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListInvoicesResponse {
  pub invoices: Vec<InvoiceListItemDto>,
  pub query: String,
  pub current_page: i64,
  pub total_pages: i64,
}

pub struct ListInvoicesUseCase {
  dashboard_repo: Arc<dyn DashboardRepository>,
}

impl ListInvoicesUseCase {
  pub fn new(dashboard_repo: Arc<dyn DashboardRepository>) -> Self {
    Self { dashboard_repo }
  }

  pub async fn execute(&self, query: ListInvoicesQuery) -> Result<ListInvoicesResponse, InvoiceError> {
    let current_page = query.page.max(1);
    let search = query.query.trim();

    let (rows, total_pages) = tokio::try_join!(
      self.dashboard_repo.fetch_filtered_invoices(search, current_page),
      self.dashboard_repo.fetch_invoices_pages(search),
    )?;

    Ok(ListInvoicesResponse {
      invoices: rows.into_iter().map(InvoiceListItemDto::from).collect(),
      query: search.to_string(),
      current_page,
      total_pages,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::dashboard::test_support::FakeDashboard;

  #[tokio::test]
  async fn test_list_formats_rows_and_clamps_page() {
    let repo = Arc::new(FakeDashboard::seeded());
    let use_case = ListInvoicesUseCase::new(repo.clone());

    let response = use_case
      .execute(ListInvoicesQuery {
        query: "  lee ".to_string(),
        page: 0,
      })
      .await
      .unwrap();

    assert_eq!(response.current_page, 1);
    assert_eq!(response.query, "lee");
    assert_eq!(response.total_pages, 1);
    assert_eq!(response.invoices.len(), 1);
    assert_eq!(response.invoices[0].name, "Delba de Oliveira");
    assert_eq!(response.invoices[0].amount, "$157.95");
    assert_eq!(response.invoices[0].date, "Dec 6, 2022");
    assert_eq!(response.invoices[0].status, "pending");
    assert_eq!(repo.last_query(), Some(("lee".to_string(), 1)));
  }
}
