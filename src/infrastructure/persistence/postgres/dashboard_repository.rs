use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::dashboard::entities::{INVOICES_PER_PAGE, LATEST_INVOICES_LIMIT};
use crate::domain::dashboard::{
  CardData, CustomerField, DashboardRepository, InvoiceTableRow, LatestInvoice, Revenue,
  page_offset, total_pages,
};
use crate::domain::invoice::{Invoice, InvoiceError, InvoiceStatus};

// Shared by the filtered list and its page count.
const INVOICE_SEARCH: &str = r#"
  customers.name ILIKE $1 OR
  customers.email ILIKE $1 OR
  invoices.amount::text ILIKE $1 OR
  invoices.date::text ILIKE $1 OR
  invoices.status ILIKE $1
"#;

#[derive(Debug, FromRow)]
struct CardRow {
  number_of_invoices: i64,
  number_of_customers: i64,
  paid: i64,
  pending: i64,
}

#[derive(Debug, FromRow)]
struct RevenueRow {
  month: String,
  revenue: i64,
}

#[derive(Debug, FromRow)]
struct LatestInvoiceRow {
  id: Uuid,
  name: String,
  email: String,
  amount: i64,
}

#[derive(Debug, FromRow)]
struct InvoiceTableDbRow {
  id: Uuid,
  customer_id: Uuid,
  name: String,
  email: String,
  date: NaiveDate,
  amount: i64,
  status: String,
}

impl TryFrom<InvoiceTableDbRow> for InvoiceTableRow {
  type Error = InvoiceError;

  fn try_from(row: InvoiceTableDbRow) -> Result<Self, Self::Error> {
    Ok(InvoiceTableRow {
      id: row.id,
      customer_id: row.customer_id,
      name: row.name,
      email: row.email,
      date: row.date,
      amount_in_cents: row.amount,
      status: InvoiceStatus::from_str(&row.status)?,
    })
  }
}

#[derive(Debug, FromRow)]
struct InvoiceRow {
  id: Uuid,
  customer_id: Uuid,
  amount: i64,
  status: String,
  date: NaiveDate,
}

impl TryFrom<InvoiceRow> for Invoice {
  type Error = InvoiceError;

  fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
    Ok(Invoice {
      id: row.id,
      customer_id: row.customer_id,
      amount_in_cents: row.amount,
      status: InvoiceStatus::from_str(&row.status)?,
      date: row.date,
    })
  }
}

/// Read queries behind the dashboard, invoice list and invoice forms
pub struct PostgresDashboardRepository {
  pool: PgPool,
}

impl PostgresDashboardRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

fn search_pattern(query: &str) -> String {
  format!("%{}%", query)
}

#[async_trait]
impl DashboardRepository for PostgresDashboardRepository {
  async fn fetch_card_data(&self) -> Result<CardData, InvoiceError> {
    let row = sqlx::query_as::<_, CardRow>(
      r#"
      SELECT
        (SELECT COUNT(*) FROM invoices) AS number_of_invoices,
        (SELECT COUNT(*) FROM customers) AS number_of_customers,
        COALESCE((SELECT SUM(amount) FROM invoices WHERE status = 'paid'), 0)::BIGINT AS paid,
        COALESCE((SELECT SUM(amount) FROM invoices WHERE status = 'pending'), 0)::BIGINT AS pending
      "#,
    )
    .fetch_one(&self.pool)
    .await?;

    Ok(CardData {
      number_of_invoices: row.number_of_invoices,
      number_of_customers: row.number_of_customers,
      total_paid_invoices: row.paid,
      total_pending_invoices: row.pending,
    })
  }

  async fn fetch_revenue(&self) -> Result<Vec<Revenue>, InvoiceError> {
    let rows = sqlx::query_as::<_, RevenueRow>(
      r#"
      SELECT month, revenue
      FROM revenue
      ORDER BY array_position(
        ARRAY['Jan','Feb','Mar','Apr','May','Jun','Jul','Aug','Sep','Oct','Nov','Dec']::VARCHAR[],
        month
      )
      "#,
    )
    .fetch_all(&self.pool)
    .await?;

    Ok(
      rows
        .into_iter()
        .map(|row| Revenue {
          month: row.month,
          revenue_in_cents: row.revenue,
        })
        .collect(),
    )
  }

  async fn fetch_latest_invoices(&self) -> Result<Vec<LatestInvoice>, InvoiceError> {
    let rows = sqlx::query_as::<_, LatestInvoiceRow>(
      r#"
      SELECT invoices.id, customers.name, customers.email, invoices.amount
      FROM invoices
      JOIN customers ON invoices.customer_id = customers.id
      ORDER BY invoices.date DESC
      LIMIT $1
      "#,
    )
    .bind(LATEST_INVOICES_LIMIT)
    .fetch_all(&self.pool)
    .await?;

    Ok(
      rows
        .into_iter()
        .map(|row| LatestInvoice {
          id: row.id,
          name: row.name,
          email: row.email,
          amount_in_cents: row.amount,
        })
        .collect(),
    )
  }

  async fn fetch_filtered_invoices(
    &self,
    query: &str,
    page: i64,
  ) -> Result<Vec<InvoiceTableRow>, InvoiceError> {
    let Some(offset) = page_offset(page) else {
      return Ok(Vec::new());
    };
    let sql = format!(
      r#"
      SELECT
        invoices.id,
        invoices.customer_id,
        customers.name,
        customers.email,
        invoices.date,
        invoices.amount,
        invoices.status
      FROM invoices
      JOIN customers ON invoices.customer_id = customers.id
      WHERE {}
      ORDER BY invoices.date DESC
      LIMIT $2 OFFSET $3
      "#,
      INVOICE_SEARCH
    );

    let rows = sqlx::query_as::<_, InvoiceTableDbRow>(&sql)
      .bind(search_pattern(query))
      .bind(INVOICES_PER_PAGE)
      .bind(offset)
      .fetch_all(&self.pool)
      .await?;

    rows.into_iter().map(InvoiceTableRow::try_from).collect()
  }

  async fn fetch_invoices_pages(&self, query: &str) -> Result<i64, InvoiceError> {
    let sql = format!(
      r#"
      SELECT COUNT(*)
      FROM invoices
      JOIN customers ON invoices.customer_id = customers.id
      WHERE {}
      "#,
      INVOICE_SEARCH
    );

    let count = sqlx::query_scalar::<_, i64>(&sql)
      .bind(search_pattern(query))
      .fetch_one(&self.pool)
      .await?;

    Ok(total_pages(count))
  }

  async fn fetch_invoice_by_id(&self, id: Uuid) -> Result<Option<Invoice>, InvoiceError> {
    let row = sqlx::query_as::<_, InvoiceRow>(
      "SELECT id, customer_id, amount, status, date FROM invoices WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(Invoice::try_from).transpose()
  }

  async fn fetch_customers(&self) -> Result<Vec<CustomerField>, InvoiceError> {
    let rows = sqlx::query_as::<_, (Uuid, String)>("SELECT id, name FROM customers ORDER BY name ASC")
      .fetch_all(&self.pool)
      .await?;

    Ok(
      rows
        .into_iter()
        .map(|(id, name)| CustomerField { id, name })
        .collect(),
    )
  }
}
