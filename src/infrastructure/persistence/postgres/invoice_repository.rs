use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::invoice::{
  InvoiceChanges, NewInvoice, errors::InvoiceError, ports::InvoiceRepository,
};

/// Write side of the invoices table. Each call is a single statement.
pub struct PostgresInvoiceRepository {
  pool: PgPool,
}

impl PostgresInvoiceRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl InvoiceRepository for PostgresInvoiceRepository {
  async fn insert(&self, invoice: NewInvoice) -> Result<(), InvoiceError> {
    sqlx::query(
      r#"
      INSERT INTO invoices (customer_id, amount, status, date)
      VALUES (CAST($1 AS UUID), $2, $3, $4)
      "#,
    )
    .bind(&invoice.customer_id)
    .bind(invoice.amount_in_cents)
    .bind(invoice.status.as_str())
    .bind(invoice.date)
    .execute(&self.pool)
    .await?;

    Ok(())
  }

  async fn update(&self, id: Uuid, changes: InvoiceChanges) -> Result<(), InvoiceError> {
    sqlx::query(
      r#"
      UPDATE invoices
      SET customer_id = CAST($2 AS UUID), amount = $3, status = $4
      WHERE id = $1
      "#,
    )
    .bind(id)
    .bind(&changes.customer_id)
    .bind(changes.amount_in_cents)
    .bind(changes.status.as_str())
    .execute(&self.pool)
    .await?;

    Ok(())
  }

  async fn delete(&self, id: Uuid) -> Result<(), InvoiceError> {
    sqlx::query("DELETE FROM invoices WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;

    Ok(())
  }
}
