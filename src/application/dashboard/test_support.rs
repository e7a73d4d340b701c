use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::{Arc, Mutex};
use uuid::{Uuid, uuid};

use crate::application::invoice::INVOICES_PATH;

use crate::domain::dashboard::entities::INVOICES_PER_PAGE;
use crate::domain::dashboard::{
  CardData, CustomerField, DashboardRepository, InvoiceTableRow, LatestInvoice, Revenue,
  PathRevalidator, page_offset, total_pages,
};
use crate::domain::invoice::{Invoice, InvoiceError, InvoiceStatus};

pub const INVOICE_ID: Uuid = uuid!("cc27c14a-0acf-4f4a-a6c9-d45682c144b9");
const DELBA: Uuid = uuid!("d6e15727-9fe1-4961-8c5b-ea44a9bd81aa");
const LEE: Uuid = uuid!("3958dc9e-712f-4377-85e9-fec4b6a6442a");

/// Read side over a fixed pair of invoices.
pub struct FakeDashboard {
  rows: Vec<InvoiceTableRow>,
  last_query: Mutex<Option<(String, i64)>>,
  /// Revalidated while the invoice list is being read, like a concurrent write.
  interleaved_revalidator: Option<Arc<dyn PathRevalidator>>,
}

impl FakeDashboard {
  pub fn seeded() -> Self {
    Self {
      rows: vec![
        InvoiceTableRow {
          id: INVOICE_ID,
          customer_id: DELBA,
          name: "Delba de Oliveira".to_string(),
          email: "delba@oliveira.com".to_string(),
          date: NaiveDate::from_ymd_opt(2022, 12, 6).unwrap_or_default(),
          amount_in_cents: 15795,
          status: InvoiceStatus::Pending,
        },
        InvoiceTableRow {
          id: Uuid::new_v4(),
          customer_id: LEE,
          name: "Michael Novotny".to_string(),
          email: "michael@novotny.com".to_string(),
          date: NaiveDate::from_ymd_opt(2023, 8, 5).unwrap_or_default(),
          amount_in_cents: 20348,
          status: InvoiceStatus::Paid,
        },
      ],
      last_query: Mutex::new(None),
      interleaved_revalidator: None,
    }
  }

  pub fn revalidating_during_list(mut self, revalidator: Arc<dyn PathRevalidator>) -> Self {
    self.interleaved_revalidator = Some(revalidator);
    self
  }

  pub fn last_query(&self) -> Option<(String, i64)> {
    self.last_query.lock().unwrap().clone()
  }

  fn matching(&self, query: &str) -> Vec<InvoiceTableRow> {
    let needle = query.to_lowercase();
    self
      .rows
      .iter()
      .filter(|row| {
        row.name.to_lowercase().contains(&needle) || row.email.to_lowercase().contains(&needle)
      })
      .cloned()
      .collect()
  }
}

#[async_trait]
impl DashboardRepository for FakeDashboard {
  async fn fetch_card_data(&self) -> Result<CardData, InvoiceError> {
    Ok(CardData {
      number_of_invoices: 2,
      number_of_customers: 2,
      total_paid_invoices: 20348,
      total_pending_invoices: 15795,
    })
  }

  async fn fetch_revenue(&self) -> Result<Vec<Revenue>, InvoiceError> {
    Ok(vec![
      Revenue {
        month: "Jan".to_string(),
        revenue_in_cents: 200_000,
      },
      Revenue {
        month: "Feb".to_string(),
        revenue_in_cents: 180_000,
      },
    ])
  }

  async fn fetch_latest_invoices(&self) -> Result<Vec<LatestInvoice>, InvoiceError> {
    Ok(
      self
        .rows
        .iter()
        .map(|row| LatestInvoice {
          id: row.id,
          name: row.name.clone(),
          email: row.email.clone(),
          amount_in_cents: row.amount_in_cents,
        })
        .collect(),
    )
  }

  async fn fetch_filtered_invoices(
    &self,
    query: &str,
    page: i64,
  ) -> Result<Vec<InvoiceTableRow>, InvoiceError> {
    *self.last_query.lock().unwrap() = Some((query.to_string(), page));
    if let Some(revalidator) = &self.interleaved_revalidator {
      revalidator.revalidate_path(INVOICES_PATH).await;
    }
    let Some(offset) = page_offset(page) else {
      return Ok(Vec::new());
    };
    Ok(
      self
        .matching(query)
        .into_iter()
        .skip(usize::try_from(offset).unwrap_or(usize::MAX))
        .take(INVOICES_PER_PAGE as usize)
        .collect(),
    )
  }

  async fn fetch_invoices_pages(&self, query: &str) -> Result<i64, InvoiceError> {
    Ok(total_pages(self.matching(query).len() as i64))
  }

  async fn fetch_invoice_by_id(&self, id: Uuid) -> Result<Option<Invoice>, InvoiceError> {
    Ok(self.rows.iter().find(|row| row.id == id).map(|row| Invoice {
      id: row.id,
      customer_id: row.customer_id,
      amount_in_cents: row.amount_in_cents,
      status: row.status,
      date: row.date,
    }))
  }

  async fn fetch_customers(&self) -> Result<Vec<CustomerField>, InvoiceError> {
    Ok(vec![
      CustomerField {
        id: DELBA,
        name: "Delba de Oliveira".to_string(),
      },
      CustomerField {
        id: LEE,
        name: "Michael Novotny".to_string(),
      },
    ])
  }
}
