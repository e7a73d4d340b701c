use async_trait::async_trait;
use std::sync::Mutex;
use uuid::Uuid;

use crate::domain::dashboard::PathRevalidator;
use crate::domain::invoice::{InvoiceChanges, InvoiceError, InvoiceRepository, NewInvoice};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
  Insert(NewInvoice),
  Update(Uuid, InvoiceChanges),
  Delete(Uuid),
}

/// Records every statement it is asked to run; optionally fails all of them.
#[derive(Default)]
pub struct FakeInvoices {
  calls: Mutex<Vec<Recorded>>,
  fail: bool,
}

impl FakeInvoices {
  pub fn failing() -> Self {
    Self {
      calls: Mutex::default(),
      fail: true,
    }
  }

  pub fn calls(&self) -> Vec<Recorded> {
    self.calls.lock().unwrap().clone()
  }

  fn record(&self, call: Recorded) -> Result<(), InvoiceError> {
    self.calls.lock().unwrap().push(call);
    if self.fail {
      return Err(InvoiceError::Database(sqlx::Error::PoolTimedOut));
    }
    Ok(())
  }
}

#[async_trait]
impl InvoiceRepository for FakeInvoices {
  async fn insert(&self, invoice: NewInvoice) -> Result<(), InvoiceError> {
    self.record(Recorded::Insert(invoice))
  }

  async fn update(&self, id: Uuid, changes: InvoiceChanges) -> Result<(), InvoiceError> {
    self.record(Recorded::Update(id, changes))
  }

  async fn delete(&self, id: Uuid) -> Result<(), InvoiceError> {
    self.record(Recorded::Delete(id))
  }
}

#[derive(Default)]
pub struct RecordingRevalidator {
  paths: Mutex<Vec<String>>,
}

impl RecordingRevalidator {
  pub fn paths(&self) -> Vec<String> {
    self.paths.lock().unwrap().clone()
  }
}

#[async_trait]
impl PathRevalidator for RecordingRevalidator {
  async fn revalidate_path(&self, path: &str) {
    self.paths.lock().unwrap().push(path.to_string());
  }
}
