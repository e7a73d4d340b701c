pub mod entities;
pub mod errors;
pub mod ports;
pub mod submission;
pub mod value_objects;

pub use entities::{Invoice, InvoiceChanges, NewInvoice};
pub use errors::InvoiceError;
pub use ports::InvoiceRepository;
pub use submission::{
  AMOUNT_FIELD, CUSTOMER_ID_FIELD, FieldErrors, InvoiceSubmission, STATUS_FIELD,
};
pub use value_objects::{
  Amount, CustomerId, InvoiceStatus, ValueObjectError, format_currency,
};
