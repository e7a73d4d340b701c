//! Invoice form actions and the read models behind the invoice pages

mod action_state;
mod create_invoice;
mod delete_invoice;
mod get_invoice_form;
mod list_invoices;
mod update_invoice;

#[cfg(test)]
pub(crate) mod test_support;

pub use action_state::{ActionOutcome, FormState, INVOICES_PATH};
pub use create_invoice::CreateInvoiceUseCase;
pub use delete_invoice::DeleteInvoiceUseCase;
pub use get_invoice_form::{GetInvoiceFormUseCase, InvoiceFormResponse, InvoiceFormValues};
pub use list_invoices::{
  InvoiceListItemDto, ListInvoicesQuery, ListInvoicesResponse, ListInvoicesUseCase,
};
pub use update_invoice::UpdateInvoiceUseCase;
