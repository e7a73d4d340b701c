pub mod entities;
pub mod ports;

pub use entities::{
  CardData, CustomerField, InvoiceTableRow, LatestInvoice, Revenue, RevenueBar, RevenueChart,
  page_offset, total_pages,
};
pub use ports::{DashboardRepository, PathRevalidator, ViewCache};
