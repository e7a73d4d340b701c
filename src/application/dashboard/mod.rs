mod get_overview;

#[cfg(test)]
pub(crate) mod test_support;

pub use get_overview::{CardsDto, GetOverviewUseCase, LatestInvoiceDto, OverviewResponse};
