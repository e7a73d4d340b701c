pub mod auth;
pub mod dashboard;
pub mod form_data;
pub mod invoice;

pub use form_data::FormData;
