//! Application layer
//!
//! Use cases orchestrating the domain ports: the invoice form actions, the
//! sign-in action and the dashboard read models.

pub mod auth;
pub mod dashboard;
pub mod invoice;
