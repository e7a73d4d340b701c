//! Invoice dashboard
//!
//! Server-rendered invoice management behind a credentials sign-in, laid out
//! as domain, application, adapters and infrastructure layers.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;
