//! HTTP handlers, organized by domain.

pub mod health;
pub mod share;
