//! # wishlink-api
//!
//! HTTP surface for Wishlink: the axum router, handlers, the bearer-token
//! extractor, and the `AppError` → HTTP response mapping.

pub mod auth;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;
