//! # wishlink-core
//!
//! Core crate for Wishlink. Contains configuration schemas, the domain
//! types for share payloads and short links, the store trait, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other Wishlink crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
