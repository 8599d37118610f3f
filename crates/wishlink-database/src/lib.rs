//! # wishlink-database
//!
//! PostgreSQL persistence for Wishlink: connection pool management, the
//! migration runner, and the sqlx implementation of the short link store.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use repositories::short_link::ShortLinkRepository;
