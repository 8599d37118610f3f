//! Repository implementations backed by PostgreSQL.

pub mod short_link;
