//! Trait seams implemented by infrastructure crates.

pub mod store;

pub use store::{DeleteOutcome, InsertOutcome, ShortLinkStore};
