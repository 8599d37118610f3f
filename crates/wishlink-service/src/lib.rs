//! # wishlink-service
//!
//! Business logic for Wishlink share links: URL safety checks, payload
//! sanitization, the payload codec, short id allocation, and link
//! resolution.
//!
//! Services follow constructor injection — the store collaborator is
//! provided at construction time via an `Arc<dyn ShortLinkStore>`.

pub mod context;
pub mod share;

pub use context::RequestContext;
pub use share::{LinkResolver, ShareLinkService, ShareQuery, ShortLinkAllocator};
