//! Share link subsystem: codec, sanitization, allocation, and resolution.

pub mod allocator;
pub mod codec;
pub mod resolver;
pub mod sanitize;
pub mod service;
pub mod url_safety;

pub use allocator::ShortLinkAllocator;
pub use resolver::{LinkResolver, ShareQuery};
pub use service::ShareLinkService;
