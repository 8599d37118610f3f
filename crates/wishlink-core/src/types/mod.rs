//! Domain types shared across Wishlink crates.

pub mod payload;
pub mod short_link;

pub use payload::{PAYLOAD_VERSION, ShareItem, ShareOptions, SharePayload};
pub use short_link::{NewShortLink, ShortLinkRecord};
