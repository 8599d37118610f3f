//! Share payload model.
//!
//! The wire format is camelCase JSON consumed by the web front end; the
//! same shape is embedded in self-contained links and stored behind short
//! codes. Field caps live here next to the types they bound so the
//! sanitizer and the tests agree on a single source.

use serde::{Deserialize, Serialize};

/// The single supported payload schema version.
pub const PAYLOAD_VERSION: u64 = 1;

/// Hard cap on the number of items in one payload. Exceeding it rejects
/// the whole payload, it is never truncated.
pub const MAX_ITEMS: usize = 1000;

/// Maximum characters for an item name.
pub const MAX_NAME_CHARS: usize = 300;
/// Maximum characters for a currency code.
pub const MAX_CURRENCY_CHARS: usize = 10;
/// Maximum characters for an item type label.
pub const MAX_ITEM_TYPE_CHARS: usize = 200;
/// Maximum characters for an item comment.
pub const MAX_COMMENT_CHARS: usize = 2000;
/// Maximum characters for a category label.
pub const MAX_CATEGORY_CHARS: usize = 200;
/// Maximum characters for the author display name.
pub const MAX_AUTHOR_CHARS: usize = 200;
/// Maximum characters for the author email.
pub const MAX_EMAIL_CHARS: usize = 254;
/// Maximum characters for the list title.
pub const MAX_TITLE_CHARS: usize = 200;
/// Maximum characters for the free-form note.
pub const MAX_NOTE_CHARS: usize = 4000;

/// Currency assumed when an item does not carry one.
pub const DEFAULT_CURRENCY: &str = "RUB";

/// A versioned, sanitized selection of wishlist items plus display
/// metadata. Built fresh at share time and never mutated afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharePayload {
    /// Schema version, always [`PAYLOAD_VERSION`].
    pub v: u64,
    /// Display name of the sharer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Sharer's email. Never populated on publicly shared payloads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    /// List title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Free-form note from the sharer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Display flags for the recipient view.
    #[serde(default)]
    pub options: ShareOptions,
    /// The shared items.
    pub items: Vec<ShareItem>,
}

/// A single shared wishlist item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareItem {
    /// Item name, non-empty after trimming.
    pub name: String,
    /// Price, finite and non-negative.
    pub price: f64,
    /// Currency code.
    pub currency: String,
    /// Absolute http(s) URL, already passed through URL safety checks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Item type label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    /// Sharer's comment on the item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Category label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Display flags controlling what the recipient view renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareOptions {
    /// Show item prices.
    pub include_prices: bool,
    /// Show item links.
    pub include_links: bool,
    /// Show sharer comments.
    pub include_comments: bool,
    /// Show item type labels.
    pub include_item_type: bool,
}

impl Default for ShareOptions {
    fn default() -> Self {
        Self {
            include_prices: true,
            include_links: true,
            include_comments: false,
            include_item_type: true,
        }
    }
}
