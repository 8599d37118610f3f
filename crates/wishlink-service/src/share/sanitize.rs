//! Payload sanitization.
//!
//! Decoded share payloads are attacker-controlled: they arrive through a
//! URL or out of the database, and neither is a trust boundary. This
//! module rebuilds a [`SharePayload`] field by field from an explicit
//! allowlist — the untrusted value is never deserialized wholesale, so
//! unexpected keys cannot ride along.
//!
//! Output is whole-or-nothing: a fully schema-valid payload or `None`.
//! Granularity is deliberate and two-level: a version mismatch or an
//! oversized item list rejects the entire payload, while a bad name,
//! price, or link drops only the offending item.

use serde_json::Value;

use wishlink_core::types::payload::{
    DEFAULT_CURRENCY, MAX_AUTHOR_CHARS, MAX_CATEGORY_CHARS, MAX_COMMENT_CHARS, MAX_CURRENCY_CHARS,
    MAX_EMAIL_CHARS, MAX_ITEM_TYPE_CHARS, MAX_ITEMS, MAX_NAME_CHARS, MAX_NOTE_CHARS,
    MAX_TITLE_CHARS, PAYLOAD_VERSION, ShareItem, ShareOptions, SharePayload,
};

use super::url_safety::safe_format_url;

/// Turn an untrusted decoded value into a trusted, bounded payload.
///
/// Returns `None` when the value is not an object, carries the wrong
/// version, or exceeds the item cap. Individually invalid items are
/// dropped; the remaining items still form a valid payload.
pub fn validate_payload(raw: &Value) -> Option<SharePayload> {
    let obj = raw.as_object()?;

    // Numeric comparison, so an integral float like 1.0 passes; only
    // the value matters, not its JSON representation.
    if obj.get("v").and_then(Value::as_f64) != Some(PAYLOAD_VERSION as f64) {
        return None;
    }

    let raw_items = match obj.get("items").and_then(Value::as_array) {
        Some(items) => items.as_slice(),
        None => &[],
    };
    if raw_items.len() > MAX_ITEMS {
        // Whole-or-nothing: an oversized list is rejected, not truncated.
        return None;
    }

    let items = raw_items.iter().filter_map(sanitize_item).collect();

    Some(SharePayload {
        v: PAYLOAD_VERSION,
        author: clamped_field(obj.get("author"), MAX_AUTHOR_CHARS),
        author_email: clamped_field(obj.get("authorEmail"), MAX_EMAIL_CHARS),
        title: clamped_field(obj.get("title"), MAX_TITLE_CHARS),
        note: clamped_field(obj.get("note"), MAX_NOTE_CHARS),
        options: sanitize_options(obj.get("options")),
        items,
    })
}

/// Sanitize one item, or drop it entirely.
fn sanitize_item(raw: &Value) -> Option<ShareItem> {
    let obj = raw.as_object()?;

    let name = clamp(obj.get("name")?.as_str()?, MAX_NAME_CHARS);
    if name.is_empty() {
        return None;
    }

    let price = coerce_price(obj.get("price")?)?;

    // An unsafe or malformed link drops the whole item, it is not
    // stripped down to a linkless item.
    let link = match obj.get("link") {
        None | Some(Value::Null) => None,
        Some(Value::String(raw_link)) => Some(safe_format_url(Some(raw_link))?),
        Some(_) => return None,
    };

    let currency = clamped_field(obj.get("currency"), MAX_CURRENCY_CHARS)
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

    Some(ShareItem {
        name,
        price,
        currency,
        link,
        item_type: clamped_field(obj.get("itemType"), MAX_ITEM_TYPE_CHARS),
        comment: clamped_field(obj.get("comment"), MAX_COMMENT_CHARS),
        category: clamped_field(obj.get("category"), MAX_CATEGORY_CHARS),
    })
}

/// Coerce a price value to a finite, non-negative number.
///
/// Accepts a JSON number or a numeric string; everything else, as well
/// as non-finite or negative results, is rejected.
fn coerce_price(raw: &Value) -> Option<f64> {
    let price = match raw {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if price.is_finite() && price >= 0.0 {
        Some(price)
    } else {
        None
    }
}

/// Build display options with explicit boolean coercion and defaults.
fn sanitize_options(raw: Option<&Value>) -> ShareOptions {
    let defaults = ShareOptions::default();
    let Some(obj) = raw.and_then(Value::as_object) else {
        return defaults;
    };
    let flag = |key: &str, default: bool| obj.get(key).and_then(Value::as_bool).unwrap_or(default);

    ShareOptions {
        include_prices: flag("includePrices", defaults.include_prices),
        include_links: flag("includeLinks", defaults.include_links),
        include_comments: flag("includeComments", defaults.include_comments),
        include_item_type: flag("includeItemType", defaults.include_item_type),
    }
}

/// Trim and clamp an optional string field; empty results become `None`.
fn clamped_field(raw: Option<&Value>, max_chars: usize) -> Option<String> {
    let clamped = clamp(raw?.as_str()?, max_chars);
    if clamped.is_empty() { None } else { Some(clamped) }
}

/// Trim `raw` and cap it at `max_chars` characters (not bytes, so the
/// cut never lands inside a multi-byte character).
fn clamp(raw: &str, max_chars: usize) -> String {
    raw.trim().chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_item(name: &str, price: f64) -> Value {
        json!({ "name": name, "price": price })
    }

    #[test]
    fn rejects_non_objects_and_wrong_versions() {
        assert!(validate_payload(&json!(null)).is_none());
        assert!(validate_payload(&json!([1, 2])).is_none());
        assert!(validate_payload(&json!({ "items": [] })).is_none());
        assert!(validate_payload(&json!({ "v": 2, "items": [] })).is_none());
        assert!(validate_payload(&json!({ "v": "1", "items": [] })).is_none());
    }

    #[test]
    fn version_check_is_numeric_not_representational() {
        assert!(validate_payload(&json!({ "v": 1.0, "items": [] })).is_some());
        assert!(validate_payload(&json!({ "v": 1.5, "items": [] })).is_none());
    }

    #[test]
    fn rejects_whole_payload_over_item_cap() {
        let items: Vec<Value> = (0..=MAX_ITEMS).map(|i| minimal_item(&format!("i{i}"), 1.0)).collect();
        assert!(validate_payload(&json!({ "v": 1, "items": items })).is_none());

        // Exactly at the cap is still fine.
        let items: Vec<Value> = (0..MAX_ITEMS).map(|i| minimal_item(&format!("i{i}"), 1.0)).collect();
        let payload = validate_payload(&json!({ "v": 1, "items": items })).unwrap();
        assert_eq!(payload.items.len(), MAX_ITEMS);
    }

    #[test]
    fn missing_items_defaults_to_empty() {
        let payload = validate_payload(&json!({ "v": 1 })).unwrap();
        assert!(payload.items.is_empty());
        let payload = validate_payload(&json!({ "v": 1, "items": "nope" })).unwrap();
        assert!(payload.items.is_empty());
    }

    #[test]
    fn drops_items_with_blank_names() {
        let payload = validate_payload(&json!({
            "v": 1,
            "items": [minimal_item("  ", 1.0), minimal_item("ok", 1.0), json!({ "price": 1.0 })]
        }))
        .unwrap();
        assert_eq!(payload.items.len(), 1);
        assert_eq!(payload.items[0].name, "ok");
    }

    #[test]
    fn drops_items_with_bad_prices() {
        let payload = validate_payload(&json!({
            "v": 1,
            "items": [
                minimal_item("negative", -1.0),
                json!({ "name": "nan", "price": "NaN" }),
                json!({ "name": "words", "price": "free" }),
                json!({ "name": "missing" }),
                json!({ "name": "stringy", "price": "12.5" }),
            ]
        }))
        .unwrap();
        assert_eq!(payload.items.len(), 1);
        assert_eq!(payload.items[0].name, "stringy");
        assert_eq!(payload.items[0].price, 12.5);
    }

    #[test]
    fn drops_whole_item_on_unsafe_link() {
        let payload = validate_payload(&json!({
            "v": 1,
            "items": [
                json!({ "name": "evil", "price": 1.0, "link": "javascript:alert(1)" }),
                json!({ "name": "fine", "price": 1.0, "link": "example.com" }),
                json!({ "name": "linkless", "price": 1.0 }),
            ]
        }))
        .unwrap();
        assert_eq!(payload.items.len(), 2);
        assert_eq!(payload.items[0].link.as_deref(), Some("https://example.com/"));
        assert_eq!(payload.items[1].link, None);
    }

    #[test]
    fn clamps_and_defaults_item_fields() {
        let payload = validate_payload(&json!({
            "v": 1,
            "items": [json!({
                "name": format!("  {}  ", "x".repeat(400)),
                "price": 10,
                "currency": "",
                "comment": "y".repeat(3000),
            })]
        }))
        .unwrap();
        let item = &payload.items[0];
        assert_eq!(item.name.chars().count(), MAX_NAME_CHARS);
        assert_eq!(item.currency, DEFAULT_CURRENCY);
        assert_eq!(item.comment.as_ref().unwrap().chars().count(), MAX_COMMENT_CHARS);
    }

    #[test]
    fn clamps_top_level_fields_and_blanks_become_none() {
        let payload = validate_payload(&json!({
            "v": 1,
            "items": [],
            "author": "   ",
            "title": "t".repeat(500),
            "note": "hello",
        }))
        .unwrap();
        assert_eq!(payload.author, None);
        assert_eq!(payload.title.as_ref().unwrap().chars().count(), MAX_TITLE_CHARS);
        assert_eq!(payload.note.as_deref(), Some("hello"));
    }

    #[test]
    fn ignores_unexpected_keys() {
        let payload = validate_payload(&json!({
            "v": 1,
            "items": [],
            "__proto__": { "polluted": true },
            "constructor": "x",
        }))
        .unwrap();
        assert_eq!(serde_json::to_value(&payload).unwrap().get("__proto__"), None);
    }

    #[test]
    fn options_coercion_and_defaults() {
        let payload = validate_payload(&json!({ "v": 1, "items": [] })).unwrap();
        assert!(payload.options.include_prices);
        assert!(payload.options.include_links);
        assert!(!payload.options.include_comments);
        assert!(payload.options.include_item_type);

        let payload = validate_payload(&json!({
            "v": 1,
            "items": [],
            "options": { "includePrices": false, "includeComments": true, "includeLinks": "yes" }
        }))
        .unwrap();
        assert!(!payload.options.include_prices);
        assert!(payload.options.include_comments);
        // Non-boolean values fall back to the default.
        assert!(payload.options.include_links);
    }

    #[test]
    fn validation_is_idempotent() {
        let raw = json!({
            "v": 1,
            "author": "  Ann  ",
            "items": [json!({ "name": " gift ", "price": "5", "link": "example.com" })],
        });
        let once = validate_payload(&raw).unwrap();
        let twice = validate_payload(&serde_json::to_value(&once).unwrap()).unwrap();
        assert_eq!(once, twice);
    }
}
