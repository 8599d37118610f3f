//! Payload codec: reversible encoding between a payload and a URL-safe
//! token.
//!
//! Encoding goes JSON → UTF-8 bytes → base64, so non-ASCII text (item
//! names are frequently Cyrillic) round-trips exactly. Decoding is total
//! and bounded: a hostile token can cost at most one length check before
//! it is rejected.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use percent_encoding::percent_decode_str;
use serde_json::Value;

use wishlink_core::result::AppResult;
use wishlink_core::types::payload::SharePayload;

/// Upper bound on an encoded token, checked before any base64 or JSON
/// work. Percent-decoding never grows its input, so the raw length
/// bounds the decoded length too.
pub const MAX_TOKEN_CHARS: usize = 100_000;

/// Encode a payload into a base64 token.
///
/// The caller percent-encodes the token when embedding it as a query
/// value. Serialization of a well-formed payload cannot realistically
/// fail; the error path exists only to avoid a panic on the impossible.
pub fn encode(payload: &SharePayload) -> AppResult<String> {
    let json = serde_json::to_vec(payload)?;
    Ok(BASE64.encode(json))
}

/// Decode a token back into an untrusted JSON value.
///
/// Any failure — oversized token, bad percent escapes, bad base64, bad
/// UTF-8, bad JSON — yields `None`. The result still has to pass the
/// sanitizer before anything trusts it.
pub fn decode(token: &str) -> Option<Value> {
    if token.len() > MAX_TOKEN_CHARS {
        return None;
    }
    let unescaped = percent_decode_str(token).decode_utf8().ok()?;
    let bytes = BASE64.decode(unescaped.as_bytes()).ok()?;
    let text = String::from_utf8(bytes).ok()?;
    serde_json::from_str(&text).ok()
}
