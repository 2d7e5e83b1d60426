//! Session cookie lookup.
//!
//! Values are returned exactly as they appear on the wire. They are never URL-decoded, because the
//! token is forwarded verbatim to the authorization service.

use crate::ctx::Headers;
use std::collections::HashMap;

/// Parse a raw `Cookie` header into a name → value table.
///
/// Segments without `=` are skipped. When a name repeats, the last value wins.
pub fn parse_cookie_header(raw: &str) -> HashMap<&str, &str> {
    raw.split(';')
        .filter(|segment| !segment.is_empty())
        .filter_map(|segment| segment.split_once('='))
        .map(|(name, value)| (name.trim(), value.trim()))
        .collect()
}

/// Value of `cookie_name` from the first `cookie` header, if present.
pub fn extract_cookie<'a>(headers: &'a Headers, cookie_name: &str) -> Option<&'a str> {
    let raw = headers.first("cookie")?;
    parse_cookie_header(raw).get(cookie_name).copied()
}
