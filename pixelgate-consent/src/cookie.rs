//! Consent cookie codec.
//!
//! The cookie value is `base64url(json(record))` without padding, which is
//! safe to place in a `Cookie` header without quoting.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use pixelgate_types::ConsentRecord;
use tracing::debug;

/// Default name of the consent cookie.
pub const DEFAULT_COOKIE_NAME: &str = "pixel_consent";

/// Default lifetime of the consent cookie (180 days).
pub const DEFAULT_MAX_AGE_SECS: u64 = 180 * 24 * 60 * 60;

/// Encodes a record as a cookie value.
pub fn encode(record: &ConsentRecord) -> crate::ConsentResult<String> {
    Ok(URL_SAFE_NO_PAD.encode(record.to_json()?.as_bytes()))
}

/// Decodes a cookie value. Corrupt values decode to `None`.
pub fn decode(value: &str) -> Option<ConsentRecord> {
    let bytes = match URL_SAFE_NO_PAD.decode(value.trim().as_bytes()) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!("Consent cookie is not base64: {}", e);
            return None;
        }
    };
    let json = String::from_utf8(bytes).ok()?;
    match ConsentRecord::from_json(&json) {
        Ok(record) => Some(record),
        Err(e) => {
            debug!("Consent cookie payload rejected: {}", e);
            None
        }
    }
}

/// Finds the value of cookie `name` in a `Cookie` request header.
pub fn parse_cookie_header<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key.trim() == name).then(|| value.trim().trim_matches('"'))
    })
}

/// Reads the consent record from a `Cookie` request header.
pub fn from_cookie_header(header: &str, name: &str) -> Option<ConsentRecord> {
    parse_cookie_header(header, name).and_then(decode)
}

/// Builds the `Set-Cookie` value persisting `record`.
pub fn set_cookie(name: &str, record: &ConsentRecord, max_age_secs: u64) -> crate::ConsentResult<String> {
    Ok(format!(
        "{name}={}; Path=/; Max-Age={max_age_secs}; SameSite=Lax",
        encode(record)?
    ))
}

/// Builds the `Set-Cookie` value that removes the consent cookie.
pub fn clear_cookie(name: &str) -> String {
    format!("{name}=; Path=/; Max-Age=0; SameSite=Lax")
}
