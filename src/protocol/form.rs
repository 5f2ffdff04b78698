//! Form codec
//!
//! `application/x-www-form-urlencoded` helpers for save requests.
//!
//! Values decode to raw bytes: a page body may carry percent-escapes that
//! are not valid UTF-8 and must reach storage unchanged.

use bytes::Bytes;
use percent_encoding::percent_decode;
use url::form_urlencoded;

/// Content type of an HTML form submission
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Look up the first value of `name` in an urlencoded payload
pub fn form_value(payload: &[u8], name: &str) -> Option<Bytes> {
    payload
        .split(|&b| b == b'&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (key, value) = match pair.iter().position(|&b| b == b'=') {
                Some(eq) => (&pair[..eq], &pair[eq + 1..]),
                None => (pair, &pair[pair.len()..]),
            };
            (decode(key) == name.as_bytes()).then(|| Bytes::from(decode(value)))
        })
}

/// Encode key/value pairs as an urlencoded payload
pub fn encode_form(pairs: &[(&str, &str)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

/// `+` is a space; `%XX` is the byte XX
fn decode(raw: &[u8]) -> Vec<u8> {
    let spaced: Vec<u8> = raw
        .iter()
        .map(|&b| if b == b'+' { b' ' } else { b })
        .collect();
    percent_decode(&spaced).collect()
}
