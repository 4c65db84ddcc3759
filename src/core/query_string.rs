//! Connection query strings
//!
//! Connection URIs carry driver options as `key=value` pairs after the `?`.
//! Keys and values are escaped with the `application/x-www-form-urlencoded`
//! rules over UTF-8: ASCII letters, digits and `.-*_` pass through, space
//! becomes `+` and every other byte becomes `%XX`.

use std::collections::HashMap;

const PAIR_SEPARATOR: char = '&';
const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Encode `pairs` as a query string, `&`-separated, in iteration order.
pub fn encode<I, K, V>(pairs: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut query = String::new();
    for (key, value) in pairs {
        if !query.is_empty() {
            query.push(PAIR_SEPARATOR);
        }
        push_pair(&mut query, key.as_ref(), value.as_ref());
    }
    query
}

/// Encode `pairs` the way older drivers did: pairs are concatenated with no
/// separator, so more than one pair cannot be decoded again.
pub fn encode_legacy<I, K, V>(pairs: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut query = String::new();
    for (key, value) in pairs {
        push_pair(&mut query, key.as_ref(), value.as_ref());
    }
    query
}

/// Decode a query string into its pairs.
///
/// `None` in gives `None` out. Empty tokens are skipped, a token without `=`
/// is a key with an empty value, and when a key repeats the last value wins.
pub fn decode(query: Option<&str>) -> Option<HashMap<String, String>> {
    let query = query?;

    let pairs = query
        .split(PAIR_SEPARATOR)
        .filter(|token| !token.is_empty())
        .map(|token| {
            let (key, value) = token.split_once('=').unwrap_or((token, ""));
            (unescape(key), unescape(value))
        })
        .collect();

    Some(pairs)
}

/// Escape a single key or value.
pub fn escape(component: &str) -> String {
    let mut escaped = String::with_capacity(component.len());
    escape_into(&mut escaped, component);
    escaped
}

/// Reverse [`escape`]. Malformed `%` sequences are kept as-is and invalid
/// UTF-8 is replaced.
pub fn unescape(component: &str) -> String {
    percent_decode(component, true)
}

/// Escape a URI path segment such as a database name or file path.
///
/// Only the characters that would end the path early (`?`, `#`) and `%`
/// itself are escaped, so ordinary paths stay readable.
pub fn escape_path(path: &str) -> String {
    let mut escaped = String::with_capacity(path.len());
    for c in path.chars() {
        match c {
            '%' | '?' | '#' => push_percent(&mut escaped, c as u8),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Reverse [`escape_path`]. `+` stays a plus sign.
pub fn unescape_path(path: &str) -> String {
    percent_decode(path, false)
}

fn percent_decode(component: &str, plus_is_space: bool) -> String {
    let bytes = component.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());

    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' if plus_is_space => decoded.push(b' '),
            b'%' => match (bytes.get(i + 1), bytes.get(i + 2)) {
                (Some(&hi), Some(&lo)) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => {
                    decoded.push((hex_value(hi) << 4) | hex_value(lo));
                    i += 2;
                }
                _ => decoded.push(b'%'),
            },
            b => decoded.push(b),
        }
        i += 1;
    }

    String::from_utf8_lossy(&decoded).into_owned()
}

fn push_pair(query: &mut String, key: &str, value: &str) {
    escape_into(query, key);
    query.push('=');
    escape_into(query, value);
}

fn escape_into(out: &mut String, component: &str) {
    for &b in component.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'.' | b'-' | b'*' | b'_' => {
                out.push(char::from(b))
            }
            b' ' => out.push('+'),
            _ => push_percent(out, b),
        }
    }
}

fn push_percent(out: &mut String, b: u8) {
    out.push('%');
    out.push(char::from(HEX_DIGITS[usize::from(b >> 4)]));
    out.push(char::from(HEX_DIGITS[usize::from(b & 0x0F)]));
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        b'A'..=b'F' => digit - b'A' + 10,
        _ => 0,
    }
}
