//! Minimal query-string helpers for bootstrap parsing and deep-link building.
//!
//! Scoped to what the engine needs: `application/x-www-form-urlencoded`
//! pair splitting with `+`/`%XX` decoding, and conservative component
//! encoding for deep links. Full URL parsing stays with the host.

/// Splits a query string into decoded key/value pairs.
///
/// Accepts a bare query (`a=b&c=d`), a `?`-prefixed query, or a full URL;
/// anything after a `#` fragment marker is ignored. Pairs without `=` are
/// skipped.
#[must_use]
pub fn parse_query_pairs(query: &str) -> Vec<(String, String)> {
    let query = match query.split_once('?') {
        Some((_, rest)) => rest,
        None => query,
    };
    let query = match query.split_once('#') {
        Some((before, _)) => before,
        None => query,
    };

    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            Some((decode_component(key), decode_component(value)))
        })
        .collect()
}

/// Percent-encodes a deep-link component, keeping unreserved characters.
#[must_use]
pub fn encode_query_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            other => {
                out.push('%');
                out.push_str(&format!("{other:02X}"));
            }
        }
    }
    out
}

fn decode_component(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                let hex = &bytes[i + 1..i + 3];
                match std::str::from_utf8(hex)
                    .ok()
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                {
                    Some(decoded) => {
                        out.push(decoded);
                        i += 3;
                    }
                    None => {
                        out.push(bytes[i]);
                        i += 1;
                    }
                }
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}
