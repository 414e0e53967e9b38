//! Byte decoding helpers.

use std::borrow::Cow;

use memchr::memmem;

/// How far into a document to look for a charset declaration.
const SNIFF_LIMIT: usize = 1024;

/// Decode bytes to a string, handling various encodings.
///
/// This function:
/// 1. First tries UTF-8 (handles BOM automatically via encoding_rs)
/// 2. If malformed, tries the hint encoding (from `<meta charset>` or `<?xml encoding>`)
/// 3. Falls back to Windows-1252 (the de-facto default of legacy web pages)
///
/// Uses `Cow<str>` to avoid allocation when the input is valid UTF-8.
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Find a declared charset near the start of an HTML document.
///
/// Recognizes `<meta charset="...">`, the `charset=` parameter of a
/// `<meta http-equiv="Content-Type" content="...">` tag, and the
/// `encoding="..."` attribute of an XML declaration.
pub fn sniff_charset(bytes: &[u8]) -> Option<&str> {
    let prefix = &bytes[..bytes.len().min(SNIFF_LIMIT)];

    find_value_after(prefix, b"charset=").or_else(|| find_value_after(prefix, b"encoding="))
}

/// Case-insensitively find `key` and return the (optionally quoted) token after it.
fn find_value_after<'a>(haystack: &'a [u8], key: &[u8]) -> Option<&'a str> {
    let lowered = haystack.to_ascii_lowercase();
    let pos = memmem::find(&lowered, key)?;
    let rest = &haystack[pos + key.len()..];

    let (rest, quote) = match rest.first() {
        Some(&q @ (b'"' | b'\'')) => (&rest[1..], Some(q)),
        _ => (rest, None),
    };

    let end = rest
        .iter()
        .position(|&b| match quote {
            Some(q) => b == q,
            None => b == b'"' || b == b'\'' || b == b';' || b == b'>' || b.is_ascii_whitespace(),
        })
        .unwrap_or(rest.len());

    let value = std::str::from_utf8(&rest[..end]).ok()?.trim();
    (!value.is_empty()).then_some(value)
}
