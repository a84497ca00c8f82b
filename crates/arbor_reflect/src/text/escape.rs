//! Percent-encoding of text tokens.
//!
//! Only the characters that would break the line grammar are encoded:
//! `%`, line feed, carriage return and tab.

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Appends `text` to `out`, percent-encoding reserved characters.
///
/// ```
/// let mut out = String::new();
/// arbor_reflect::text::encode("50%\tdone\n", &mut out);
/// assert_eq!(out, "50%25%09done%0A");
/// ```
pub fn encode(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '%' | '\n' | '\r' | '\t' => {
                let byte = ch as u8;
                out.push('%');
                out.push(HEX[(byte >> 4) as usize] as char);
                out.push(HEX[(byte & 0xF) as usize] as char);
            }
            _ => out.push(ch),
        }
    }
}

/// Reverses [`encode`]. Any `%XX` sequence is accepted.
///
/// Returns `None` on a truncated or non-hex escape, or if the decoded bytes
/// are not UTF-8.
pub fn decode(text: &str) -> Option<String> {
    if !text.contains('%') {
        return Some(text.to_owned());
    }
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut index = 0;
    while index < bytes.len() {
        if bytes[index] == b'%' {
            let hi = hex_value(*bytes.get(index + 1)?)?;
            let lo = hex_value(*bytes.get(index + 2)?)?;
            out.push((hi << 4) | lo);
            index += 3;
        } else {
            out.push(bytes[index]);
            index += 1;
        }
    }
    String::from_utf8(out).ok()
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Encodes `text` and wraps it in double quotes.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    encode(text, &mut out);
    out.push('"');
    out
}

/// Strips the surrounding double quotes of `token` and decodes it.
pub fn unquote(token: &str) -> Option<String> {
    let inner = token.strip_prefix('"')?.strip_suffix('"')?;
    decode(inner)
}
