//! JSON-compatible string escaping
//!
//! Backslash and double quote are backslash-escaped, `\n`, `\r` and `\t` use
//! short escapes and every other control byte becomes `\u00XX`. Angle
//! brackets and ampersand are written verbatim. Byte input that is not valid
//! UTF-8 degrades to one `\ufffd` escape per offending byte.

use super::buffer::Buffer;

const HEX: &[u8; 16] = b"0123456789abcdef";
const REPLACEMENT: &str = "\\ufffd";

/// Append the escaped form of `s` without surrounding quotes
pub fn write_escaped_str(buf: &mut Buffer, s: &str) {
    let bytes = s.as_bytes();
    let mut start = 0;

    for (i, &b) in bytes.iter().enumerate() {
        if b >= 0x20 && b != b'"' && b != b'\\' {
            continue;
        }

        buf.extend_from_slice(&bytes[start..i]);
        match b {
            b'"' => buf.push_str("\\\""),
            b'\\' => buf.push_str("\\\\"),
            b'\n' => buf.push_str("\\n"),
            b'\r' => buf.push_str("\\r"),
            b'\t' => buf.push_str("\\t"),
            _ => {
                buf.push_str("\\u00");
                buf.push(HEX[(b >> 4) as usize]);
                buf.push(HEX[(b & 0xf) as usize]);
            }
        }
        start = i + 1;
    }

    buf.extend_from_slice(&bytes[start..]);
}

/// Append the escaped form of raw bytes without surrounding quotes
pub fn write_escaped_bytes(buf: &mut Buffer, mut bytes: &[u8]) {
    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                write_escaped_str(buf, valid);
                return;
            }
            Err(err) => {
                let (valid, rest) = bytes.split_at(err.valid_up_to());
                write_escaped_str(buf, std::str::from_utf8(valid).unwrap_or_default());

                let invalid = err.error_len().unwrap_or(rest.len());
                for _ in 0..invalid {
                    buf.push_str(REPLACEMENT);
                }
                bytes = &rest[invalid..];
            }
        }
    }
}

/// Length of the ANSI CSI sequence (`ESC [ params final`) at the start of
/// `bytes`, if one is there
fn csi_len(bytes: &[u8]) -> Option<usize> {
    let [0x1b, b'[', rest @ ..] = bytes else {
        return None;
    };
    let params = rest.iter().take_while(|b| (0x20..=0x3f).contains(*b)).count();
    match rest.get(params) {
        Some(0x40..=0x7e) => Some(params + 3),
        _ => None,
    }
}

/// Append `bytes` escaped, passing ANSI CSI sequences through untouched
///
/// Used for colored output: `\x1b[31m` survives while a lone `ESC` or any
/// other control byte is escaped as usual.
pub fn write_escaped_ansi(buf: &mut Buffer, bytes: &[u8]) {
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match csi_len(&bytes[i..]) {
            Some(len) => {
                write_escaped_bytes(buf, &bytes[start..i]);
                buf.extend_from_slice(&bytes[i..i + len]);
                i += len;
                start = i;
            }
            None => i += 1,
        }
    }
    write_escaped_bytes(buf, &bytes[start..]);
}

/// Append `s` escaped and wrapped in double quotes
pub fn write_quoted_str(buf: &mut Buffer, s: &str) {
    buf.push(b'"');
    write_escaped_str(buf, s);
    buf.push(b'"');
}

/// Append raw bytes escaped and wrapped in double quotes
pub fn write_quoted_bytes(buf: &mut Buffer, bytes: &[u8]) {
    buf.push(b'"');
    write_escaped_bytes(buf, bytes);
    buf.push(b'"');
}

/// Whether a top-level key must be quoted to keep `key=value` parseable
pub fn key_needs_quoting(key: &str) -> bool {
    key.is_empty() || key.bytes().any(|b| b == b' ' || b == b'=')
}

/// Append a top-level key: escaped, and quoted only when it would break the
/// `key=value` grammar
pub fn write_key(buf: &mut Buffer, key: &str) {
    if key_needs_quoting(key) {
        write_quoted_str(buf, key);
    } else {
        write_escaped_str(buf, key);
    }
}
