//! Property-based tests for rust_text_encoder using proptest

use proptest::prelude::*;
use rust_text_encoder::prelude::*;
use serde::ser::{Error as _, Serialize, Serializer};

struct NoSerialize;

impl Serialize for NoSerialize {
    fn serialize<S: Serializer>(&self, _serializer: S) -> std::result::Result<S::Ok, S::Error> {
        Err(S::Error::custom("no"))
    }
}

fn encoder() -> TextEncoder {
    TextEncoder::with_pool(EncoderConfig::empty().shared(), BufferPool::new())
}

/// Value part of a single `k=...` field
fn value_of(enc: &TextEncoder) -> String {
    let text = String::from_utf8(enc.as_bytes().to_vec()).expect("output is valid UTF-8");
    text.strip_prefix("k=").expect("field starts with key").to_string()
}

fn level_strategy() -> impl Strategy<Value = Level> {
    prop::sample::select(Level::ALL.to_vec())
}

// ============================================================================
// Escaping Tests
// ============================================================================

proptest! {
    /// Escaped strings parse back to the original text
    #[test]
    fn test_string_escape_roundtrip(s in any::<String>()) {
        let mut enc = encoder();
        enc.add_string("k", &s);
        let value = value_of(&enc);

        prop_assert!(!value.bytes().any(|b| b < 0x20), "unescaped control byte in {:?}", value);
        let parsed: String = serde_json::from_str(&value).expect("escaped value is a JSON string");
        prop_assert_eq!(parsed, s);
    }

    /// Arbitrary bytes never fail and keep every valid character
    #[test]
    fn test_byte_string_escape_is_lossless_for_valid_text(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let mut enc = encoder();
        enc.add_byte_string("k", &bytes);
        let value = value_of(&enc);

        prop_assert!(!value.bytes().any(|b| b < 0x20));
        let parsed: String = serde_json::from_str(&value).expect("escaped value is a JSON string");
        let strip = |s: &str| s.chars().filter(|&c| c != '\u{FFFD}').collect::<String>();
        prop_assert_eq!(strip(&parsed), strip(&String::from_utf8_lossy(&bytes)));

        if let Ok(text) = std::str::from_utf8(&bytes) {
            prop_assert_eq!(parsed, text);
        }
    }

    /// Keys stay within a single `key=` token
    #[test]
    fn test_keys_never_break_the_pair(key in "[ -~]{0,16}") {
        let mut enc = encoder();
        enc.add_bool(&key, true);
        let text = String::from_utf8(enc.as_bytes().to_vec()).unwrap();
        prop_assert!(text.ends_with("=true"));
        if key.contains(' ') || key.contains('=') || key.is_empty() {
            prop_assert!(text.starts_with('"'));
        }
    }
}

// ============================================================================
// Numeric Tests
// ============================================================================

proptest! {
    /// Finite floats render as decimals that parse back exactly
    #[test]
    fn test_float64_roundtrip(value in any::<f64>().prop_filter("finite", |v| v.is_finite())) {
        let mut enc = encoder();
        enc.add_float64("k", value);
        let rendered = value_of(&enc);
        prop_assert!(!rendered.contains('e'), "exponent in {}", rendered);
        let parsed: f64 = rendered.parse().unwrap();
        prop_assert_eq!(parsed, value);
    }

    /// Integers render as plain decimal
    #[test]
    fn test_int64_rendering(value in any::<i64>()) {
        let mut enc = encoder();
        enc.add_int64("k", value);
        prop_assert_eq!(value_of(&enc), value.to_string());
    }
}

// ============================================================================
// Clone and Composite Tests
// ============================================================================

proptest! {
    /// Writes to either side of a clone are invisible to the other
    #[test]
    fn test_clone_independence(
        before in prop::collection::vec(("[a-z]{1,8}", any::<String>()), 0..8),
        after in prop::collection::vec(("[a-z]{1,8}", any::<String>()), 1..8),
    ) {
        let mut original = encoder();
        for (k, v) in &before {
            original.add_string(k, v);
        }
        let snapshot = original.as_bytes().to_vec();
        let mut clone = original.clone();

        for (k, v) in &after {
            original.add_string(k, v);
        }
        prop_assert_eq!(clone.as_bytes(), &snapshot[..]);

        let extended = original.as_bytes().to_vec();
        clone.add_int64("late", 1);
        prop_assert_eq!(original.as_bytes(), &extended[..]);
    }

    /// One failing element out of N leaves N-1 well-formed elements
    #[test]
    fn test_array_with_failing_element((n, failing) in (1usize..24).prop_flat_map(|n| (Just(n), 0..n))) {
        let marshaler = ArrayMarshalerFn::new(move |arr: &mut dyn ArrayEncoder| {
            for j in 0..n {
                if j == failing {
                    let _ = arr.append_reflected(&NoSerialize);
                } else {
                    arr.append_int64(j as i64);
                }
            }
            Ok(())
        });

        let mut enc = encoder();
        enc.add_array("k", &marshaler).unwrap();
        let parsed: Vec<i64> = serde_json::from_str(&value_of(&enc)).expect("array is well-formed");

        let expected: Vec<i64> = (0..n).filter(|&j| j != failing).map(|j| j as i64).collect();
        prop_assert_eq!(parsed.len(), n - 1);
        prop_assert_eq!(parsed, expected);
    }

    /// Reflected structured values render as valid JSON equal to serde_json's view
    #[test]
    fn test_reflected_values_are_json(
        entries in prop::collection::vec(("[a-z<>&\"]{1,6}", any::<i32>()), 0..8)
    ) {
        let value: StructuredValue = entries.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        let mut enc = encoder();
        enc.add_reflected("k", &value).unwrap();

        let rendered: serde_json::Value = serde_json::from_str(&value_of(&enc)).unwrap();
        prop_assert_eq!(rendered, serde_json::to_value(&value).unwrap());
    }
}

// ============================================================================
// Level Tests
// ============================================================================

proptest! {
    /// Level names parse back in either case
    #[test]
    fn test_level_str_roundtrip(level in level_strategy()) {
        prop_assert_eq!(level.as_str().parse::<Level>().unwrap(), level);
        prop_assert_eq!(level.as_capital_str().parse::<Level>().unwrap(), level);
    }

    /// Entries always end with exactly one newline
    #[test]
    fn test_entry_is_single_line(level in level_strategy(), message in any::<String>()) {
        let enc = TextEncoder::with_pool(EncoderConfig::development().shared(), BufferPool::new());
        let buf = enc.encode_entry(&Entry::new(level, message), &[]).unwrap();
        let line = buf.to_string();
        buf.free();
        prop_assert!(line.ends_with('\n'));
        prop_assert_eq!(line.matches('\n').count(), 1);
    }
}
