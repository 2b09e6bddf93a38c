//! Key=value text encoder
//!
//! Top-level fields render as `key=value`; nested objects and arrays use
//! JSON syntax (`{"k":v}`, `[a,b]`). Strings are always double-quoted and
//! JSON-escaped. Field separators between top-level pairs are inserted by
//! the entry composer only, never by the `add_*` operations.

use crate::core::buffer::{Buffer, BufferPool};
use crate::core::config::EncoderConfig;
use crate::core::encoder::{ArrayEncoder, ObjectEncoder, PrimitiveArrayEncoder};
use crate::core::error::Result;
use crate::core::escape::{write_key, write_quoted_bytes, write_quoted_str};
use crate::core::format::{
    write_base64, write_complex128, write_complex64, write_float32, write_float64, write_int,
};
use crate::core::marshaler::{ArrayMarshaler, Loggable, ObjectMarshaler};
use crate::core::strategy::{duration_nanos, unix_nanos};
use chrono::{DateTime, TimeDelta, Utc};
use std::fmt;
use std::sync::Arc;

/// Encoder producing one greppable text line per entry
///
/// Values added directly to an encoder become context: they are rendered
/// after the header of every entry it encodes, each top-level pair as its own
/// item. [`TextEncoder::with_fields`] is the usual way to build such a child.
///
/// # Example
///
/// ```
/// use rust_text_encoder::{EncoderConfig, ObjectEncoder, TextEncoder};
///
/// let mut enc = TextEncoder::new(EncoderConfig::default().shared());
/// enc.add_string("user", "alice");
/// assert_eq!(enc.as_bytes(), br#"user="alice""#);
/// ```
pub struct TextEncoder {
    pub(super) config: Arc<EncoderConfig>,
    pub(super) buf: Buffer,
    pub(super) pool: BufferPool,
    nesting: usize,
    /// Offsets where each top-level pair starts
    items: Vec<usize>,
}

impl TextEncoder {
    /// Create an encoder drawing buffers from the global pool
    pub fn new(config: Arc<EncoderConfig>) -> Self {
        Self::with_pool(config, BufferPool::global().clone())
    }

    pub fn with_pool(config: Arc<EncoderConfig>, pool: BufferPool) -> Self {
        let buf = pool.get();
        Self {
            config,
            buf,
            pool,
            nesting: 0,
            items: Vec::new(),
        }
    }

    /// Fresh encoder for one line, sharing this encoder's config and pool
    pub(super) fn line(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            buf: self.pool.get(),
            pool: self.pool.clone(),
            nesting: 0,
            items: Vec::new(),
        }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Bytes written so far
    pub fn as_bytes(&self) -> &[u8] {
        self.buf.as_bytes()
    }

    /// Discard all content, keeping the buffer's capacity
    pub fn truncate(&mut self) {
        self.buf.reset();
        self.nesting = 0;
        self.items.clear();
    }

    /// Give up the encoder, returning its buffer
    pub fn into_buffer(mut self) -> Buffer {
        std::mem::take(&mut self.buf)
    }

    /// Top-level pairs written so far, in order
    pub(super) fn items(&self) -> impl Iterator<Item = &[u8]> + '_ {
        let bytes = self.buf.as_bytes();
        let mut start = 0;
        self.items
            .iter()
            .copied()
            .chain(std::iter::once(bytes.len()))
            .filter_map(move |end| {
                let item = &bytes[start..end];
                start = end;
                (!item.is_empty()).then_some(item)
            })
    }

    /// Drop everything written from `mark` on
    pub(super) fn rollback(&mut self, mark: usize) {
        self.buf.truncate(mark);
        self.items.retain(|&start| start < mark);
    }

    fn add_key(&mut self, key: &str) {
        if self.nesting == 0 {
            self.items.push(self.buf.len());
            write_key(&mut self.buf, key);
            self.buf.push(b'=');
        } else {
            self.add_element_separator();
            write_quoted_str(&mut self.buf, key);
            self.buf.push(b':');
        }
    }

    /// Comma before an array element or nested key, unless one is not needed
    fn add_element_separator(&mut self) {
        match self.buf.last() {
            None | Some(b'{' | b'[' | b':' | b',' | b'=') => {}
            Some(_) => self.buf.push(b','),
        }
    }

    fn close_array(&mut self, mark: usize, value: &dyn ArrayMarshaler) -> Result<()> {
        self.buf.push(b'[');
        self.nesting += 1;
        let res = value.marshal_log_array(self);
        self.nesting -= 1;
        match res {
            Ok(()) => {
                self.buf.push(b']');
                Ok(())
            }
            Err(err) => {
                self.rollback(mark);
                Err(err)
            }
        }
    }

    fn close_object(&mut self, mark: usize, value: &dyn ObjectMarshaler) -> Result<()> {
        self.buf.push(b'{');
        self.nesting += 1;
        let res = value.marshal_log_object(self);
        self.nesting -= 1;
        match res {
            Ok(()) => {
                self.buf.push(b'}');
                Ok(())
            }
            Err(err) => {
                self.rollback(mark);
                Err(err)
            }
        }
    }

    fn write_reflected(&mut self, mark: usize, value: &dyn Loggable) -> Result<()> {
        let res = value.encode_structured(&mut self.buf);
        if res.is_err() {
            self.rollback(mark);
        }
        res
    }
}

impl Clone for TextEncoder {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            buf: self.buf.clone(),
            pool: self.pool.clone(),
            nesting: self.nesting,
            items: self.items.clone(),
        }
    }
}

impl Drop for TextEncoder {
    fn drop(&mut self) {
        std::mem::take(&mut self.buf).free();
    }
}

impl fmt::Debug for TextEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextEncoder")
            .field("buf", &self.buf)
            .field("nesting", &self.nesting)
            .finish()
    }
}

impl PrimitiveArrayEncoder for TextEncoder {
    fn append_bool(&mut self, value: bool) {
        self.add_element_separator();
        self.buf.push_str(if value { "true" } else { "false" });
    }

    fn append_byte_string(&mut self, value: &[u8]) {
        self.add_element_separator();
        write_quoted_bytes(&mut self.buf, value);
    }

    fn append_complex128(&mut self, real: f64, imaginary: f64) {
        self.add_element_separator();
        self.buf.push(b'"');
        write_complex128(&mut self.buf, real, imaginary);
        self.buf.push(b'"');
    }

    fn append_complex64(&mut self, real: f32, imaginary: f32) {
        self.add_element_separator();
        self.buf.push(b'"');
        write_complex64(&mut self.buf, real, imaginary);
        self.buf.push(b'"');
    }

    fn append_float64(&mut self, value: f64) {
        self.add_element_separator();
        write_float64(&mut self.buf, value);
    }

    fn append_float32(&mut self, value: f32) {
        self.add_element_separator();
        write_float32(&mut self.buf, value);
    }

    fn append_int64(&mut self, value: i64) {
        self.add_element_separator();
        write_int(&mut self.buf, value);
    }

    fn append_uint64(&mut self, value: u64) {
        self.add_element_separator();
        write_int(&mut self.buf, value);
    }

    fn append_string(&mut self, value: &str) {
        self.add_element_separator();
        write_quoted_str(&mut self.buf, value);
    }
}

impl ArrayEncoder for TextEncoder {
    fn append_duration(&mut self, value: TimeDelta) {
        let before = self.buf.len();
        if let Some(strategy) = self.config.duration_encoder.clone() {
            strategy.encode_duration(value, self);
        }
        if self.buf.len() == before {
            self.append_int64(duration_nanos(value));
        }
    }

    fn append_time(&mut self, value: DateTime<Utc>) {
        let before = self.buf.len();
        if let Some(strategy) = self.config.time_encoder.clone() {
            strategy.encode_time(value, self);
        }
        if self.buf.len() == before {
            self.append_int64(unix_nanos(value));
        }
    }

    fn append_array(&mut self, value: &dyn ArrayMarshaler) -> Result<()> {
        let mark = self.buf.len();
        self.add_element_separator();
        self.close_array(mark, value)
    }

    fn append_object(&mut self, value: &dyn ObjectMarshaler) -> Result<()> {
        let mark = self.buf.len();
        self.add_element_separator();
        self.close_object(mark, value)
    }

    fn append_reflected(&mut self, value: &dyn Loggable) -> Result<()> {
        let mark = self.buf.len();
        self.add_element_separator();
        self.write_reflected(mark, value)
    }
}

impl ObjectEncoder for TextEncoder {
    fn add_array(&mut self, key: &str, value: &dyn ArrayMarshaler) -> Result<()> {
        let mark = self.buf.len();
        self.add_key(key);
        self.close_array(mark, value)
    }

    fn add_object(&mut self, key: &str, value: &dyn ObjectMarshaler) -> Result<()> {
        let mark = self.buf.len();
        self.add_key(key);
        self.close_object(mark, value)
    }

    fn add_reflected(&mut self, key: &str, value: &dyn Loggable) -> Result<()> {
        let mark = self.buf.len();
        self.add_key(key);
        self.write_reflected(mark, value)
    }

    fn add_binary(&mut self, key: &str, value: &[u8]) {
        self.add_key(key);
        self.buf.push(b'"');
        write_base64(&mut self.buf, value);
        self.buf.push(b'"');
    }

    fn add_byte_string(&mut self, key: &str, value: &[u8]) {
        self.add_key(key);
        self.append_byte_string(value);
    }

    fn add_bool(&mut self, key: &str, value: bool) {
        self.add_key(key);
        self.append_bool(value);
    }

    fn add_complex128(&mut self, key: &str, real: f64, imaginary: f64) {
        self.add_key(key);
        self.append_complex128(real, imaginary);
    }

    fn add_complex64(&mut self, key: &str, real: f32, imaginary: f32) {
        self.add_key(key);
        self.append_complex64(real, imaginary);
    }

    fn add_duration(&mut self, key: &str, value: TimeDelta) {
        self.add_key(key);
        self.append_duration(value);
    }

    fn add_float64(&mut self, key: &str, value: f64) {
        self.add_key(key);
        self.append_float64(value);
    }

    fn add_float32(&mut self, key: &str, value: f32) {
        self.add_key(key);
        self.append_float32(value);
    }

    fn add_int64(&mut self, key: &str, value: i64) {
        self.add_key(key);
        self.append_int64(value);
    }

    fn add_uint64(&mut self, key: &str, value: u64) {
        self.add_key(key);
        self.append_uint64(value);
    }

    fn add_string(&mut self, key: &str, value: &str) {
        self.add_key(key);
        self.append_string(value);
    }

    fn add_time(&mut self, key: &str, value: DateTime<Utc>) {
        self.add_key(key);
        self.append_time(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::EncoderError;
    use crate::core::marshaler::{ArrayMarshalerFn, ObjectMarshalerFn};
    use crate::core::strategy::{DurationFormat, TimeFormat};
    use chrono::TimeZone;
    use serde::ser::{Error as _, Serialize, Serializer};
    use std::collections::BTreeMap;

    struct NoSerialize;

    impl Serialize for NoSerialize {
        fn serialize<S: Serializer>(&self, _serializer: S) -> std::result::Result<S::Ok, S::Error> {
            Err(S::Error::custom("no"))
        }
    }

    fn epoch_config() -> Arc<EncoderConfig> {
        EncoderConfig::empty()
            .with_time_format(TimeFormat::Epoch)
            .with_duration_format(DurationFormat::Seconds)
            .shared()
    }

    fn encoder() -> TextEncoder {
        TextEncoder::with_pool(epoch_config(), BufferPool::new())
    }

    fn text(enc: &TextEncoder) -> String {
        String::from_utf8_lossy(enc.as_bytes()).into_owned()
    }

    /// Run `f` on an empty encoder, then again after an existing field
    fn assert_output(expected: &str, f: impl Fn(&mut TextEncoder)) {
        let mut enc = encoder();
        f(&mut enc);
        assert_eq!(text(&enc), expected);

        enc.truncate();
        enc.add_string("foo", "bar");
        f(&mut enc);
        assert_eq!(text(&enc), format!("foo=\"bar\"{}", expected));
    }

    type FieldCase = (&'static str, fn(&mut TextEncoder));
    type ElementCase = (&'static str, fn(&mut dyn ArrayEncoder));

    fn field(expected: &'static str, f: fn(&mut TextEncoder)) -> FieldCase {
        (expected, f)
    }

    fn element(expected: &'static str, f: fn(&mut dyn ArrayEncoder)) -> ElementCase {
        (expected, f)
    }

    fn unix(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().expect("valid timestamp")
    }

    #[test]
    fn test_object_fields() {
        let cases = vec![
            field(r#"k="YWIxMg==""#, |e| e.add_binary("k", b"ab12")),
            field(r"k\\=true", |e| e.add_bool(r"k\", true)),
            field("k=true", |e| e.add_bool("k", true)),
            field("k=false", |e| e.add_bool("k", false)),
            field(r#"k="v\\""#, |e| e.add_byte_string("k", br"v\")),
            field(r#"k="v""#, |e| e.add_byte_string("k", b"v")),
            field(r#"k="""#, |e| e.add_byte_string("k", &[])),
            field(r#"k="1+2i""#, |e| e.add_complex128("k", 1.0, 2.0)),
            field(r#"k="1+2i""#, |e| e.add_complex64("k", 1.0, 2.0)),
            field("k=0.000000001", |e| e.add_duration("k", TimeDelta::nanoseconds(1))),
            field("k=1", |e| e.add_float64("k", 1.0)),
            field("k=10000000000", |e| e.add_float64("k", 1e10)),
            field("k=NaN", |e| e.add_float64("k", f64::NAN)),
            field("k=+Inf", |e| e.add_float64("k", f64::INFINITY)),
            field("k=-Inf", |e| e.add_float64("k", f64::NEG_INFINITY)),
            field("k=1", |e| e.add_float32("k", 1.0)),
            field("k=10000000000", |e| e.add_float32("k", 1e10)),
            field("k=NaN", |e| e.add_float32("k", f32::NAN)),
            field("k=+Inf", |e| e.add_float32("k", f32::INFINITY)),
            field("k=-Inf", |e| e.add_float32("k", f32::NEG_INFINITY)),
            field("k=42", |e| e.add_int("k", 42)),
            field("k=42", |e| e.add_int64("k", 42)),
            field("k=42", |e| e.add_int32("k", 42)),
            field("k=42", |e| e.add_int16("k", 42)),
            field("k=42", |e| e.add_int8("k", 42)),
            field(r#"k="v\\""#, |e| e.add_string("k", r"v\")),
            field(r#"k="v""#, |e| e.add_string("k", "v")),
            field(r#"k="""#, |e| e.add_string("k", "")),
            field("k=1", |e| e.add_time("k", unix(1))),
            field("k=42", |e| e.add_uint("k", 42)),
            field("k=42", |e| e.add_uint64("k", 42)),
            field("k=42", |e| e.add_uint32("k", 42)),
            field("k=42", |e| e.add_uint16("k", 42)),
            field("k=42", |e| e.add_uint8("k", 42)),
            field("k=42", |e| e.add_uintptr("k", 42)),
        ];

        for (expected, f) in cases {
            assert_output(expected, f);
        }
    }

    #[test]
    fn test_reflected_fields() {
        assert_output(r#"k={"escape":"<&>","loggable":"yes"}"#, |e| {
            let mut map = BTreeMap::new();
            map.insert("escape", "<&>");
            map.insert("loggable", "yes");
            assert!(e.add_reflected("k", &map).is_ok());
        });

        assert_output("", |e| {
            let err = e.add_reflected("k", &NoSerialize).unwrap_err();
            assert!(matches!(err, EncoderError::Serialization(_)));
        });
    }

    #[test]
    fn test_key_quoting() {
        assert_output(r#""a b"=1"#, |e| e.add_int64("a b", 1));
        assert_output(r#""k=v"=1"#, |e| e.add_int64("k=v", 1));
        assert_output(r#"""=1"#, |e| e.add_int64("", 1));
        assert_output(r#"k\n=1"#, |e| e.add_int64("k\n", 1));
    }

    #[test]
    fn test_arrays() {
        let cases = vec![
            element("[true,true]", |e| e.append_bool(true)),
            element(r#"["k","k"]"#, |e| e.append_byte_string(b"k")),
            element(r#"["k\\","k\\"]"#, |e| e.append_byte_string(br"k\")),
            element(r#"["1+2i","1+2i"]"#, |e| e.append_complex128(1.0, 2.0)),
            element(r#"["1+2i","1+2i"]"#, |e| e.append_complex64(1.0, 2.0)),
            element("[0.000000002,0.000000002]", |e| {
                e.append_duration(TimeDelta::nanoseconds(2))
            }),
            element("[3.14,3.14]", |e| e.append_float64(3.14)),
            element("[3.14,3.14]", |e| e.append_float32(3.14)),
            element("[42,42]", |e| e.append_int(42)),
            element("[42,42]", |e| e.append_int64(42)),
            element("[42,42]", |e| e.append_int32(42)),
            element("[42,42]", |e| e.append_int16(42)),
            element("[42,42]", |e| e.append_int8(42)),
            element(r#"["k","k"]"#, |e| e.append_string("k")),
            element(r#"["k\\","k\\"]"#, |e| e.append_string(r"k\")),
            element("[1,1]", |e| e.append_time(unix(1))),
            element("[42,42]", |e| e.append_uint(42)),
            element("[42,42]", |e| e.append_uint64(42)),
            element("[42,42]", |e| e.append_uint32(42)),
            element("[42,42]", |e| e.append_uint16(42)),
            element("[42,42]", |e| e.append_uint8(42)),
            element("[42,42]", |e| e.append_uintptr(42)),
            element("[[true],[true]]", |e| {
                let inner = ArrayMarshalerFn::new(|inner: &mut dyn ArrayEncoder| {
                    inner.append_bool(true);
                    Ok(())
                });
                assert!(e.append_array(&inner).is_ok());
            }),
            element("[]", |e| {
                let inner = ArrayMarshalerFn::new(|inner: &mut dyn ArrayEncoder| {
                    inner.append_bool(true);
                    Err(EncoderError::marshal("fail"))
                });
                assert!(e.append_array(&inner).is_err());
            }),
            element(r#"[{"foo":5},{"foo":5}]"#, |e| {
                let mut map = BTreeMap::new();
                map.insert("foo", 5);
                assert!(e.append_reflected(&map).is_ok());
            }),
            element("[]", |e| {
                assert!(e.append_reflected(&NoSerialize).is_err());
            }),
        ];

        for (expected, f) in cases {
            assert_output(&format!("array={}", expected), move |enc| {
                let twice = ArrayMarshalerFn::new(move |arr: &mut dyn ArrayEncoder| {
                    f(arr);
                    f(arr);
                    Ok(())
                });
                assert!(enc.add_array("array", &twice).is_ok());
            });
        }
    }

    #[test]
    fn test_failing_element_between_siblings() {
        let mut enc = encoder();
        let arr = ArrayMarshalerFn::new(|arr: &mut dyn ArrayEncoder| {
            arr.append_int64(1);
            let _ = arr.append_reflected(&NoSerialize);
            arr.append_int64(3);
            Ok(())
        });
        enc.add_array("a", &arr).expect("array renders");
        assert_eq!(text(&enc), "a=[1,3]");
    }

    #[test]
    fn test_nested_objects() {
        let mut enc = encoder();
        let obj = ObjectMarshalerFn::new(|obj: &mut dyn ObjectEncoder| {
            obj.add_string("name", "x");
            obj.add_int64("n", 2);
            obj.add_object(
                "inner",
                &ObjectMarshalerFn::new(|inner: &mut dyn ObjectEncoder| {
                    inner.add_bool("ok", true);
                    Ok(())
                }),
            )?;
            obj.add_array(
                "list",
                &ArrayMarshalerFn::new(|arr: &mut dyn ArrayEncoder| {
                    arr.append_object(&ObjectMarshalerFn::new(|o: &mut dyn ObjectEncoder| {
                        o.add_string("a b", "c");
                        Ok(())
                    }))
                }),
            )
        });
        enc.add_object("o", &obj).expect("object renders");
        assert_eq!(
            text(&enc),
            r#"o={"name":"x","n":2,"inner":{"ok":true},"list":[{"a b":"c"}]}"#
        );
    }

    #[test]
    fn test_failing_object_rolls_back_field() {
        let mut enc = encoder();
        enc.add_string("before", "x");
        let obj = ObjectMarshalerFn::new(|obj: &mut dyn ObjectEncoder| {
            obj.add_string("partial", "y");
            Err(EncoderError::marshal("broken"))
        });
        assert!(enc.add_object("o", &obj).is_err());
        assert_eq!(text(&enc), r#"before="x""#);

        // failure inside a nested field drops only that field
        let obj = ObjectMarshalerFn::new(|obj: &mut dyn ObjectEncoder| {
            obj.add_string("kept", "y");
            let _ = obj.add_reflected("gone", &NoSerialize);
            Ok(())
        });
        enc.add_object("o", &obj).expect("object renders");
        assert_eq!(text(&enc), r#"before="x"o={"kept":"y"}"#);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut parent = encoder();
        let mut clone = parent.clone();

        parent.add_string("foo", "bar");
        clone.add_string("baz", "bing");

        assert_eq!(text(&parent), r#"foo="bar""#);
        assert_eq!(text(&clone), r#"baz="bing""#);

        let copy = parent.clone();
        parent.add_int64("later", 1);
        assert_eq!(text(&copy), r#"foo="bar""#);
    }

    #[test]
    fn test_unconfigured_time_and_duration() {
        let mut enc = TextEncoder::with_pool(EncoderConfig::empty().shared(), BufferPool::new());
        enc.add_time("foo", unix(1_591_287_718));
        assert_eq!(text(&enc), "foo=1591287718000000000");

        enc.truncate();
        enc.add_duration("bar", TimeDelta::microseconds(1));
        assert_eq!(text(&enc), "bar=1000");
    }

    #[test]
    fn test_silent_strategy_falls_back_to_nanos() {
        let config = EncoderConfig::empty()
            .with_time_encoder(|_: DateTime<Utc>, _: &mut dyn PrimitiveArrayEncoder| {})
            .shared();
        let mut enc = TextEncoder::with_pool(config, BufferPool::new());
        enc.add_time("t", unix(2));
        assert_eq!(text(&enc), "t=2000000000");
    }

    #[test]
    fn test_textual_time_is_quoted() {
        let config = EncoderConfig::empty()
            .with_time_format(TimeFormat::Rfc3339)
            .shared();
        let mut enc = TextEncoder::with_pool(config, BufferPool::new());
        enc.add_time("t", unix(0));
        assert_eq!(text(&enc), r#"t="1970-01-01T00:00:00Z""#);
    }

    #[test]
    fn test_items_follow_rollback_and_truncate() {
        let mut enc = encoder();
        enc.add_string("a", "1");
        assert!(enc.add_reflected("bad", &NoSerialize).is_err());
        enc.add_array(
            "ids",
            &ArrayMarshalerFn::new(|arr: &mut dyn ArrayEncoder| {
                arr.append_int64(1);
                arr.append_int64(2);
                Ok(())
            }),
        )
        .unwrap();

        assert_eq!(text(&enc), r#"a="1"ids=[1,2]"#);
        let items: Vec<&[u8]> = enc.items().collect();
        assert_eq!(items, vec![&br#"a="1""#[..], &b"ids=[1,2]"[..]]);

        enc.truncate();
        assert_eq!(enc.items().count(), 0);
    }

    #[test]
    fn test_dropped_encoder_returns_its_buffer() {
        let pool = BufferPool::with_config(4, 64, 4096);
        let enc = TextEncoder::with_pool(epoch_config(), pool.clone());
        let mut clone = enc.clone();
        clone.add_bool("k", true);

        drop(clone);
        assert_eq!(pool.metrics().returns(), 0);

        drop(enc);
        let metrics = pool.metrics();
        assert_eq!(metrics.checkouts(), 1);
        assert_eq!(metrics.returns(), 1);
        assert_eq!(metrics.outstanding(), 0);
        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn test_into_buffer_keeps_pool_link() {
        let pool = BufferPool::with_config(4, 64, 4096);
        let mut enc = TextEncoder::with_pool(epoch_config(), pool.clone());
        enc.add_int64("n", 7);

        let buf = enc.into_buffer();
        assert_eq!(buf.as_bytes(), b"n=7");
        assert_eq!(pool.metrics().returns(), 0);
        buf.free();
        assert_eq!(pool.metrics().returns(), 1);
    }

    #[test]
    fn test_truncate_keeps_capacity() {
        let mut enc = encoder();
        enc.add_string("k", &"x".repeat(2048));
        let capacity = enc.buf.capacity();
        enc.truncate();
        assert!(enc.as_bytes().is_empty());
        assert_eq!(enc.buf.capacity(), capacity);
    }
}
