//! Typed key/value fields attached to an entry

use super::encoder::ObjectEncoder;
use super::error::Result;
use super::marshaler::{ArrayMarshaler, Loggable, ObjectMarshaler};
use chrono::{DateTime, TimeDelta, Utc};
use std::fmt;
use std::sync::Arc;

/// Payload of a [`Field`], one variant per supported kind
#[derive(Clone)]
pub enum FieldValue {
    Bool(bool),
    Int64(i64),
    Int32(i32),
    Int16(i16),
    Int8(i8),
    Uint64(u64),
    Uint32(u32),
    Uint16(u16),
    Uint8(u8),
    Uintptr(usize),
    Float64(f64),
    Float32(f32),
    Complex128(f64, f64),
    Complex64(f32, f32),
    Duration(TimeDelta),
    Time(DateTime<Utc>),
    Binary(Vec<u8>),
    ByteString(Vec<u8>),
    String(String),
    Array(Arc<dyn ArrayMarshaler>),
    Object(Arc<dyn ObjectMarshaler>),
    Reflected(Arc<dyn Loggable>),
    /// Renders nothing
    Skip,
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(v) => write!(f, "Bool({})", v),
            FieldValue::Int64(v) => write!(f, "Int64({})", v),
            FieldValue::Int32(v) => write!(f, "Int32({})", v),
            FieldValue::Int16(v) => write!(f, "Int16({})", v),
            FieldValue::Int8(v) => write!(f, "Int8({})", v),
            FieldValue::Uint64(v) => write!(f, "Uint64({})", v),
            FieldValue::Uint32(v) => write!(f, "Uint32({})", v),
            FieldValue::Uint16(v) => write!(f, "Uint16({})", v),
            FieldValue::Uint8(v) => write!(f, "Uint8({})", v),
            FieldValue::Uintptr(v) => write!(f, "Uintptr({:#x})", v),
            FieldValue::Float64(v) => write!(f, "Float64({})", v),
            FieldValue::Float32(v) => write!(f, "Float32({})", v),
            FieldValue::Complex128(re, im) => write!(f, "Complex128({}, {})", re, im),
            FieldValue::Complex64(re, im) => write!(f, "Complex64({}, {})", re, im),
            FieldValue::Duration(v) => write!(f, "Duration({})", v),
            FieldValue::Time(v) => write!(f, "Time({})", v),
            FieldValue::Binary(v) => write!(f, "Binary({} bytes)", v.len()),
            FieldValue::ByteString(v) => {
                write!(f, "ByteString({:?})", String::from_utf8_lossy(v))
            }
            FieldValue::String(v) => write!(f, "String({:?})", v),
            FieldValue::Array(_) => f.write_str("Array(..)"),
            FieldValue::Object(_) => f.write_str("Object(..)"),
            FieldValue::Reflected(_) => f.write_str("Reflected(..)"),
            FieldValue::Skip => f.write_str("Skip"),
        }
    }
}

/// One typed key/value pair
///
/// # Examples
///
/// ```
/// use rust_text_encoder::Field;
///
/// let fields = vec![
///     Field::string("user", "alice"),
///     Field::i64("attempt", 3),
///     Field::bool("cached", false),
/// ];
/// assert_eq!(fields[1].key(), "attempt");
/// ```
#[derive(Debug, Clone)]
pub struct Field {
    key: String,
    value: FieldValue,
}

impl Field {
    pub fn new(key: impl Into<String>, value: FieldValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn is_skip(&self) -> bool {
        matches!(self.value, FieldValue::Skip)
    }

    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self::new(key, FieldValue::Bool(value))
    }

    pub fn i64(key: impl Into<String>, value: i64) -> Self {
        Self::new(key, FieldValue::Int64(value))
    }

    pub fn i32(key: impl Into<String>, value: i32) -> Self {
        Self::new(key, FieldValue::Int32(value))
    }

    pub fn i16(key: impl Into<String>, value: i16) -> Self {
        Self::new(key, FieldValue::Int16(value))
    }

    pub fn i8(key: impl Into<String>, value: i8) -> Self {
        Self::new(key, FieldValue::Int8(value))
    }

    pub fn u64(key: impl Into<String>, value: u64) -> Self {
        Self::new(key, FieldValue::Uint64(value))
    }

    pub fn u32(key: impl Into<String>, value: u32) -> Self {
        Self::new(key, FieldValue::Uint32(value))
    }

    pub fn u16(key: impl Into<String>, value: u16) -> Self {
        Self::new(key, FieldValue::Uint16(value))
    }

    pub fn u8(key: impl Into<String>, value: u8) -> Self {
        Self::new(key, FieldValue::Uint8(value))
    }

    pub fn uintptr(key: impl Into<String>, value: usize) -> Self {
        Self::new(key, FieldValue::Uintptr(value))
    }

    pub fn f64(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, FieldValue::Float64(value))
    }

    pub fn f32(key: impl Into<String>, value: f32) -> Self {
        Self::new(key, FieldValue::Float32(value))
    }

    pub fn complex128(key: impl Into<String>, real: f64, imaginary: f64) -> Self {
        Self::new(key, FieldValue::Complex128(real, imaginary))
    }

    pub fn complex64(key: impl Into<String>, real: f32, imaginary: f32) -> Self {
        Self::new(key, FieldValue::Complex64(real, imaginary))
    }

    pub fn duration(key: impl Into<String>, value: TimeDelta) -> Self {
        Self::new(key, FieldValue::Duration(value))
    }

    pub fn time(key: impl Into<String>, value: DateTime<Utc>) -> Self {
        Self::new(key, FieldValue::Time(value))
    }

    /// Opaque bytes, rendered as base64
    pub fn binary(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self::new(key, FieldValue::Binary(value.into()))
    }

    /// Bytes holding text, rendered escaped
    pub fn byte_string(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self::new(key, FieldValue::ByteString(value.into()))
    }

    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, FieldValue::String(value.into()))
    }

    /// Render the value's `Display` output as a string field
    pub fn display(key: impl Into<String>, value: &dyn fmt::Display) -> Self {
        Self::new(key, FieldValue::String(value.to_string()))
    }

    /// An error under the conventional `error` key
    pub fn error(err: &dyn std::error::Error) -> Self {
        Self::named_error("error", err)
    }

    pub fn named_error(key: impl Into<String>, err: &dyn std::error::Error) -> Self {
        Self::new(key, FieldValue::String(err.to_string()))
    }

    pub fn array(key: impl Into<String>, value: impl ArrayMarshaler + 'static) -> Self {
        Self::new(key, FieldValue::Array(Arc::new(value)))
    }

    pub fn object(key: impl Into<String>, value: impl ObjectMarshaler + 'static) -> Self {
        Self::new(key, FieldValue::Object(Arc::new(value)))
    }

    /// Any serializable value, rendered through the structural fallback
    pub fn reflect(key: impl Into<String>, value: impl Loggable + 'static) -> Self {
        Self::new(key, FieldValue::Reflected(Arc::new(value)))
    }

    pub fn skip() -> Self {
        Self::new(String::new(), FieldValue::Skip)
    }

    /// Dispatch this field to the matching `add_*` operation
    pub fn add_to(&self, enc: &mut dyn ObjectEncoder) -> Result<()> {
        let key = self.key.as_str();
        match &self.value {
            FieldValue::Bool(v) => enc.add_bool(key, *v),
            FieldValue::Int64(v) => enc.add_int64(key, *v),
            FieldValue::Int32(v) => enc.add_int32(key, *v),
            FieldValue::Int16(v) => enc.add_int16(key, *v),
            FieldValue::Int8(v) => enc.add_int8(key, *v),
            FieldValue::Uint64(v) => enc.add_uint64(key, *v),
            FieldValue::Uint32(v) => enc.add_uint32(key, *v),
            FieldValue::Uint16(v) => enc.add_uint16(key, *v),
            FieldValue::Uint8(v) => enc.add_uint8(key, *v),
            FieldValue::Uintptr(v) => enc.add_uintptr(key, *v),
            FieldValue::Float64(v) => enc.add_float64(key, *v),
            FieldValue::Float32(v) => enc.add_float32(key, *v),
            FieldValue::Complex128(re, im) => enc.add_complex128(key, *re, *im),
            FieldValue::Complex64(re, im) => enc.add_complex64(key, *re, *im),
            FieldValue::Duration(v) => enc.add_duration(key, *v),
            FieldValue::Time(v) => enc.add_time(key, *v),
            FieldValue::Binary(v) => enc.add_binary(key, v),
            FieldValue::ByteString(v) => enc.add_byte_string(key, v),
            FieldValue::String(v) => enc.add_string(key, v),
            FieldValue::Array(v) => return enc.add_array(key, v.as_ref()),
            FieldValue::Object(v) => return enc.add_object(key, v.as_ref()),
            FieldValue::Reflected(v) => return enc.add_reflected(key, v.as_ref()),
            FieldValue::Skip => {}
        }
        Ok(())
    }
}

impl From<(&str, bool)> for Field {
    fn from((key, value): (&str, bool)) -> Self {
        Field::bool(key, value)
    }
}

impl From<(&str, i64)> for Field {
    fn from((key, value): (&str, i64)) -> Self {
        Field::i64(key, value)
    }
}

impl From<(&str, i32)> for Field {
    fn from((key, value): (&str, i32)) -> Self {
        Field::i32(key, value)
    }
}

impl From<(&str, u64)> for Field {
    fn from((key, value): (&str, u64)) -> Self {
        Field::u64(key, value)
    }
}

impl From<(&str, u32)> for Field {
    fn from((key, value): (&str, u32)) -> Self {
        Field::u32(key, value)
    }
}

impl From<(&str, f64)> for Field {
    fn from((key, value): (&str, f64)) -> Self {
        Field::f64(key, value)
    }
}

impl From<(&str, &str)> for Field {
    fn from((key, value): (&str, &str)) -> Self {
        Field::string(key, value)
    }
}

impl From<(&str, String)> for Field {
    fn from((key, value): (&str, String)) -> Self {
        Field::string(key, value)
    }
}

impl From<(&str, TimeDelta)> for Field {
    fn from((key, value): (&str, TimeDelta)) -> Self {
        Field::duration(key, value)
    }
}

impl From<(&str, DateTime<Utc>)> for Field {
    fn from((key, value): (&str, DateTime<Utc>)) -> Self {
        Field::time(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_keep_key_and_kind() {
        let field = Field::u16("port", 8080);
        assert_eq!(field.key(), "port");
        assert!(matches!(field.value(), FieldValue::Uint16(8080)));

        let field = Field::complex64("z", 1.0, -2.0);
        assert!(matches!(field.value(), FieldValue::Complex64(re, im) if *re == 1.0 && *im == -2.0));
    }

    #[test]
    fn test_error_and_display() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let field = Field::error(&err);
        assert_eq!(field.key(), "error");
        assert!(matches!(field.value(), FieldValue::String(s) if s == "disk full"));

        let field = Field::display("addr", &std::net::Ipv4Addr::LOCALHOST);
        assert!(matches!(field.value(), FieldValue::String(s) if s == "127.0.0.1"));
    }

    #[test]
    fn test_tuple_conversions() {
        let field: Field = ("count", 3i64).into();
        assert!(matches!(field.value(), FieldValue::Int64(3)));
        let field: Field = ("name", "x").into();
        assert!(matches!(field.value(), FieldValue::String(s) if s == "x"));
    }

    #[test]
    fn test_skip() {
        assert!(Field::skip().is_skip());
        assert!(!Field::bool("b", true).is_skip());
    }

    #[test]
    fn test_debug_hides_marshalers() {
        let field = Field::reflect("v", vec![1, 2]);
        assert!(format!("{:?}", field).contains("Reflected(..)"));
        let field = Field::binary("b", vec![0u8; 4]);
        assert!(format!("{:?}", field).contains("Binary(4 bytes)"));
    }
}
