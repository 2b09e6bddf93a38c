//! Encoder traits
//!
//! [`ObjectEncoder`] adds keyed values, [`ArrayEncoder`] appends elements
//! and [`PrimitiveArrayEncoder`] is the narrow surface handed to formatting
//! strategies. [`Encoder`] is the full entry-level interface a logging
//! façade drives.

use super::buffer::Buffer;
use super::entry::Entry;
use super::error::Result;
use super::field::Field;
use super::marshaler::{ArrayMarshaler, Loggable, ObjectMarshaler};
use chrono::{DateTime, TimeDelta, Utc};

/// Appends primitive values only
pub trait PrimitiveArrayEncoder {
    fn append_bool(&mut self, value: bool);
    fn append_byte_string(&mut self, value: &[u8]);
    fn append_complex128(&mut self, real: f64, imaginary: f64);
    fn append_complex64(&mut self, real: f32, imaginary: f32);
    fn append_float64(&mut self, value: f64);
    fn append_float32(&mut self, value: f32);
    fn append_int64(&mut self, value: i64);
    fn append_uint64(&mut self, value: u64);
    fn append_string(&mut self, value: &str);

    fn append_int32(&mut self, value: i32) {
        self.append_int64(i64::from(value));
    }

    fn append_int16(&mut self, value: i16) {
        self.append_int64(i64::from(value));
    }

    fn append_int8(&mut self, value: i8) {
        self.append_int64(i64::from(value));
    }

    fn append_int(&mut self, value: isize) {
        self.append_int64(value as i64);
    }

    fn append_uint32(&mut self, value: u32) {
        self.append_uint64(u64::from(value));
    }

    fn append_uint16(&mut self, value: u16) {
        self.append_uint64(u64::from(value));
    }

    fn append_uint8(&mut self, value: u8) {
        self.append_uint64(u64::from(value));
    }

    fn append_uint(&mut self, value: usize) {
        self.append_uint64(value as u64);
    }

    fn append_uintptr(&mut self, value: usize) {
        self.append_uint64(value as u64);
    }
}

/// Appends elements to an array, including nested containers
///
/// Failed appends leave no trace of the failing element.
pub trait ArrayEncoder: PrimitiveArrayEncoder {
    fn append_duration(&mut self, value: TimeDelta);
    fn append_time(&mut self, value: DateTime<Utc>);
    fn append_array(&mut self, value: &dyn ArrayMarshaler) -> Result<()>;
    fn append_object(&mut self, value: &dyn ObjectMarshaler) -> Result<()>;
    fn append_reflected(&mut self, value: &dyn Loggable) -> Result<()>;
}

/// Adds keyed values
///
/// Failed adds leave no trace of the failing field.
pub trait ObjectEncoder {
    fn add_array(&mut self, key: &str, value: &dyn ArrayMarshaler) -> Result<()>;
    fn add_object(&mut self, key: &str, value: &dyn ObjectMarshaler) -> Result<()>;
    fn add_reflected(&mut self, key: &str, value: &dyn Loggable) -> Result<()>;

    fn add_binary(&mut self, key: &str, value: &[u8]);
    fn add_byte_string(&mut self, key: &str, value: &[u8]);
    fn add_bool(&mut self, key: &str, value: bool);
    fn add_complex128(&mut self, key: &str, real: f64, imaginary: f64);
    fn add_complex64(&mut self, key: &str, real: f32, imaginary: f32);
    fn add_duration(&mut self, key: &str, value: TimeDelta);
    fn add_float64(&mut self, key: &str, value: f64);
    fn add_float32(&mut self, key: &str, value: f32);
    fn add_int64(&mut self, key: &str, value: i64);
    fn add_uint64(&mut self, key: &str, value: u64);
    fn add_string(&mut self, key: &str, value: &str);
    fn add_time(&mut self, key: &str, value: DateTime<Utc>);

    fn add_int32(&mut self, key: &str, value: i32) {
        self.add_int64(key, i64::from(value));
    }

    fn add_int16(&mut self, key: &str, value: i16) {
        self.add_int64(key, i64::from(value));
    }

    fn add_int8(&mut self, key: &str, value: i8) {
        self.add_int64(key, i64::from(value));
    }

    fn add_int(&mut self, key: &str, value: isize) {
        self.add_int64(key, value as i64);
    }

    fn add_uint32(&mut self, key: &str, value: u32) {
        self.add_uint64(key, u64::from(value));
    }

    fn add_uint16(&mut self, key: &str, value: u16) {
        self.add_uint64(key, u64::from(value));
    }

    fn add_uint8(&mut self, key: &str, value: u8) {
        self.add_uint64(key, u64::from(value));
    }

    fn add_uint(&mut self, key: &str, value: usize) {
        self.add_uint64(key, value as u64);
    }

    fn add_uintptr(&mut self, key: &str, value: usize) {
        self.add_uint64(key, value as u64);
    }
}

/// Entry-level encoder driven by a logging façade
pub trait Encoder: ObjectEncoder + Send {
    /// Copy this encoder, including any context fields already added
    fn clone_encoder(&self) -> Box<dyn Encoder>;

    /// Render one entry and its fields into a finished line
    ///
    /// The caller owns the returned buffer and must `free` it.
    fn encode_entry(&self, entry: &Entry, fields: &[Field]) -> Result<Buffer>;

    /// Copy this encoder with `fields` added as context
    fn with_fields(&self, fields: &[Field]) -> Result<Box<dyn Encoder>>;
}
