//! Capabilities for values that encode themselves
//!
//! - `ArrayMarshaler` / `ObjectMarshaler`: types that drive an encoder
//!   directly, element by element or key by key
//! - `Loggable`: anything `Serialize`, rendered by the structural fallback

use super::buffer::Buffer;
use super::encoder::{ArrayEncoder, ObjectEncoder};
use super::error::Result;
use super::reflect;
use serde::Serialize;
use std::fmt;

/// A value that renders itself as an array
pub trait ArrayMarshaler: Send + Sync {
    fn marshal_log_array(&self, enc: &mut dyn ArrayEncoder) -> Result<()>;
}

/// A value that renders itself as an object
pub trait ObjectMarshaler: Send + Sync {
    fn marshal_log_object(&self, enc: &mut dyn ObjectEncoder) -> Result<()>;
}

/// Closure adapter for [`ArrayMarshaler`]
///
/// # Example
///
/// ```
/// use rust_text_encoder::{ArrayEncoder, ArrayMarshalerFn, Field};
///
/// let ids = ArrayMarshalerFn::new(|enc: &mut dyn ArrayEncoder| {
///     enc.append_int64(1);
///     enc.append_int64(2);
///     Ok(())
/// });
/// let field = Field::array("ids", ids);
/// ```
pub struct ArrayMarshalerFn<F>(pub F);

impl<F> ArrayMarshalerFn<F>
where
    F: Fn(&mut dyn ArrayEncoder) -> Result<()> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> ArrayMarshaler for ArrayMarshalerFn<F>
where
    F: Fn(&mut dyn ArrayEncoder) -> Result<()> + Send + Sync,
{
    fn marshal_log_array(&self, enc: &mut dyn ArrayEncoder) -> Result<()> {
        (self.0)(enc)
    }
}

impl<F> fmt::Debug for ArrayMarshalerFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ArrayMarshalerFn")
    }
}

/// Closure adapter for [`ObjectMarshaler`]
pub struct ObjectMarshalerFn<F>(pub F);

impl<F> ObjectMarshalerFn<F>
where
    F: Fn(&mut dyn ObjectEncoder) -> Result<()> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> ObjectMarshaler for ObjectMarshalerFn<F>
where
    F: Fn(&mut dyn ObjectEncoder) -> Result<()> + Send + Sync,
{
    fn marshal_log_object(&self, enc: &mut dyn ObjectEncoder) -> Result<()> {
        (self.0)(enc)
    }
}

impl<F> fmt::Debug for ObjectMarshalerFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ObjectMarshalerFn")
    }
}

/// A value with no dedicated field kind, rendered structurally
///
/// Implemented for every `Serialize + Send + Sync` type. On failure nothing
/// is left in the buffer.
pub trait Loggable: Send + Sync {
    fn encode_structured(&self, buf: &mut Buffer) -> Result<()>;
}

impl<T> Loggable for T
where
    T: Serialize + Send + Sync + ?Sized,
{
    fn encode_structured(&self, buf: &mut Buffer) -> Result<()> {
        reflect::write_structured(buf, self)
    }
}
