//! # Rust Text Encoder
//!
//! Renders structured log entries as single greppable text lines: a header
//! (time, level, logger name, message, caller) followed by `key=value`
//! fields whose values use JSON escaping and JSON syntax for nested arrays
//! and objects.
//!
//! ```text
//! 2018-06-19T16:33:42.000Z  info   bob  lob law  so="passes"  answer=42
//! ```
//!
//! ## Features
//!
//! - **Allocation-light**: values are written straight into pooled buffers
//! - **Never fails on text**: invalid UTF-8 degrades to `\ufffd` escapes
//! - **Pluggable formatting**: time, duration, level and caller strategies
//! - **Thread Safe**: one encoder per call, clones share only the config
//!
//! ## Example
//!
//! ```
//! use rust_text_encoder::prelude::*;
//!
//! let enc = TextEncoder::new(EncoderConfig::development().shared());
//! let entry = Entry::new(Level::Info, "request served");
//! let line = enc
//!     .encode_entry(&entry, &[Field::string("path", "/health"), Field::u16("status", 200)])
//!     .unwrap();
//! assert!(line.to_string().ends_with("request served  path=\"/health\"  status=200\n"));
//! line.free();
//! ```

pub mod core;
pub mod encoders;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        ArrayEncoder, ArrayMarshaler, ArrayMarshalerFn, Buffer, BufferPool, Caller, Encoder,
        EncoderConfig, EncoderError, Entry, Field, FieldErrorPolicy, Level, ObjectEncoder,
        ObjectMarshaler, ObjectMarshalerFn, PrimitiveArrayEncoder, Result, StructuredValue,
    };
    pub use crate::core::{CallerFormat, DurationFormat, LevelFormat, TimeFormat};
    pub use crate::encoders::TextEncoder;
}

pub use crate::core::{
    ArrayEncoder, ArrayMarshaler, ArrayMarshalerFn, Buffer, BufferPool, Caller, CallerEncoder,
    CallerFormat, DurationEncoder, DurationFormat, Encoder, EncoderConfig, EncoderError, Entry,
    Field, FieldErrorPolicy, FieldValue, Level, LevelEncoder, LevelFormat, Loggable,
    ObjectEncoder, ObjectMarshaler, ObjectMarshalerFn, PoolMetrics, PrimitiveArrayEncoder, Result,
    StructuredValue, TimeEncoder, TimeFormat, DEFAULT_LINE_ENDING,
};
pub use encoders::{TextEncoder, FIELD_SEPARATOR, LEVEL_WIDTH};
