//! Core encoder types and traits

pub mod buffer;
pub mod config;
pub mod encoder;
pub mod entry;
pub mod error;
pub mod escape;
pub mod field;
pub mod format;
pub mod level;
pub mod marshaler;
pub mod metrics;
pub mod reflect;
pub mod strategy;
pub mod value;

pub use buffer::{
    Buffer, BufferPool, DEFAULT_BUFFER_CAPACITY, DEFAULT_MAX_RETAINED_CAPACITY, DEFAULT_POOL_SIZE,
};
pub use config::{EncoderConfig, FieldErrorPolicy, DEFAULT_LINE_ENDING};
pub use encoder::{ArrayEncoder, Encoder, ObjectEncoder, PrimitiveArrayEncoder};
pub use entry::{Caller, Entry};
pub use error::{EncoderError, Result};
pub use field::{Field, FieldValue};
pub use level::Level;
pub use marshaler::{ArrayMarshaler, ArrayMarshalerFn, Loggable, ObjectMarshaler, ObjectMarshalerFn};
pub use metrics::PoolMetrics;
pub use strategy::{
    CallerEncoder, CallerFormat, DurationEncoder, DurationFormat, LevelEncoder, LevelFormat,
    TimeEncoder, TimeFormat,
};
pub use value::StructuredValue;
