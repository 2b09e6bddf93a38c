//! Macros for building fields and entries at the call site.
//!
//! # Examples
//!
//! ```
//! use rust_text_encoder::prelude::*;
//! use rust_text_encoder::{entry, fields};
//!
//! let enc = TextEncoder::new(EncoderConfig::empty().with_message_key("msg").shared());
//! let user = "alice";
//! let line = enc
//!     .encode_entry(&entry!(Level::Info, "login by {}", user), &fields!["attempt" => 2, "ok" => true])
//!     .unwrap();
//! assert_eq!(line.as_bytes(), b"login by alice  attempt=2  ok=true\n");
//! line.free();
//! ```

/// Build a `Vec<Field>` from `key => value` pairs.
///
/// Values convert through `Field::from((key, value))`, so booleans,
/// integers, floats, strings, durations and timestamps are accepted.
///
/// # Examples
///
/// ```
/// use rust_text_encoder::fields;
///
/// let fields = fields!["user" => "bob", "retries" => 3i64, "ratio" => 0.5];
/// assert_eq!(fields.len(), 3);
/// assert_eq!(fields[0].key(), "user");
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        ::std::vec::Vec::<$crate::Field>::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Field::from(($key, $value))),+]
    };
}

/// Build an [`Entry`](crate::Entry) carrying the call-site location.
///
/// # Examples
///
/// ```
/// use rust_text_encoder::{entry, Level};
///
/// let e = entry!(Level::Warn, "disk at {}%", 91);
/// assert_eq!(e.message, "disk at 91%");
/// assert!(e.caller.is_some());
/// ```
#[macro_export]
macro_rules! entry {
    ($level:expr, $($arg:tt)+) => {
        $crate::Entry::new($level, ::std::format!($($arg)+))
            .with_location(::std::file!(), ::std::line!(), ::std::module_path!())
    };
}
