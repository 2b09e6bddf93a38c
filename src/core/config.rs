//! Encoder configuration
//!
//! An [`EncoderConfig`] names the header keys to render and the strategies
//! used to format times, durations, levels and callers. It is built once,
//! wrapped in an `Arc` and shared by every encoder created from it.

use super::strategy::{
    CallerEncoder, CallerFormat, DurationEncoder, DurationFormat, LevelEncoder, LevelFormat,
    TimeEncoder, TimeFormat,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Default line terminator
pub const DEFAULT_LINE_ENDING: &str = "\n";

/// What the entry composer does with a field that fails to encode
///
/// # Example
///
/// ```
/// use rust_text_encoder::{EncoderConfig, FieldErrorPolicy};
///
/// let config = EncoderConfig::production().with_field_error_policy(FieldErrorPolicy::Annotate);
/// assert_eq!(config.field_error_policy, FieldErrorPolicy::Annotate);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldErrorPolicy {
    /// Drop the field and its separator
    #[default]
    Skip,

    /// Replace the field with `<key>Error="<message>"`
    Annotate,

    /// Abort the entry and return the error
    Fail,
}

impl fmt::Display for FieldErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldErrorPolicy::Skip => write!(f, "Skip"),
            FieldErrorPolicy::Annotate => write!(f, "Annotate"),
            FieldErrorPolicy::Fail => write!(f, "Fail"),
        }
    }
}

/// Header keys and formatting strategies
///
/// An empty key suppresses that header item. A `None` strategy falls back
/// to a built-in rendering: integer nanoseconds for times and durations,
/// lowercase names for levels and the full path for callers.
///
/// # Example
///
/// ```
/// use rust_text_encoder::{EncoderConfig, LevelFormat, TimeFormat};
///
/// let config = EncoderConfig::default()
///     .with_message_key("msg")
///     .with_time_format(TimeFormat::Rfc3339)
///     .with_level_format(LevelFormat::Capital)
///     .shared();
/// ```
#[derive(Clone)]
pub struct EncoderConfig {
    pub time_key: String,
    pub level_key: String,
    pub name_key: String,
    pub caller_key: String,
    pub function_key: String,
    pub message_key: String,
    pub stacktrace_key: String,
    pub line_ending: String,
    pub time_encoder: Option<Arc<dyn TimeEncoder>>,
    pub duration_encoder: Option<Arc<dyn DurationEncoder>>,
    pub level_encoder: Option<Arc<dyn LevelEncoder>>,
    pub caller_encoder: Option<Arc<dyn CallerEncoder>>,
    pub field_error_policy: FieldErrorPolicy,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            time_key: "ts".to_string(),
            level_key: "level".to_string(),
            name_key: "logger".to_string(),
            caller_key: "caller".to_string(),
            function_key: String::new(),
            message_key: "msg".to_string(),
            stacktrace_key: "stacktrace".to_string(),
            line_ending: DEFAULT_LINE_ENDING.to_string(),
            time_encoder: None,
            duration_encoder: Some(Arc::new(DurationFormat::Seconds)),
            level_encoder: Some(Arc::new(LevelFormat::Lowercase)),
            caller_encoder: Some(Arc::new(CallerFormat::Short)),
            field_error_policy: FieldErrorPolicy::Skip,
        }
    }
}

impl EncoderConfig {
    /// Configuration with every key empty and no strategies
    pub fn empty() -> Self {
        Self {
            time_key: String::new(),
            level_key: String::new(),
            name_key: String::new(),
            caller_key: String::new(),
            function_key: String::new(),
            message_key: String::new(),
            stacktrace_key: String::new(),
            line_ending: DEFAULT_LINE_ENDING.to_string(),
            time_encoder: None,
            duration_encoder: None,
            level_encoder: None,
            caller_encoder: None,
            field_error_policy: FieldErrorPolicy::Skip,
        }
    }

    /// Machine-oriented preset: epoch seconds, lowercase levels
    pub fn production() -> Self {
        Self::default().with_time_format(TimeFormat::Epoch)
    }

    /// Human-oriented preset: short keys, ISO 8601 times, capital levels
    pub fn development() -> Self {
        Self {
            time_key: "T".to_string(),
            level_key: "L".to_string(),
            name_key: "N".to_string(),
            caller_key: "C".to_string(),
            function_key: String::new(),
            message_key: "M".to_string(),
            stacktrace_key: "S".to_string(),
            line_ending: DEFAULT_LINE_ENDING.to_string(),
            time_encoder: Some(Arc::new(TimeFormat::Iso8601)),
            duration_encoder: Some(Arc::new(DurationFormat::String)),
            level_encoder: Some(Arc::new(LevelFormat::Capital)),
            caller_encoder: Some(Arc::new(CallerFormat::Short)),
            field_error_policy: FieldErrorPolicy::Skip,
        }
    }

    /// Wrap in an `Arc` for sharing between encoders
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_time_key(mut self, key: impl Into<String>) -> Self {
        self.time_key = key.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_level_key(mut self, key: impl Into<String>) -> Self {
        self.level_key = key.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_name_key(mut self, key: impl Into<String>) -> Self {
        self.name_key = key.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_caller_key(mut self, key: impl Into<String>) -> Self {
        self.caller_key = key.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_function_key(mut self, key: impl Into<String>) -> Self {
        self.function_key = key.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_message_key(mut self, key: impl Into<String>) -> Self {
        self.message_key = key.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_stacktrace_key(mut self, key: impl Into<String>) -> Self {
        self.stacktrace_key = key.into();
        self
    }

    /// Set the line terminator (`"\n"` by default)
    #[must_use = "builder methods return a new value"]
    pub fn with_line_ending(mut self, ending: impl Into<String>) -> Self {
        self.line_ending = ending.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_time_format(self, format: TimeFormat) -> Self {
        self.with_time_encoder(format)
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_duration_format(self, format: DurationFormat) -> Self {
        self.with_duration_encoder(format)
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_level_format(self, format: LevelFormat) -> Self {
        self.with_level_encoder(format)
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_caller_format(self, format: CallerFormat) -> Self {
        self.with_caller_encoder(format)
    }

    /// Use a custom time strategy
    #[must_use = "builder methods return a new value"]
    pub fn with_time_encoder(mut self, encoder: impl TimeEncoder + 'static) -> Self {
        self.time_encoder = Some(Arc::new(encoder));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_duration_encoder(mut self, encoder: impl DurationEncoder + 'static) -> Self {
        self.duration_encoder = Some(Arc::new(encoder));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_level_encoder(mut self, encoder: impl LevelEncoder + 'static) -> Self {
        self.level_encoder = Some(Arc::new(encoder));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_caller_encoder(mut self, encoder: impl CallerEncoder + 'static) -> Self {
        self.caller_encoder = Some(Arc::new(encoder));
        self
    }

    /// Remove the duration strategy so durations render as integer nanoseconds
    #[must_use = "builder methods return a new value"]
    pub fn without_duration_encoder(mut self) -> Self {
        self.duration_encoder = None;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_field_error_policy(mut self, policy: FieldErrorPolicy) -> Self {
        self.field_error_policy = policy;
        self
    }
}

impl fmt::Debug for EncoderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncoderConfig")
            .field("time_key", &self.time_key)
            .field("level_key", &self.level_key)
            .field("name_key", &self.name_key)
            .field("caller_key", &self.caller_key)
            .field("function_key", &self.function_key)
            .field("message_key", &self.message_key)
            .field("stacktrace_key", &self.stacktrace_key)
            .field("line_ending", &self.line_ending)
            .field("time_encoder", &self.time_encoder.is_some())
            .field("duration_encoder", &self.duration_encoder.is_some())
            .field("level_encoder", &self.level_encoder.is_some())
            .field("caller_encoder", &self.caller_encoder.is_some())
            .field("field_error_policy", &self.field_error_policy)
            .finish()
    }
}
