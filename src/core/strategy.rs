//! Pluggable formatting strategies for times, durations, levels and callers
//!
//! Each strategy renders through the [`PrimitiveArrayEncoder`] it is handed,
//! so the same strategy produces an unquoted header item and a quoted or
//! numeric field value depending on where it is invoked.

use super::encoder::PrimitiveArrayEncoder;
use super::entry::Caller;
use super::level::Level;
use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

pub trait TimeEncoder: Send + Sync {
    fn encode_time(&self, time: DateTime<Utc>, enc: &mut dyn PrimitiveArrayEncoder);
}

pub trait DurationEncoder: Send + Sync {
    fn encode_duration(&self, duration: TimeDelta, enc: &mut dyn PrimitiveArrayEncoder);
}

pub trait LevelEncoder: Send + Sync {
    fn encode_level(&self, level: Level, enc: &mut dyn PrimitiveArrayEncoder);
}

pub trait CallerEncoder: Send + Sync {
    fn encode_caller(&self, caller: &Caller, enc: &mut dyn PrimitiveArrayEncoder);
}

impl<F> TimeEncoder for F
where
    F: Fn(DateTime<Utc>, &mut dyn PrimitiveArrayEncoder) + Send + Sync,
{
    fn encode_time(&self, time: DateTime<Utc>, enc: &mut dyn PrimitiveArrayEncoder) {
        self(time, enc)
    }
}

impl<F> DurationEncoder for F
where
    F: Fn(TimeDelta, &mut dyn PrimitiveArrayEncoder) + Send + Sync,
{
    fn encode_duration(&self, duration: TimeDelta, enc: &mut dyn PrimitiveArrayEncoder) {
        self(duration, enc)
    }
}

impl<F> LevelEncoder for F
where
    F: Fn(Level, &mut dyn PrimitiveArrayEncoder) + Send + Sync,
{
    fn encode_level(&self, level: Level, enc: &mut dyn PrimitiveArrayEncoder) {
        self(level, enc)
    }
}

impl<F> CallerEncoder for F
where
    F: Fn(&Caller, &mut dyn PrimitiveArrayEncoder) + Send + Sync,
{
    fn encode_caller(&self, caller: &Caller, enc: &mut dyn PrimitiveArrayEncoder) {
        self(caller, enc)
    }
}

/// Nanoseconds since the Unix epoch, saturating outside the i64 range
pub fn unix_nanos(time: DateTime<Utc>) -> i64 {
    time.timestamp_nanos_opt().unwrap_or_else(|| {
        if time.timestamp() < 0 {
            i64::MIN
        } else {
            i64::MAX
        }
    })
}

/// Whole nanoseconds, saturating on overflow
pub fn duration_nanos(duration: TimeDelta) -> i64 {
    duration.num_nanoseconds().unwrap_or_else(|| {
        if duration < TimeDelta::zero() {
            i64::MIN
        } else {
            i64::MAX
        }
    })
}

/// Built-in time formats
///
/// # Examples
///
/// ```
/// use rust_text_encoder::TimeFormat;
///
/// let format = TimeFormat::Custom("%Y/%m/%d".to_string());
/// assert!(!format.is_numeric());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFormat {
    /// Fractional seconds since the epoch: `1529426022.000000099`
    Epoch,

    /// Fractional milliseconds since the epoch
    EpochMillis,

    /// Integer nanoseconds since the epoch
    EpochNanos,

    /// ISO 8601 with milliseconds: `2018-06-19T16:33:42.000Z`
    #[default]
    Iso8601,

    /// RFC 3339 with second precision: `2018-06-19T16:33:42Z`
    Rfc3339,

    /// RFC 3339 with sub-second precision when present
    Rfc3339Nano,

    /// Custom strftime format; falls back to RFC 3339 if the pattern is invalid
    Custom(String),
}

impl TimeFormat {
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            TimeFormat::Epoch | TimeFormat::EpochMillis | TimeFormat::EpochNanos
        )
    }

    /// Render a textual format; `None` for the numeric ones
    #[must_use]
    pub fn format(&self, time: &DateTime<Utc>) -> Option<String> {
        match self {
            TimeFormat::Iso8601 => Some(time.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()),
            TimeFormat::Rfc3339 => Some(time.to_rfc3339_opts(SecondsFormat::Secs, true)),
            TimeFormat::Rfc3339Nano => Some(time.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            TimeFormat::Custom(pattern) => {
                let mut out = String::new();
                if write!(out, "{}", time.format(pattern)).is_err() {
                    out = time.to_rfc3339_opts(SecondsFormat::Secs, true);
                }
                Some(out)
            }
            TimeFormat::Epoch | TimeFormat::EpochMillis | TimeFormat::EpochNanos => None,
        }
    }
}

impl TimeEncoder for TimeFormat {
    fn encode_time(&self, time: DateTime<Utc>, enc: &mut dyn PrimitiveArrayEncoder) {
        let secs = time.timestamp() as f64;
        let subsec = f64::from(time.timestamp_subsec_nanos());
        match self {
            TimeFormat::Epoch => enc.append_float64(secs + subsec / 1e9),
            TimeFormat::EpochMillis => enc.append_float64(secs * 1e3 + subsec / 1e6),
            TimeFormat::EpochNanos => enc.append_int64(unix_nanos(time)),
            textual => {
                if let Some(text) = textual.format(&time) {
                    enc.append_string(&text);
                }
            }
        }
    }
}

/// Built-in duration formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurationFormat {
    /// Fractional seconds: `0.000000001`
    #[default]
    Seconds,

    /// Fractional milliseconds
    Millis,

    /// Integer nanoseconds
    Nanos,

    /// Human-readable: `1.5s`, `2m3s`, `250µs`
    String,
}

impl DurationEncoder for DurationFormat {
    fn encode_duration(&self, duration: TimeDelta, enc: &mut dyn PrimitiveArrayEncoder) {
        let nanos = duration_nanos(duration);
        match self {
            DurationFormat::Seconds => enc.append_float64(nanos as f64 / 1e9),
            DurationFormat::Millis => enc.append_float64(nanos as f64 / 1e6),
            DurationFormat::Nanos => enc.append_int64(nanos),
            DurationFormat::String => enc.append_string(&human_duration(nanos)),
        }
    }
}

/// `value / scale` with the remainder as trimmed decimal digits
fn push_scaled(out: &mut String, value: u64, scale: u64) {
    let whole = value / scale;
    let frac = value % scale;
    let _ = write!(out, "{}", whole);
    if frac > 0 {
        let width = scale.ilog10() as usize;
        let digits = format!("{:0width$}", frac, width = width);
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
}

/// Render nanoseconds as `72h3m0.5s`, `1.5ms`, `0s`
pub fn human_duration(nanos: i64) -> String {
    const MICRO: u64 = 1_000;
    const MILLI: u64 = 1_000_000;
    const SECOND: u64 = 1_000_000_000;
    const MINUTE: u64 = 60 * SECOND;
    const HOUR: u64 = 60 * MINUTE;

    if nanos == 0 {
        return "0s".to_string();
    }

    let mut out = String::new();
    if nanos < 0 {
        out.push('-');
    }
    let n = nanos.unsigned_abs();

    if n < MICRO {
        push_scaled(&mut out, n, 1);
        out.push_str("ns");
    } else if n < MILLI {
        push_scaled(&mut out, n, MICRO);
        out.push_str("µs");
    } else if n < SECOND {
        push_scaled(&mut out, n, MILLI);
        out.push_str("ms");
    } else {
        let hours = n / HOUR;
        let minutes = (n % HOUR) / MINUTE;
        if hours > 0 {
            let _ = write!(out, "{}h", hours);
        }
        if hours > 0 || minutes > 0 {
            let _ = write!(out, "{}m", minutes);
        }
        push_scaled(&mut out, n % MINUTE, SECOND);
        out.push('s');
    }
    out
}

/// Built-in level formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelFormat {
    /// `info`
    #[default]
    Lowercase,

    /// `INFO`
    Capital,

    /// `info` wrapped in ANSI color codes
    LowercaseColor,

    /// `INFO` wrapped in ANSI color codes
    CapitalColor,
}

impl LevelFormat {
    #[cfg(feature = "color")]
    fn colorize(level: Level, text: &str) -> String {
        use colored::Colorize;
        text.color(level.color_code()).to_string()
    }

    #[cfg(not(feature = "color"))]
    fn colorize(_level: Level, text: &str) -> String {
        text.to_string()
    }
}

impl LevelEncoder for LevelFormat {
    fn encode_level(&self, level: Level, enc: &mut dyn PrimitiveArrayEncoder) {
        match self {
            LevelFormat::Lowercase => enc.append_string(level.as_str()),
            LevelFormat::Capital => enc.append_string(level.as_capital_str()),
            LevelFormat::LowercaseColor => {
                enc.append_string(&Self::colorize(level, level.as_str()))
            }
            LevelFormat::CapitalColor => {
                enc.append_string(&Self::colorize(level, level.as_capital_str()))
            }
        }
    }
}

/// Built-in caller formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallerFormat {
    /// Last directory and file name: `src/main.rs:42`
    #[default]
    Short,

    /// Full path as recorded: `/home/user/app/src/main.rs:42`
    Full,
}

impl CallerEncoder for CallerFormat {
    fn encode_caller(&self, caller: &Caller, enc: &mut dyn PrimitiveArrayEncoder) {
        match self {
            CallerFormat::Short => enc.append_string(&caller.trimmed_path()),
            CallerFormat::Full => enc.append_string(&caller.full_path()),
        }
    }
}
