//! Entry composition
//!
//! A line is the header (time, level, logger name, message, caller,
//! function, stack trace), then the encoder's context fields, then the
//! per-call fields, each item preceded by [`FIELD_SEPARATOR`] once the line
//! has content, and finally the configured line ending.

use super::text::TextEncoder;
use crate::core::buffer::Buffer;
use crate::core::config::FieldErrorPolicy;
use crate::core::encoder::{Encoder, ObjectEncoder, PrimitiveArrayEncoder};
use crate::core::entry::Entry;
use crate::core::error::{EncoderError, Result};
use crate::core::escape::{write_escaped_ansi, write_escaped_bytes, write_escaped_str};
use crate::core::field::Field;
use crate::core::format::{write_complex128, write_complex64, write_float32, write_float64, write_int};
use crate::core::strategy::{unix_nanos, CallerEncoder, CallerFormat, LevelEncoder, LevelFormat};

/// Separator between top-level items of a line
pub const FIELD_SEPARATOR: &str = "  ";

/// Visible width the level item is padded to
pub const LEVEL_WIDTH: usize = 5;

/// Renders header items unquoted
///
/// Several values appended for one item are joined by a single space.
struct HeaderEncoder<'a> {
    buf: &'a mut Buffer,
    start: usize,
    raw: bool,
}

impl<'a> HeaderEncoder<'a> {
    fn new(buf: &'a mut Buffer) -> Self {
        let start = buf.len();
        Self {
            buf,
            start,
            raw: false,
        }
    }

    /// Keep ANSI color sequences in strategy output, for colored levels
    fn raw(buf: &'a mut Buffer) -> Self {
        Self {
            raw: true,
            ..Self::new(buf)
        }
    }

    fn written(&self) -> &[u8] {
        &self.buf.as_bytes()[self.start..]
    }

    fn is_empty(&self) -> bool {
        self.buf.len() == self.start
    }

    fn separate(&mut self) {
        if !self.is_empty() {
            self.buf.push(b' ');
        }
    }
}

impl PrimitiveArrayEncoder for HeaderEncoder<'_> {
    fn append_bool(&mut self, value: bool) {
        self.separate();
        self.buf.push_str(if value { "true" } else { "false" });
    }

    fn append_byte_string(&mut self, value: &[u8]) {
        self.separate();
        if self.raw {
            write_escaped_ansi(self.buf, value);
        } else {
            write_escaped_bytes(self.buf, value);
        }
    }

    fn append_complex128(&mut self, real: f64, imaginary: f64) {
        self.separate();
        write_complex128(self.buf, real, imaginary);
    }

    fn append_complex64(&mut self, real: f32, imaginary: f32) {
        self.separate();
        write_complex64(self.buf, real, imaginary);
    }

    fn append_float64(&mut self, value: f64) {
        self.separate();
        write_float64(self.buf, value);
    }

    fn append_float32(&mut self, value: f32) {
        self.separate();
        write_float32(self.buf, value);
    }

    fn append_int64(&mut self, value: i64) {
        self.separate();
        write_int(self.buf, value);
    }

    fn append_uint64(&mut self, value: u64) {
        self.separate();
        write_int(self.buf, value);
    }

    fn append_string(&mut self, value: &str) {
        self.separate();
        if self.raw {
            write_escaped_ansi(self.buf, value.as_bytes());
        } else {
            write_escaped_str(self.buf, value);
        }
    }
}

/// Display width of `bytes`, ignoring ANSI escape sequences
fn visible_width(bytes: &[u8]) -> usize {
    let text = String::from_utf8_lossy(bytes);
    let mut width = 0;
    let mut in_escape = false;
    for c in text.chars() {
        if in_escape {
            if c.is_ascii_alphabetic() {
                in_escape = false;
            }
        } else if c == '\x1b' {
            in_escape = true;
        } else {
            width += 1;
        }
    }
    width
}

fn start_item(buf: &mut Buffer) {
    if !buf.is_empty() {
        buf.push_str(FIELD_SEPARATOR);
    }
}

impl TextEncoder {
    fn write_header(&self, entry: &Entry, buf: &mut Buffer) {
        let config = self.config();

        if !config.time_key.is_empty() {
            start_item(buf);
            let mut header = HeaderEncoder::new(buf);
            if let Some(strategy) = &config.time_encoder {
                strategy.encode_time(entry.time, &mut header);
            }
            if header.is_empty() {
                header.append_int64(unix_nanos(entry.time));
            }
        }

        if !config.level_key.is_empty() {
            start_item(buf);
            let mut header = HeaderEncoder::raw(buf);
            match &config.level_encoder {
                Some(strategy) => strategy.encode_level(entry.level, &mut header),
                None => LevelFormat::Lowercase.encode_level(entry.level, &mut header),
            }
            let width = visible_width(header.written());
            for _ in width..LEVEL_WIDTH {
                buf.push(b' ');
            }
        }

        if !config.name_key.is_empty() && !entry.logger_name.is_empty() {
            start_item(buf);
            write_escaped_str(buf, &entry.logger_name);
        }

        if !config.message_key.is_empty() && !entry.message.is_empty() {
            start_item(buf);
            write_escaped_str(buf, &entry.message);
        }

        if let Some(caller) = &entry.caller {
            if !config.caller_key.is_empty() {
                start_item(buf);
                let mut header = HeaderEncoder::new(buf);
                match &config.caller_encoder {
                    Some(strategy) => strategy.encode_caller(caller, &mut header),
                    None => CallerFormat::Full.encode_caller(caller, &mut header),
                }
            }
            if let Some(function) = &caller.function {
                if !config.function_key.is_empty() {
                    start_item(buf);
                    write_escaped_str(buf, function);
                }
            }
        }

        if let Some(stack) = &entry.stack {
            if !config.stacktrace_key.is_empty() {
                start_item(buf);
                write_escaped_str(buf, stack);
            }
        }
    }

    /// Add `field` to `line`, handling failure according to the configured
    /// policy
    ///
    /// With `separate` set the field is preceded by [`FIELD_SEPARATOR`] once
    /// the line has content.
    fn write_field(&self, line: &mut TextEncoder, field: &Field, separate: bool) -> Result<()> {
        if field.is_skip() {
            return Ok(());
        }

        let mark = line.buf.len();
        if separate {
            start_item(&mut line.buf);
        }
        let Err(err) = field.add_to(line) else {
            return Ok(());
        };
        line.rollback(mark);

        match self.config().field_error_policy {
            FieldErrorPolicy::Skip => {
                tracing::debug!(key = field.key(), error = %err, "dropping field that failed to encode");
                Ok(())
            }
            FieldErrorPolicy::Annotate => {
                if separate {
                    start_item(&mut line.buf);
                }
                line.add_string(&format!("{}Error", field.key()), &err.to_string());
                Ok(())
            }
            FieldErrorPolicy::Fail => Err(EncoderError::field(field.key(), err)),
        }
    }

    /// Render one entry into a buffer checked out of this encoder's pool
    ///
    /// The returned buffer belongs to the caller, who should hand it back
    /// with [`Buffer::free`] once written out.
    pub fn encode_entry(&self, entry: &Entry, fields: &[Field]) -> Result<Buffer> {
        let mut line = self.line();

        self.write_header(entry, &mut line.buf);

        for item in self.items() {
            start_item(&mut line.buf);
            line.buf.extend_from_slice(item);
        }

        for field in fields {
            if let Err(err) = self.write_field(&mut line, field, true) {
                line.into_buffer().free();
                return Err(err);
            }
        }

        line.buf.push_str(&self.config().line_ending);
        Ok(line.into_buffer())
    }

    /// Clone this encoder with `fields` added as context
    ///
    /// Context fields render after the header of every entry the returned
    /// encoder encodes.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_text_encoder::{EncoderConfig, Entry, Field, Level, TextEncoder};
    ///
    /// let base = TextEncoder::new(EncoderConfig::empty().with_message_key("msg").shared());
    /// let child = base.with_fields(&[Field::string("request", "r-1")]).unwrap();
    /// let line = child.encode_entry(&Entry::new(Level::Info, "done"), &[]).unwrap();
    /// assert_eq!(line.as_bytes(), b"done  request=\"r-1\"\n");
    /// line.free();
    /// ```
    pub fn with_fields(&self, fields: &[Field]) -> Result<TextEncoder> {
        let mut child = self.clone();
        for field in fields {
            self.write_field(&mut child, field, false)?;
        }
        Ok(child)
    }
}

impl Encoder for TextEncoder {
    fn clone_encoder(&self) -> Box<dyn Encoder> {
        Box::new(self.clone())
    }

    fn encode_entry(&self, entry: &Entry, fields: &[Field]) -> Result<Buffer> {
        TextEncoder::encode_entry(self, entry, fields)
    }

    fn with_fields(&self, fields: &[Field]) -> Result<Box<dyn Encoder>> {
        Ok(Box::new(TextEncoder::with_fields(self, fields)?))
    }
}
