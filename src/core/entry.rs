//! Log entry metadata handed to the encoder

use super::level::Level;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source location of a log call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub file: String,
    pub line: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
}

impl Caller {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
            function: None,
        }
    }

    pub fn with_function(mut self, function: impl Into<String>) -> Self {
        self.function = Some(function.into());
        self
    }

    /// `path/to/file.rs:42`
    pub fn full_path(&self) -> String {
        format!("{}:{}", self.file, self.line)
    }

    /// Keep only the last directory and the file name: `to/file.rs:42`
    pub fn trimmed_path(&self) -> String {
        let file = self.file.replace('\\', "/");
        let trimmed = match file.rfind('/') {
            Some(last) => match file[..last].rfind('/') {
                Some(prev) => &file[prev + 1..],
                None => file.as_str(),
            },
            None => file.as_str(),
        };
        format!("{}:{}", trimmed, self.line)
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// One logging event's metadata
///
/// The encoder only borrows an entry for the duration of a single
/// `encode_entry` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub level: Level,
    pub time: DateTime<Utc>,
    pub logger_name: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caller: Option<Caller>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl Entry {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            time: Utc::now(),
            logger_name: String::new(),
            message: message.into(),
            caller: None,
            stack: None,
        }
    }

    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = time;
        self
    }

    pub fn with_logger_name(mut self, name: impl Into<String>) -> Self {
        self.logger_name = name.into();
        self
    }

    pub fn with_caller(mut self, caller: Caller) -> Self {
        self.caller = Some(caller);
        self
    }

    /// Attach the caller location from `file!()`/`line!()`/`module_path!()`
    pub fn with_location(self, file: &str, line: u32, module_path: &str) -> Self {
        self.with_caller(Caller::new(file, line).with_function(module_path))
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }
}
