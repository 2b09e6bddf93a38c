//! Error types for the text encoder

use std::fmt;

pub type Result<T> = std::result::Result<T, EncoderError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EncoderError {
    /// An array or object marshaler reported failure
    #[error("Marshal error: {0}")]
    Marshal(String),

    /// Fallback structural conversion failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Map key that cannot be rendered as an object key
    #[error("Unsupported map key type: {kind}")]
    UnsupportedKey { kind: &'static str },

    /// A field failed while composing an entry
    #[error("Failed to encode field '{key}': {source}")]
    Field {
        key: String,
        #[source]
        source: Box<EncoderError>,
    },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl EncoderError {
    /// Create a marshal error
    pub fn marshal<S: Into<String>>(msg: S) -> Self {
        EncoderError::Marshal(msg.into())
    }

    /// Create an unsupported map key error
    pub fn unsupported_key(kind: &'static str) -> Self {
        EncoderError::UnsupportedKey { kind }
    }

    /// Wrap an error with the key of the field that produced it
    pub fn field(key: impl Into<String>, source: EncoderError) -> Self {
        EncoderError::Field {
            key: key.into(),
            source: Box::new(source),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        EncoderError::Other(msg.into())
    }
}

impl serde::ser::Error for EncoderError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        EncoderError::Serialization(msg.to_string())
    }
}
