//! Error handling for TopicBus
//!
//! Provides the error types surfaced by the bus and its configuration layer:
//! - Publish errors (a handler failed during dispatch)
//! - Config errors (loading, saving and parsing bus configuration)
//!
//! "Not found" conditions are deliberately absent here. Unknown topics and
//! unmatched handlers are reported through `false` from `unsubscribe` and
//! `Ok(None)` from `publish`, never through an error value.
//!
//! All error types use `thiserror` for ergonomic error handling.

use crate::event_bus::HandlerId;
use thiserror::Error;

/// Publish error type
///
/// Raised when a handler returns an error while a topic is being dispatched.
/// Dispatch stops at the failing handler; handlers after it in the topic's
/// sequence are not invoked for that call.
#[derive(Error, Debug)]
pub enum PublishError {
    /// A handler returned an error
    #[error("Handler {handler} (#{index}) failed on topic '{topic}': {source}")]
    Handler {
        /// The topic being published.
        topic: String,
        /// Position of the failing handler in the dispatched sequence.
        index: usize,
        /// Diagnostic id of the failing handler.
        handler: HandlerId,
        /// The error returned by the handler.
        #[source]
        source: anyhow::Error,
    },
}

impl PublishError {
    /// The topic that was being published when the handler failed
    pub fn topic(&self) -> &str {
        match self {
            PublishError::Handler { topic, .. } => topic,
        }
    }

    /// Position of the failing handler within the dispatched sequence
    pub fn index(&self) -> usize {
        match self {
            PublishError::Handler { index, .. } => *index,
        }
    }

    /// Consume the error and return the handler's own error value
    pub fn into_source(self) -> anyhow::Error {
        match self {
            PublishError::Handler { source, .. } => source,
        }
    }
}

/// Configuration error type
///
/// Represents failures reading, writing or parsing an [`EventBusConfig`](crate::EventBusConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML deserialization failed
    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization failed
    #[error("Failed to serialize TOML config: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// JSON (de)serialization failed
    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// File extension is neither `.toml` nor `.json`
    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat {
        /// The offending extension, or an empty string if there was none.
        extension: String,
    },
}

/// Main error type for TopicBus
///
/// A unified error type that can represent any error from the crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Publish error
    #[error(transparent)]
    Publish(#[from] PublishError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Check if this is a handler failure raised during publish
    pub fn is_publish_error(&self) -> bool {
        matches!(self, Error::Publish(_))
    }

    /// Check if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_error_accessors() {
        let err = PublishError::Handler {
            topic: "app:online".to_string(),
            index: 2,
            handler: HandlerId::new(),
            source: anyhow::anyhow!("boom"),
        };

        assert_eq!(err.topic(), "app:online");
        assert_eq!(err.index(), 2);
        assert!(err.to_string().contains("app:online"));
        assert!(err.to_string().contains("boom"));
        assert_eq!(err.into_source().to_string(), "boom");
    }

    #[test]
    fn test_error_classification() {
        let err: Error = ConfigError::UnsupportedFormat {
            extension: "yaml".to_string(),
        }
        .into();
        assert!(err.is_config_error());
        assert!(!err.is_publish_error());
        assert_eq!(err.to_string(), "Unsupported config format: yaml");
    }
}
