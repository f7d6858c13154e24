//! # TopicBus Core
//!
//! Core types for TopicBus: the event bus, its topic registry and handler
//! type, bus configuration, and error types.

pub mod config;
pub mod error;
pub mod event_bus;

pub use config::{DispatchMode, EventBusConfig};

pub use error::{ConfigError, Error, PublishError};

pub use event_bus::{
    DynamicBus, DynamicHandler, EventBus, Handler, HandlerId, SharedSequence, TopicRegistry,
};
