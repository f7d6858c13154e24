//! # Event Bus Module
//!
//! Provides an in-process, topic-based publish/subscribe bus for decoupled
//! communication between application components.
//!
//! ## Overview
//!
//! - Publishers name a topic; they hold no reference to subscribers
//! - Subscribers register handlers under a topic, in order
//! - Publishing calls every handler synchronously and collects the results
//!
//! ## Usage
//!
//! ```rust
//! use topicbus_core::event_bus::{EventBus, Handler};
//!
//! let bus: EventBus<str, usize> = EventBus::new();
//! let len = Handler::infallible(|s: &str| s.len());
//! bus.subscribe("app:greet", [len.clone()]);
//!
//! assert_eq!(bus.publish("app:greet", "hello").unwrap(), Some(vec![5]));
//! assert!(bus.unsubscribe("app:greet", Some(&len)));
//! assert_eq!(bus.publish("app:greet", "hello").unwrap(), None);
//! ```

mod bus;
mod handler;
mod registry;

pub use bus::*;
pub use handler::*;
pub use registry::*;

/// Bus with untyped arguments and results
///
/// Handlers receive the published values as a slice and inspect them
/// themselves; nothing about payload shape is checked at compile time.
pub type DynamicBus = EventBus<[serde_json::Value], serde_json::Value>;

/// Handler for a [`DynamicBus`]
pub type DynamicHandler = Handler<[serde_json::Value], serde_json::Value>;
