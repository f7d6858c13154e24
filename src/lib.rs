//! # TopicBus
//!
//! An in-process, topic-based publish/subscribe event bus:
//! - Components talk by topic name, never by direct reference
//! - Handlers run synchronously, in subscription order, on the publisher's thread
//! - Handler results come back to the publisher as a list
//!
//! ## Architecture
//!
//! TopicBus is organized as a workspace with multiple crates:
//!
//! 1. **topicbus-core** - Event bus, topic registry, handlers, config, errors
//! 2. **topicbus-host** - Adapter wiring host environment signals onto the bus
//! 3. **topicbus** - This facade, re-exporting both plus logging setup

pub use topicbus_core::{config, error, event_bus};

pub use topicbus_core::{
    ConfigError, DispatchMode, DynamicBus, DynamicHandler, Error, EventBus, EventBusConfig,
    Handler, HandlerId, PublishError, SharedSequence, TopicRegistry,
};

pub use topicbus_host::{
    scroll_center_to_top, setup_events, setup_events_with_config, HostEnvironment, HostSignal,
    ScrollContainer, SignalListener, UiElement, SCROLL_TO_TOP_DURATION, TOPIC_OFFLINE,
    TOPIC_ONLINE, TOPIC_ROTATED,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support, INFO by default
///
/// Fails if a global subscriber is already installed.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::debug!(version = VERSION, "Logging initialized");
    Ok(())
}
