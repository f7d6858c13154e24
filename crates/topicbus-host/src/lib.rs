//! # TopicBus Host
//!
//! Bridges a host environment (windowing toolkit, mobile shell, test double)
//! onto an event bus. Network and orientation signals are republished as bus
//! topics; the status bar tap gesture scrolls the centered view to its top.

pub mod adapter;
pub mod host;

pub use adapter::{
    scroll_center_to_top, setup_events, setup_events_with_config, SCROLL_TO_TOP_DURATION,
    TOPIC_OFFLINE, TOPIC_ONLINE, TOPIC_ROTATED,
};
pub use host::{HostEnvironment, HostSignal, ScrollContainer, SignalListener, UiElement};
