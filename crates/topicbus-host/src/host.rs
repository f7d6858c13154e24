//! Host capabilities used by the adapter.
//!
//! The adapter never talks to a concrete toolkit. A host implements these
//! traits over whatever it actually has: window signals, a widget tree and
//! scrollable containers.

use std::time::Duration;

/// Signals a host can raise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostSignal {
    /// Network connectivity was restored.
    Online,
    /// Network connectivity was lost.
    Offline,
    /// The device orientation changed.
    OrientationChange,
    /// The user tapped the status bar.
    StatusTap,
}

impl HostSignal {
    /// Signals republished on the bus, in registration order
    pub const BUS_SIGNALS: [HostSignal; 3] = [
        HostSignal::Online,
        HostSignal::Offline,
        HostSignal::OrientationChange,
    ];

    /// Bus topic this signal is published to, if any
    ///
    /// The status bar tap is handled locally and never reaches the bus.
    pub fn topic(&self) -> Option<&'static str> {
        match self {
            HostSignal::Online => Some(crate::adapter::TOPIC_ONLINE),
            HostSignal::Offline => Some(crate::adapter::TOPIC_OFFLINE),
            HostSignal::OrientationChange => Some(crate::adapter::TOPIC_ROTATED),
            HostSignal::StatusTap => None,
        }
    }
}

impl std::fmt::Display for HostSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostSignal::Online => write!(f, "online"),
            HostSignal::Offline => write!(f, "offline"),
            HostSignal::OrientationChange => write!(f, "orientationchange"),
            HostSignal::StatusTap => write!(f, "statusTap"),
        }
    }
}

/// Listener a host invokes with the raw signal payload
///
/// Not `Send`: hosts usually deliver signals on their UI thread.
pub type SignalListener<E> = Box<dyn Fn(&E)>;

/// The embedding environment
pub trait HostEnvironment: 'static {
    /// Raw payload delivered with every signal
    type Event: 'static;
    /// A node of the host's UI tree
    type Element: UiElement;

    /// Register a listener for a signal
    fn add_listener(&self, signal: HostSignal, listener: SignalListener<Self::Event>);

    /// Current viewport width and height
    fn viewport_size(&self) -> (f64, f64);

    /// Topmost element at a viewport coordinate
    fn element_from_point(&self, x: f64, y: f64) -> Option<Self::Element>;
}

/// An element of the host's UI tree
pub trait UiElement {
    /// Scrollable container type
    type Scroll: ScrollContainer + 'static;

    /// Nearest scrollable ancestor, including the element itself
    fn closest_scroll_container(&self) -> Option<Self::Scroll>;
}

/// A scrollable container
pub trait ScrollContainer {
    /// Run `callback` once the container is ready, immediately if it already is
    fn on_ready(&self, callback: Box<dyn FnOnce(&Self)>);

    /// Animate the scroll position to the top
    fn scroll_to_top(&self, duration: Duration);
}
