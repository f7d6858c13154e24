//! Host signal adapter.
//!
//! Builds the application's event bus and wires host signals onto it.

use std::sync::Arc;
use std::time::Duration;

use topicbus_core::{EventBus, EventBusConfig};

use crate::host::{HostEnvironment, HostSignal, ScrollContainer, UiElement};

/// Topic published when connectivity is restored
pub const TOPIC_ONLINE: &str = "app:online";

/// Topic published when connectivity is lost
pub const TOPIC_OFFLINE: &str = "app:offline";

/// Topic published when the device orientation changes
pub const TOPIC_ROTATED: &str = "app:rotated";

/// Duration of the scroll-to-top animation after a status bar tap
pub const SCROLL_TO_TOP_DURATION: Duration = Duration::from_millis(300);

/// Create an event bus and attach it to the host's signals
///
/// Online, offline and orientation signals publish their raw payload as the
/// sole argument on [`TOPIC_ONLINE`], [`TOPIC_OFFLINE`] and [`TOPIC_ROTATED`].
/// A status bar tap scrolls the container under the viewport center to its
/// top without touching the bus.
pub fn setup_events<H, R>(host: &Arc<H>) -> Arc<EventBus<H::Event, R>>
where
    H: HostEnvironment,
    R: 'static,
{
    setup_events_with_config(host, EventBusConfig::default())
}

/// Like [`setup_events`], with a custom bus configuration
pub fn setup_events_with_config<H, R>(
    host: &Arc<H>,
    config: EventBusConfig,
) -> Arc<EventBus<H::Event, R>>
where
    H: HostEnvironment,
    R: 'static,
{
    let bus = Arc::new(EventBus::with_config(config));

    for signal in HostSignal::BUS_SIGNALS {
        let Some(topic) = signal.topic() else {
            continue;
        };
        let bus = Arc::clone(&bus);
        host.add_listener(
            signal,
            Box::new(move |event: &H::Event| {
                // Nobody upstream of a host listener can handle the failure
                if let Err(err) = bus.publish(topic, event) {
                    tracing::warn!(%signal, error = %err, "Subscriber failed handling host signal");
                }
            }),
        );
    }

    // Weak, since the host owns this listener
    let weak_host = Arc::downgrade(host);
    host.add_listener(
        HostSignal::StatusTap,
        Box::new(move |_: &H::Event| {
            if let Some(host) = weak_host.upgrade() {
                scroll_center_to_top(host.as_ref());
            }
        }),
    );

    tracing::debug!("Host signals attached to event bus");
    bus
}

/// Scroll the container under the viewport center back to its top
///
/// Returns false when there is no element at the center or it has no
/// scrollable ancestor. Otherwise the scroll is requested once the container
/// reports ready.
pub fn scroll_center_to_top<H>(host: &H) -> bool
where
    H: HostEnvironment + ?Sized,
{
    let (width, height) = host.viewport_size();

    let Some(element) = host.element_from_point(width / 2.0, height / 2.0) else {
        tracing::trace!("Status tap: no element at viewport center");
        return false;
    };

    let Some(container) = element.closest_scroll_container() else {
        tracing::trace!("Status tap: no scroll container under viewport center");
        return false;
    };

    request_scroll_to_top(&container);
    true
}

fn request_scroll_to_top<S>(container: &S)
where
    S: ScrollContainer + 'static,
{
    container.on_ready(Box::new(|ready: &S| {
        ready.scroll_to_top(SCROLL_TO_TOP_DURATION);
    }));
}
