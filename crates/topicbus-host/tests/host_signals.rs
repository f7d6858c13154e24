use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use topicbus_host::*;

#[derive(Debug, Clone, PartialEq)]
struct FakeEvent(&'static str);

/// Scroll container recording its scroll requests
#[derive(Clone, Default)]
struct FakeScroll {
    ready: Rc<Cell<bool>>,
    pending: Rc<RefCell<Vec<Box<dyn FnOnce(&FakeScroll)>>>>,
    scrolls: Rc<RefCell<Vec<Duration>>>,
}

impl FakeScroll {
    fn make_ready(&self) {
        self.ready.set(true);
        let pending: Vec<_> = self.pending.borrow_mut().drain(..).collect();
        for callback in pending {
            callback(self);
        }
    }
}

impl ScrollContainer for FakeScroll {
    fn on_ready(&self, callback: Box<dyn FnOnce(&Self)>) {
        if self.ready.get() {
            callback(self);
        } else {
            self.pending.borrow_mut().push(callback);
        }
    }

    fn scroll_to_top(&self, duration: Duration) {
        self.scrolls.borrow_mut().push(duration);
    }
}

#[derive(Clone)]
struct FakeElement {
    scroll: Option<FakeScroll>,
}

impl UiElement for FakeElement {
    type Scroll = FakeScroll;

    fn closest_scroll_container(&self) -> Option<FakeScroll> {
        self.scroll.clone()
    }
}

/// Host double with a single element filling the viewport
#[derive(Default)]
struct FakeHost {
    listeners: RefCell<HashMap<HostSignal, Vec<SignalListener<FakeEvent>>>>,
    element: RefCell<Option<FakeElement>>,
    probed: RefCell<Vec<(f64, f64)>>,
}

impl FakeHost {
    fn fire(&self, signal: HostSignal, event: FakeEvent) {
        if let Some(listeners) = self.listeners.borrow().get(&signal) {
            for listener in listeners {
                listener(&event);
            }
        }
    }

    fn listener_count(&self, signal: HostSignal) -> usize {
        self.listeners.borrow().get(&signal).map_or(0, Vec::len)
    }
}

impl HostEnvironment for FakeHost {
    type Event = FakeEvent;
    type Element = FakeElement;

    fn add_listener(&self, signal: HostSignal, listener: SignalListener<FakeEvent>) {
        self.listeners
            .borrow_mut()
            .entry(signal)
            .or_default()
            .push(listener);
    }

    fn viewport_size(&self) -> (f64, f64) {
        (320.0, 480.0)
    }

    fn element_from_point(&self, x: f64, y: f64) -> Option<FakeElement> {
        self.probed.borrow_mut().push((x, y));
        self.element.borrow().clone()
    }
}

fn record(bus: &topicbus_core::EventBus<FakeEvent, ()>, topic: &str) -> Arc<Mutex<Vec<FakeEvent>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    bus.subscribe_fn(topic, move |event: &FakeEvent| {
        seen_clone.lock().unwrap().push(event.clone());
        Ok(())
    });
    seen
}

#[test]
fn test_registers_one_listener_per_signal() {
    let host = Arc::new(FakeHost::default());
    let _bus = setup_events::<_, ()>(&host);

    for signal in [
        HostSignal::Online,
        HostSignal::Offline,
        HostSignal::OrientationChange,
        HostSignal::StatusTap,
    ] {
        assert_eq!(host.listener_count(signal), 1, "{signal}");
    }
}

#[test]
fn test_signals_publish_raw_payload() {
    let host = Arc::new(FakeHost::default());
    let bus = setup_events::<_, ()>(&host);

    let online = record(&bus, TOPIC_ONLINE);
    let offline = record(&bus, TOPIC_OFFLINE);
    let rotated = record(&bus, TOPIC_ROTATED);

    host.fire(HostSignal::Online, FakeEvent("up"));
    host.fire(HostSignal::Offline, FakeEvent("down"));
    host.fire(HostSignal::OrientationChange, FakeEvent("landscape"));
    host.fire(HostSignal::Online, FakeEvent("up-again"));

    assert_eq!(
        *online.lock().unwrap(),
        vec![FakeEvent("up"), FakeEvent("up-again")]
    );
    assert_eq!(*offline.lock().unwrap(), vec![FakeEvent("down")]);
    assert_eq!(*rotated.lock().unwrap(), vec![FakeEvent("landscape")]);
}

#[test]
fn test_signal_without_subscribers_is_harmless() {
    let host = Arc::new(FakeHost::default());
    let bus = setup_events::<_, ()>(&host);

    host.fire(HostSignal::Offline, FakeEvent("down"));
    assert!(bus.is_empty());
}

#[test]
fn test_failing_subscriber_does_not_escape_host_listener() {
    let host = Arc::new(FakeHost::default());
    let bus = setup_events::<_, ()>(&host);
    bus.subscribe_fn(TOPIC_ROTATED, |_: &FakeEvent| anyhow::bail!("rotation unsupported"));

    host.fire(HostSignal::OrientationChange, FakeEvent("portrait"));
    assert!(bus.has_subscribers(TOPIC_ROTATED));
}

#[test]
fn test_status_tap_scrolls_after_ready() {
    let host = Arc::new(FakeHost::default());
    let scroll = FakeScroll::default();
    *host.element.borrow_mut() = Some(FakeElement {
        scroll: Some(scroll.clone()),
    });
    let bus = setup_events::<_, ()>(&host);
    let online = record(&bus, TOPIC_ONLINE);

    host.fire(HostSignal::StatusTap, FakeEvent("tap"));

    assert_eq!(*host.probed.borrow(), vec![(160.0, 240.0)]);
    assert!(scroll.scrolls.borrow().is_empty());

    scroll.make_ready();
    assert_eq!(*scroll.scrolls.borrow(), vec![SCROLL_TO_TOP_DURATION]);

    // The tap never goes through the bus
    assert!(online.lock().unwrap().is_empty());
    assert_eq!(bus.topics(), vec![TOPIC_ONLINE.to_string()]);
}

#[test]
fn test_status_tap_on_ready_container_scrolls_immediately() {
    let host = FakeHost::default();
    let scroll = FakeScroll::default();
    scroll.make_ready();
    *host.element.borrow_mut() = Some(FakeElement {
        scroll: Some(scroll.clone()),
    });

    assert!(scroll_center_to_top(&host));
    assert_eq!(*scroll.scrolls.borrow(), vec![Duration::from_millis(300)]);
}

#[test]
fn test_status_tap_without_target_is_noop() {
    let host = FakeHost::default();
    assert!(!scroll_center_to_top(&host));

    *host.element.borrow_mut() = Some(FakeElement { scroll: None });
    assert!(!scroll_center_to_top(&host));
    assert_eq!(host.probed.borrow().len(), 2);
}

#[test]
fn test_listeners_hold_host_weakly() {
    let host = Arc::new(FakeHost::default());
    let _bus = setup_events::<_, ()>(&host);

    // Listeners only hold a weak reference to the host
    assert_eq!(Arc::strong_count(&host), 1);
}
