//! Event Bus implementation.
//!
//! Provides the core EventBus struct: a mutex-guarded topic registry of
//! shared handler sequences, with synchronous, fail-fast dispatch on the
//! publishing thread.

use parking_lot::Mutex;

use super::handler::Handler;
use super::registry::TopicRegistry;
use crate::config::{DispatchMode, EventBusConfig};
use crate::error::PublishError;

/// Central event bus for topic-based publish/subscribe
///
/// Every instance owns an independent registry. Construct one where the
/// application is assembled and pass it (usually behind an `Arc`) to the
/// components that publish or subscribe.
///
/// The registry lock is only held while the registry is read or mutated,
/// never while a handler runs, so handlers may freely call back into the bus.
pub struct EventBus<A: ?Sized, R> {
    /// Topic name to ordered handler sequence
    registry: Mutex<TopicRegistry<Handler<A, R>>>,
    /// Configuration
    config: EventBusConfig,
}

impl<A: ?Sized, R> EventBus<A, R> {
    /// Create a new event bus with default configuration
    pub fn new() -> Self {
        Self::with_config(EventBusConfig::default())
    }

    /// Create a new event bus with custom configuration
    pub fn with_config(config: EventBusConfig) -> Self {
        Self {
            registry: Mutex::new(TopicRegistry::new()),
            config,
        }
    }

    /// Subscribe one or more handlers to a topic
    ///
    /// Handlers are appended in the order given. The same handler may be
    /// registered more than once; each registration is removed separately.
    /// Passing no handlers is a no-op.
    pub fn subscribe<I>(&self, topic: &str, handlers: I)
    where
        I: IntoIterator<Item = Handler<A, R>>,
    {
        let added = self.registry.lock().append(topic, handlers);
        if added > 0 {
            tracing::debug!(topic, added, "Handlers subscribed");
        }
    }

    /// Subscribe a closure and return its handler
    ///
    /// Keep the returned handler to unsubscribe this registration later.
    pub fn subscribe_fn<F>(&self, topic: &str, func: F) -> Handler<A, R>
    where
        F: Fn(&A) -> anyhow::Result<R> + Send + Sync + 'static,
    {
        let handler = Handler::new(func);
        self.subscribe(topic, [handler.clone()]);
        handler
    }

    /// Unsubscribe from a topic
    ///
    /// With `None`, removes every handler of the topic. With a handler,
    /// removes the first registration that is the same handler (by identity)
    /// and leaves any later duplicates in place.
    ///
    /// Returns true if anything was removed.
    pub fn unsubscribe(&self, topic: &str, handler: Option<&Handler<A, R>>) -> bool {
        let mut registry = self.registry.lock();

        let Some(handler) = handler else {
            let removed = registry.remove_topic(topic);
            if let Some(removed) = &removed {
                tracing::debug!(topic, removed = removed.lock().len(), "Topic unsubscribed");
            }
            return removed.is_some();
        };

        let removed = registry.remove_first(topic, |candidate| candidate.same_as(handler));
        if removed.is_some() {
            tracing::debug!(topic, handler = %handler.id(), "Handler unsubscribed");
        }
        removed.is_some()
    }

    /// Publish to a topic
    ///
    /// Invokes every handler of the topic on the calling thread, in
    /// subscription order, each with the same `args`, and returns their
    /// results in call order.
    ///
    /// Returns `Ok(None)` if the topic has no subscribers. The first handler
    /// error stops dispatch and is returned; later handlers do not run.
    /// Panics raised by handlers propagate to the caller untouched.
    pub fn publish(&self, topic: &str, args: &A) -> Result<Option<Vec<R>>, PublishError> {
        match self.config.dispatch {
            DispatchMode::Snapshot => self.dispatch_snapshot(topic, args),
            DispatchMode::Live => self.dispatch_live(topic, args),
        }
    }

    fn dispatch_snapshot(&self, topic: &str, args: &A) -> Result<Option<Vec<R>>, PublishError> {
        let Some(handlers) = self.registry.lock().snapshot(topic) else {
            return Ok(None);
        };

        let mut results = Vec::with_capacity(handlers.len());
        for (index, handler) in handlers.iter().enumerate() {
            results.push(self.invoke(topic, index, handler, args)?);
        }
        Ok(Some(results))
    }

    fn dispatch_live(&self, topic: &str, args: &A) -> Result<Option<Vec<R>>, PublishError> {
        // Held for the whole call: a topic removed or replaced meanwhile
        // leaves this sequence detached but still walkable
        let Some(sequence) = self.registry.lock().sequence(topic) else {
            return Ok(None);
        };

        let steps = sequence.lock().len();
        let mut results = Vec::with_capacity(steps);
        for index in 0..steps {
            let Some(handler) = sequence.lock().get(index).cloned() else {
                continue;
            };
            results.push(self.invoke(topic, index, &handler, args)?);
        }
        Ok(Some(results))
    }

    fn invoke(
        &self,
        topic: &str,
        index: usize,
        handler: &Handler<A, R>,
        args: &A,
    ) -> Result<R, PublishError> {
        if self.config.trace_dispatch {
            tracing::trace!(topic, index, handler = %handler.id(), "Dispatching");
        }

        handler.call(args).map_err(|source| PublishError::Handler {
            topic: topic.to_string(),
            index,
            handler: handler.id(),
            source,
        })
    }

    /// Remove every topic and handler
    pub fn clear(&self) {
        let mut registry = self.registry.lock();
        let topics = registry.topic_count();
        registry.clear();
        tracing::debug!(topics, "Event bus cleared");
    }

    /// Whether a topic has at least one handler
    pub fn has_subscribers(&self, topic: &str) -> bool {
        self.registry.lock().contains(topic)
    }

    /// Number of registrations for a topic
    pub fn handler_count(&self, topic: &str) -> usize {
        self.registry.lock().len_of(topic)
    }

    /// Number of topics with at least one handler
    pub fn topic_count(&self) -> usize {
        self.registry.lock().topic_count()
    }

    /// Topics with at least one handler, sorted
    pub fn topics(&self) -> Vec<String> {
        self.registry.lock().topics()
    }

    /// Whether no topic has any handler
    pub fn is_empty(&self) -> bool {
        self.registry.lock().is_empty()
    }

    /// Get the current configuration
    pub fn config(&self) -> &EventBusConfig {
        &self.config
    }
}

impl<A: ?Sized, R> Default for EventBus<A, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ?Sized, R> std::fmt::Debug for EventBus<A, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("topics", &self.topic_count())
            .field("config", &self.config)
            .finish()
    }
}
