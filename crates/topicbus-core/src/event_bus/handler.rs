//! Handler type for the event bus.
//!
//! A [`Handler`] is an opaque callable identified by reference. Cloning a
//! handler yields the same identity; wrapping the same closure twice yields
//! two distinct handlers.

use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Diagnostic identifier carried by every handler.
///
/// Only used for logging and error reporting. Handler equality is decided by
/// reference identity, never by comparing ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(Uuid);

impl HandlerId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler({})", &self.0.to_string()[..8])
    }
}

struct HandlerInner<A: ?Sized, R> {
    id: HandlerId,
    func: Box<dyn Fn(&A) -> anyhow::Result<R> + Send + Sync>,
}

/// A callable registered against a topic.
///
/// `A` is the argument type every handler of a bus receives by reference and
/// may be unsized (`[Value]` gives a variadic argument list). `R` is the value
/// each handler returns to the publisher.
pub struct Handler<A: ?Sized, R> {
    inner: Arc<HandlerInner<A, R>>,
}

impl<A: ?Sized, R> Handler<A, R> {
    /// Wrap a fallible closure
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&A) -> anyhow::Result<R> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(HandlerInner {
                id: HandlerId::new(),
                func: Box::new(func),
            }),
        }
    }

    /// Wrap an infallible closure
    pub fn infallible<F>(func: F) -> Self
    where
        F: Fn(&A) -> R + Send + Sync + 'static,
    {
        Self::new(move |args| Ok(func(args)))
    }

    /// Diagnostic id of this handler
    pub fn id(&self) -> HandlerId {
        self.inner.id
    }

    /// Invoke the handler
    pub fn call(&self, args: &A) -> anyhow::Result<R> {
        (self.inner.func)(args)
    }

    /// Reference identity check
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<A: ?Sized, R> Clone for Handler<A, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: ?Sized, R> PartialEq for Handler<A, R> {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl<A: ?Sized, R> Eq for Handler<A, R> {}

impl<A: ?Sized, R> fmt::Debug for Handler<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handler").field(&self.inner.id).finish()
    }
}
