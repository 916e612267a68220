//! Synchronous, typed event bus.
//!
//! Handlers are keyed by event type and run in subscription order, inline,
//! inside [`EventBus::raise`]. There is no queue: each raise reaches each
//! matching handler exactly once before `raise` returns.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use tracing::trace;

/// Marker for values that can be raised on an [`EventBus`].
pub trait Event: Any {}

type Handler<'a> = Box<dyn FnMut(&mut dyn Any) + 'a>;

/// Dispatches events to the handlers subscribed for their type.
#[derive(Default)]
pub struct EventBus<'a> {
    handlers: HashMap<TypeId, Vec<Handler<'a>>>,
}

impl<'a> EventBus<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for events of type `E`.
    pub fn subscribe<E, F>(&mut self, mut handler: F)
    where
        E: Event,
        F: FnMut(&mut E) + 'a,
    {
        let erased: Handler<'a> = Box::new(move |event: &mut dyn Any| {
            if let Some(event) = event.downcast_mut::<E>() {
                handler(event);
            }
        });
        self.handlers
            .entry(TypeId::of::<E>())
            .or_default()
            .push(erased);
    }

    /// Runs every handler subscribed for `E` and returns how many ran.
    pub fn raise<E: Event>(&mut self, event: &mut E) -> usize {
        let Some(handlers) = self.handlers.get_mut(&TypeId::of::<E>()) else {
            trace!(event = std::any::type_name::<E>(), "no subscribers");
            return 0;
        };
        let event: &mut dyn Any = event;
        for handler in handlers.iter_mut() {
            handler(event);
        }
        handlers.len()
    }

    pub fn subscriber_count<E: Event>(&self) -> usize {
        self.handlers
            .get(&TypeId::of::<E>())
            .map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Ping(u32);
    impl Event for Ping {}

    struct Pong;
    impl Event for Pong {}

    #[test]
    fn raise_without_subscribers_is_noop() {
        let mut bus = EventBus::new();
        assert_eq!(bus.raise(&mut Ping(1)), 0);
    }

    #[test]
    fn handlers_run_once_in_subscription_order() {
        let seen = RefCell::new(Vec::new());
        let mut bus = EventBus::new();
        bus.subscribe(|p: &mut Ping| seen.borrow_mut().push(("first", p.0)));
        bus.subscribe(|p: &mut Ping| seen.borrow_mut().push(("second", p.0)));

        assert_eq!(bus.raise(&mut Ping(7)), 2);
        drop(bus);
        assert_eq!(seen.into_inner(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn handlers_only_see_their_event_type() {
        let pongs = RefCell::new(0);
        let mut bus = EventBus::new();
        bus.subscribe(|_: &mut Pong| *pongs.borrow_mut() += 1);

        assert_eq!(bus.raise(&mut Ping(1)), 0);
        assert_eq!(bus.raise(&mut Pong), 1);
        assert_eq!(bus.subscriber_count::<Pong>(), 1);
        assert_eq!(bus.subscriber_count::<Ping>(), 0);
        drop(bus);
        assert_eq!(pongs.into_inner(), 1);
    }

    #[test]
    fn handlers_can_mutate_the_event() {
        let mut bus = EventBus::new();
        bus.subscribe(|p: &mut Ping| p.0 += 1);
        bus.subscribe(|p: &mut Ping| p.0 *= 10);

        let mut ping = Ping(1);
        bus.raise(&mut ping);
        assert_eq!(ping.0, 20);
    }
}
