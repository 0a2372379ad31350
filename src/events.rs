//! Type-keyed publish/subscribe channel.
//!
//! Delivery is synchronous and follows subscription order. Handlers receive
//! only the event, never the channel, so a handler cannot publish while it is
//! being delivered to.

use bevy::prelude::*;
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Selection changed to this unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitSelected {
    pub unit: Entity,
}

/// This unit is no longer selected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitDeselected {
    pub unit: Entity,
}

/// A drag box was released. Box-membership selection hooks in here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarqueeReleased {
    pub rect: Rect,
}

/// Identity of a registered handler, allocated by the channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/// Outcome of one publish call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delivery {
    pub delivered: usize,
    pub failed: usize,
}

type ErasedHandler = Box<dyn FnMut(&dyn Any) -> anyhow::Result<()> + Send + Sync>;

struct Subscription {
    id: HandlerId,
    handler: ErasedHandler,
}

#[derive(Resource, Default)]
pub struct EventChannel {
    subscribers: HashMap<TypeId, Vec<Subscription>>,
    next_handler: u64,
}

impl EventChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate_handler(&mut self) -> HandlerId {
        self.next_handler += 1;
        HandlerId(self.next_handler)
    }

    /// Register `handler` for events of type `E`.
    ///
    /// Returns false when `id` is already subscribed to `E`; the existing
    /// handler is kept.
    pub fn subscribe<E, F>(&mut self, id: HandlerId, mut handler: F) -> bool
    where
        E: Any,
        F: FnMut(&E) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let list = self.subscribers.entry(TypeId::of::<E>()).or_default();
        if list.iter().any(|subscription| subscription.id == id) {
            return false;
        }

        list.push(Subscription {
            id,
            handler: Box::new(move |event: &dyn Any| match event.downcast_ref::<E>() {
                Some(event) => handler(event),
                None => Ok(()),
            }),
        });
        true
    }

    /// Remove `id` from the handlers of `E`. Unknown handlers are ignored.
    pub fn unsubscribe<E: Any>(&mut self, id: HandlerId) -> bool {
        let Some(list) = self.subscribers.get_mut(&TypeId::of::<E>()) else {
            return false;
        };
        let before = list.len();
        list.retain(|subscription| subscription.id != id);
        before != list.len()
    }

    pub fn subscriber_count<E: Any>(&self) -> usize {
        self.subscribers
            .get(&TypeId::of::<E>())
            .map_or(0, |list| list.len())
    }

    /// Deliver `event` to every handler of its exact type.
    ///
    /// A handler that errors or panics is logged and skipped; the remaining
    /// handlers still run and nothing reaches the caller.
    pub fn publish<E: Any>(&mut self, event: &E) -> Delivery {
        let mut delivery = Delivery::default();
        let Some(list) = self.subscribers.get_mut(&TypeId::of::<E>()) else {
            return delivery;
        };

        for subscription in list.iter_mut() {
            match catch_unwind(AssertUnwindSafe(|| (subscription.handler)(event as &dyn Any))) {
                Ok(Ok(())) => delivery.delivered += 1,
                Ok(Err(err)) => {
                    delivery.failed += 1;
                    error!(
                        "Handler {:?} failed on {}: {:#}",
                        subscription.id,
                        type_name::<E>(),
                        err
                    );
                }
                Err(payload) => {
                    delivery.failed += 1;
                    error!(
                        "Handler {:?} panicked on {}: {}",
                        subscription.id,
                        type_name::<E>(),
                        panic_message(payload.as_ref())
                    );
                }
            }
        }

        delivery
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}
