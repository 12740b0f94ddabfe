// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::HashMap;
use std::hash::Hash;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, RwLock};

/// An event that can travel over the [`EventBus`].
///
/// Events are grouped by a `Kind` key for subscription purposes. This keeps
/// the bus generic: `gravewake-core` never needs to know the concrete event
/// set defined by higher-level crates.
pub trait Event: Clone + Send + Sync + 'static {
    /// The subscription key. For an enum event this is usually a
    /// field-less mirror of the variants.
    type Kind: Copy + Eq + Hash + std::fmt::Debug + Send + Sync + 'static;

    /// Returns the kind used to route this event to subscribers.
    fn kind(&self) -> Self::Kind;
}

type Handler<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// A cloneable, publish-only handle to an [`EventBus`].
///
/// Handing plugins a `Publisher` instead of the bus itself keeps dispatch
/// under the kernel's control: anything can enqueue, only the simulation
/// thread drains.
pub struct Publisher<E: Event> {
    sender: flume::Sender<E>,
}

impl<E: Event> Clone for Publisher<E> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<E: Event> Publisher<E> {
    /// Enqueues an event for delivery at the next dispatch point.
    ///
    /// Never blocks and never fails to the caller. If the owning bus has
    /// been dropped the event is discarded with an error log.
    pub fn publish(&self, event: E) {
        log::trace!("Publishing event {:?}.", event.kind());
        if let Err(e) = self.sender.send(event) {
            log::error!("Failed to enqueue event: {e}. Bus likely dropped.");
        }
    }
}

/// Decoupled publish/subscribe messaging between gameplay subsystems.
///
/// Publishing enqueues on an unbounded channel; handlers run when the owner
/// of the bus calls [`dispatch_pending`](EventBus::dispatch_pending), on the
/// calling thread. This replaces fire-and-forget handler concurrency with a
/// single well-defined drain point per tick, which makes delivery order
/// deterministic and keeps handlers off of foreign threads.
///
/// Subscriptions are append-only: there is no unsubscribe, duplicates are
/// allowed and all fire. The handler registry lock is never held while a
/// handler runs, so handlers may subscribe or publish freely.
pub struct EventBus<E: Event> {
    sender: flume::Sender<E>,
    receiver: flume::Receiver<E>,
    handlers: RwLock<HashMap<E::Kind, Vec<Handler<E>>>>,
}

impl<E: Event> EventBus<E> {
    /// Creates a new `EventBus` with an unbounded pending-event channel.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        log::info!("EventBus initialized.");
        Self {
            sender,
            receiver,
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Registers `handler` for every future event of `kind`.
    ///
    /// Handlers run on the thread draining the bus. They must not mutate
    /// simulation state directly; the sanctioned pattern is to capture an
    /// intent sender and enqueue a request the simulation thread applies at
    /// its next tick.
    pub fn subscribe<F>(&self, kind: E::Kind, handler: F)
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let mut handlers = self
            .handlers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        handlers.entry(kind).or_default().push(Arc::new(handler));
    }

    /// Enqueues an event for delivery at the next dispatch point.
    pub fn publish(&self, event: E) {
        log::trace!("Publishing event {:?}.", event.kind());
        if let Err(e) = self.sender.send(event) {
            log::error!("Failed to enqueue event: {e}.");
        }
    }

    /// Returns a cloneable publish-only handle.
    pub fn publisher(&self) -> Publisher<E> {
        Publisher {
            sender: self.sender.clone(),
        }
    }

    /// Delivers every pending event to its subscribers and returns the
    /// number of handler invocations made.
    ///
    /// Events published by handlers during the drain are delivered within
    /// the same call, so a `StartGame` handler may publish `NewAbility` and
    /// both land this tick. A panicking handler is isolated and logged; it
    /// neither unwinds into the caller nor stops delivery to the remaining
    /// handlers. Publishing with no subscribers is a silent no-op.
    pub fn dispatch_pending(&self) -> usize {
        let mut invoked = 0;
        while let Ok(event) = self.receiver.try_recv() {
            let kind = event.kind();
            // Snapshot the handler list so the registry lock is released
            // before any handler runs.
            let targets: Vec<Handler<E>> = {
                let handlers = self
                    .handlers
                    .read()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                handlers.get(&kind).cloned().unwrap_or_default()
            };

            if targets.is_empty() {
                log::trace!("No subscribers for event {kind:?}.");
                continue;
            }

            for handler in targets {
                invoked += 1;
                if catch_unwind(AssertUnwindSafe(|| handler(&event))).is_err() {
                    log::error!("Event handler for {kind:?} panicked; continuing.");
                }
            }
        }
        invoked
    }
}

impl<E: Event> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    /// A local, self-contained event enum for testing purposes.
    #[derive(Debug, Clone, PartialEq)]
    enum TestEvent {
        Ping(u32),
        Pong,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestKind {
        Ping,
        Pong,
    }

    impl Event for TestEvent {
        type Kind = TestKind;

        fn kind(&self) -> TestKind {
            match self {
                TestEvent::Ping(_) => TestKind::Ping,
                TestEvent::Pong => TestKind::Pong,
            }
        }
    }

    #[test]
    fn fan_out_invokes_every_handler_once() {
        let bus = EventBus::<TestEvent>::new();
        let count = Arc::new(AtomicUsize::new(0));

        for _ in 0..5 {
            let count = count.clone();
            bus.subscribe(TestKind::Ping, move |event| {
                assert_eq!(*event, TestEvent::Ping(7));
                count.fetch_add(1, Ordering::SeqCst);
            });
        }

        bus.publish(TestEvent::Ping(7));
        let invoked = bus.dispatch_pending();

        assert_eq!(invoked, 5);
        assert_eq!(count.load(Ordering::SeqCst), 5);

        // A second drain has nothing left to deliver.
        assert_eq!(bus.dispatch_pending(), 0);
        assert_eq!(count.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn publish_without_subscribers_is_a_noop() {
        let bus = EventBus::<TestEvent>::new();
        bus.publish(TestEvent::Pong);
        assert_eq!(bus.dispatch_pending(), 0);
    }

    #[test]
    fn duplicate_subscriptions_all_fire() {
        let bus = EventBus::<TestEvent>::new();
        let count = Arc::new(AtomicUsize::new(0));

        let c = count.clone();
        let handler = move |_: &TestEvent| {
            c.fetch_add(1, Ordering::SeqCst);
        };
        bus.subscribe(TestKind::Pong, handler.clone());
        bus.subscribe(TestKind::Pong, handler);

        bus.publish(TestEvent::Pong);
        bus.dispatch_pending();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn nested_publish_is_delivered_in_the_same_drain() {
        let bus = Arc::new(EventBus::<TestEvent>::new());
        let count = Arc::new(AtomicUsize::new(0));

        let publisher = bus.publisher();
        bus.subscribe(TestKind::Ping, move |_| {
            publisher.publish(TestEvent::Pong);
        });

        let c = count.clone();
        bus.subscribe(TestKind::Pong, move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(TestEvent::Ping(1));
        bus.dispatch_pending();

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn subscribing_during_dispatch_does_not_deadlock() {
        let bus = Arc::new(EventBus::<TestEvent>::new());

        let bus_for_handler = bus.clone();
        bus.subscribe(TestKind::Ping, move |_| {
            bus_for_handler.subscribe(TestKind::Pong, |_| {});
        });

        bus.publish(TestEvent::Ping(0));
        assert_eq!(bus.dispatch_pending(), 1);
    }

    #[test]
    fn panicking_handler_is_isolated() {
        let bus = EventBus::<TestEvent>::new();
        let count = Arc::new(AtomicUsize::new(0));

        bus.subscribe(TestKind::Ping, |_| panic!("handler bug"));
        let c = count.clone();
        bus.subscribe(TestKind::Ping, move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(TestEvent::Ping(0));
        bus.dispatch_pending();

        // The surviving handler still ran, and so does the next drain.
        assert_eq!(count.load(Ordering::SeqCst), 1);
        bus.publish(TestEvent::Ping(1));
        bus.dispatch_pending();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn publish_from_another_thread() {
        let bus = EventBus::<TestEvent>::new();
        let count = Arc::new(AtomicUsize::new(0));

        let c = count.clone();
        bus.subscribe(TestKind::Ping, move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        let publisher = bus.publisher();
        let handle = thread::spawn(move || {
            publisher.publish(TestEvent::Ping(3));
        });
        handle.join().expect("publisher thread panicked");

        bus.dispatch_pending();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
