// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A zero-argument notification with ordered, individually removable subscribers.

use alloc::boxed::Box;
use alloc::vec::Vec;

/// Handle returned by [`Signal::connect`], used to disconnect that subscriber.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Connection(u64);

/// Synchronous notification.
///
/// Subscribers run in connection order, on the caller's stack, each time the
/// signal is emitted.
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use understory_gesture::signal::Signal;
///
/// let hits = Rc::new(Cell::new(0));
/// let mut signal = Signal::new();
/// let conn = {
///     let hits = hits.clone();
///     signal.connect(move || hits.set(hits.get() + 1))
/// };
/// signal.emit();
/// assert!(signal.disconnect(conn));
/// signal.emit();
/// assert_eq!(hits.get(), 1);
/// ```
#[derive(Default)]
pub struct Signal {
    next_id: u64,
    slots: Vec<(Connection, Box<dyn FnMut()>)>,
}

impl core::fmt::Debug for Signal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Signal")
            .field("next_id", &self.next_id)
            .field("subscribers", &self.slots.len())
            .finish()
    }
}

impl Signal {
    /// Create a signal without subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a subscriber after the existing ones.
    pub fn connect(&mut self, slot: impl FnMut() + 'static) -> Connection {
        let conn = Connection(self.next_id);
        self.next_id += 1;
        self.slots.push((conn, Box::new(slot)));
        conn
    }

    /// Remove a subscriber. Returns false if it was already gone.
    pub fn disconnect(&mut self, conn: Connection) -> bool {
        let Some(pos) = self.slots.iter().position(|(c, _)| *c == conn) else {
            return false;
        };
        self.slots.remove(pos);
        true
    }

    /// Remove every subscriber.
    pub fn disconnect_all(&mut self) {
        self.slots.clear();
    }

    /// Call every subscriber in connection order.
    ///
    /// A panicking subscriber unwinds through `emit`; later subscribers do not run.
    pub fn emit(&mut self) {
        for (_, slot) in &mut self.slots {
            slot();
        }
    }

    /// Number of subscribers.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if nothing is subscribed.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
