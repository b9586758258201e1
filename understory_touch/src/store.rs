// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch point store: the latest record and a bounded sample history per active touch.
//!
//! The [`Dispatcher`](crate::dispatcher::Dispatcher) keeps one store for every touch
//! currently in the window, whether or not a view captured it. Entries are created on
//! began, extended on moved, and removed on ended.

use alloc::collections::{BTreeMap, VecDeque};
use kurbo::Point;

use crate::types::{Touch, TouchId};

/// One recorded position of a touch.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchSample {
    /// World-space position.
    pub position: Point,
    /// Event time in seconds.
    pub timestamp: f64,
}

impl From<&Touch> for TouchSample {
    fn from(t: &Touch) -> Self {
        Self {
            position: t.position,
            timestamp: t.timestamp,
        }
    }
}

/// Recorded state of one active touch.
#[derive(Clone, Debug)]
pub struct TouchTrack {
    latest: Touch,
    samples: VecDeque<TouchSample>,
}

impl TouchTrack {
    /// The most recent record of the touch.
    pub fn latest(&self) -> &Touch {
        &self.latest
    }

    /// Recent samples, oldest first.
    pub fn samples(&self) -> impl ExactSizeIterator<Item = &TouchSample> + '_ {
        self.samples.iter()
    }

    /// The oldest retained sample.
    pub fn oldest(&self) -> Option<&TouchSample> {
        self.samples.front()
    }
}

/// Bounded per-touch history for all active touches, keyed by [`TouchId`].
#[derive(Clone, Debug)]
pub struct TouchStore {
    capacity: usize,
    tracks: BTreeMap<TouchId, TouchTrack>,
}

impl TouchStore {
    /// Create a store keeping at most `capacity` samples per touch (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            tracks: BTreeMap::new(),
        }
    }

    /// Samples kept per touch.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Start tracking a touch, replacing any stale entry with the same id.
    ///
    /// Returns true if an entry for `touch.id` was still present.
    pub fn begin(&mut self, touch: &Touch) -> bool {
        let mut samples = VecDeque::with_capacity(self.capacity);
        samples.push_back(TouchSample::from(touch));
        self.tracks
            .insert(
                touch.id,
                TouchTrack {
                    latest: *touch,
                    samples,
                },
            )
            .is_some()
    }

    /// Record a new sample for a known touch.
    ///
    /// Fills in `touch.previous_position` from the last record when it is absent.
    /// Returns false (and records nothing) for an unknown id.
    pub fn record(&mut self, touch: &mut Touch) -> bool {
        let Some(track) = self.tracks.get_mut(&touch.id) else {
            return false;
        };
        if touch.previous_position.is_none() {
            touch.previous_position = Some(track.latest.position);
        }
        if track.samples.len() == self.capacity {
            track.samples.pop_front();
        }
        track.samples.push_back(TouchSample::from(&*touch));
        track.latest = *touch;
        true
    }

    /// Stop tracking a touch, returning its record.
    pub fn end(&mut self, id: TouchId) -> Option<TouchTrack> {
        self.tracks.remove(&id)
    }

    /// Recorded state of an active touch.
    pub fn get(&self, id: TouchId) -> Option<&TouchTrack> {
        self.tracks.get(&id)
    }

    /// Returns true if the touch is active.
    pub fn contains(&self, id: TouchId) -> bool {
        self.tracks.contains_key(&id)
    }

    /// Latest records of all active touches, ordered by id.
    pub fn touches(&self) -> impl Iterator<Item = &Touch> + '_ {
        self.tracks.values().map(|t| &t.latest)
    }

    /// Number of active touches.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Returns true if no touch is active.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Forget every touch.
    pub fn clear(&mut self) {
        self.tracks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn touch(id: u32, x: f64, t: f64) -> Touch {
        Touch::new(TouchId(id), Point::new(x, 0.0), t)
    }

    #[test]
    fn history_is_bounded_fifo() {
        let mut store = TouchStore::new(3);
        store.begin(&touch(1, 0.0, 0.0));
        for i in 1..10 {
            let mut t = touch(1, f64::from(i), f64::from(i));
            assert!(store.record(&mut t));
        }
        let track = store.get(TouchId(1)).unwrap();
        let xs: Vec<f64> = track.samples().map(|s| s.position.x).collect();
        assert_eq!(xs, [7.0, 8.0, 9.0], "oldest samples are evicted first");
        assert_eq!(track.latest().position.x, 9.0);
    }

    #[test]
    fn record_fills_previous_position() {
        let mut store = TouchStore::new(4);
        store.begin(&touch(1, 5.0, 0.0));
        let mut moved = touch(1, 8.0, 0.1);
        store.record(&mut moved);
        assert_eq!(moved.previous_position, Some(Point::new(5.0, 0.0)));

        let mut explicit = touch(1, 9.0, 0.2).with_previous(Point::new(1.0, 1.0));
        store.record(&mut explicit);
        assert_eq!(explicit.previous_position, Some(Point::new(1.0, 1.0)));
    }

    #[test]
    fn unknown_and_ended_touches() {
        let mut store = TouchStore::new(2);
        let mut stray = touch(7, 0.0, 0.0);
        assert!(!store.record(&mut stray));
        assert!(store.is_empty());

        assert!(!store.begin(&touch(1, 0.0, 0.0)));
        assert!(!store.begin(&touch(2, 0.0, 0.0)));
        assert!(store.begin(&touch(2, 3.0, 0.0)), "stale entry is replaced");
        assert_eq!(store.len(), 2);
        let ids: Vec<TouchId> = store.touches().map(|t| t.id).collect();
        assert_eq!(ids, [TouchId(1), TouchId(2)]);

        assert!(store.end(TouchId(1)).is_some());
        assert!(store.end(TouchId(1)).is_none());
        assert!(!store.contains(TouchId(1)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn zero_capacity_keeps_one_sample() {
        let mut store = TouchStore::new(0);
        assert_eq!(store.capacity(), 1);
        store.begin(&touch(1, 0.0, 0.0));
        store.record(&mut touch(1, 1.0, 1.0));
        assert_eq!(store.get(TouchId(1)).unwrap().samples().len(), 1);
    }
}
