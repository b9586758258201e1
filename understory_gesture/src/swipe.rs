// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swipe tracking: velocity over a short window and distance over the whole gesture.

use alloc::collections::VecDeque;
use kurbo::{Point, Vec2};
use understory_touch::types::Touch;

use crate::config::SwipeConfig;

/// A position recorded at a time, in seconds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StoredTouch {
    /// Recorded position.
    pub position: Point,
    /// Time of the record in seconds.
    pub timestamp: f64,
}

impl StoredTouch {
    /// Placeholder reported before anything was recorded.
    pub const NONE: Self = Self {
        position: Point::ZERO,
        timestamp: -1.0,
    };
}

/// Records the positions of one finger and estimates its swipe velocity and distance.
///
/// Keeps at most [`SwipeTracker::capacity`] recent samples, evicting the oldest, plus
/// the first sample since the last [`SwipeTracker::clear`]. Velocity only looks at the
/// recent window; distance spans the whole gesture.
///
/// Feed it from a view's touch handlers:
///
/// ```
/// use kurbo::{Point, Vec2};
/// use understory_gesture::swipe::SwipeTracker;
///
/// let mut swipe = SwipeTracker::default();
/// swipe.store_touch_pos(Point::new(0.0, 0.0), 1.0);
/// swipe.store_touch_pos(Point::new(50.0, 0.0), 1.1);
/// swipe.store_touch_pos(Point::new(100.0, 0.0), 1.2);
/// let v = swipe.calc_swipe_velocity();
/// assert!((v.x - 500.0).abs() < 1e-9);
/// assert_eq!(swipe.calc_swipe_distance(), Vec2::new(100.0, 0.0));
/// ```
#[derive(Clone, Debug)]
pub struct SwipeTracker {
    capacity: usize,
    stored: VecDeque<StoredTouch>,
    first: Option<StoredTouch>,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(SwipeConfig::default())
    }
}

impl SwipeTracker {
    /// Create an empty tracker. A capacity of zero keeps one sample.
    pub fn new(config: SwipeConfig) -> Self {
        let capacity = config.history_capacity.max(1);
        Self {
            capacity,
            stored: VecDeque::with_capacity(capacity),
            first: None,
        }
    }

    /// Forget every sample, including the first one.
    pub fn clear(&mut self) {
        self.stored.clear();
        self.first = None;
    }

    /// Record a position. Timestamps are taken as given.
    pub fn store_touch_pos(&mut self, position: Point, timestamp: f64) {
        let sample = StoredTouch {
            position,
            timestamp,
        };
        if self.first.is_none() {
            self.first = Some(sample);
        }
        if self.stored.len() == self.capacity {
            self.stored.pop_front();
        }
        self.stored.push_back(sample);
    }

    /// Record the position and time of a touch.
    pub fn store_touch(&mut self, touch: &Touch) {
        self.store_touch_pos(touch.position, touch.timestamp);
    }

    /// Average velocity, in units per second, between the oldest and newest kept samples.
    ///
    /// Zero with fewer than two samples or when no time elapsed between them.
    pub fn calc_swipe_velocity(&self) -> Vec2 {
        let (Some(oldest), Some(newest)) = (self.stored.front(), self.stored.back()) else {
            return Vec2::ZERO;
        };
        let dt = newest.timestamp - oldest.timestamp;
        if self.stored.len() < 2 || dt.is_nan() || dt <= 0.0 {
            return Vec2::ZERO;
        }
        (newest.position - oldest.position) / dt
    }

    /// Displacement from the first sample to the newest one. Zero when empty.
    pub fn calc_swipe_distance(&self) -> Vec2 {
        match (self.first, self.stored.back()) {
            (Some(first), Some(last)) => last.position - first.position,
            _ => Vec2::ZERO,
        }
    }

    /// Position of the first sample, or the origin when empty.
    pub fn first_touch_pos(&self) -> Point {
        self.first.unwrap_or(StoredTouch::NONE).position
    }

    /// Time of the first sample, or `-1.0` when empty.
    pub fn first_touch_time(&self) -> f64 {
        self.first.unwrap_or(StoredTouch::NONE).timestamp
    }

    /// Position of the newest sample, or the origin when empty.
    pub fn last_touch_pos(&self) -> Point {
        self.stored.back().unwrap_or(&StoredTouch::NONE).position
    }

    /// Time of the newest sample, or `-1.0` when empty.
    pub fn last_touch_time(&self) -> f64 {
        self.stored.back().unwrap_or(&StoredTouch::NONE).timestamp
    }

    /// Number of samples kept for velocity.
    pub fn num_stored_touches(&self) -> usize {
        self.stored.len()
    }

    /// Kept samples, oldest first.
    pub fn stored_touches(&self) -> impl ExactSizeIterator<Item = &StoredTouch> + '_ {
        self.stored.iter()
    }

    /// Returns true if nothing was recorded since the last clear.
    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    /// Most samples kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the number of samples kept, evicting the oldest if needed.
    /// A capacity of zero keeps one sample.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        while self.stored.len() > self.capacity {
            self.stored.pop_front();
        }
    }
}
