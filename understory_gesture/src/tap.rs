// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tap counting: recognizes N consecutive short taps and fires a [`Signal`].
//!
//! ## Rules
//!
//! - A touch is a tap when it ends no later than
//!   [`TapConfig::max_duration_considered_tap`] after it began.
//! - A tap continues the sequence when it ends within
//!   [`TapConfig::max_duration_between_taps`] of the previous tap; otherwise it starts a
//!   new sequence of one.
//! - A press that is too long resets the count to zero.
//! - Reaching [`TapConfig::num_taps_required`] fires the signal and resets the count.
//!
//! Concurrent fingers are tracked independently and feed the same count, so taps from
//! two fingers may interleave into one sequence. Multi-finger taps are not recognized.

use alloc::collections::BTreeMap;
use log::{debug, trace};
use understory_touch::types::{Touch, TouchId};

use crate::config::TapConfig;
use crate::signal::Signal;

/// Counts consecutive taps and fires [`TapTracker::signal_gesture_detected`].
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use kurbo::Point;
/// use understory_gesture::tap::TapTracker;
/// use understory_touch::types::{Touch, TouchId};
///
/// let fired = Rc::new(Cell::new(0));
/// let mut taps = TapTracker::default();
/// {
///     let fired = fired.clone();
///     taps.signal_gesture_detected().connect(move || fired.set(fired.get() + 1));
/// }
///
/// let t = |time| Touch::new(TouchId(1), Point::ZERO, time);
/// taps.process_touches_began(&[t(0.00)], 0.00);
/// taps.process_touches_ended(&[t(0.05)], 0.05);
/// taps.process_touches_began(&[t(0.10)], 0.10);
/// taps.process_touches_ended(&[t(0.15)], 0.15);
/// assert_eq!(fired.get(), 1);
/// ```
#[derive(Debug)]
pub struct TapTracker {
    config: TapConfig,
    began_at: BTreeMap<TouchId, f64>,
    current_tap_count: u32,
    touch_is_down: bool,
    time_of_last_tap: f64,
    signal: Signal,
}

impl Default for TapTracker {
    fn default() -> Self {
        Self::new(TapConfig::default())
    }
}

impl TapTracker {
    /// Create a tracker with the given tunables.
    pub fn new(config: TapConfig) -> Self {
        Self {
            config,
            began_at: BTreeMap::new(),
            current_tap_count: 0,
            touch_is_down: false,
            time_of_last_tap: -1.0,
            signal: Signal::new(),
        }
    }

    /// Reset all state. Subscribers stay connected.
    pub fn clear(&mut self) {
        self.began_at.clear();
        self.current_tap_count = 0;
        self.touch_is_down = false;
        self.time_of_last_tap = -1.0;
    }

    /// Note when each touch went down.
    pub fn process_touches_began(&mut self, touches: &[Touch], current_time: f64) {
        for t in touches {
            self.began_at.insert(t.id, current_time);
        }
        if !touches.is_empty() {
            self.touch_is_down = true;
        }
    }

    /// Count taps among the ended touches, firing the signal when enough accumulate.
    pub fn process_touches_ended(&mut self, touches: &[Touch], current_time: f64) {
        for t in touches {
            let Some(began) = self.began_at.remove(&t.id) else {
                trace!("tap tracker: touch {:?} ended without a recorded began", t.id);
                continue;
            };
            if current_time - began <= self.config.max_duration_considered_tap {
                self.register_tap(current_time);
            } else {
                trace!("tap tracker: touch {:?} held too long; count reset", t.id);
                self.current_tap_count = 0;
            }
        }
        if self.began_at.is_empty() {
            self.touch_is_down = false;
        }
    }

    fn register_tap(&mut self, now: f64) {
        let within_window = now - self.time_of_last_tap <= self.config.max_duration_between_taps;
        if self.current_tap_count == 0 || within_window {
            self.current_tap_count += 1;
        } else {
            self.current_tap_count = 1;
        }
        self.time_of_last_tap = now;

        if self.current_tap_count >= self.config.num_taps_required {
            debug!("tap gesture detected ({} taps)", self.current_tap_count);
            self.current_tap_count = 0;
            self.signal.emit();
        }
    }

    /// The notification fired each time the required taps are reached.
    pub fn signal_gesture_detected(&mut self) -> &mut Signal {
        &mut self.signal
    }

    /// Current tunables.
    pub fn config(&self) -> &TapConfig {
        &self.config
    }

    /// Taps needed to fire the gesture.
    pub fn num_taps_required(&self) -> u32 {
        self.config.num_taps_required
    }

    /// Set the taps needed to fire the gesture.
    pub fn set_num_taps_required(&mut self, taps: u32) {
        self.config.num_taps_required = taps;
    }

    /// Longest gap between consecutive taps, in seconds.
    pub fn max_duration_between_taps(&self) -> f64 {
        self.config.max_duration_between_taps
    }

    /// Set the longest gap between consecutive taps, in seconds.
    pub fn set_max_duration_between_taps(&mut self, seconds: f64) {
        self.config.max_duration_between_taps = seconds;
    }

    /// Longest press still counted as a tap, in seconds.
    pub fn max_duration_considered_tap(&self) -> f64 {
        self.config.max_duration_considered_tap
    }

    /// Set the longest press still counted as a tap, in seconds.
    pub fn set_max_duration_considered_tap(&mut self, seconds: f64) {
        self.config.max_duration_considered_tap = seconds;
    }

    /// Taps counted so far in the current sequence.
    pub fn current_tap_count(&self) -> u32 {
        self.current_tap_count
    }

    /// Returns true while a tracked touch is down.
    pub fn is_touch_down(&self) -> bool {
        self.touch_is_down
    }

    /// Time of the last tap, or `-1.0` if none since the last clear.
    pub fn time_of_last_tap(&self) -> f64 {
        self.time_of_last_tap
    }
}
