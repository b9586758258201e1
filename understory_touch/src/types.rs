// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for touch dispatch: identifiers, phases, touch records, and frames.
//!
//! ## Overview
//!
//! These types describe what the host input layer hands to the
//! [`Dispatcher`](crate::dispatcher::Dispatcher) once per tick.
//! They are also what views see inside a [`TouchEvent`](crate::event::TouchEvent).

use alloc::vec::Vec;
use kurbo::Point;

/// Identifier of one continuous touch, stable from began to ended.
///
/// Identifiers are unique among concurrently active touches.
/// The input source may recycle an identifier after its ended event.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TouchId(pub u32);

/// Phases of a touch's lifecycle.
///
/// Within one tick the dispatcher processes the phases in declaration order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum TouchPhase {
    /// A finger went down.
    Began,
    /// A finger that is down moved.
    Moved,
    /// A finger was lifted.
    Ended,
}

/// A single touch record.
///
/// The `handled` flag is only meaningful for the batch currently being dispatched:
/// the dispatcher clears it at the start of every phase, and a view sets it on the
/// touches it takes responsibility for.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Touch {
    /// Identifier of the touch.
    pub id: TouchId,
    /// Current position in world (window) coordinates.
    pub position: Point,
    /// Position at the previous sample, if known.
    ///
    /// When absent on a moved or ended touch, the dispatcher fills it in from the
    /// touch's recorded history.
    pub previous_position: Option<Point>,
    /// Event time in seconds.
    pub timestamp: f64,
    handled: bool,
}

impl Touch {
    /// Create an unhandled touch without a previous position.
    pub fn new(id: TouchId, position: Point, timestamp: f64) -> Self {
        Self {
            id,
            position,
            previous_position: None,
            timestamp,
            handled: false,
        }
    }

    /// Set the previous position.
    pub fn with_previous(mut self, previous: Point) -> Self {
        self.previous_position = Some(previous);
        self
    }

    /// Returns true if a view has marked this touch handled in the current phase.
    pub fn is_handled(&self) -> bool {
        self.handled
    }

    /// Mark this touch handled, stopping its propagation for the current phase.
    pub fn set_handled(&mut self) {
        self.handled = true;
    }

    pub(crate) fn clear_handled(&mut self) {
        self.handled = false;
    }
}

/// All touches reported by the input layer for one tick, grouped by phase.
///
/// Pass it to [`Dispatcher::process`](crate::dispatcher::Dispatcher::process), which
/// delivers `began`, then `moved`, then `ended`.
#[derive(Clone, Debug, Default)]
pub struct TouchFrame {
    /// Touches that started this tick.
    pub began: Vec<Touch>,
    /// Touches that moved this tick.
    pub moved: Vec<Touch>,
    /// Touches that ended this tick.
    pub ended: Vec<Touch>,
}

impl TouchFrame {
    /// Create an empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a touch to the given phase.
    pub fn push(&mut self, phase: TouchPhase, touch: Touch) {
        self.phase_mut(phase).push(touch);
    }

    /// Touches of one phase.
    pub fn phase(&self, phase: TouchPhase) -> &[Touch] {
        match phase {
            TouchPhase::Began => &self.began,
            TouchPhase::Moved => &self.moved,
            TouchPhase::Ended => &self.ended,
        }
    }

    /// Mutable touches of one phase.
    pub fn phase_mut(&mut self, phase: TouchPhase) -> &mut Vec<Touch> {
        match phase {
            TouchPhase::Began => &mut self.began,
            TouchPhase::Moved => &mut self.moved,
            TouchPhase::Ended => &mut self.ended,
        }
    }

    /// Total number of touches across all phases.
    pub fn len(&self) -> usize {
        self.began.len() + self.moved.len() + self.ended.len()
    }

    /// Returns true if no phase has any touch.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all touches, keeping allocations.
    pub fn clear(&mut self) {
        self.began.clear();
        self.moved.clear();
        self.ended.clear();
    }
}

/// Configuration of a [`Dispatcher`](crate::dispatcher::Dispatcher).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Number of samples kept per active touch in the touch store.
    pub history_capacity: usize,
}

/// Default number of samples kept per active touch.
pub const DEFAULT_TOUCH_HISTORY_CAPACITY: usize = 10;

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_TOUCH_HISTORY_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_are_ordered_began_moved_ended() {
        assert!(TouchPhase::Began < TouchPhase::Moved);
        assert!(TouchPhase::Moved < TouchPhase::Ended);
    }

    #[test]
    fn handled_flag_round_trip() {
        let mut t = Touch::new(TouchId(3), Point::new(1.0, 2.0), 0.5);
        assert!(!t.is_handled());
        t.set_handled();
        assert!(t.is_handled());
        t.clear_handled();
        assert!(!t.is_handled());
        assert_eq!(t.previous_position, None);
        let t = t.with_previous(Point::ZERO);
        assert_eq!(t.previous_position, Some(Point::ZERO));
    }

    #[test]
    fn frame_groups_by_phase() {
        let mut frame = TouchFrame::new();
        assert!(frame.is_empty());
        frame.push(TouchPhase::Ended, Touch::new(TouchId(1), Point::ZERO, 0.0));
        frame.push(TouchPhase::Began, Touch::new(TouchId(2), Point::ZERO, 0.0));
        frame.push(TouchPhase::Began, Touch::new(TouchId(3), Point::ZERO, 0.0));
        assert_eq!(frame.len(), 3);
        assert_eq!(frame.phase(TouchPhase::Began).len(), 2);
        assert_eq!(frame.phase(TouchPhase::Moved).len(), 0);
        assert_eq!(frame.phase(TouchPhase::Ended)[0].id, TouchId(1));
        frame.clear();
        assert!(frame.is_empty());
    }
}
