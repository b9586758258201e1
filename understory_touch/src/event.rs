// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-view touch events.

use alloc::vec::Vec;
use kurbo::{Point, Vec2};

use crate::types::{Touch, TouchId, TouchPhase};

/// The touches of one phase that are delivered to a single view.
///
/// A view receives only the touches that concern it: during began, the unhandled
/// touches inside it; during moved and ended, the touches it captured.
/// Positions stay in world coordinates; use [`TouchEvent::local_position`] or
/// [`TouchEvent::to_local`] for the receiving view's space.
#[derive(Clone, Debug)]
pub struct TouchEvent {
    phase: TouchPhase,
    origin: Vec2,
    touches: Vec<Touch>,
}

impl TouchEvent {
    /// Create an event for a view whose local space starts at `origin` in world space.
    pub fn new(phase: TouchPhase, origin: Vec2, touches: Vec<Touch>) -> Self {
        Self {
            phase,
            origin,
            touches,
        }
    }

    /// Phase of the delivery.
    pub fn phase(&self) -> TouchPhase {
        self.phase
    }

    /// Touches in batch order.
    pub fn touches(&self) -> &[Touch] {
        &self.touches
    }

    /// Mutable touches, to mark individual touches handled.
    pub fn touches_mut(&mut self) -> &mut [Touch] {
        &mut self.touches
    }

    /// The first touch, if any.
    pub fn first(&self) -> Option<&Touch> {
        self.touches.first()
    }

    /// The first touch, mutably.
    pub fn first_mut(&mut self) -> Option<&mut Touch> {
        self.touches.first_mut()
    }

    /// Look up a touch by identifier.
    pub fn get(&self, id: TouchId) -> Option<&Touch> {
        self.touches.iter().find(|t| t.id == id)
    }

    /// Number of touches.
    pub fn len(&self) -> usize {
        self.touches.len()
    }

    /// Returns true if the event carries no touches.
    pub fn is_empty(&self) -> bool {
        self.touches.is_empty()
    }

    /// Mark every touch handled.
    pub fn set_all_handled(&mut self) {
        for t in &mut self.touches {
            t.set_handled();
        }
    }

    /// Number of touches marked handled.
    pub fn handled_count(&self) -> usize {
        self.touches.iter().filter(|t| t.is_handled()).count()
    }

    /// World-space offset of the receiving view's local space.
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Convert a world-space point into the receiving view's local space.
    pub fn to_local(&self, world: Point) -> Point {
        world - self.origin
    }

    /// Position of a touch in the receiving view's local space.
    pub fn local_position(&self, touch: &Touch) -> Point {
        self.to_local(touch.position)
    }

    pub(crate) fn into_touches(self) -> Vec<Touch> {
        self.touches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn local_positions_use_view_origin() {
        let ev = TouchEvent::new(
            TouchPhase::Began,
            Vec2::new(100.0, 50.0),
            vec![Touch::new(TouchId(1), Point::new(110.0, 70.0), 0.0)],
        );
        let t = ev.first().copied().unwrap();
        assert_eq!(ev.local_position(&t), Point::new(10.0, 20.0));
        assert_eq!(ev.origin(), Vec2::new(100.0, 50.0));
        assert_eq!(ev.phase(), TouchPhase::Began);
    }

    #[test]
    fn handled_marks_are_per_touch() {
        let mut ev = TouchEvent::new(
            TouchPhase::Moved,
            Vec2::ZERO,
            vec![
                Touch::new(TouchId(1), Point::ZERO, 0.0),
                Touch::new(TouchId(2), Point::ZERO, 0.0),
            ],
        );
        assert_eq!(ev.handled_count(), 0);
        ev.touches_mut()[1].set_handled();
        assert_eq!(ev.handled_count(), 1);
        assert!(ev.get(TouchId(2)).unwrap().is_handled());
        assert!(!ev.get(TouchId(1)).unwrap().is_handled());
        assert!(ev.get(TouchId(9)).is_none());
        ev.set_all_handled();
        assert_eq!(ev.handled_count(), ev.len());
    }
}
