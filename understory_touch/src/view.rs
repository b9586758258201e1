// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The capability interface views implement to take part in touch dispatch.
//!
//! ## Overview
//!
//! The dispatcher only knows views through [`TouchView`]: a hit-test predicate and one
//! handler per phase. Concrete view kinds are typically variants of an enum stored as
//! the [`Tree`] payload, so the set of behaviors is closed and dispatch is a `match`.
//!
//! Handlers receive a [`TouchCx`] giving mutable access to the tree while their own
//! payload is lent out. They may move, hide, or remove views (themselves included);
//! the dispatcher skips candidates that disappear mid-phase.

use alloc::vec::Vec;
use kurbo::{Point, Rect, Size, Vec2};
use understory_view_tree::{NodeId, Tree};

use crate::event::TouchEvent;
use crate::types::TouchId;

/// Touch capabilities of a view.
///
/// All handlers default to declining every touch. Return `true` from a handler to
/// report that it handled touches; only touches individually marked with
/// [`Touch::set_handled`](crate::types::Touch::set_handled) are claimed, and only
/// when the handler returns `true`.
pub trait TouchView: Sized {
    /// Returns true if `local` (in the view's own space) is inside the view.
    ///
    /// The default accepts points inside the view's bounds.
    fn hit_test(&self, local: Point, size: Size) -> bool {
        Rect::from_origin_size(Point::ZERO, size).contains(local)
    }

    /// New touches inside the view that nothing above it claimed.
    ///
    /// Marking a touch handled captures it: the view then receives every later
    /// moved and ended event for that touch, wherever the finger goes.
    fn touches_began(&mut self, cx: &mut TouchCx<'_, Self>, event: &mut TouchEvent) -> bool {
        let _ = (cx, event);
        false
    }

    /// Captured touches moved.
    fn touches_moved(&mut self, cx: &mut TouchCx<'_, Self>, event: &mut TouchEvent) -> bool {
        let _ = (cx, event);
        false
    }

    /// Captured touches ended. Their capture is dropped after this call.
    fn touches_ended(&mut self, cx: &mut TouchCx<'_, Self>, event: &mut TouchEvent) -> bool {
        let _ = (cx, event);
        false
    }
}

/// Context handed to [`TouchView`] handlers.
pub struct TouchCx<'a, V> {
    tree: &'a mut Tree<V>,
    node: NodeId,
    released: &'a mut Vec<TouchId>,
}

impl<V> core::fmt::Debug for TouchCx<'_, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TouchCx")
            .field("node", &self.node)
            .field("released", &self.released)
            .finish_non_exhaustive()
    }
}

impl<'a, V> TouchCx<'a, V> {
    pub(crate) fn new(tree: &'a mut Tree<V>, node: NodeId, released: &'a mut Vec<TouchId>) -> Self {
        Self {
            tree,
            node,
            released,
        }
    }

    /// The view being called.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The view tree. The calling view's own payload is absent while it runs.
    pub fn tree(&self) -> &Tree<V> {
        &*self.tree
    }

    /// Mutable view tree.
    pub fn tree_mut(&mut self) -> &mut Tree<V> {
        &mut *self.tree
    }

    /// Bounds of the calling view in its parent's space.
    pub fn bounds(&self) -> Rect {
        self.tree.bounds(self.node).unwrap_or(Rect::ZERO)
    }

    /// Move or resize the calling view.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.tree.set_bounds(self.node, bounds);
    }

    /// Translate the calling view by `delta` in its parent's space.
    pub fn translate(&mut self, delta: Vec2) {
        let bounds = self.bounds();
        self.set_bounds(bounds + delta);
    }

    /// World-space offset of the calling view's local space.
    pub fn world_origin(&self) -> Vec2 {
        self.tree.world_origin(self.node).unwrap_or(Vec2::ZERO)
    }

    /// Give up a touch this view captured.
    ///
    /// Takes effect when the handler returns; later events for the touch are then
    /// ignored. Requests for touches owned by other views are ignored.
    pub fn release_touch(&mut self, id: TouchId) {
        if !self.released.contains(&id) {
            self.released.push(id);
        }
    }
}
