// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_touch --heading-base-level=0

//! Understory Touch: deterministic, `no_std` multi-touch dispatch over a view tree.
//!
//! ## Overview
//!
//! This crate routes batches of touches to the views of an
//! [`understory_view_tree::Tree`] whose payloads implement [`TouchView`](crate::view::TouchView).
//! Each touch is owned by at most one view at a time:
//!
//! - A new touch is hit tested and offered to views in pick order, topmost first and
//!   descendants before ancestors.
//! - The first view that marks it handled (and returns `true`) captures it.
//! - Every later moved and ended event for that touch goes straight to the capturing view,
//!   even when the finger leaves the view's bounds.
//!
//! ## Inputs
//!
//! Once per tick, hand the [`Dispatcher`](crate::dispatcher::Dispatcher) the touches of each
//! phase, either as a [`TouchFrame`](crate::types::TouchFrame) or phase by phase. Phases are
//! processed began, then moved, then ended, and each completes before the next starts.
//!
//! ## Handlers
//!
//! Handlers receive the touches that concern them grouped into one
//! [`TouchEvent`](crate::event::TouchEvent), plus a [`TouchCx`](crate::view::TouchCx) with
//! mutable access to the tree. A handler may move, hide, or remove views, itself included.
//! Captures held by removed views are dropped silently.
//!
//! ## Touch store
//!
//! The dispatcher records the latest state and a short history of every touch currently
//! down, captured or not; see [`TouchStore`](crate::store::TouchStore).
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Rect, Vec2};
//! use understory_touch::dispatcher::Dispatcher;
//! use understory_touch::event::TouchEvent;
//! use understory_touch::types::{Touch, TouchFrame, TouchId, TouchPhase};
//! use understory_touch::view::{TouchCx, TouchView};
//! use understory_view_tree::{LocalNode, Tree};
//!
//! /// Follows the first touch that lands on it.
//! struct Draggable;
//!
//! impl TouchView for Draggable {
//!     fn touches_began(&mut self, _cx: &mut TouchCx<'_, Self>, event: &mut TouchEvent) -> bool {
//!         match event.first_mut() {
//!             Some(touch) => {
//!                 touch.set_handled();
//!                 true
//!             }
//!             None => false,
//!         }
//!     }
//!
//!     fn touches_moved(&mut self, cx: &mut TouchCx<'_, Self>, event: &mut TouchEvent) -> bool {
//!         for touch in event.touches() {
//!             if let Some(prev) = touch.previous_position {
//!                 cx.translate(touch.position - prev);
//!             }
//!         }
//!         true
//!     }
//! }
//!
//! let mut tree = Tree::new();
//! let square = tree.insert(None, LocalNode::with_bounds(Rect::new(0.0, 0.0, 50.0, 50.0)), Draggable);
//! let mut dispatcher = Dispatcher::new();
//!
//! let mut frame = TouchFrame::new();
//! frame.push(TouchPhase::Began, Touch::new(TouchId(1), Point::new(10.0, 10.0), 0.0));
//! frame.push(TouchPhase::Moved, Touch::new(TouchId(1), Point::new(110.0, 10.0), 0.016));
//! dispatcher.process(&mut tree, &mut frame);
//!
//! assert_eq!(dispatcher.captured_view(TouchId(1)), Some(square));
//! assert_eq!(tree.world_origin(square), Some(Vec2::new(100.0, 0.0)));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod dispatcher;
pub mod event;
pub mod store;
pub mod types;
pub mod view;
