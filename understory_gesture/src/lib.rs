// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_gesture --heading-base-level=0

//! Understory Gesture: tap and swipe trackers for touch-driven views.
//!
//! ## Overview
//!
//! Gesture trackers sit on top of touch dispatch: a view that captured touches feeds
//! them from its own handlers, and the tracker turns the stream into a gesture.
//!
//! - [`SwipeTracker`](crate::swipe::SwipeTracker): velocity over the last few samples and
//!   distance over the whole gesture.
//! - [`TapTracker`](crate::tap::TapTracker): counts consecutive short taps and fires a
//!   [`Signal`](crate::signal::Signal) when enough of them happen in quick succession.
//!
//! Tunables live in [`TapConfig`](crate::config::TapConfig) and
//! [`SwipeConfig`](crate::config::SwipeConfig). Their `validate` methods report out of
//! range values; the trackers themselves accept any value.
//!
//! ## Driving a tracker from a view
//!
//! ```
//! use understory_gesture::tap::TapTracker;
//! use understory_touch::event::TouchEvent;
//! use understory_touch::view::{TouchCx, TouchView};
//!
//! struct DoubleTapButton {
//!     taps: TapTracker,
//! }
//!
//! impl TouchView for DoubleTapButton {
//!     fn touches_began(&mut self, _cx: &mut TouchCx<'_, Self>, event: &mut TouchEvent) -> bool {
//!         let now = event.first().map_or(0.0, |t| t.timestamp);
//!         self.taps.process_touches_began(event.touches(), now);
//!         event.set_all_handled();
//!         true
//!     }
//!
//!     fn touches_ended(&mut self, _cx: &mut TouchCx<'_, Self>, event: &mut TouchEvent) -> bool {
//!         let now = event.first().map_or(0.0, |t| t.timestamp);
//!         self.taps.process_touches_ended(event.touches(), now);
//!         true
//!     }
//! }
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod signal;
pub mod swipe;
pub mod tap;
