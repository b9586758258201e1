// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Double tap on a button view.
//!
//! The button feeds its captured touches to a `TapTracker`; a subscriber counts the
//! detected gestures. Three scenarios are replayed: a quick double tap, two taps
//! too far apart, and a tap followed by a long press.
//!
//! Run:
//! - `cargo run -p understory_demos --example double_tap`

use std::cell::Cell;
use std::rc::Rc;

use kurbo::{Point, Rect};
use understory_gesture::config::TapConfig;
use understory_gesture::tap::TapTracker;
use understory_touch::dispatcher::Dispatcher;
use understory_touch::event::TouchEvent;
use understory_touch::types::{Touch, TouchId};
use understory_touch::view::{TouchCx, TouchView};
use understory_view_tree::{LocalNode, NodeId, Tree};

struct TapButton {
    taps: TapTracker,
}

fn event_time(event: &TouchEvent) -> f64 {
    event.first().map_or(0.0, |t| t.timestamp)
}

impl TouchView for TapButton {
    fn touches_began(&mut self, _cx: &mut TouchCx<'_, Self>, event: &mut TouchEvent) -> bool {
        self.taps.process_touches_began(event.touches(), event_time(event));
        event.set_all_handled();
        true
    }

    fn touches_ended(&mut self, _cx: &mut TouchCx<'_, Self>, event: &mut TouchEvent) -> bool {
        self.taps.process_touches_ended(event.touches(), event_time(event));
        true
    }
}

fn press(tree: &mut Tree<TapButton>, dispatcher: &mut Dispatcher, down: f64, up: f64) {
    let at = Point::new(50.0, 20.0);
    dispatcher.touches_began(tree, &mut [Touch::new(TouchId(1), at, down)]);
    dispatcher.touches_ended(tree, &mut [Touch::new(TouchId(1), at, up)]);
}

fn run(name: &str, presses: &[(f64, f64)]) {
    let config = TapConfig::default();
    if let Err(err) = config.validate() {
        eprintln!("bad tap config: {err}");
        return;
    }
    let mut taps = TapTracker::new(config);
    let detected = Rc::new(Cell::new(0));
    {
        let detected = detected.clone();
        taps.signal_gesture_detected()
            .connect(move || detected.set(detected.get() + 1));
    }

    let mut tree = Tree::new();
    let button: NodeId = tree.insert(
        None,
        LocalNode::with_bounds(Rect::new(0.0, 0.0, 120.0, 40.0)),
        TapButton { taps },
    );
    let mut dispatcher = Dispatcher::new();
    for &(down, up) in presses {
        press(&mut tree, &mut dispatcher, down, up);
    }

    let count = tree
        .payload(button)
        .map_or(0, |b| b.taps.current_tap_count());
    println!(
        "{name:<20} detected={} pending taps={count}",
        detected.get()
    );
}

fn main() {
    run("quick double tap", &[(0.00, 0.05), (0.10, 0.15)]);
    run("taps too far apart", &[(0.00, 0.05), (0.50, 0.55)]);
    run("tap then long press", &[(0.00, 0.05), (0.10, 0.60)]);
}
