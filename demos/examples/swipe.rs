// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swipe velocity and distance on a carousel view.
//!
//! The carousel records every sample of the touch it captured. On release it prints
//! the gesture's total distance and the velocity over the most recent samples.
//!
//! Run:
//! - `cargo run -p understory_demos --example swipe`

use kurbo::{Point, Rect};
use understory_gesture::config::SwipeConfig;
use understory_gesture::swipe::SwipeTracker;
use understory_touch::dispatcher::Dispatcher;
use understory_touch::event::TouchEvent;
use understory_touch::types::{Touch, TouchFrame, TouchId, TouchPhase};
use understory_touch::view::{TouchCx, TouchView};
use understory_view_tree::{LocalNode, Tree};

struct Carousel {
    swipe: SwipeTracker,
}

impl TouchView for Carousel {
    fn touches_began(&mut self, _cx: &mut TouchCx<'_, Self>, event: &mut TouchEvent) -> bool {
        let Some(t) = event.first_mut() else {
            return false;
        };
        t.set_handled();
        self.swipe.clear();
        self.swipe.store_touch(t);
        true
    }

    fn touches_moved(&mut self, _cx: &mut TouchCx<'_, Self>, event: &mut TouchEvent) -> bool {
        for t in event.touches() {
            self.swipe.store_touch(t);
        }
        true
    }

    fn touches_ended(&mut self, _cx: &mut TouchCx<'_, Self>, event: &mut TouchEvent) -> bool {
        for t in event.touches() {
            self.swipe.store_touch(t);
        }
        let d = self.swipe.calc_swipe_distance();
        let v = self.swipe.calc_swipe_velocity();
        println!(
            "swipe from ({:.0}, {:.0}) over {:.2}s: distance ({:.0}, {:.0}), velocity ({:.0}, {:.0}) px/s from {} samples",
            self.swipe.first_touch_pos().x,
            self.swipe.first_touch_pos().y,
            self.swipe.last_touch_time() - self.swipe.first_touch_time(),
            d.x,
            d.y,
            v.x,
            v.y,
            self.swipe.num_stored_touches(),
        );
        true
    }
}

fn main() {
    let mut tree = Tree::new();
    tree.insert(
        None,
        LocalNode::with_bounds(Rect::new(0.0, 0.0, 800.0, 200.0)),
        Carousel {
            swipe: SwipeTracker::new(SwipeConfig::default()),
        },
    );
    let mut dispatcher = Dispatcher::new();
    let mut frame = TouchFrame::new();

    // A leftward flick that accelerates, sampled at 60 Hz; it leaves the carousel's
    // bounds before lifting.
    let id = TouchId(7);
    let mut x = 700.0;
    frame.push(TouchPhase::Began, Touch::new(id, Point::new(x, 100.0), 0.0));
    dispatcher.process(&mut tree, &mut frame);
    for i in 1..=20 {
        frame.clear();
        x -= 4.0 * f64::from(i);
        let time = f64::from(i) / 60.0;
        frame.push(TouchPhase::Moved, Touch::new(id, Point::new(x, 100.0 + f64::from(i)), time));
        dispatcher.process(&mut tree, &mut frame);
    }
    frame.clear();
    frame.push(TouchPhase::Ended, Touch::new(id, Point::new(x, 120.0), 21.0 / 60.0));
    dispatcher.process(&mut tree, &mut frame);
}
