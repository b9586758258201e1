// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multi-touch draggables over a scrolling panel.
//!
//! Three squares each follow the first finger that lands on them. A panel behind
//! them takes every other finger. The demo replays a few ticks of synthetic touches
//! and prints who owns what after each tick.
//!
//! Run:
//! - `cargo run -p understory_demos --example multi_touch_draggables`

use kurbo::{Point, Rect};
use understory_touch::dispatcher::Dispatcher;
use understory_touch::event::TouchEvent;
use understory_touch::types::{Touch, TouchFrame, TouchId, TouchPhase};
use understory_touch::view::{TouchCx, TouchView};
use understory_view_tree::{LocalNode, NodeId, Tree};

enum View {
    Panel { name: &'static str, fingers: usize },
    Draggable { name: &'static str },
}

impl View {
    fn name(&self) -> &'static str {
        match self {
            Self::Panel { name, .. } | Self::Draggable { name } => *name,
        }
    }
}

impl TouchView for View {
    fn touches_began(&mut self, _cx: &mut TouchCx<'_, Self>, event: &mut TouchEvent) -> bool {
        match self {
            Self::Panel { fingers, .. } => {
                *fingers += event.len();
                event.set_all_handled();
                true
            }
            Self::Draggable { .. } => match event.first_mut() {
                Some(t) => {
                    t.set_handled();
                    true
                }
                None => false,
            },
        }
    }

    fn touches_moved(&mut self, cx: &mut TouchCx<'_, Self>, event: &mut TouchEvent) -> bool {
        if let Self::Draggable { .. } = self {
            for t in event.touches() {
                if let Some(prev) = t.previous_position {
                    cx.translate(t.position - prev);
                }
            }
        }
        true
    }

    fn touches_ended(&mut self, _cx: &mut TouchCx<'_, Self>, event: &mut TouchEvent) -> bool {
        if let Self::Panel { fingers, .. } = self {
            *fingers -= event.len();
        }
        true
    }
}

fn describe(tree: &Tree<View>, dispatcher: &Dispatcher, tick: u32) {
    println!("-- tick {tick}");
    for node in dispatcher.views_with_touches() {
        let name = tree.payload(node).map_or("?", View::name);
        let ids: Vec<u32> = dispatcher.touches_owned_by(node).map(|t| t.0).collect();
        let at = tree.world_bounds(node).unwrap_or(Rect::ZERO);
        println!("  {name:<8} touches={ids:?} at ({:.0}, {:.0})", at.x0, at.y0);
    }
    for t in dispatcher.all_touches_in_window() {
        println!("  touch {} at ({:.0}, {:.0})", t.id.0, t.position.x, t.position.y);
    }
}

fn square(tree: &mut Tree<View>, parent: NodeId, x: f64, y: f64, name: &'static str) -> NodeId {
    tree.insert(
        Some(parent),
        LocalNode::with_bounds(Rect::new(x, y, x + 80.0, y + 80.0)),
        View::Draggable { name },
    )
}

fn main() {
    let mut tree = Tree::new();
    let panel = tree.insert(
        None,
        LocalNode::with_bounds(Rect::new(0.0, 0.0, 640.0, 480.0)),
        View::Panel {
            name: "panel",
            fingers: 0,
        },
    );
    square(&mut tree, panel, 40.0, 40.0, "red");
    square(&mut tree, panel, 100.0, 60.0, "green");
    square(&mut tree, panel, 300.0, 200.0, "blue");

    let mut dispatcher = Dispatcher::new();
    let touch = |id, x, y, time| Touch::new(TouchId(id), Point::new(x, y), time);

    // Tick 0: one finger on the red/green overlap (green is on top), one on blue,
    // one on empty panel.
    let mut frame = TouchFrame::new();
    frame.push(TouchPhase::Began, touch(1, 110.0, 70.0, 0.0));
    frame.push(TouchPhase::Began, touch(2, 320.0, 220.0, 0.0));
    frame.push(TouchPhase::Began, touch(3, 500.0, 400.0, 0.0));
    dispatcher.process(&mut tree, &mut frame);
    describe(&tree, &dispatcher, 0);

    // Ticks 1..=3: drag green right and blue down. Capture holds even past the squares.
    for tick in 1_u32..=3 {
        let step = f64::from(tick) * 40.0;
        let time = f64::from(tick) / 60.0;
        frame.clear();
        frame.push(TouchPhase::Moved, touch(1, 110.0 + step, 70.0, time));
        frame.push(TouchPhase::Moved, touch(2, 320.0, 220.0 + step, time));
        frame.push(TouchPhase::Moved, touch(3, 500.0 - step, 400.0, time));
        dispatcher.process(&mut tree, &mut frame);
        describe(&tree, &dispatcher, tick);
    }

    // Tick 4: lift every finger.
    frame.clear();
    for id in 1..=3 {
        let last = dispatcher
            .touch_history(TouchId(id))
            .map(|h| *h.latest())
            .unwrap_or_else(|| touch(id, 0.0, 0.0, 0.0));
        frame.push(TouchPhase::Ended, Touch::new(last.id, last.position, 4.0 / 60.0));
    }
    let report = dispatcher.process(&mut tree, &mut frame);
    describe(&tree, &dispatcher, 4);
    println!("last tick: {report:?}");
    if let Some(View::Panel { fingers, .. }) = tree.payload(panel) {
        println!("fingers left on panel: {fingers}");
    }
}
