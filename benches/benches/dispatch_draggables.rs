// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_touch::dispatcher::Dispatcher;
use understory_touch::event::TouchEvent;
use understory_touch::types::{Touch, TouchFrame, TouchId, TouchPhase};
use understory_touch::view::{TouchCx, TouchView};
use understory_view_tree::{LocalNode, QueryFilter, Tree};

const WINDOW_W: f64 = 1280.0;
const WINDOW_H: f64 = 800.0;
const VIEW_SIZE: f64 = 60.0;
const NUM_VIEWS: usize = 1000;
const NUM_TOUCHES: u32 = 32;

/// Claims the first touch that lands on it and follows it.
struct Draggable;

impl TouchView for Draggable {
    fn touches_began(&mut self, _cx: &mut TouchCx<'_, Self>, event: &mut TouchEvent) -> bool {
        match event.first_mut() {
            Some(t) => {
                t.set_handled();
                true
            }
            None => false,
        }
    }

    fn touches_moved(&mut self, cx: &mut TouchCx<'_, Self>, event: &mut TouchEvent) -> bool {
        if let Some(t) = event.first() {
            if let Some(prev) = t.previous_position {
                cx.translate(t.position - prev);
            }
        }
        true
    }

    fn touches_ended(&mut self, _cx: &mut TouchCx<'_, Self>, _event: &mut TouchEvent) -> bool {
        true
    }
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_scene(count: usize) -> Tree<Draggable> {
    let mut tree = Tree::new();
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for _ in 0..count {
        let x0 = rng.next_f64() * (WINDOW_W - VIEW_SIZE);
        let y0 = rng.next_f64() * (WINDOW_H - VIEW_SIZE);
        let local = LocalNode::with_bounds(Rect::new(x0, y0, x0 + VIEW_SIZE, y0 + VIEW_SIZE));
        tree.insert(None, local, Draggable);
    }
    tree
}

fn gen_touches(count: u32, rng: &mut Rng, time: f64) -> Vec<Touch> {
    (0..count)
        .map(|i| {
            let pos = Point::new(rng.next_f64() * WINDOW_W, rng.next_f64() * WINDOW_H);
            Touch::new(TouchId(i), pos, time)
        })
        .collect()
}

fn jitter(touches: &[Touch], rng: &mut Rng, time: f64) -> Vec<Touch> {
    touches
        .iter()
        .map(|t| {
            let d = kurbo::Vec2::new(rng.next_f64() * 8.0 - 4.0, rng.next_f64() * 8.0 - 4.0);
            Touch::new(t.id, t.position + d, time)
        })
        .collect()
}

fn bench_pick_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("pick_order");
    for &n in &[100usize, NUM_VIEWS, 4 * NUM_VIEWS] {
        let tree = gen_scene(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("flat_n{}", n), |b| {
            b.iter(|| black_box(tree.pick_order(QueryFilter::INTERACTIVE).len()));
        });
    }
    group.finish();
}

fn bench_began(c: &mut Criterion) {
    let mut group = c.benchmark_group("began");
    group.throughput(Throughput::Elements(u64::from(NUM_TOUCHES)));
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    let touches = gen_touches(NUM_TOUCHES, &mut rng, 0.0);
    group.bench_function("views1000_touches32", |b| {
        b.iter_batched(
            || (gen_scene(NUM_VIEWS), Dispatcher::new(), touches.clone()),
            |(mut tree, mut dispatcher, mut began)| {
                black_box(dispatcher.touches_began(&mut tree, &mut began));
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_moved(c: &mut Criterion) {
    let mut group = c.benchmark_group("moved");
    group.throughput(Throughput::Elements(u64::from(NUM_TOUCHES)));
    let mut tree = gen_scene(NUM_VIEWS);
    let mut dispatcher = Dispatcher::new();
    let mut rng = Rng::new(0xFACE_FEED_CAFE_BABE);
    let mut began = gen_touches(NUM_TOUCHES, &mut rng, 0.0);
    dispatcher.touches_began(&mut tree, &mut began);
    let mut current = began;
    let mut time = 0.0;
    group.bench_function("views1000_touches32", |b| {
        b.iter(|| {
            time += 1.0 / 60.0;
            let mut moved = jitter(&current, &mut rng, time);
            black_box(dispatcher.touches_moved(&mut tree, &mut moved));
            current = moved;
        });
    });
    group.finish();
}

fn bench_gesture(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture");
    const FRAMES: u32 = 60;
    group.throughput(Throughput::Elements(u64::from(NUM_TOUCHES * (FRAMES + 2))));
    group.bench_function("views1000_touches32_frames60", |b| {
        b.iter_batched(
            || (gen_scene(NUM_VIEWS), Dispatcher::new(), Rng::new(0xC1A5_7E55_9999_ABCD)),
            |(mut tree, mut dispatcher, mut rng)| {
                let mut frame = TouchFrame::new();
                frame.began = gen_touches(NUM_TOUCHES, &mut rng, 0.0);
                let mut current = frame.began.clone();
                dispatcher.process(&mut tree, &mut frame);
                for i in 1..=FRAMES {
                    frame.clear();
                    frame.moved = jitter(&current, &mut rng, f64::from(i) / 60.0);
                    current = frame.moved.clone();
                    dispatcher.process(&mut tree, &mut frame);
                }
                frame.clear();
                for t in current {
                    frame.push(TouchPhase::Ended, t);
                }
                black_box(dispatcher.process(&mut tree, &mut frame));
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_pick_order, bench_began, bench_moved, bench_gesture);
criterion_main!(benches);
