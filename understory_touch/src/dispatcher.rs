// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher implementation.
//!
//! ## Overview
//!
//! Routes batches of touches through a [`Tree`] of [`TouchView`]s and keeps the
//! capture table mapping each claimed touch to the one view that owns it.
//!
//! ## Began
//!
//! - The tree's pick order is snapshotted once per batch
//!   (see [`Tree::pick_order`](understory_view_tree::Tree::pick_order)).
//! - Before each delivery the candidate is re-resolved against the current tree, so a view
//!   hidden, moved or removed by an earlier handler is judged by its new state.
//! - Each candidate receives, in one [`TouchEvent`], the still-unhandled touches that pass
//!   its clip and its [`TouchView::hit_test`].
//! - Touches the view marks handled (when it returns `true`) are captured and not offered
//!   to any later candidate.
//!
//! ## Moved and ended
//!
//! - Each captured touch goes straight to its owner, without hit testing.
//! - Touches are grouped per owner in order of first appearance in the batch.
//! - Unknown or released touches are ignored.
//! - Owners that were removed from the tree lose their captures silently.
//! - Ended touches leave the capture table and the touch store after delivery.

use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;
use log::{debug, trace};
use understory_view_tree::{NodeId, QueryFilter, Tree};

use crate::event::TouchEvent;
use crate::store::{TouchStore, TouchTrack};
use crate::types::{DispatchConfig, Touch, TouchFrame, TouchId, TouchPhase};
use crate::view::{TouchCx, TouchView};

/// Counts reported by [`Dispatcher::process`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Began touches claimed by a view.
    pub claimed: usize,
    /// Moved touches delivered to their owner.
    pub moved: usize,
    /// Ended touches delivered to their owner.
    pub ended: usize,
}

/// Multi-touch dispatcher with per-touch capture.
///
/// ## Usage
///
/// - Build a [`Tree`] whose payloads implement [`TouchView`].
/// - Each tick, hand the dispatcher the new touches, either phase by phase with
///   [`Dispatcher::touches_began`], [`Dispatcher::touches_moved`] and
///   [`Dispatcher::touches_ended`], or all at once with [`Dispatcher::process`].
/// - Query [`Dispatcher::views_with_touches`] and [`Dispatcher::all_touches_in_window`]
///   for the current state.
///
/// The dispatcher holds only [`NodeId`]s; the tree owns the views.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    captures: BTreeMap<TouchId, NodeId>,
    store: TouchStore,
    // Releases requested by the handler currently running.
    released: Vec<TouchId>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// Create a dispatcher with the default configuration.
    pub fn new() -> Self {
        Self::with_config(DispatchConfig::default())
    }

    /// Create a dispatcher with an explicit configuration.
    pub fn with_config(config: DispatchConfig) -> Self {
        Self {
            captures: BTreeMap::new(),
            store: TouchStore::new(config.history_capacity),
            released: Vec::new(),
        }
    }

    /// Process one tick: began, then moved, then ended.
    ///
    /// Each phase completes before the next one starts, so a touch that begins and
    /// moves within the same tick is captured before its move is delivered.
    pub fn process<V: TouchView>(
        &mut self,
        tree: &mut Tree<V>,
        frame: &mut TouchFrame,
    ) -> FrameReport {
        let claimed = self.touches_began(tree, &mut frame.began);
        let moved = self.touches_moved(tree, &mut frame.moved);
        let ended = self.touches_ended(tree, &mut frame.ended);
        FrameReport {
            claimed,
            moved,
            ended,
        }
    }

    /// Hit test new touches and offer them to views. Returns the number of touches claimed.
    ///
    /// On return, each touch's handled flag tells whether a view captured it.
    pub fn touches_began<V: TouchView>(
        &mut self,
        tree: &mut Tree<V>,
        touches: &mut [Touch],
    ) -> usize {
        for t in touches.iter_mut() {
            t.clear_handled();
            if self.store.begin(t) {
                debug!("touch {:?} began while still active; history restarted", t.id);
            }
            if let Some(stale) = self.captures.remove(&t.id) {
                debug!("touch {:?} began while captured by {stale:?}; capture dropped", t.id);
            }
        }
        if touches.is_empty() {
            return 0;
        }

        let order = tree.pick_order(QueryFilter::INTERACTIVE);
        let mut remaining = touches.len();
        let mut inside: Vec<usize> = Vec::new();
        for snapshot in &order {
            if remaining == 0 {
                break;
            }
            // Earlier handlers may have hidden, moved or removed this candidate.
            let Some(entry) = tree.pick_entry(snapshot.node, QueryFilter::INTERACTIVE) else {
                trace!("candidate {:?} was removed or hidden; skipped", snapshot.node);
                continue;
            };
            // Busy candidates are skipped.
            let Some(view) = tree.payload(entry.node) else {
                continue;
            };
            inside.clear();
            inside.extend(
                touches
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| {
                        !t.is_handled()
                            && entry.clip_contains(t.position)
                            && view.hit_test(entry.to_local(t.position), entry.size)
                    })
                    .map(|(i, _)| i),
            );
            if inside.is_empty() {
                continue;
            }

            let event = TouchEvent::new(
                TouchPhase::Began,
                entry.origin,
                inside.iter().map(|&i| touches[i]).collect(),
            );
            if let Some((true, event)) = self.deliver(tree, entry.node, event) {
                for t in event.into_touches() {
                    if !t.is_handled() {
                        continue;
                    }
                    let Some(&i) = inside.iter().find(|&&i| touches[i].id == t.id) else {
                        continue;
                    };
                    if touches[i].is_handled() {
                        continue;
                    }
                    touches[i].set_handled();
                    self.captures.insert(t.id, entry.node);
                    remaining -= 1;
                }
            }
            self.apply_releases(entry.node);
        }

        touches.iter().filter(|t| self.captures.contains_key(&t.id)).count()
    }

    /// Deliver moved touches to the views that captured them.
    /// Returns the number of touches delivered.
    pub fn touches_moved<V: TouchView>(
        &mut self,
        tree: &mut Tree<V>,
        touches: &mut [Touch],
    ) -> usize {
        for t in touches.iter_mut() {
            t.clear_handled();
            if !self.store.record(t) {
                trace!("moved touch {:?} never began; ignored", t.id);
            }
        }
        self.deliver_captured(tree, touches, TouchPhase::Moved)
    }

    /// Deliver ended touches to the views that captured them, then forget the touches.
    /// Returns the number of touches delivered.
    pub fn touches_ended<V: TouchView>(
        &mut self,
        tree: &mut Tree<V>,
        touches: &mut [Touch],
    ) -> usize {
        for t in touches.iter_mut() {
            t.clear_handled();
            if !self.store.record(t) {
                trace!("ended touch {:?} never began; ignored", t.id);
            }
        }
        let delivered = self.deliver_captured(tree, touches, TouchPhase::Ended);
        for t in touches.iter() {
            self.captures.remove(&t.id);
            self.store.end(t.id);
        }
        delivered
    }

    /// The view that captured a touch.
    pub fn captured_view(&self, id: TouchId) -> Option<NodeId> {
        self.captures.get(&id).copied()
    }

    /// Views that currently own at least one touch, ordered by their lowest touch id.
    pub fn views_with_touches(&self) -> Vec<NodeId> {
        let mut out: Vec<NodeId> = Vec::new();
        for &node in self.captures.values() {
            if !out.contains(&node) {
                out.push(node);
            }
        }
        out
    }

    /// Touches captured by `node`, in id order.
    pub fn touches_owned_by(&self, node: NodeId) -> impl Iterator<Item = TouchId> + '_ {
        self.captures
            .iter()
            .filter(move |&(_, &n)| n == node)
            .map(|(&id, _)| id)
    }

    /// Number of captured touches.
    pub fn captured_len(&self) -> usize {
        self.captures.len()
    }

    /// Latest record of every touch currently down, captured or not, in id order.
    pub fn all_touches_in_window(&self) -> impl Iterator<Item = &Touch> + '_ {
        self.store.touches()
    }

    /// Recent samples of an active touch.
    pub fn touch_history(&self, id: TouchId) -> Option<&TouchTrack> {
        self.store.get(id)
    }

    /// The touch point store.
    pub fn store(&self) -> &TouchStore {
        &self.store
    }

    /// Release a touch from its owner. Later events for it are ignored until it ends.
    ///
    /// Returns the view that owned it.
    pub fn release_touch(&mut self, id: TouchId) -> Option<NodeId> {
        let owner = self.captures.remove(&id);
        if let Some(node) = owner {
            trace!("touch {id:?} released from {node:?}");
        }
        owner
    }

    /// Drop captures held by views that are no longer in `tree`.
    /// Returns the number of captures dropped.
    pub fn purge_removed<V>(&mut self, tree: &Tree<V>) -> usize {
        let before = self.captures.len();
        self.captures.retain(|id, node| {
            let alive = tree.is_alive(*node);
            if !alive {
                debug!("touch {id:?} owner {node:?} was removed; capture dropped");
            }
            alive
        });
        before - self.captures.len()
    }

    /// Forget every touch and capture.
    pub fn reset(&mut self) {
        self.captures.clear();
        self.store.clear();
        self.released.clear();
    }

    // --- internals ---

    fn deliver<V: TouchView>(
        &mut self,
        tree: &mut Tree<V>,
        node: NodeId,
        mut event: TouchEvent,
    ) -> Option<(bool, TouchEvent)> {
        let released = &mut self.released;
        let handled = tree.with_payload_detached(node, |tree, view| {
            let mut cx = TouchCx::new(tree, node, released);
            match event.phase() {
                TouchPhase::Began => view.touches_began(&mut cx, &mut event),
                TouchPhase::Moved => view.touches_moved(&mut cx, &mut event),
                TouchPhase::Ended => view.touches_ended(&mut cx, &mut event),
            }
        })?;
        Some((handled, event))
    }

    fn deliver_captured<V: TouchView>(
        &mut self,
        tree: &mut Tree<V>,
        touches: &mut [Touch],
        phase: TouchPhase,
    ) -> usize {
        // Snapshot of owners for this phase, in first-appearance order.
        let mut groups: Vec<(NodeId, Vec<usize>)> = Vec::new();
        for (i, t) in touches.iter().enumerate() {
            let Some(&node) = self.captures.get(&t.id) else {
                trace!("{phase:?} for uncaptured touch {:?} ignored", t.id);
                continue;
            };
            match groups.iter_mut().find(|(n, _)| *n == node) {
                Some((_, idxs)) => idxs.push(i),
                None => groups.push((node, vec![i])),
            }
        }

        let mut delivered = 0;
        for (node, idxs) in groups {
            // An earlier handler in this phase may have released some of them.
            let idxs: Vec<usize> = idxs
                .into_iter()
                .filter(|&i| self.captures.get(&touches[i].id) == Some(&node))
                .collect();
            if idxs.is_empty() {
                continue;
            }
            let Some(origin) = tree.world_origin(node) else {
                self.drop_removed_owner(node, touches, &idxs);
                continue;
            };
            let event = TouchEvent::new(phase, origin, idxs.iter().map(|&i| touches[i]).collect());
            match self.deliver(tree, node, event) {
                Some((handled, event)) => {
                    delivered += idxs.len();
                    if handled {
                        for t in event.touches().iter().filter(|t| t.is_handled()) {
                            if let Some(&i) = idxs.iter().find(|&&i| touches[i].id == t.id) {
                                touches[i].set_handled();
                            }
                        }
                    }
                }
                None if !tree.is_alive(node) => self.drop_removed_owner(node, touches, &idxs),
                None => debug!("view {node:?} is already handling touches; {phase:?} skipped"),
            }
            self.apply_releases(node);
        }
        delivered
    }

    fn drop_removed_owner(&mut self, node: NodeId, touches: &[Touch], idxs: &[usize]) {
        debug!(
            "view {node:?} was removed; dropping {} captured touch(es)",
            idxs.len()
        );
        for &i in idxs {
            self.captures.remove(&touches[i].id);
        }
    }

    fn apply_releases(&mut self, node: NodeId) {
        for id in self.released.drain(..) {
            if self.captures.get(&id) == Some(&node) {
                self.captures.remove(&id);
                trace!("touch {id:?} released by {node:?}");
            } else {
                trace!("touch {id:?} release by {node:?} ignored; not its owner");
            }
        }
    }
}
