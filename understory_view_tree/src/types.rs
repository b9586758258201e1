// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the view tree: node identifiers, flags, local geometry, and pick entries.

use kurbo::{Point, Rect, Size, Vec2};

/// Identifier for a view in the tree.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// ### Liveness
///
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check whether a `NodeId` still refers to a live node.
/// Stale `NodeId`s never alias a different live node because the generation must match.
/// Holders of a `NodeId` (for example a touch dispatcher's capture table) therefore never
/// keep a removed view alive and never reach a different view through a stale handle.
///
/// ### Notes
///
/// - The generation increments on slot reuse and never decreases.
/// - `u32` is ample for practical lifetimes; behavior on generation overflow is unspecified.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Node flags controlling visibility, picking, and clipping.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is visible. A node without this flag hides its whole subtree from picking.
        const VISIBLE        = 0b0000_0001;
        /// Node is pickable (is offered touches itself). Children are unaffected.
        const PICKABLE       = 0b0000_0010;
        /// Descendants only receive points that fall inside this node's bounds.
        const CLIPS_CHILDREN = 0b0000_0100;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// Local geometry for a node.
#[derive(Clone, Debug)]
pub struct LocalNode {
    /// Bounds in the parent's local coordinate space.
    ///
    /// The node's own local space has its origin at `bounds.origin()`, so children
    /// are positioned relative to the top-left corner of their parent.
    pub bounds: Rect,
    /// Stacking order among siblings. Higher is on top; equal values keep insertion order,
    /// with later siblings on top.
    pub z_index: i32,
    /// Visibility, picking, and clipping flags.
    pub flags: NodeFlags,
}

impl Default for LocalNode {
    fn default() -> Self {
        Self {
            bounds: Rect::ZERO,
            z_index: 0,
            flags: NodeFlags::default(),
        }
    }
}

impl LocalNode {
    /// Local node with the given bounds and default flags.
    pub fn with_bounds(bounds: Rect) -> Self {
        Self {
            bounds,
            ..Default::default()
        }
    }
}

/// One entry of a pick order: a candidate view with its world-space placement
/// resolved at the time the order was computed.
///
/// Produced by [`Tree::pick_order`](crate::Tree::pick_order) and
/// [`Tree::hit_candidates`](crate::Tree::hit_candidates).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PickEntry {
    /// The candidate view.
    pub node: NodeId,
    /// World-space offset of the view's local coordinate space.
    pub origin: Vec2,
    /// Size of the view's bounds.
    pub size: Size,
    /// Intersection of the world bounds of all clipping ancestors, if any.
    pub clip: Option<Rect>,
}

impl PickEntry {
    /// World-space bounds of the view.
    pub fn world_bounds(&self) -> Rect {
        Rect::from_origin_size(self.origin.to_point(), self.size)
    }

    /// Convert a world-space point into the view's local space.
    pub fn to_local(&self, world: Point) -> Point {
        world - self.origin
    }

    /// Returns true if `world` is not excluded by a clipping ancestor.
    pub fn clip_contains(&self, world: Point) -> bool {
        self.clip.is_none_or(|c| c.contains(world))
    }
}
