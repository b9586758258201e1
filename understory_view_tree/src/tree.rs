// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, updates, queries.

use alloc::vec::Vec;
use kurbo::{Point, Rect, Vec2};

use crate::types::{LocalNode, NodeFlags, NodeId, PickEntry};

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Hierarchy of views, each carrying a payload of type `T`.
///
/// The tree owns every node and its payload. Parent links are plain [`NodeId`]s and
/// never control lifetime; removing a node removes (and drops) its whole subtree.
pub struct Tree<T> {
    nodes: Vec<Option<Node<T>>>, // slots
    generations: Vec<u32>,       // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    roots: Vec<NodeId>,
}

impl<T> core::fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("roots", &self.roots)
            .finish_non_exhaustive()
    }
}

/// Results of a hit test.
#[derive(Clone, Debug)]
pub struct Hit {
    /// The matched node.
    pub node: NodeId,
    /// Path from root to node (inclusive).
    pub path: Vec<NodeId>,
}

/// Filters applied during picking.
///
/// Used by [`Tree::pick_order`], [`Tree::hit_candidates`] and [`Tree::hit_test_point`].
#[derive(Clone, Copy, Debug, Default)]
pub struct QueryFilter {
    /// If true, skip nodes without [`NodeFlags::VISIBLE`] together with their subtrees.
    pub visible_only: bool,
    /// If true, only report nodes marked [`NodeFlags::PICKABLE`].
    pub pickable_only: bool,
}

impl QueryFilter {
    /// Visible and pickable nodes only. This is what touch dispatch uses.
    pub const INTERACTIVE: Self = Self {
        visible_only: true,
        pickable_only: true,
    };
}

#[derive(Clone, Debug)]
struct Node<T> {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: LocalNode,
    // `None` only while detached by `with_payload_detached`.
    payload: Option<T>,
}

impl<T> Node<T> {
    fn new(generation: u32, local: LocalNode, payload: T) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            local,
            payload: Some(payload),
        }
    }
}

impl<T> Tree<T> {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Insert a new node as the last (topmost) child of `parent`, or as a new topmost
    /// root if `parent` is `None`.
    ///
    /// A stale `parent` makes the node a root.
    pub fn insert(&mut self, parent: Option<NodeId>, local: LocalNode, payload: T) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, local, payload));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, local, payload)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        self.link(id, parent);
        id
    }

    /// Remove a node and its subtree, returning the node's own payload.
    ///
    /// Payloads of descendants are dropped. Returns `None` for a stale id, and also
    /// when the node's payload is currently detached.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        if !self.is_alive(id) {
            return None;
        }
        self.unlink(id);
        self.remove_subtree(id)
    }

    /// Move `id` to the top of `new_parent`'s children (or to the top of the roots).
    ///
    /// Moving a node under itself or one of its descendants is ignored.
    pub fn reparent(&mut self, id: NodeId, new_parent: Option<NodeId>) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(p) = new_parent
            && self.is_alive(p)
            && self.path_to_root(p).contains(&id)
        {
            return;
        }
        self.unlink(id);
        self.link(id, new_parent);
    }

    /// Update bounds (in parent-local coordinates).
    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.bounds = bounds;
        }
    }

    /// Update z index.
    pub fn set_z_index(&mut self, id: NodeId, z: i32) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.z_index = z;
        }
    }

    /// Update node flags.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.flags = flags;
        }
    }

    /// Hide or show a node and its subtree.
    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.flags.set(NodeFlags::VISIBLE, !hidden);
        }
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    /// See [`NodeId`] docs for the generational semantics.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    /// Returns true if the tree has no live nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Root nodes, bottom-most first.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Parent of a node, if the node is live and not a root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id)?.parent
    }

    /// Children of a node in insertion order (empty for a stale id).
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.node_opt(id) {
            Some(n) => &n.children,
            None => &[],
        }
    }

    /// Local geometry of a node.
    pub fn local(&self, id: NodeId) -> Option<&LocalNode> {
        Some(&self.node_opt(id)?.local)
    }

    /// Bounds of a node in parent-local coordinates.
    pub fn bounds(&self, id: NodeId) -> Option<Rect> {
        Some(self.node_opt(id)?.local.bounds)
    }

    /// Flags of a node.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        Some(self.node_opt(id)?.local.flags)
    }

    /// Returns the z-index of a node if the identifier is live.
    pub fn z_index(&self, id: NodeId) -> Option<i32> {
        Some(self.node_opt(id)?.local.z_index)
    }

    /// Returns true if the node and all of its ancestors are visible.
    pub fn is_visible(&self, id: NodeId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        self.path_to_root(id)
            .iter()
            .all(|&n| self.node(n).local.flags.contains(NodeFlags::VISIBLE))
    }

    /// Shared access to a node's payload.
    ///
    /// Returns `None` for stale ids and while the payload is detached.
    pub fn payload(&self, id: NodeId) -> Option<&T> {
        self.node_opt(id)?.payload.as_ref()
    }

    /// Mutable access to a node's payload.
    pub fn payload_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.node_opt_mut(id)?.payload.as_mut()
    }

    /// Temporarily take a node's payload out of the tree and run `f` with both.
    ///
    /// While `f` runs the tree may be mutated freely, including removing `id`.
    /// Afterwards the payload is put back if `id` is still live and is dropped otherwise.
    /// Returns `None` if `id` is stale or its payload is already detached.
    pub fn with_payload_detached<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut Self, &mut T) -> R,
    ) -> Option<R> {
        let mut payload = self.node_opt_mut(id)?.payload.take()?;
        let out = f(self, &mut payload);
        if let Some(n) = self.node_opt_mut(id) {
            n.payload = Some(payload);
        }
        Some(out)
    }

    /// World-space offset of a node's local coordinate space.
    pub fn world_origin(&self, id: NodeId) -> Option<Vec2> {
        if !self.is_alive(id) {
            return None;
        }
        let mut origin = Vec2::ZERO;
        let mut cur = Some(id);
        while let Some(n) = cur {
            let node = self.node(n);
            origin += node.local.bounds.origin().to_vec2();
            cur = node.parent;
        }
        Some(origin)
    }

    /// World-space bounds of a node.
    pub fn world_bounds(&self, id: NodeId) -> Option<Rect> {
        let bounds = self.bounds(id)?;
        let parent_origin = match self.parent(id) {
            Some(p) => self.world_origin(p)?,
            None => Vec2::ZERO,
        };
        Some(bounds + parent_origin)
    }

    /// Convert a world-space point into a node's local space.
    pub fn to_local(&self, id: NodeId, world: Point) -> Option<Point> {
        Some(world - self.world_origin(id)?)
    }

    /// Path from the root to `id` (inclusive). Empty for a stale id.
    pub fn path_to_root(&self, mut id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.is_alive(id) {
            return out;
        }
        loop {
            out.push(id);
            match self.node(id).parent {
                Some(p) => id = p,
                None => break,
            }
        }
        out.reverse();
        out
    }

    /// All candidate views in the order a touch is offered to them.
    ///
    /// Roots and siblings are visited topmost first (highest `z_index`, then last
    /// inserted), and every node is listed after its descendants, so the deepest topmost
    /// view comes first and its ancestors follow as bubbling targets.
    ///
    /// The returned entries are a snapshot: later mutation of the tree does not change them.
    pub fn pick_order(&self, filter: QueryFilter) -> Vec<PickEntry> {
        let mut out = Vec::new();
        for root in Self::stacked(&self.roots, |id| self.node(id).local.z_index) {
            self.collect_picks(root, Vec2::ZERO, None, None, filter, &mut out);
        }
        out
    }

    /// Pick order restricted to views whose world bounds contain `pt` and whose
    /// clipping ancestors do not exclude it.
    ///
    /// Subtrees of clipping views that miss `pt` are skipped without being visited.
    pub fn hit_candidates(&self, pt: Point, filter: QueryFilter) -> Vec<PickEntry> {
        let mut out = Vec::new();
        for root in Self::stacked(&self.roots, |id| self.node(id).local.z_index) {
            self.collect_picks(root, Vec2::ZERO, None, Some(pt), filter, &mut out);
        }
        out
    }

    /// Current placement of one node as a pick candidate.
    ///
    /// Resolves the same origin, size and ancestor clip that [`Tree::pick_order`] would
    /// report for `id` now. Returns `None` if `id` is stale or `filter` excludes it
    /// (a hidden ancestor hides it too).
    pub fn pick_entry(&self, id: NodeId, filter: QueryFilter) -> Option<PickEntry> {
        let path = self.path_to_root(id);
        let (&target, ancestors) = path.split_last()?;
        let mut origin = Vec2::ZERO;
        let mut clip: Option<Rect> = None;
        for &n in ancestors {
            let local = &self.node(n).local;
            if filter.visible_only && !local.flags.contains(NodeFlags::VISIBLE) {
                return None;
            }
            let world = local.bounds + origin;
            origin = world.origin().to_vec2();
            if local.flags.contains(NodeFlags::CLIPS_CHILDREN) {
                clip = Some(clip.map_or(world, |c| c.intersect(world)));
            }
        }
        let local = &self.node(target).local;
        if filter.visible_only && !local.flags.contains(NodeFlags::VISIBLE) {
            return None;
        }
        if filter.pickable_only && !local.flags.contains(NodeFlags::PICKABLE) {
            return None;
        }
        let world = local.bounds + origin;
        Some(PickEntry {
            node: target,
            origin: world.origin().to_vec2(),
            size: world.size(),
            clip,
        })
    }

    /// Hit test a world-space point against node bounds. Returns the topmost node.
    pub fn hit_test_point(&self, pt: Point, filter: QueryFilter) -> Option<Hit> {
        let first = self.hit_candidates(pt, filter).into_iter().next()?;
        Some(Hit {
            node: first.node,
            path: self.path_to_root(first.node),
        })
    }

    // --- internals ---

    fn node_opt(&self, id: NodeId) -> Option<&Node<T>> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    /// Access a live node; panics if `id` is stale. Callers check liveness first.
    fn node(&self, id: NodeId) -> &Node<T> {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn link(&mut self, id: NodeId, parent: Option<NodeId>) {
        match parent {
            Some(p) if self.is_alive(p) => {
                self.node_mut(p).children.push(id);
                self.node_mut(id).parent = Some(p);
            }
            _ => {
                self.roots.push(id);
                self.node_mut(id).parent = None;
            }
        }
    }

    fn unlink(&mut self, id: NodeId) {
        match self.node(id).parent {
            Some(p) => self.node_mut(p).children.retain(|c| *c != id),
            None => self.roots.retain(|r| *r != id),
        }
        self.node_mut(id).parent = None;
    }

    fn remove_subtree(&mut self, id: NodeId) -> Option<T> {
        let children = core::mem::take(&mut self.node_mut(id).children);
        for child in children {
            let _ = self.remove_subtree(child);
        }
        let node = self.nodes[id.idx()].take()?;
        self.free_list.push(id.idx());
        node.payload
    }

    /// Siblings ordered topmost first.
    fn stacked(ids: &[NodeId], z: impl Fn(NodeId) -> i32) -> impl Iterator<Item = NodeId> {
        let mut sorted = ids.to_vec();
        // Stable: equal z keeps insertion order, reversed below so later wins.
        sorted.sort_by_key(|&id| z(id));
        sorted.into_iter().rev()
    }

    fn collect_picks(
        &self,
        id: NodeId,
        parent_origin: Vec2,
        clip: Option<Rect>,
        point: Option<Point>,
        filter: QueryFilter,
        out: &mut Vec<PickEntry>,
    ) {
        let node = self.node(id);
        let flags = node.local.flags;
        if filter.visible_only && !flags.contains(NodeFlags::VISIBLE) {
            return;
        }
        let world_bounds = node.local.bounds + parent_origin;
        let origin = world_bounds.origin().to_vec2();
        let child_clip = if flags.contains(NodeFlags::CLIPS_CHILDREN) {
            Some(clip.map_or(world_bounds, |c| c.intersect(world_bounds)))
        } else {
            clip
        };
        let descend = match (point, child_clip) {
            (Some(pt), Some(c)) => c.contains(pt),
            _ => true,
        };
        if descend {
            for child in Self::stacked(&node.children, |c| self.node(c).local.z_index) {
                self.collect_picks(child, origin, child_clip, point, filter, out);
            }
        }
        if filter.pickable_only && !flags.contains(NodeFlags::PICKABLE) {
            return;
        }
        let entry = PickEntry {
            node: id,
            origin,
            size: world_bounds.size(),
            clip,
        };
        if let Some(pt) = point
            && !(entry.clip_contains(pt) && world_bounds.contains(pt))
        {
            return;
        }
        out.push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn node(x0: f64, y0: f64, x1: f64, y1: f64) -> LocalNode {
        LocalNode::with_bounds(Rect::new(x0, y0, x1, y1))
    }

    fn hit(tree: &Tree<&'static str>, x: f64, y: f64) -> Option<NodeId> {
        tree.hit_test_point(Point::new(x, y), QueryFilter::INTERACTIVE)
            .map(|h| h.node)
    }

    #[test]
    fn overlapping_siblings_last_added_wins() {
        let mut tree = Tree::new();
        let root = tree.insert(None, node(0.0, 0.0, 200.0, 200.0), "root");
        let a = tree.insert(Some(root), node(10.0, 10.0, 100.0, 100.0), "a");
        let b = tree.insert(Some(root), node(50.0, 50.0, 150.0, 150.0), "b");

        assert_eq!(hit(&tree, 60.0, 60.0), Some(b), "later sibling is on top");
        assert_eq!(hit(&tree, 20.0, 20.0), Some(a));
        assert_eq!(hit(&tree, 190.0, 190.0), Some(root));
        assert_eq!(hit(&tree, 250.0, 250.0), None);

        let h = tree
            .hit_test_point(Point::new(60.0, 60.0), QueryFilter::INTERACTIVE)
            .unwrap();
        assert_eq!(h.path, vec![root, b]);
    }

    #[test]
    fn z_index_outranks_insertion_order() {
        let mut tree = Tree::new();
        let root = tree.insert(None, node(0.0, 0.0, 200.0, 200.0), "root");
        let a = tree.insert(
            Some(root),
            LocalNode {
                bounds: Rect::new(10.0, 10.0, 100.0, 100.0),
                z_index: 10,
                ..Default::default()
            },
            "a",
        );
        let b = tree.insert(Some(root), node(10.0, 10.0, 100.0, 100.0), "b");
        assert_eq!(hit(&tree, 50.0, 50.0), Some(a), "higher z wins");
        tree.set_z_index(a, -1);
        assert_eq!(hit(&tree, 50.0, 50.0), Some(b));
    }

    #[test]
    fn hidden_views_and_subtrees_are_never_chosen() {
        let mut tree = Tree::new();
        let root = tree.insert(None, node(0.0, 0.0, 200.0, 200.0), "root");
        let a = tree.insert(Some(root), node(0.0, 0.0, 100.0, 100.0), "a");
        let container = tree.insert(Some(root), node(0.0, 0.0, 100.0, 100.0), "container");
        let inner = tree.insert(Some(container), node(0.0, 0.0, 50.0, 50.0), "inner");

        assert_eq!(hit(&tree, 10.0, 10.0), Some(inner));
        tree.set_hidden(container, true);
        assert_eq!(hit(&tree, 10.0, 10.0), Some(a), "hidden subtree is skipped");
        assert!(!tree.is_visible(inner));
        tree.set_hidden(container, false);
        assert!(tree.is_visible(inner));
    }

    #[test]
    fn children_are_positioned_relative_to_parent() {
        let mut tree = Tree::new();
        let root = tree.insert(None, node(100.0, 100.0, 300.0, 300.0), "root");
        let child = tree.insert(Some(root), node(10.0, 10.0, 30.0, 30.0), "child");

        assert_eq!(tree.world_origin(child), Some(Vec2::new(110.0, 110.0)));
        assert_eq!(
            tree.world_bounds(child),
            Some(Rect::new(110.0, 110.0, 130.0, 130.0))
        );
        assert_eq!(
            tree.to_local(child, Point::new(115.0, 120.0)),
            Some(Point::new(5.0, 10.0))
        );
        assert_eq!(hit(&tree, 115.0, 115.0), Some(child));
        assert_eq!(hit(&tree, 15.0, 15.0), None);
    }

    #[test]
    fn clipping_ancestor_limits_descendants() {
        let mut tree = Tree::new();
        let root = tree.insert(None, node(0.0, 0.0, 400.0, 400.0), "root");
        let clip = tree.insert(
            Some(root),
            LocalNode {
                bounds: Rect::new(0.0, 0.0, 100.0, 100.0),
                flags: NodeFlags::default() | NodeFlags::CLIPS_CHILDREN,
                ..Default::default()
            },
            "clip",
        );
        let overflow = tree.insert(Some(clip), node(50.0, 50.0, 200.0, 200.0), "overflow");

        assert_eq!(hit(&tree, 75.0, 75.0), Some(overflow));
        assert_eq!(hit(&tree, 150.0, 150.0), Some(root), "clipped part misses");

        // Without clipping, overflowing children stay hittable.
        tree.set_flags(clip, NodeFlags::default());
        assert_eq!(hit(&tree, 150.0, 150.0), Some(overflow));
    }

    #[test]
    fn non_pickable_parent_still_exposes_children() {
        let mut tree = Tree::new();
        let root = tree.insert(
            None,
            LocalNode {
                bounds: Rect::new(0.0, 0.0, 100.0, 100.0),
                flags: NodeFlags::VISIBLE,
                ..Default::default()
            },
            "root",
        );
        let child = tree.insert(Some(root), node(0.0, 0.0, 10.0, 10.0), "child");
        assert_eq!(hit(&tree, 5.0, 5.0), Some(child));
        assert_eq!(hit(&tree, 50.0, 50.0), None);
    }

    #[test]
    fn pick_order_is_topmost_first_post_order() {
        let mut tree = Tree::new();
        let root = tree.insert(None, node(0.0, 0.0, 100.0, 100.0), "root");
        let a = tree.insert(Some(root), node(0.0, 0.0, 10.0, 10.0), "a");
        let a1 = tree.insert(Some(a), node(0.0, 0.0, 5.0, 5.0), "a1");
        let a2 = tree.insert(Some(a), node(0.0, 0.0, 5.0, 5.0), "a2");
        let b = tree.insert(Some(root), node(0.0, 0.0, 10.0, 10.0), "b");
        let b1 = tree.insert(Some(b), node(0.0, 0.0, 5.0, 5.0), "b1");

        let order: Vec<NodeId> = tree
            .pick_order(QueryFilter::INTERACTIVE)
            .into_iter()
            .map(|e| e.node)
            .collect();
        assert_eq!(order, vec![b1, b, a2, a1, a, root]);
    }

    #[test]
    fn pick_entry_matches_pick_order_and_tracks_changes() {
        let mut tree = Tree::new();
        let root = tree.insert(None, node(10.0, 10.0, 400.0, 400.0), "root");
        let clip = tree.insert(
            Some(root),
            LocalNode {
                bounds: Rect::new(20.0, 20.0, 120.0, 120.0),
                flags: NodeFlags::default() | NodeFlags::CLIPS_CHILDREN,
                ..Default::default()
            },
            "clip",
        );
        let leaf = tree.insert(Some(clip), node(5.0, 5.0, 305.0, 305.0), "leaf");

        for entry in tree.pick_order(QueryFilter::INTERACTIVE) {
            assert_eq!(
                tree.pick_entry(entry.node, QueryFilter::INTERACTIVE),
                Some(entry),
                "snapshot and fresh resolution agree"
            );
        }

        let e = tree.pick_entry(leaf, QueryFilter::INTERACTIVE).unwrap();
        assert_eq!(e.origin, Vec2::new(35.0, 35.0));
        assert_eq!(e.clip, Some(Rect::new(30.0, 30.0, 130.0, 130.0)));

        tree.set_bounds(leaf, Rect::new(50.0, 50.0, 60.0, 60.0));
        let e = tree.pick_entry(leaf, QueryFilter::INTERACTIVE).unwrap();
        assert_eq!(e.origin, Vec2::new(80.0, 80.0));
        assert_eq!(e.size, kurbo::Size::new(10.0, 10.0));

        tree.set_hidden(clip, true);
        assert_eq!(tree.pick_entry(leaf, QueryFilter::INTERACTIVE), None, "hidden ancestor");
        assert!(tree.pick_entry(leaf, QueryFilter::default()).is_some());

        let _ = tree.remove(clip);
        assert_eq!(tree.pick_entry(leaf, QueryFilter::default()), None);
    }

    #[test]
    fn later_roots_are_on_top() {
        let mut tree = Tree::new();
        let first = tree.insert(None, node(0.0, 0.0, 100.0, 100.0), "first");
        let second = tree.insert(None, node(0.0, 0.0, 100.0, 100.0), "second");
        assert_eq!(tree.roots(), &[first, second]);
        assert_eq!(hit(&tree, 1.0, 1.0), Some(second));
    }

    #[test]
    fn liveness_insert_remove_reuse() {
        let mut tree = Tree::new();
        let root = tree.insert(None, node(0.0, 0.0, 1.0, 1.0), "root");
        let a = tree.insert(Some(root), node(0.0, 0.0, 1.0, 1.0), "a");
        let a_child = tree.insert(Some(a), node(0.0, 0.0, 1.0, 1.0), "a_child");
        assert_eq!(tree.len(), 3);

        assert_eq!(tree.remove(a), Some("a"));
        assert!(!tree.is_alive(a));
        assert!(!tree.is_alive(a_child), "subtree is removed with its root");
        assert_eq!(tree.len(), 1);
        assert!(tree.children(root).is_empty());
        assert_eq!(tree.remove(a), None, "removing twice is a no-op");

        let b = tree.insert(Some(root), node(0.0, 0.0, 1.0, 1.0), "b");
        assert!(tree.is_alive(b));
        assert!(!tree.is_alive(a));
        assert_eq!(tree.payload(a), None, "stale ids never alias");
        if a.0 == b.0 {
            assert!(b.1 > a.1, "generation must increase on reuse");
        }
    }

    #[test]
    fn reparent_moves_to_top_and_rejects_cycles() {
        let mut tree = Tree::new();
        let root = tree.insert(None, node(0.0, 0.0, 100.0, 100.0), "root");
        let a = tree.insert(Some(root), node(0.0, 0.0, 50.0, 50.0), "a");
        let b = tree.insert(Some(root), node(0.0, 0.0, 50.0, 50.0), "b");
        let a_child = tree.insert(Some(a), node(0.0, 0.0, 10.0, 10.0), "a_child");

        tree.reparent(a, Some(a_child));
        assert_eq!(tree.parent(a), Some(root), "cycle is rejected");

        tree.reparent(a, Some(root));
        assert_eq!(tree.children(root), &[b, a]);
        assert_eq!(hit(&tree, 20.0, 20.0), Some(a), "reparented node is on top");
        assert_eq!(hit(&tree, 5.0, 5.0), Some(a_child));

        tree.reparent(b, None);
        assert_eq!(tree.parent(b), None);
        assert_eq!(tree.roots(), &[root, b]);
    }

    #[test]
    fn detached_payload_survives_or_drops_with_node() {
        let mut tree = Tree::new();
        let root = tree.insert(None, node(0.0, 0.0, 10.0, 10.0), 1_u32);
        let child = tree.insert(Some(root), node(0.0, 0.0, 10.0, 10.0), 2_u32);

        let out = tree.with_payload_detached(child, |tree, value| {
            assert_eq!(tree.payload(child), None, "payload is out while detached");
            assert_eq!(
                tree.with_payload_detached(child, |_, _| ()),
                None,
                "detaching twice fails"
            );
            *value += 10;
            *value
        });
        assert_eq!(out, Some(12));
        assert_eq!(tree.payload(child), Some(&12));

        let out = tree.with_payload_detached(child, |tree, _| {
            let _ = tree.remove(child);
        });
        assert_eq!(out, Some(()));
        assert!(!tree.is_alive(child));
        assert_eq!(tree.payload(root), Some(&1));
    }

    #[test]
    fn stale_parent_inserts_as_root() {
        let mut tree = Tree::new();
        let gone = tree.insert(None, node(0.0, 0.0, 1.0, 1.0), "gone");
        let _ = tree.remove(gone);
        let orphan = tree.insert(Some(gone), node(0.0, 0.0, 1.0, 1.0), "orphan");
        assert_eq!(tree.parent(orphan), None);
        assert_eq!(tree.roots(), &[orphan]);
    }
}
