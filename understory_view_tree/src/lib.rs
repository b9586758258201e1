// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_view_tree --heading-base-level=0

//! Understory View Tree: a Kurbo-native view hierarchy for touch hit testing.
//!
//! Understory View Tree is the geometry half of a retained-mode touch stack.
//!
//! - Represents a strictly tree-shaped hierarchy of views with bounds, z-order, visibility, and clipping.
//! - Owns a payload per view (the view's behavior) in a generational arena.
//! - Produces a deterministic, topmost-first pick order for routing touches.
//!
//! ## Where this fits
//!
//! - View tree: structure and geometry (this crate).
//! - Touch dispatch: capture table and began/moved/ended delivery (`understory_touch`).
//! - Gestures: tap and swipe trackers driven from view callbacks (`understory_gesture`).
//!
//! ## Coordinates
//!
//! A view's bounds are expressed in its parent's local space, and the view's own local
//! space starts at the top-left corner of those bounds. Moving a parent therefore moves
//! its whole subtree. Roots are placed in world space.
//!
//! ## Pick order
//!
//! [`Tree::pick_order`] lists views in the order a new touch is offered to them:
//!
//! - Siblings (and roots) topmost first: higher [`LocalNode::z_index`] first, then later insertions first.
//! - Descendants before their ancestors, so composite views see a touch after the
//!   child under the finger declined it.
//! - Views without [`NodeFlags::VISIBLE`] are skipped together with their subtree.
//! - Views with [`NodeFlags::CLIPS_CHILDREN`] limit their descendants to their own bounds.
//!
//! Each [`PickEntry`] carries the world placement resolved at the time of the query,
//! so a dispatcher can keep using it while handlers mutate the tree.
//!
//! ## Payload ownership
//!
//! The tree owns payloads. [`Tree::with_payload_detached`] lends a payload out together
//! with mutable access to the tree; if the node is removed meanwhile the payload is
//! dropped when the call returns. Outside holders only keep [`NodeId`]s, which never
//! alias a different view once stale.
//!
//! ## API overview
//!
//! - [`Tree`]: container managing nodes and payloads.
//! - [`LocalNode`]: per-node local data (bounds, z, flags).
//! - [`NodeFlags`]: visibility, picking, and clipping controls.
//! - [`NodeId`]: generational handle of a node.
//! - [`QueryFilter`]: restricts pick results (visible/pickable).
//!
//! ### Minimal usage
//!
//! ```
//! use understory_view_tree::{LocalNode, QueryFilter, Tree};
//! use kurbo::{Point, Rect};
//!
//! let mut tree = Tree::new();
//! let root = tree.insert(None, LocalNode::with_bounds(Rect::new(0.0, 0.0, 200.0, 200.0)), "root");
//! let a = tree.insert(Some(root), LocalNode::with_bounds(Rect::new(10.0, 10.0, 100.0, 100.0)), "a");
//! let b = tree.insert(Some(root), LocalNode::with_bounds(Rect::new(50.0, 50.0, 150.0, 150.0)), "b");
//!
//! // Overlap: the later sibling is on top.
//! let hit = tree.hit_test_point(Point::new(60.0, 60.0), QueryFilter::INTERACTIVE).unwrap();
//! assert_eq!(hit.node, b);
//! assert_eq!(hit.path, vec![root, b]);
//!
//! // Hidden views are never picked.
//! tree.set_hidden(b, true);
//! let hit = tree.hit_test_point(Point::new(60.0, 60.0), QueryFilter::INTERACTIVE).unwrap();
//! assert_eq!(hit.node, a);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::{Hit, QueryFilter, Tree};
pub use types::{LocalNode, NodeFlags, NodeId, PickEntry};
