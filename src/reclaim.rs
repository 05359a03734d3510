//! Reclaim helpers for seize-based memory reclamation.
//!
//! A concurrent traversal may still hold a reference to a node that
//! `remove` has just unlinked, so unlinked nodes cannot be freed
//! immediately. They are retired through `guard.defer_retire()` with the
//! callback below; seize frees them once no guard can still reach them.

// This module is private, so pub(crate) is effectively the same as pub.
// We use pub to satisfy clippy::redundant_pub_crate while keeping intent clear.
#![allow(clippy::redundant_pub_crate)]

use seize::Collector;

use crate::node::Node;

/// Reclaim a boxed node (seize callback).
///
/// # Safety
///
/// - `ptr` must point to a valid `Node<V>` allocated via `Box::into_raw`.
/// - The node must be unreachable from the list head by any new traversal.
/// - Must only be called after seize determines it's safe (no readers).
pub(crate) unsafe fn reclaim_node_boxed<V>(ptr: *mut Node<V>, _collector: &Collector) {
    // SAFETY: Caller guarantees ptr is valid and from Box::into_raw.
    // Seize ensures no readers remain.
    unsafe { drop(Box::from_raw(ptr)) };
}

// ============================================================================
//  Tests
// ============================================================================
