//! A unit of the list chain.
//!
//! Each node owns its value, a forward link, a logical-removal flag, and
//! a lock scoped to itself. The lock guards writes to `next` and the
//! `false -> true` transition of `removed`; both fields are additionally
//! atomic so that lock-free traversals can read them without taking the
//! lock.
//!
//! # Field protocol
//!
//! | field     | read (traversal)      | write                          |
//! |-----------|-----------------------|--------------------------------|
//! | `next`    | Acquire, no lock      | Release, under **owner's** lock |
//! | `removed` | Acquire, no lock      | Release, under **this** lock    |
//!
//! "Owner's lock" for `next` means the lock of the node whose field is
//! written: insert and unlink both write `pred.next` while holding
//! `pred`'s lock.

use std::sync::atomic::{AtomicBool, AtomicPtr};

use parking_lot::{Mutex, MutexGuard};

use crate::ordering::{READ_ORD, RELAXED, WRITE_ORD};
use crate::sentinel::Sentinel;

/// A node of the lazy list.
///
/// Nodes are identity-distinct: a removed value re-inserted later gets a
/// fresh node. Allocation is by `Box`; ownership transfers to the chain
/// via [`Node::into_raw`] and returns either through physical unlink
/// (retired to the collector) or list teardown.
pub(crate) struct Node<V> {
    /// The stored value, sentinel-tagged.
    value: Sentinel<V>,

    /// Forward link to the logically-following node. Null only in the
    /// tail sentinel.
    next: AtomicPtr<Node<V>>,

    /// Logical-removal flag. Monotonic: once true, never cleared.
    removed: AtomicBool,

    /// Lock scoped to this node.
    lock: Mutex<()>,
}

impl<V> Node<V> {
    /// Create a node linked to `next`.
    pub(crate) fn new(value: Sentinel<V>, next: *mut Self) -> Box<Self> {
        Box::new(Self {
            value,
            next: AtomicPtr::new(next),
            removed: AtomicBool::new(false),
            lock: Mutex::new(()),
        })
    }

    /// Allocate a node on the heap and leak it into the chain.
    ///
    /// The returned pointer is reclaimed either by `remove` (retired to
    /// the collector after unlink) or by the list's `Drop` (still-linked
    /// nodes).
    pub(crate) fn into_raw(value: Sentinel<V>, next: *mut Self) -> *mut Self {
        Box::into_raw(Self::new(value, next))
    }

    /// The stored (sentinel-tagged) value.
    #[inline]
    pub(crate) const fn value(&self) -> &Sentinel<V> {
        &self.value
    }

    /// Load the forward link for an optimistic traversal.
    #[inline]
    pub(crate) fn next(&self) -> *mut Self {
        self.next.load(READ_ORD)
    }

    /// Re-read the forward link inside a locked region (validation).
    #[inline]
    pub(crate) fn next_locked(&self) -> *mut Self {
        self.next.load(RELAXED)
    }

    /// Store the forward link.
    ///
    /// Caller must hold this node's lock.
    #[inline]
    pub(crate) fn set_next(&self, next: *mut Self) {
        self.next.store(next, WRITE_ORD);
    }

    /// Whether this node has been logically removed.
    #[inline]
    pub(crate) fn is_removed(&self) -> bool {
        self.removed.load(READ_ORD)
    }

    /// Mark this node logically removed.
    ///
    /// Caller must hold this node's lock. The store is immediately
    /// visible to concurrent lock-free readers.
    #[inline]
    pub(crate) fn mark_removed(&self) {
        self.removed.store(true, WRITE_ORD);
    }

    /// Acquire this node's lock.
    #[inline]
    pub(crate) fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock()
    }
}

// ============================================================================
//  Tests
// ============================================================================
