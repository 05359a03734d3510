//! The lazy-synchronization list.
//!
//! This module provides [`LazyList<V, O>`], a concurrent sorted set usable
//! from many parallel threads without a global lock.
//!
//! # Protocol
//!
//! Every operation starts with an unsynchronized scan from the head
//! sentinel, stopping at the first node whose value is not strictly
//! before the target. Mutations then:
//!
//! 1. Lock only the node(s) adjacent to the mutation point (predecessor
//!    for insert; predecessor then current, in that fixed order, for
//!    remove).
//! 2. Validate under lock that the locked nodes are still live and still
//!    adjacent (`!removed && pred.next == curr`).
//! 3. Commit the O(1) pointer/flag update, or release and rescan from
//!    the head on validation failure.
//!
//! Removal is two-phase inside one critical section: the node is marked
//! logically removed (immediately visible to lock-free readers), then
//! physically unlinked. Unlinked nodes are retired to the seize
//! collector and freed once no guard can still reach them.
//!
//! The fixed forward lock order (predecessor before successor) is a
//! total order across all operations, so no deadlock cycle can form.
//! Mutations at disjoint chain positions never block each other.

use std::ptr;
use std::sync::atomic::{AtomicU64, AtomicUsize};

use seize::{Collector, Guard, LocalGuard};

use crate::node::Node;
use crate::ordering::RELAXED;
use crate::reclaim;
use crate::sentinel::Sentinel;
use crate::tracing_helpers::trace_log;

// ============================================================================
//  Debug Counters
// ============================================================================

/// Count of insert attempts that failed validation and rescanned.
pub static INSERT_RETRY_COUNT: AtomicU64 = AtomicU64::new(0);

/// Count of remove attempts that failed validation and rescanned.
pub static REMOVE_RETRY_COUNT: AtomicU64 = AtomicU64::new(0);

/// Get `(insert_retries, remove_retries)` for diagnostics.
///
/// Counters are process-global and only meaningful relative to a
/// preceding [`reset_debug_counters`].
pub fn get_debug_counters() -> (u64, u64) {
    (
        INSERT_RETRY_COUNT.load(RELAXED),
        REMOVE_RETRY_COUNT.load(RELAXED),
    )
}

/// Reset the debug counters to zero.
pub fn reset_debug_counters() {
    INSERT_RETRY_COUNT.store(0, RELAXED);
    REMOVE_RETRY_COUNT.store(0, RELAXED);
}

// ============================================================================
//  LazyList
// ============================================================================

/// A concurrent sorted set backed by a singly-linked list with per-node
/// locking.
///
/// The order is supplied at construction: `order(a, b)` true means
/// "`a` strictly precedes `b`". It must be a strict weak ordering and
/// must agree with `V`'s equality; both are usage preconditions, not
/// checked at runtime.
///
/// # Thread Safety
///
/// `LazyList<V, O>` is `Send + Sync` when `V` and the order are.
/// Concurrent reads traverse without locks; the guard-based API pins
/// reclamation while node references are live:
///
/// ```rust
/// use lazylist::LazyList;
///
/// let list: LazyList<u64> = LazyList::natural();
/// let guard = list.guard();
///
/// list.insert_with_guard(10, &guard);
/// assert!(list.contains_with_guard(&10, &guard));
/// assert_eq!(list.iter(&guard).copied().collect::<Vec<_>>(), vec![10]);
/// ```
///
/// The non-guard methods (`insert`, `remove`, `contains`) enter a guard
/// internally and exist for convenience.
///
/// # Consistency
///
/// `contains`, `iter`, and `len` are best-effort snapshots: they may
/// race with concurrent mutation and are not linearizable with it. The
/// chain itself is strictly increasing and duplicate-free at every
/// quiescent point.
pub struct LazyList<V, O = fn(&V, &V) -> bool> {
    /// Head sentinel. Never removed, never relinked away.
    head: *mut Node<V>,

    /// Tail sentinel. Reachable from every live node.
    tail: *mut Node<V>,

    /// Strict weak ordering over real values. Sentinel extension is
    /// applied at each comparison via [`Sentinel`].
    order: O,

    /// Approximate live-count: one increment per successful insert, one
    /// decrement per successful unlink, read without synchronization.
    count: AtomicUsize,

    /// Deferred reclamation for unlinked nodes.
    collector: Collector,
}

// SAFETY: The raw node pointers are owned by the list; all shared
// mutation goes through per-node locks and atomics per the protocol
// above, and reclamation is deferred past any live guard.
unsafe impl<V: Send, O: Send> Send for LazyList<V, O> {}

// SAFETY: See Send. Values are handed out by shared reference from
// multiple threads, hence V: Sync; the order is called concurrently,
// hence O: Sync.
unsafe impl<V: Send + Sync, O: Sync> Sync for LazyList<V, O> {}

impl<V, O> LazyList<V, O> {
    /// Create an empty list ordered by `order`.
    ///
    /// `order(a, b)` true means "`a` strictly precedes `b`".
    #[must_use]
    pub fn new(order: O) -> Self {
        let tail: *mut Node<V> = Node::into_raw(Sentinel::PosInf, ptr::null_mut());
        let head: *mut Node<V> = Node::into_raw(Sentinel::NegInf, tail);

        Self {
            head,
            tail,
            order,
            count: AtomicUsize::new(0),
            collector: Collector::new(),
        }
    }

    /// Enter a protected region and return a guard.
    ///
    /// The guard protects any node references obtained during its
    /// lifetime from being reclaimed. Call this before the guard-based
    /// operations or [`iter`](Self::iter).
    #[must_use]
    #[inline]
    pub fn guard(&self) -> LocalGuard<'_> {
        self.collector.enter()
    }

    /// The approximate number of elements.
    ///
    /// Best-effort under concurrent mutation: not guaranteed to equal
    /// the number of reachable nodes at any single instant.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.count.load(RELAXED)
    }

    /// Whether the list is (approximately) empty. See [`len`](Self::len).
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate the values in order, without locks.
    ///
    /// The traversal is weak: it reflects whatever link structure exists
    /// at each step, not one consistent snapshot. Concurrent mutation
    /// during iteration may or may not be observed, and a node unlinked
    /// mid-traversal is simply skipped going forward (or still visited,
    /// if the iterator already passed the unlink point). Iterate again
    /// by calling `iter` again; the handle carries no reset.
    #[must_use]
    pub fn iter<'g>(&'g self, guard: &'g LocalGuard<'g>) -> Iter<'g, V> {
        // SAFETY: head is never reclaimed while the list is alive.
        let first: *mut Node<V> = unsafe { &*self.head }.next();
        Iter {
            curr: first,
            _guard: guard,
        }
    }
}

impl<V: Ord> LazyList<V> {
    /// Create an empty list using `V`'s natural `<` order.
    #[must_use]
    pub fn natural() -> Self {
        fn less_than<V: Ord>(a: &V, b: &V) -> bool {
            a < b
        }
        Self::new(less_than::<V>)
    }
}

impl<V: Ord> Default for LazyList<V> {
    fn default() -> Self {
        Self::natural()
    }
}

impl<V: PartialEq, O: Fn(&V, &V) -> bool> LazyList<V, O> {
    /// Lock-free scan for `value`'s position in the chain.
    ///
    /// Returns `(pred, curr)`: the last node strictly before `value`
    /// and the first node not strictly before it. `curr` is the tail
    /// sentinel when every real value precedes `value`.
    ///
    /// Caller must hold a guard; every pointer returned or traversed is
    /// only dereferenceable while that guard is live.
    fn scan(&self, value: &V, _guard: &LocalGuard<'_>) -> (*mut Node<V>, *mut Node<V>) {
        let mut pred: *mut Node<V> = self.head;
        // SAFETY: head is never reclaimed while the list is alive.
        let mut curr: *mut Node<V> = unsafe { &*pred }.next();

        loop {
            // SAFETY: curr was loaded from a reachable node's link while
            // the guard was live, so it cannot have been reclaimed.
            let node: &Node<V> = unsafe { &*curr };
            if !node.value().precedes_value(value, &self.order) {
                return (pred, curr);
            }
            pred = curr;
            curr = node.next();
        }
    }

    /// Whether `value` is present.
    ///
    /// Lock-free; the result is a best-effort snapshot that may race
    /// with a concurrent insert/remove of the same value.
    #[must_use]
    pub fn contains(&self, value: &V) -> bool {
        let guard = self.guard();
        self.contains_with_guard(value, &guard)
    }

    /// [`contains`](Self::contains) under a caller-held guard.
    #[must_use]
    pub fn contains_with_guard(&self, value: &V, guard: &LocalGuard<'_>) -> bool {
        let (_pred, curr) = self.scan(value, guard);
        // SAFETY: curr is protected by the caller's guard.
        let node: &Node<V> = unsafe { &*curr };
        node.value().value_eq(value) && !node.is_removed()
    }

    /// Insert `value`, keeping the chain sorted.
    ///
    /// Always returns having inserted or confirmed presence; inserting
    /// a value already present is a no-op (the new value is dropped).
    pub fn insert(&self, value: V) {
        let guard = self.guard();
        self.insert_with_guard(value, &guard);
    }

    /// [`insert`](Self::insert) under a caller-held guard.
    pub fn insert_with_guard(&self, mut value: V, guard: &LocalGuard<'_>) {
        loop {
            match self.try_insert(value, guard) {
                Ok(()) => return,
                Err(rejected) => {
                    INSERT_RETRY_COUNT.fetch_add(1, RELAXED);
                    value = rejected;
                    std::hint::spin_loop();
                }
            }
        }
    }

    /// One optimistic insert attempt.
    ///
    /// `Err` returns the value for a full rescan after a validation
    /// failure; this is an artifact of the protocol, never surfaced.
    fn try_insert(&self, value: V, guard: &LocalGuard<'_>) -> Result<(), V> {
        let (pred, curr) = self.scan(&value, guard);
        // SAFETY: scan ran under the caller's guard; both pointers are
        // protected for the rest of this attempt.
        let pred_ref: &Node<V> = unsafe { &*pred };
        let curr_ref: &Node<V> = unsafe { &*curr };

        let _held = pred_ref.lock();

        // Validate: pred still live and still immediately precedes curr.
        // A concurrent structural change at this position between scan
        // and lock acquisition shows up here.
        if pred_ref.is_removed() || pred_ref.next_locked() != curr {
            trace_log!("insert: validation failed, rescanning");
            return Err(value);
        }

        if curr_ref.value().value_eq(&value) {
            // Duplicate insert is a no-op.
            return Ok(());
        }

        // curr is live and in position: splice the new node before it.
        // pred.next == curr under pred's lock means curr cannot be
        // unlinked concurrently (unlinking curr requires pred's lock).
        let node: *mut Node<V> = Node::into_raw(Sentinel::Value(value), curr);
        pred_ref.set_next(node);
        self.count.fetch_add(1, RELAXED);
        trace_log!("insert: linked new node");
        Ok(())
    }

    /// Remove `value` if present.
    ///
    /// Always returns having removed or confirmed absence; removing an
    /// absent value is a no-op.
    pub fn remove(&self, value: &V) {
        let guard = self.guard();
        self.remove_with_guard(value, &guard);
    }

    /// [`remove`](Self::remove) under a caller-held guard.
    pub fn remove_with_guard(&self, value: &V, guard: &LocalGuard<'_>) {
        while !self.try_remove(value, guard) {
            REMOVE_RETRY_COUNT.fetch_add(1, RELAXED);
            std::hint::spin_loop();
        }
    }

    /// One optimistic remove attempt. Returns false on validation
    /// failure (caller rescans).
    fn try_remove(&self, value: &V, guard: &LocalGuard<'_>) -> bool {
        let (pred, curr) = self.scan(value, guard);
        // SAFETY: scan ran under the caller's guard; both pointers are
        // protected for the rest of this attempt.
        let pred_ref: &Node<V> = unsafe { &*pred };
        let curr_ref: &Node<V> = unsafe { &*curr };

        // Fixed lock order: predecessor before its successor. This
        // total order along the chain prevents deadlock cycles.
        let pred_held = pred_ref.lock();
        let curr_held = curr_ref.lock();

        if pred_ref.is_removed() || curr_ref.is_removed() || pred_ref.next_locked() != curr {
            trace_log!("remove: validation failed, rescanning");
            return false;
        }

        if !curr_ref.value().value_eq(value) {
            // Absent value: no-op. (curr may be the tail sentinel.)
            return true;
        }

        // Logical removal first (visible to concurrent readers), then
        // physical unlink, inside the same critical section.
        curr_ref.mark_removed();
        pred_ref.set_next(curr_ref.next_locked());
        self.count.fetch_sub(1, RELAXED);

        drop(curr_held);
        drop(pred_held);

        // The node is unreachable by new traversals; free it once no
        // live guard can still hold a reference.
        // SAFETY: curr came from Box::into_raw at insert and was just
        // unlinked under the locks above, exactly once (a concurrent
        // remove of the same node fails validation on its removed flag).
        unsafe {
            guard.defer_retire(curr, reclaim::reclaim_node_boxed);
        }
        trace_log!("remove: unlinked and retired node");
        true
    }
}

impl<V, O> Drop for LazyList<V, O> {
    fn drop(&mut self) {
        // Exclusive access: free every still-linked node directly. Nodes
        // unlinked earlier were retired and are freed by the collector's
        // own drop.
        let mut curr: *mut Node<V> = self.head;
        while curr != self.tail {
            // SAFETY: curr is head or was reached through owned links;
            // retired nodes are never reachable from head.
            let node: Box<Node<V>> = unsafe { Box::from_raw(curr) };
            curr = node.next_locked();
        }
        // SAFETY: the loop freed everything up to the tail sentinel.
        unsafe { drop(Box::from_raw(self.tail)) };
    }
}

// ============================================================================
//  Iterator
// ============================================================================

/// Lock-free forward iterator over a [`LazyList`].
///
/// Yields `&V` in order, ending before the tail sentinel. See
/// [`LazyList::iter`] for the (weak) consistency contract.
pub struct Iter<'g, V> {
    /// Next node to visit.
    curr: *mut Node<V>,

    /// Holding the guard borrow keeps every yielded reference valid.
    _guard: &'g LocalGuard<'g>,
}

impl<'g, V: 'g> Iterator for Iter<'g, V> {
    type Item = &'g V;

    fn next(&mut self) -> Option<Self::Item> {
        // SAFETY: curr was loaded from a reachable link while the guard
        // was live; the guard borrow in self keeps it valid for 'g.
        let node: &'g Node<V> = unsafe { &*self.curr };
        let value = node.value().as_value()?;
        self.curr = node.next();
        Some(value)
    }
}



// ============================================================================
//  Tests
// ============================================================================
