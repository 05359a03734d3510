//! # `lazylist`
//!
//! A concurrent sorted set built as a singly-linked list with per-node
//! locking — the "lazy synchronization" list.
//!
//! Traversal is lock-free; mutation locks only the node(s) adjacent to
//! the mutation point, re-validates, and commits or retries. Removal is
//! logical-then-physical: a node is flagged removed (visible to readers
//! immediately) and unlinked in the same critical section. Unlinked
//! nodes are reclaimed through `seize` once no reader can still hold
//! them.
//!
//! | Operation | Locks held | Consistency |
//! |-----------|------------|-------------|
//! | `contains` | none | best-effort snapshot |
//! | `insert` | predecessor | linearized at validated lock |
//! | `remove` | predecessor + current | linearized at validated locks |
//! | `iter` | none | weak, non-atomic traversal |
//! | `len` | none | approximate counter |
//!
//! ## Thread Safety
//!
//! `LazyList<V, O>` is `Send + Sync` when `V: Send + Sync` and the
//! order is. Concurrent access pins reclamation through the guard-based
//! API:
//!
//! ```rust
//! use lazylist::LazyList;
//!
//! let list: LazyList<u64> = LazyList::natural();
//! let guard = list.guard();
//!
//! list.insert_with_guard(10, &guard);
//! list.insert_with_guard(5, &guard);
//! assert!(list.contains_with_guard(&10, &guard));
//! assert_eq!(list.iter(&guard).copied().collect::<Vec<_>>(), vec![5, 10]);
//! ```
//!
//! The non-guard methods (`insert`, `remove`, `contains`) enter a guard
//! internally and are the convenient choice when no references to
//! stored values need to outlive the call.
//!
//! ## Order Constraints
//!
//! The order supplied to [`LazyList::new`] must be a strict weak
//! ordering that agrees with `V`'s equality (`order(a, b)` true means
//! "`a` strictly precedes `b`"). This is a usage precondition, not
//! negotiated at runtime; behavior under a non-order is unspecified.
//!
//! ## Liveness
//!
//! Operations retry internally until they commit. Progress is not
//! formally lock-free: sustained contention at one chain position can
//! force repeated rescans. Critical sections are O(1) and release
//! promptly.

#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod list;
pub mod ordering;
pub mod sentinel;

mod node;
mod reclaim;
mod tracing_helpers;

// Re-export main types for convenience
pub use list::{Iter, LazyList, get_debug_counters, reset_debug_counters};
pub use sentinel::Sentinel;
