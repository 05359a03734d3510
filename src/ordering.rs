//! Standard memory orderings for concurrent node access.
//!
//! These constants ensure consistent ordering usage across the codebase
//! and make the intent clear at each access point.

use std::sync::atomic::Ordering;

/// Ordering for reading node fields during optimistic traversal.
/// Pairs with writer's Release stores.
pub const READ_ORD: Ordering = Ordering::Acquire;

/// Ordering for writing node fields under lock.
/// Pairs with reader's Acquire loads.
pub const WRITE_ORD: Ordering = Ordering::Release;

/// Ordering for relaxed loads (re-reads within a locked region, and the
/// approximate element count).
/// Safe because the lock provides synchronization, or because the value
/// is explicitly best-effort.
pub const RELAXED: Ordering = Ordering::Relaxed;
