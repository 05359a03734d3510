//! Sentinel-tagged values and uniform comparator wrapping.
//!
//! The list chain is bounded by two permanent sentinel nodes whose values
//! compare more extreme than any real value. Rather than dispatching on
//! runtime type identity, the boundedness is encoded in the type: every
//! stored value is a [`Sentinel<V>`], and [`Sentinel::precedes`] extends
//! the caller's order with a fixed three-way rule:
//!
//! 1. `NegInf` precedes everything.
//! 2. `PosInf` precedes nothing.
//! 3. Everything precedes `PosInf`.
//! 4. Otherwise, delegate to the caller's order.
//!
//! Every comparison in the crate goes through `precedes` — the sentinel
//! rule is never special-cased at the ends of a traversal.

/// A stored value extended with the two logical infinities.
///
/// `NegInf` appears only in the head sentinel and `PosInf` only in the
/// tail sentinel; neither is ever produced by an insert.
#[derive(Debug)]
pub enum Sentinel<V> {
    /// The head sentinel's value: logically before every real value.
    NegInf,
    /// A real, caller-supplied value.
    Value(V),
    /// The tail sentinel's value: logically after every real value.
    PosInf,
}

impl<V> Sentinel<V> {
    /// Whether `self` is strictly ordered before `other` under `order`
    /// extended with the sentinel rule.
    #[inline]
    pub fn precedes<O>(&self, other: &Self, order: &O) -> bool
    where
        O: Fn(&V, &V) -> bool,
    {
        match (self, other) {
            (Self::NegInf, _) => true,
            (Self::PosInf, _) => false,
            (_, Self::PosInf) => true,
            (_, Self::NegInf) => false,
            (Self::Value(a), Self::Value(b)) => order(a, b),
        }
    }

    /// Whether `self` is strictly ordered before the real value `v`.
    ///
    /// Equivalent to `self.precedes(&Sentinel::Value(v), order)` without
    /// constructing the wrapper. This is the comparison every traversal
    /// makes: a node's (possibly sentinel) value against the target.
    #[inline]
    pub fn precedes_value<O>(&self, v: &V, order: &O) -> bool
    where
        O: Fn(&V, &V) -> bool,
    {
        match self {
            Self::NegInf => true,
            Self::PosInf => false,
            Self::Value(a) => order(a, v),
        }
    }

    /// The real value, or `None` for a sentinel.
    #[inline]
    pub const fn as_value(&self) -> Option<&V> {
        match self {
            Self::Value(v) => Some(v),
            Self::NegInf | Self::PosInf => None,
        }
    }

}

impl<V: PartialEq> Sentinel<V> {
    /// Whether this holds a real value equal to `v`.
    ///
    /// Sentinels are never equal to a real value, so a traversal that
    /// stops at the tail reports a miss without any end-of-chain check.
    #[inline]
    pub fn value_eq(&self, v: &V) -> bool {
        match self {
            Self::Value(inner) => inner == v,
            Self::NegInf | Self::PosInf => false,
        }
    }
}

// ============================================================================
//  Tests
// ============================================================================
