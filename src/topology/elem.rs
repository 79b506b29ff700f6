//! `ElemId`: a strong, zero-cost handle for host-side mesh entities
//!
//! Host mesh platforms number their nodes and elements starting at 1, so 0
//! never names a live entity. `ElemId` wraps a nonzero `u64` to enforce at
//! compile- and runtime that 0 stays reserved as an invalid or sentinel
//! value, and carries the 1-based-to-0-based shift applied to everything the
//! exporter emits.
//!
//! This module provides:
//! - A transparent `ElemId` newtype around `NonZeroU64` for zero-cost
//!   memory layout guarantees.
//! - A fallible constructor and accessors.
//! - Implementations of common traits (`Debug`, `Display`, ordering,
//!   hashing) so `ElemId` can be used in maps, sets, and printed easily.

use std::{fmt, num::NonZeroU64};

use crate::mesh_error::MeshFoamError;

/// Host-side 1-based id of a node, face, or volume element.
///
/// # Memory layout
/// This type is `repr(transparent)`, meaning it has the same ABI and
/// alignment as its single field (`NonZeroU64`).
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct ElemId(NonZeroU64);

impl ElemId {
    /// Creates a new `ElemId` from a raw host id.
    ///
    /// Fails with [`MeshFoamError::InvalidElemId`] if `raw == 0`.
    #[inline]
    pub fn new(raw: u64) -> Result<Self, MeshFoamError> {
        NonZeroU64::new(raw)
            .map(ElemId)
            .ok_or(MeshFoamError::InvalidElemId)
    }

    /// Returns the raw 1-based host id.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0.get()
    }

    /// Returns the 0-based index used by the emitted mesh arrays.
    #[inline]
    pub const fn index0(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

/// Custom `Debug` implementation to display as `ElemId(raw_value)`.
impl fmt::Debug for ElemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ElemId").field(&self.get()).finish()
    }
}

/// Prints the numeric host id without any wrapper text.
impl fmt::Display for ElemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_zero_is_rejected() {
        assert!(matches!(ElemId::new(0), Err(MeshFoamError::InvalidElemId)));
    }

    #[test]
    fn new_and_get() {
        let e = ElemId::new(42).unwrap();
        assert_eq!(e.get(), 42);
        assert_eq!(e.index0(), 41);
    }

    #[test]
    fn debug_and_display() {
        let e = ElemId::new(7).unwrap();
        assert_eq!(format!("{:?}", e), "ElemId(7)");
        assert_eq!(format!("{}", e), "7");
    }

    #[test]
    fn ordering_and_hash() {
        let a = ElemId::new(1).unwrap();
        let b = ElemId::new(2).unwrap();
        assert!(a < b);
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(a);
        set.insert(b);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn max_value() {
        let e = ElemId::new(u64::MAX).unwrap();
        assert_eq!(e.get(), u64::MAX);
    }
}

#[cfg(test)]
mod serde_tests {
    use super::*;

    #[test]
    fn json_roundtrip() {
        let e = ElemId::new(123).unwrap();
        let s = serde_json::to_string(&e).unwrap();
        let e2: ElemId = serde_json::from_str(&s).unwrap();
        assert_eq!(e2, e);
    }
}
