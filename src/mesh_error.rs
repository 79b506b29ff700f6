//! MeshFoamError: unified error type for mesh-foam public APIs
//!
//! This error type is used throughout the mesh-foam library to provide robust,
//! non-panicking error handling for all public APIs.

use thiserror::Error;

use crate::topology::elem::ElemId;

/// Unified error type for mesh-foam operations.
#[derive(Debug, Error)]
pub enum MeshFoamError {
    /// Attempted to construct an ElemId with a zero value (invalid).
    #[error("ElemId must be non-zero (0 is reserved as invalid/sentinel)")]
    InvalidElemId,
    /// A boundary face was claimed by two groups. Face/group membership is
    /// exclusive; the only sanctioned duplication is a baffle's mirror entry.
    #[error("face {face} belongs to two or more groups: `{first_group}` and `{second_group}`")]
    GroupConflict {
        face: ElemId,
        first_group: String,
        second_group: String,
    },
    /// A baffle face's mirror slot was missing or already owned. More than two
    /// coincident faces at one node set cannot be paired up.
    #[error(
        "baffle face {nodes:?} in group `{group}` has no unclaimed mirror slot \
         (more than two coincident faces at one node set?)"
    )]
    BaffleTwinUnresolved { group: String, nodes: Vec<ElemId> },
    /// The host mesh platform returned inconsistent data for a query.
    #[error("mesh query error: {0}")]
    MeshQuery(String),
    /// A boundary-type keyword outside the fixed enumeration.
    #[error("unknown boundary type `{0}` (expected patch/wall/symmetry/empty/wedge/cyclic)")]
    UnknownPatchType(String),
    /// An output directory or file could not be created or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
