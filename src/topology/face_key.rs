//! Order-independent face identity keys.
//!
//! Two cells sharing a face report the same node set in different winding
//! order; sorting the node ids gives an identity both sides agree on. The
//! reversed (descending) form is a second, distinct key used only to find or
//! register the mirror entry of a baffle face.

use crate::topology::elem::ElemId;

/// Sorted node-id key identifying a face irrespective of winding.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct FaceKey(Box<[ElemId]>);

impl FaceKey {
    /// Ascending key: the identity used for internal/boundary deduplication.
    pub fn canonical(nodes: &[ElemId]) -> Self {
        let mut ids = nodes.to_vec();
        ids.sort_unstable();
        FaceKey(ids.into_boxed_slice())
    }

    /// Descending companion key naming a baffle's mirror face.
    pub fn reversed(nodes: &[ElemId]) -> Self {
        let mut ids = nodes.to_vec();
        ids.sort_unstable_by(|a, b| b.cmp(a));
        FaceKey(ids.into_boxed_slice())
    }

    /// The mirror of this key (ascending and descending forms swap).
    pub fn mirror(&self) -> Self {
        let mut ids = self.0.to_vec();
        ids.reverse();
        FaceKey(ids.into_boxed_slice())
    }

    /// The sorted node ids.
    pub fn nodes(&self) -> &[ElemId] {
        &self.0
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
