//! Host mesh platform abstraction.
//!
//! The exporter drives its host through [`MeshSource`]: a blocking query
//! interface over nodes, volume elements, standalone 2D face elements, and
//! named groups, all using the host's 1-based ids. [`InMemoryMesh`] is an
//! arena-backed implementation for tests and standalone conversion.

pub mod in_memory;

pub use in_memory::InMemoryMesh;

use crate::mesh_error::MeshFoamError;
use crate::topology::elem::ElemId;

/// A named group of host elements, in declaration order.
#[derive(Clone, Debug)]
pub struct NamedGroup {
    pub name: String,
    pub members: Vec<ElemId>,
}

/// Query interface the exporter needs from a host mesh platform.
///
/// Node ids are assumed contiguous `1..=node_count()`. The order returned by
/// [`MeshSource::volumes`] is the host's stable enumeration order and defines
/// the exported 0-based cell numbering.
pub trait MeshSource {
    /// Number of nodes.
    fn node_count(&self) -> usize;

    /// Coordinate of a node.
    fn node_position(&self, node: ElemId) -> Result<[f64; 3], MeshFoamError>;

    /// Volume elements in stable host enumeration order.
    fn volumes(&self) -> Vec<ElemId>;

    /// Ordered node list of a volume element.
    fn volume_nodes(&self, volume: ElemId) -> Result<Vec<ElemId>, MeshFoamError>;

    /// Ordered node list of a volume's face by local face index.
    ///
    /// Returns `Ok(None)` once `local_face` runs past the cell's last face;
    /// callers enumerate by increasing index until then.
    fn volume_face_nodes(
        &self,
        volume: ElemId,
        local_face: usize,
    ) -> Result<Option<Vec<ElemId>>, MeshFoamError>;

    /// Ordered node list of a standalone (2D) face element, as referenced by
    /// face groups.
    fn face_nodes(&self, face: ElemId) -> Result<Vec<ElemId>, MeshFoamError>;

    /// Face elements incident to exactly one volume ("free" faces).
    fn free_faces(&self) -> Vec<ElemId>;

    /// Named face groups in declaration order.
    fn face_groups(&self) -> Vec<NamedGroup>;

    /// Named volume groups in declaration order.
    fn volume_groups(&self) -> Vec<NamedGroup>;

    /// Registers a new named face group on the host.
    fn create_face_group(&mut self, name: &str, members: &[ElemId])
    -> Result<(), MeshFoamError>;
}
