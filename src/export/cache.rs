//! Per-cell face enumeration cache.
//!
//! Asking the host for a volume's faces is the hot collaborator call, and
//! both the counting pass and the classification pass need every face. The
//! cache queries each cell once, keeping the ordered node lists together
//! with their canonical keys. Purely a performance layer; it has no
//! semantic effect on the conversion.

use crate::mesh::MeshSource;
use crate::mesh_error::MeshFoamError;
use crate::topology::elem::ElemId;
use crate::topology::face_key::FaceKey;

/// Ordered faces and canonical keys of one volume element.
#[derive(Clone, Debug)]
pub struct CellFaces {
    /// Host id of the volume.
    pub volume: ElemId,
    /// Ordered node lists, by local face index.
    pub faces: Vec<Vec<ElemId>>,
    /// Canonical key per face, parallel to `faces`.
    pub keys: Vec<FaceKey>,
}

impl CellFaces {
    /// Enumerates `volume`'s faces by increasing local index until the host
    /// reports no more.
    pub fn query<M: MeshSource>(mesh: &M, volume: ElemId) -> Result<Self, MeshFoamError> {
        let mut faces = Vec::new();
        let mut keys = Vec::new();
        let mut local = 0;
        while let Some(nodes) = mesh.volume_face_nodes(volume, local)? {
            keys.push(FaceKey::canonical(&nodes));
            faces.push(nodes);
            local += 1;
        }
        Ok(Self {
            volume,
            faces,
            keys,
        })
    }

    /// Number of faces.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

/// Face cache over every volume, in host enumeration order.
#[derive(Clone, Debug, Default)]
pub struct CellFaceCache {
    cells: Vec<CellFaces>,
}

impl CellFaceCache {
    /// Queries every volume once, in the order given.
    pub fn build<M: MeshSource>(mesh: &M, volumes: &[ElemId]) -> Result<Self, MeshFoamError> {
        let mut cells = Vec::with_capacity(volumes.len());
        for &volume in volumes {
            cells.push(CellFaces::query(mesh, volume)?);
        }
        Ok(Self { cells })
    }

    /// Sum of per-cell face counts (each internal face counted twice).
    pub fn total_face_count(&self) -> usize {
        self.cells.iter().map(CellFaces::len).sum()
    }

    /// Cached cells, in the order they were built.
    pub fn iter(&self) -> impl Iterator<Item = &CellFaces> {
        self.cells.iter()
    }

    /// Number of cached cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
