//! Arena-backed `MeshSource` for tests and standalone conversion.
//!
//! Nodes are numbered `1..=n` in insertion order; face and volume elements
//! share one element id space, also starting at 1, mirroring the id scheme
//! of the host platforms this crate targets.

use hashbrown::HashMap;

use crate::mesh::{MeshSource, NamedGroup};
use crate::mesh_error::MeshFoamError;
use crate::topology::cell_type::CellType;
use crate::topology::elem::ElemId;
use crate::topology::face_key::FaceKey;

#[derive(Clone, Debug)]
struct Volume {
    id: ElemId,
    cell_type: CellType,
    nodes: Vec<ElemId>,
    /// Explicit face lists; only populated for `Polyhedron`.
    poly_faces: Vec<Vec<ElemId>>,
}

#[derive(Clone, Debug)]
struct FaceElem {
    id: ElemId,
    nodes: Vec<ElemId>,
}

/// In-memory unstructured mesh with named groups.
#[derive(Clone, Debug)]
pub struct InMemoryMesh {
    nodes: Vec<[f64; 3]>,
    volumes: Vec<Volume>,
    faces: Vec<FaceElem>,
    volume_index: HashMap<ElemId, usize>,
    face_index: HashMap<ElemId, usize>,
    face_groups: Vec<NamedGroup>,
    volume_groups: Vec<NamedGroup>,
    next_elem: u64,
}

impl Default for InMemoryMesh {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            volumes: Vec::new(),
            faces: Vec::new(),
            volume_index: HashMap::new(),
            face_index: HashMap::new(),
            face_groups: Vec::new(),
            volume_groups: Vec::new(),
            next_elem: 1,
        }
    }

    fn alloc_elem(&mut self) -> ElemId {
        let id = ElemId::new(self.next_elem).expect("element ids start at 1");
        self.next_elem += 1;
        id
    }

    /// Adds a node and returns its 1-based id.
    pub fn add_node(&mut self, position: [f64; 3]) -> ElemId {
        self.nodes.push(position);
        ElemId::new(self.nodes.len() as u64).expect("node ids start at 1")
    }

    /// Adds a volume element of a standard cell type.
    pub fn add_volume(
        &mut self,
        cell_type: CellType,
        nodes: &[ElemId],
    ) -> Result<ElemId, MeshFoamError> {
        let expected = cell_type.node_count().ok_or_else(|| {
            MeshFoamError::MeshQuery(
                "polyhedral volumes must be added with add_polyhedron".into(),
            )
        })?;
        if nodes.len() != expected {
            return Err(MeshFoamError::MeshQuery(format!(
                "{cell_type:?} expects {expected} nodes, got {}",
                nodes.len()
            )));
        }
        let id = self.alloc_elem();
        self.volume_index.insert(id, self.volumes.len());
        self.volumes.push(Volume {
            id,
            cell_type,
            nodes: nodes.to_vec(),
            poly_faces: Vec::new(),
        });
        Ok(id)
    }

    /// Adds a general polyhedron given its explicit face node lists.
    pub fn add_polyhedron(&mut self, faces: Vec<Vec<ElemId>>) -> Result<ElemId, MeshFoamError> {
        if faces.len() < 4 {
            return Err(MeshFoamError::MeshQuery(format!(
                "a polyhedron needs at least 4 faces, got {}",
                faces.len()
            )));
        }
        for face in &faces {
            if face.len() < 3 {
                return Err(MeshFoamError::MeshQuery(
                    "polyhedron face needs at least 3 nodes".into(),
                ));
            }
        }
        let mut nodes: Vec<ElemId> = faces.iter().flatten().copied().collect();
        nodes.sort_unstable();
        nodes.dedup();
        let id = self.alloc_elem();
        self.volume_index.insert(id, self.volumes.len());
        self.volumes.push(Volume {
            id,
            cell_type: CellType::Polyhedron,
            nodes,
            poly_faces: faces,
        });
        Ok(id)
    }

    /// Adds a standalone 2D face element (the kind face groups reference).
    pub fn add_face(&mut self, nodes: &[ElemId]) -> Result<ElemId, MeshFoamError> {
        if nodes.len() < 3 {
            return Err(MeshFoamError::MeshQuery(
                "a face element needs at least 3 nodes".into(),
            ));
        }
        let id = self.alloc_elem();
        self.face_index.insert(id, self.faces.len());
        self.faces.push(FaceElem {
            id,
            nodes: nodes.to_vec(),
        });
        Ok(id)
    }

    /// Declares a named face group.
    pub fn add_face_group(&mut self, name: &str, members: &[ElemId]) {
        self.face_groups.push(NamedGroup {
            name: name.to_string(),
            members: members.to_vec(),
        });
    }

    /// Declares a named volume group (exported as a cell zone).
    pub fn add_volume_group(&mut self, name: &str, members: &[ElemId]) {
        self.volume_groups.push(NamedGroup {
            name: name.to_string(),
            members: members.to_vec(),
        });
    }

    /// Looks up a face group by name.
    pub fn face_group(&self, name: &str) -> Option<&NamedGroup> {
        self.face_groups.iter().find(|g| g.name == name)
    }

    fn volume_faces(volume: &Volume) -> Vec<Vec<ElemId>> {
        if volume.cell_type == CellType::Polyhedron {
            return volume.poly_faces.clone();
        }
        let Some(tables) = volume.cell_type.local_faces() else {
            return Vec::new();
        };
        tables
            .iter()
            .map(|local| local.iter().map(|&i| volume.nodes[i]).collect())
            .collect()
    }

    fn volume_at(&self, volume: ElemId) -> Result<&Volume, MeshFoamError> {
        self.volume_index
            .get(&volume)
            .map(|&idx| &self.volumes[idx])
            .ok_or_else(|| MeshFoamError::MeshQuery(format!("unknown volume element {volume}")))
    }
}

impl MeshSource for InMemoryMesh {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn node_position(&self, node: ElemId) -> Result<[f64; 3], MeshFoamError> {
        self.nodes
            .get(node.index0())
            .copied()
            .ok_or_else(|| MeshFoamError::MeshQuery(format!("unknown node {node}")))
    }

    fn volumes(&self) -> Vec<ElemId> {
        self.volumes.iter().map(|v| v.id).collect()
    }

    fn volume_nodes(&self, volume: ElemId) -> Result<Vec<ElemId>, MeshFoamError> {
        Ok(self.volume_at(volume)?.nodes.clone())
    }

    fn volume_face_nodes(
        &self,
        volume: ElemId,
        local_face: usize,
    ) -> Result<Option<Vec<ElemId>>, MeshFoamError> {
        let volume = self.volume_at(volume)?;
        Ok(Self::volume_faces(volume).into_iter().nth(local_face))
    }

    fn face_nodes(&self, face: ElemId) -> Result<Vec<ElemId>, MeshFoamError> {
        self.face_index
            .get(&face)
            .map(|&idx| self.faces[idx].nodes.clone())
            .ok_or_else(|| MeshFoamError::MeshQuery(format!("unknown face element {face}")))
    }

    fn free_faces(&self) -> Vec<ElemId> {
        let mut incidence: HashMap<FaceKey, usize> = HashMap::new();
        for volume in &self.volumes {
            for face in Self::volume_faces(volume) {
                *incidence.entry(FaceKey::canonical(&face)).or_insert(0) += 1;
            }
        }
        self.faces
            .iter()
            .filter(|f| incidence.get(&FaceKey::canonical(&f.nodes)) == Some(&1))
            .map(|f| f.id)
            .collect()
    }

    fn face_groups(&self) -> Vec<NamedGroup> {
        self.face_groups.clone()
    }

    fn volume_groups(&self) -> Vec<NamedGroup> {
        self.volume_groups.clone()
    }

    fn create_face_group(
        &mut self,
        name: &str,
        members: &[ElemId],
    ) -> Result<(), MeshFoamError> {
        for member in members {
            if !self.face_index.contains_key(member) {
                return Err(MeshFoamError::MeshQuery(format!(
                    "face group `{name}` references unknown face element {member}"
                )));
            }
        }
        self.face_groups.push(NamedGroup {
            name: name.to_string(),
            members: members.to_vec(),
        });
        Ok(())
    }
}
