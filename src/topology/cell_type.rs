//! Cell type metadata for volume elements.
//!
//! The reference elements use the following vertex ordering:
//! - Tetrahedron: `[v0, v1, v2, v3]`.
//! - Hexahedron: `[v0..v3]` bottom quad, `[v4..v7]` top quad, matched pairwise.
//! - Prism: `[v0, v1, v2]` bottom triangle, `[v3, v4, v5]` top triangle.
//! - Pyramid: `[v0..v3]` base quad, `v4` apex.
//!
//! Polyhedral cells carry no fixed ordering; their face lists are stored
//! explicitly by the host.

/// Volume element types understood by the face enumeration.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CellType {
    /// 3D simplex (tet).
    Tetrahedron,
    /// 3D tensor-product cell (hex).
    Hexahedron,
    /// 3D wedge/prism.
    Prism,
    /// 3D pyramid.
    Pyramid,
    /// Generic polyhedron with explicit face lists.
    Polyhedron,
}

impl CellType {
    /// Expected node count, `None` for general polyhedra.
    pub fn node_count(self) -> Option<usize> {
        match self {
            CellType::Tetrahedron => Some(4),
            CellType::Hexahedron => Some(8),
            CellType::Prism => Some(6),
            CellType::Pyramid => Some(5),
            CellType::Polyhedron => None,
        }
    }

    /// Canonical local faces as indices into the cell's node list, `None`
    /// for general polyhedra.
    pub fn local_faces(self) -> Option<&'static [&'static [usize]]> {
        match self {
            CellType::Tetrahedron => Some(&TET_FACES),
            CellType::Hexahedron => Some(&HEX_FACES),
            CellType::Prism => Some(&PRISM_FACES),
            CellType::Pyramid => Some(&PYRAMID_FACES),
            CellType::Polyhedron => None,
        }
    }

    /// Number of faces, `None` for general polyhedra.
    pub fn face_count(self) -> Option<usize> {
        self.local_faces().map(<[_]>::len)
    }
}

const TET_FACE_0: [usize; 3] = [0, 1, 2];
const TET_FACE_1: [usize; 3] = [0, 1, 3];
const TET_FACE_2: [usize; 3] = [1, 2, 3];
const TET_FACE_3: [usize; 3] = [0, 2, 3];
const HEX_FACE_0: [usize; 4] = [0, 1, 2, 3];
const HEX_FACE_1: [usize; 4] = [4, 5, 6, 7];
const HEX_FACE_2: [usize; 4] = [0, 1, 5, 4];
const HEX_FACE_3: [usize; 4] = [1, 2, 6, 5];
const HEX_FACE_4: [usize; 4] = [2, 3, 7, 6];
const HEX_FACE_5: [usize; 4] = [3, 0, 4, 7];
const PRISM_FACE_0: [usize; 3] = [0, 1, 2];
const PRISM_FACE_1: [usize; 3] = [3, 4, 5];
const PRISM_FACE_2: [usize; 4] = [0, 1, 4, 3];
const PRISM_FACE_3: [usize; 4] = [1, 2, 5, 4];
const PRISM_FACE_4: [usize; 4] = [2, 0, 3, 5];
const PYRAMID_FACE_0: [usize; 4] = [0, 1, 2, 3];
const PYRAMID_FACE_1: [usize; 3] = [0, 1, 4];
const PYRAMID_FACE_2: [usize; 3] = [1, 2, 4];
const PYRAMID_FACE_3: [usize; 3] = [2, 3, 4];
const PYRAMID_FACE_4: [usize; 3] = [3, 0, 4];

const TET_FACES: [&[usize]; 4] = [&TET_FACE_0, &TET_FACE_1, &TET_FACE_2, &TET_FACE_3];
const HEX_FACES: [&[usize]; 6] = [
    &HEX_FACE_0,
    &HEX_FACE_1,
    &HEX_FACE_2,
    &HEX_FACE_3,
    &HEX_FACE_4,
    &HEX_FACE_5,
];
const PRISM_FACES: [&[usize]; 5] = [
    &PRISM_FACE_0,
    &PRISM_FACE_1,
    &PRISM_FACE_2,
    &PRISM_FACE_3,
    &PRISM_FACE_4,
];
const PYRAMID_FACES: [&[usize]; 5] = [
    &PYRAMID_FACE_0,
    &PYRAMID_FACE_1,
    &PYRAMID_FACE_2,
    &PYRAMID_FACE_3,
    &PYRAMID_FACE_4,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_counts() {
        assert_eq!(CellType::Tetrahedron.face_count(), Some(4));
        assert_eq!(CellType::Hexahedron.face_count(), Some(6));
        assert_eq!(CellType::Prism.face_count(), Some(5));
        assert_eq!(CellType::Pyramid.face_count(), Some(5));
        assert_eq!(CellType::Polyhedron.face_count(), None);
    }

    #[test]
    fn local_faces_index_within_node_count() {
        for cell_type in [
            CellType::Tetrahedron,
            CellType::Hexahedron,
            CellType::Prism,
            CellType::Pyramid,
        ] {
            let nodes = cell_type.node_count().unwrap();
            for face in cell_type.local_faces().unwrap() {
                assert!(face.len() >= 3);
                assert!(face.iter().all(|&i| i < nodes));
            }
        }
    }

    #[test]
    fn every_edge_is_shared_by_two_faces() {
        // Closed surfaces: each edge of the cell appears in exactly two of
        // its faces.
        for cell_type in [
            CellType::Tetrahedron,
            CellType::Hexahedron,
            CellType::Prism,
            CellType::Pyramid,
        ] {
            let mut edge_count = std::collections::HashMap::new();
            for face in cell_type.local_faces().unwrap() {
                for i in 0..face.len() {
                    let a = face[i];
                    let b = face[(i + 1) % face.len()];
                    let edge = (a.min(b), a.max(b));
                    *edge_count.entry(edge).or_insert(0) += 1;
                }
            }
            assert!(
                edge_count.values().all(|&n| n == 2),
                "open surface for {cell_type:?}: {edge_count:?}"
            );
        }
    }
}
