//! # mesh-foam
//!
//! mesh-foam converts arbitrary unstructured volumetric meshes (tetrahedra,
//! hexahedra, prisms, pyramids, and general polyhedra) into the
//! face-addressed polyhedral representation consumed by finite-volume
//! solvers: a point list, a face list, owner and neighbour arrays, a
//! boundary-patch table, and optional named cell zones, written as an ASCII
//! OpenFOAM `polyMesh` directory.
//!
//! ## Features
//! - Cell-to-face topology inversion: internal faces deduplicated across
//!   their two adjacent cells, boundary faces owned by exactly one cell
//! - Named boundary group resolution with baffle support (zero-thickness
//!   surfaces exposed as two mirrored boundary faces) and a synthesized
//!   catch-all patch for unassigned boundary faces
//! - Canonical upper-triangular internal-face ordering
//! - Outward orientation verification against the owner cell's centroid
//! - Host platform abstraction ([`mesh::MeshSource`]) with an arena-backed
//!   in-memory implementation
//!
//! ## Determinism
//!
//! Conversion is a pure function of the host's enumeration orders: cells are
//! walked in host order, groups in declaration order, and unassigned
//! boundary faces are swept in ascending id order, so repeated exports of
//! one mesh produce byte-identical output.
//!
//! ## Usage
//!
//! ```no_run
//! use mesh_foam::prelude::*;
//!
//! fn main() -> Result<(), MeshFoamError> {
//!     let mut mesh = InMemoryMesh::new();
//!     let a = mesh.add_node([0.0, 0.0, 0.0]);
//!     let b = mesh.add_node([1.0, 0.0, 0.0]);
//!     let c = mesh.add_node([0.0, 1.0, 0.0]);
//!     let d = mesh.add_node([0.0, 0.0, 1.0]);
//!     mesh.add_volume(CellType::Tetrahedron, &[a, b, c, d])?;
//!     for tri in [[a, b, c], [a, b, d], [b, c, d], [a, c, d]] {
//!         mesh.add_face(&tri)?;
//!     }
//!
//!     let config = ExportConfig::new("case/constant/polyMesh");
//!     let summary = export_mesh(&mut mesh, &config)?;
//!     assert_eq!(summary.nr_faces, 4);
//!     Ok(())
//! }
//! ```

pub mod export;
pub mod geometry;
pub mod io;
pub mod mesh;
pub mod mesh_error;
pub mod topology;

pub use export::{ExportConfig, ExportSummary, PatchType, PolyMesh, build_poly_mesh, export_mesh};
pub use mesh_error::MeshFoamError;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::export::{
        CellZone, ExportConfig, ExportSummary, Patch, PatchType, PolyMesh, build_poly_mesh,
        export_mesh,
    };
    pub use crate::io::{PolyMeshDir, PolyMeshWriter};
    pub use crate::mesh::{InMemoryMesh, MeshSource, NamedGroup};
    pub use crate::mesh_error::MeshFoamError;
    pub use crate::topology::cell_type::CellType;
    pub use crate::topology::elem::ElemId;
    pub use crate::topology::face_key::FaceKey;
}
