//! Mesh-to-polyMesh conversion entry points.
//!
//! [`build_poly_mesh`] runs the pure conversion: boundary group resolution,
//! the cell pass, and the upper-triangular reorder, yielding a [`PolyMesh`]
//! without touching the filesystem. [`export_mesh`] wraps it with the output
//! directory handling of §6-style exporters: every required file is opened
//! before any conversion work, so I/O problems abort early.

pub mod boundary;
pub mod builder;
pub mod cache;

use std::fmt;
use std::path::PathBuf;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::io::polymesh::PolyMeshDir;
use crate::mesh::MeshSource;
use crate::mesh_error::MeshFoamError;

/// Boundary condition label attached to a patch.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchType {
    #[default]
    Patch,
    Wall,
    Symmetry,
    Empty,
    Wedge,
    Cyclic,
}

impl PatchType {
    /// The boundary-file keyword for this type.
    pub fn keyword(self) -> &'static str {
        match self {
            PatchType::Patch => "patch",
            PatchType::Wall => "wall",
            PatchType::Symmetry => "symmetry",
            PatchType::Empty => "empty",
            PatchType::Wedge => "wedge",
            PatchType::Cyclic => "cyclic",
        }
    }
}

impl fmt::Display for PatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl std::str::FromStr for PatchType {
    type Err = MeshFoamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patch" => Ok(PatchType::Patch),
            "wall" => Ok(PatchType::Wall),
            "symmetry" => Ok(PatchType::Symmetry),
            "empty" => Ok(PatchType::Empty),
            "wedge" => Ok(PatchType::Wedge),
            "cyclic" => Ok(PatchType::Cyclic),
            other => Err(MeshFoamError::UnknownPatchType(other.to_string())),
        }
    }
}

/// Immutable configuration for one export invocation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory receiving the polyMesh files.
    pub output_dir: PathBuf,
    /// Group-name to boundary-type assignments, in selection order. Groups
    /// without an assignment (the synthesized catch-all included) default to
    /// `patch`.
    pub boundary_types: Vec<(String, PatchType)>,
    /// Verify (and fix) internal face winding against the owner centroid.
    /// Disabling trusts the host's winding and skips the geometry queries.
    pub verify_orientation: bool,
}

impl ExportConfig {
    /// Configuration with orientation verification on and no type
    /// assignments.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            boundary_types: Vec::new(),
            verify_orientation: true,
        }
    }

    /// Assigns a boundary type to a named group.
    pub fn with_boundary_type(mut self, group: &str, patch_type: PatchType) -> Self {
        self.boundary_types.push((group.to_string(), patch_type));
        self
    }

    /// The type assigned to `group`, defaulting to `patch`.
    pub fn patch_type_for(&self, group: &str) -> PatchType {
        self.boundary_types
            .iter()
            .find(|(name, _)| name == group)
            .map(|(_, patch_type)| *patch_type)
            .unwrap_or_default()
    }
}

/// One boundary patch of the converted mesh.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Patch {
    pub name: String,
    pub patch_type: PatchType,
    /// Number of faces in the patch (baffle groups count both sides).
    pub nr_faces: usize,
    /// Index of the patch's first face in the concatenated face list.
    pub start_face: usize,
}

/// A named cell zone, carried through as 0-based cell indices.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CellZone {
    pub name: String,
    pub cells: Vec<usize>,
}

/// The face-addressed mesh produced by the conversion.
///
/// Faces hold 0-based node indices; internal faces come first in
/// upper-triangular order, then the boundary faces grouped contiguously per
/// patch in declaration order. Owner has one entry per face and neighbour
/// one per internal face; slots the cell pass never filled hold `-1`.
#[derive(Clone, Debug, Default)]
pub struct PolyMesh {
    pub points: Vec<[f64; 3]>,
    pub faces: Vec<Vec<usize>>,
    pub owner: Vec<i64>,
    pub neighbour: Vec<i64>,
    pub nr_internal_faces: usize,
    pub nr_cells: usize,
    pub patches: Vec<Patch>,
    pub cell_zones: Vec<CellZone>,
}

impl PolyMesh {
    /// Total face count (internal + boundary).
    pub fn nr_faces(&self) -> usize {
        self.faces.len()
    }

    /// Number of points.
    pub fn nr_points(&self) -> usize {
        self.points.len()
    }
}

/// Counts and patch table reported by a completed export.
#[derive(Clone, Debug)]
pub struct ExportSummary {
    pub nr_points: usize,
    pub nr_cells: usize,
    pub nr_faces: usize,
    pub nr_internal_faces: usize,
    pub patches: Vec<Patch>,
}

/// Converts `mesh` into a face-addressed polyhedral mesh without touching
/// disk.
///
/// The boundary group resolver may create a catch-all face group on the
/// host, which is why the mesh handle is mutable; no other host state is
/// modified. Two conversions must not run concurrently against one handle.
pub fn build_poly_mesh<M: MeshSource>(
    mesh: &mut M,
    config: &ExportConfig,
) -> Result<PolyMesh, MeshFoamError> {
    let start = Instant::now();
    log::debug!("number of nodes: {}", mesh.node_count());
    let boundary = boundary::resolve_boundary_groups(mesh, config)?;
    let poly = builder::build_topology(mesh, config, boundary)?;
    log::debug!("converted mesh in {:.3}s", start.elapsed().as_secs_f64());
    Ok(poly)
}

/// Converts `mesh` and writes the polyMesh directory named by `config`.
///
/// The five required files are opened before any conversion work so that
/// I/O failures abort early; a conversion failure removes the files this
/// call created, leaving no partial output behind.
pub fn export_mesh<M: MeshSource>(
    mesh: &mut M,
    config: &ExportConfig,
) -> Result<ExportSummary, MeshFoamError> {
    let mut dir = PolyMeshDir::create(&config.output_dir)?;
    let poly = match build_poly_mesh(mesh, config) {
        Ok(poly) => poly,
        Err(err) => {
            dir.discard();
            return Err(err);
        }
    };
    dir.write_all(&poly)?;
    log::debug!("finished writing to {}", config.output_dir.display());
    Ok(ExportSummary {
        nr_points: poly.nr_points(),
        nr_cells: poly.nr_cells,
        nr_faces: poly.nr_faces(),
        nr_internal_faces: poly.nr_internal_faces,
        patches: poly.patches,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_type_keywords_roundtrip() {
        for patch_type in [
            PatchType::Patch,
            PatchType::Wall,
            PatchType::Symmetry,
            PatchType::Empty,
            PatchType::Wedge,
            PatchType::Cyclic,
        ] {
            let parsed: PatchType = patch_type.keyword().parse().unwrap();
            assert_eq!(parsed, patch_type);
        }
        assert!("slip".parse::<PatchType>().is_err());
    }

    #[test]
    fn config_defaults_to_patch() {
        let config = ExportConfig::new("out").with_boundary_type("inlet", PatchType::Wall);
        assert_eq!(config.patch_type_for("inlet"), PatchType::Wall);
        assert_eq!(config.patch_type_for("unknown"), PatchType::Patch);
        assert!(config.verify_orientation);
    }

    #[test]
    fn patch_type_serde_uses_lowercase() {
        let json = serde_json::to_string(&PatchType::Wall).unwrap();
        assert_eq!(json, "\"wall\"");
        let back: PatchType = serde_json::from_str("\"cyclic\"").unwrap();
        assert_eq!(back, PatchType::Cyclic);
    }
}
