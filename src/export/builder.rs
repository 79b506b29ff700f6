//! Single-pass face topology construction and upper-triangular ordering.
//!
//! The builder walks every cell in host order and every cached face within
//! it, classifying each face by one dictionary probe: a key seen before in
//! the internal table completes that face's neighbour; a key claimed by the
//! boundary table fills the matching owner slot (with baffle twins resolved
//! through the reversed key); anything else is a brand-new internal face,
//! orientation-checked and registered for its second sighting.

use hashbrown::HashMap;

use crate::export::boundary::BoundaryTable;
use crate::export::cache::{CellFaceCache, CellFaces};
use crate::export::{CellZone, ExportConfig, Patch, PolyMesh};
use crate::geometry;
use crate::mesh::MeshSource;
use crate::mesh_error::MeshFoamError;
use crate::topology::elem::ElemId;
use crate::topology::face_key::FaceKey;

/// Result of probing a face key against the two face tables.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum FaceLookup {
    /// First sighting of a new internal face.
    NotFound,
    /// Second sighting of an internal face.
    Internal(usize),
    /// Face claimed by a boundary group.
    Boundary(usize),
}

fn probe(
    internal: &HashMap<FaceKey, usize>,
    boundary: &BoundaryTable,
    key: &FaceKey,
) -> FaceLookup {
    if let Some(&index) = internal.get(key) {
        FaceLookup::Internal(index)
    } else if let Some(index) = boundary.lookup(key) {
        FaceLookup::Boundary(index)
    } else {
        FaceLookup::NotFound
    }
}

/// Builds the concatenated face/owner/neighbour arrays and assembles the
/// final [`PolyMesh`].
pub(crate) fn build_topology<M: MeshSource>(
    mesh: &M,
    config: &ExportConfig,
    mut boundary: BoundaryTable,
) -> Result<PolyMesh, MeshFoamError> {
    let volumes = mesh.volumes();
    let cache = CellFaceCache::build(mesh, &volumes)?;

    let total_cell_faces = cache.total_face_count();
    let nr_boundary = boundary.nr_faces();
    if (total_cell_faces + boundary.free_face_count) % 2 != 0 {
        log::warn!(
            "face count mismatch: {total_cell_faces} cell-side faces and {} free faces \
             don't pair up; the mesh may be non-manifold",
            boundary.free_face_count
        );
    }
    let predicted_faces =
        (total_cell_faces + boundary.free_face_count) / 2 + boundary.baffle_faces;
    let predicted_internal = predicted_faces.saturating_sub(nr_boundary);
    log::debug!(
        "total number of faces: {predicted_faces}, internal: {predicted_internal}, \
         boundary: {nr_boundary}"
    );

    let mut internal_faces: Vec<Vec<ElemId>> = Vec::with_capacity(predicted_internal);
    let mut internal_keys: HashMap<FaceKey, usize> =
        HashMap::with_capacity(predicted_internal);
    let mut owner_internal: Vec<i64> = Vec::with_capacity(predicted_internal);
    let mut neighbour: Vec<i64> = Vec::with_capacity(predicted_internal);
    let mut owner_boundary: Vec<i64> = vec![-1; nr_boundary];

    for (cell, cell_faces) in cache.iter().enumerate() {
        let mut cell_centroid: Option<[f64; 3]> = None;
        for (local, nodes) in cell_faces.faces.iter().enumerate() {
            let key = &cell_faces.keys[local];
            match probe(&internal_keys, &boundary, key) {
                FaceLookup::Internal(index) => {
                    // Second sighting: the face already has an owner.
                    neighbour[index] = cell as i64;
                }
                FaceLookup::Boundary(index) => {
                    if owner_boundary[index] == -1 {
                        owner_boundary[index] = cell as i64;
                        boundary.faces[index] = nodes.clone();
                    } else {
                        // A baffle's first side is taken; the reversed key
                        // names the twin slot.
                        let reversed = FaceKey::reversed(nodes);
                        match boundary.lookup(&reversed) {
                            Some(twin) if owner_boundary[twin] == -1 => {
                                owner_boundary[twin] = cell as i64;
                                boundary.faces[twin] = nodes.clone();
                            }
                            _ => {
                                return Err(MeshFoamError::BaffleTwinUnresolved {
                                    group: boundary.group_of(index).to_string(),
                                    nodes: nodes.clone(),
                                });
                            }
                        }
                    }
                }
                FaceLookup::NotFound => {
                    let mut nodes = nodes.clone();
                    if config.verify_orientation {
                        let centroid = match cell_centroid {
                            Some(c) => c,
                            None => {
                                let c = cell_centroid_of(mesh, cell_faces)?;
                                cell_centroid = Some(c);
                                c
                            }
                        };
                        let points = face_points(mesh, &nodes)?;
                        if !geometry::points_outward(&points, centroid) {
                            nodes.reverse();
                        }
                    }
                    let index = internal_faces.len();
                    internal_keys.insert(key.clone(), index);
                    owner_internal.push(cell as i64);
                    neighbour.push(-1);
                    internal_faces.push(nodes);
                }
            }
        }
    }

    // A baffle on the outer surface has only one incident cell; mirror the
    // owned side onto its unclaimed twin so both entries leave with the same
    // owner and opposite winding.
    for index in 0..nr_boundary {
        if owner_boundary[index] != -1 {
            continue;
        }
        let Some(twin) = boundary.twin[index] else {
            continue;
        };
        if owner_boundary[twin] == -1 {
            continue;
        }
        owner_boundary[index] = owner_boundary[twin];
        let mut nodes = boundary.faces[twin].clone();
        nodes.reverse();
        boundary.faces[index] = nodes;
    }

    let nr_internal = internal_faces.len();
    if nr_internal != predicted_internal {
        log::warn!(
            "expected {predicted_internal} internal faces but found {nr_internal}; \
             the mesh may be non-manifold"
        );
    }
    let unset_neighbours = neighbour.iter().filter(|&&n| n == -1).count();
    if unset_neighbours > 0 {
        log::warn!(
            "{unset_neighbours} internal face(s) never saw a second cell; \
             their neighbour entries stay at -1"
        );
    }
    let unset_owners = owner_boundary.iter().filter(|&&o| o == -1).count();
    if unset_owners > 0 {
        log::warn!(
            "{unset_owners} boundary face slot(s) were never claimed by a cell; \
             their owner entries stay at -1"
        );
    }

    sort_upper_triangular(&owner_internal, &mut neighbour, &mut internal_faces);

    // Assemble the final artifact, shifting every id to 0-based.
    let nr_points = mesh.node_count();
    let mut points = Vec::with_capacity(nr_points);
    for raw in 1..=nr_points as u64 {
        let node = ElemId::new(raw)?;
        points.push(mesh.node_position(node)?);
    }

    let mut faces = Vec::with_capacity(nr_internal + nr_boundary);
    faces.extend(internal_faces.into_iter().map(|nodes| to_indices(&nodes)));
    faces.extend(boundary.faces.iter().map(|nodes| to_indices(nodes)));

    let mut owner = owner_internal;
    owner.extend(owner_boundary);

    let patches = boundary
        .patches
        .iter()
        .map(|spec| Patch {
            name: spec.name.clone(),
            patch_type: spec.patch_type,
            nr_faces: spec.nr_faces,
            start_face: nr_internal + spec.offset,
        })
        .collect();

    let cell_zones = resolve_cell_zones(mesh, &volumes)?;

    Ok(PolyMesh {
        points,
        faces,
        owner,
        neighbour,
        nr_internal_faces: nr_internal,
        nr_cells: volumes.len(),
        patches,
        cell_zones,
    })
}

/// Reorders each same-owner run of internal faces by ascending neighbour id.
///
/// `owner` is already grouped by construction (the cell pass appends first
/// sightings in owner order), so a purely local stable sort per run yields
/// the canonical upper-triangular ordering. The permutation is applied to
/// `neighbour` and `faces` alike; the pass is idempotent.
pub fn sort_upper_triangular<F: Default>(
    owner: &[i64],
    neighbour: &mut [i64],
    faces: &mut [F],
) {
    let n = owner.len().min(neighbour.len()).min(faces.len());
    let mut run_start = 0;
    for i in 1..=n {
        if i < n && owner[i] == owner[run_start] {
            continue;
        }
        if i - run_start > 1 {
            let mut order: Vec<usize> = (run_start..i).collect();
            order.sort_by_key(|&j| neighbour[j]);
            let sorted_neighbours: Vec<i64> = order.iter().map(|&j| neighbour[j]).collect();
            let sorted_faces: Vec<F> = order
                .iter()
                .map(|&j| std::mem::take(&mut faces[j]))
                .collect();
            for (offset, (nb, face)) in sorted_neighbours
                .into_iter()
                .zip(sorted_faces)
                .enumerate()
            {
                neighbour[run_start + offset] = nb;
                faces[run_start + offset] = face;
            }
        }
        run_start = i;
    }
}

fn to_indices(nodes: &[ElemId]) -> Vec<usize> {
    nodes.iter().map(|node| node.index0()).collect()
}

fn cell_centroid_of<M: MeshSource>(
    mesh: &M,
    cell_faces: &CellFaces,
) -> Result<[f64; 3], MeshFoamError> {
    let nodes = mesh.volume_nodes(cell_faces.volume)?;
    let points = face_points(mesh, &nodes)?;
    Ok(geometry::centroid(&points))
}

fn face_points<M: MeshSource>(
    mesh: &M,
    nodes: &[ElemId],
) -> Result<Vec<[f64; 3]>, MeshFoamError> {
    nodes
        .iter()
        .map(|&node| mesh.node_position(node))
        .collect()
}

fn resolve_cell_zones<M: MeshSource>(
    mesh: &M,
    volumes: &[ElemId],
) -> Result<Vec<CellZone>, MeshFoamError> {
    let groups = mesh.volume_groups();
    if groups.is_empty() {
        return Ok(Vec::new());
    }
    let mut index: HashMap<ElemId, usize> = HashMap::with_capacity(volumes.len());
    for (i, &volume) in volumes.iter().enumerate() {
        index.insert(volume, i);
    }
    let mut zones = Vec::with_capacity(groups.len());
    for group in groups {
        let mut cells = Vec::with_capacity(group.members.len());
        for member in group.members {
            let cell = index.get(&member).ok_or_else(|| {
                MeshFoamError::MeshQuery(format!(
                    "cell zone `{}` references unknown volume {member}",
                    group.name
                ))
            })?;
            cells.push(*cell);
        }
        zones.push(CellZone {
            name: group.name,
            cells,
        });
    }
    Ok(zones)
}
