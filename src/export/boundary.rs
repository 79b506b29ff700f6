//! Boundary group resolution.
//!
//! Runs before the cell pass: claims every declared boundary face under its
//! canonical key, detects baffle groups and registers their mirror entries,
//! and sweeps unclaimed free faces into a synthesized catch-all patch. The
//! resulting [`BoundaryTable`] is read-only for the rest of the conversion,
//! except that the cell pass replaces each face's node list with the owning
//! cell's winding.

use std::collections::HashSet;

use hashbrown::HashMap;
use itertools::Itertools;

use crate::export::{ExportConfig, PatchType};
use crate::mesh::MeshSource;
use crate::mesh_error::MeshFoamError;
use crate::topology::elem::ElemId;
use crate::topology::face_key::FaceKey;

/// Name given to the synthesized catch-all patch.
pub const DEFAULT_PATCH_NAME: &str = "defaultPatches";

/// One resolved patch: a contiguous run of boundary faces.
#[derive(Clone, Debug)]
pub(crate) struct PatchSpec {
    pub name: String,
    pub patch_type: PatchType,
    /// Declared face count (doubled for baffle groups).
    pub nr_faces: usize,
    /// Offset of the patch's first face within the boundary partition.
    pub offset: usize,
}

/// Canonical boundary face table produced by the resolver.
#[derive(Clone, Debug, Default)]
pub struct BoundaryTable {
    /// Ordered node lists, indexed by boundary-local face index.
    pub(crate) faces: Vec<Vec<ElemId>>,
    /// Boundary-local index of the mirror entry, for baffle faces.
    pub(crate) twin: Vec<Option<usize>>,
    by_key: HashMap<FaceKey, usize>,
    /// Patch index that claimed each face.
    claimed_by: Vec<usize>,
    pub(crate) patches: Vec<PatchSpec>,
    /// Total member count over baffle groups; each member moved one face
    /// from the internal to the boundary partition.
    pub(crate) baffle_faces: usize,
    /// Size of the host's free-face set, kept for the count check.
    pub(crate) free_face_count: usize,
}

impl BoundaryTable {
    /// Boundary-local index registered for `key`, if any.
    pub fn lookup(&self, key: &FaceKey) -> Option<usize> {
        self.by_key.get(key).copied()
    }

    /// Total number of boundary faces (baffle mirrors included).
    pub fn nr_faces(&self) -> usize {
        self.faces.len()
    }

    /// Name of the patch that claimed the face at `index`.
    pub(crate) fn group_of(&self, index: usize) -> &str {
        &self.patches[self.claimed_by[index]].name
    }

    fn register(&mut self, key: FaceKey, nodes: Vec<ElemId>, patch: usize, twin: Option<usize>) {
        self.by_key.insert(key, self.faces.len());
        self.claimed_by.push(patch);
        self.twin.push(twin);
        self.faces.push(nodes);
    }
}

/// Classifies the host's declared face groups into the boundary face table.
///
/// Groups are processed in declaration order; face membership across groups
/// is exclusive, so a key seen twice aborts with
/// [`MeshFoamError::GroupConflict`]. A group with at least one member outside
/// the free-face set is a baffle: every member is re-registered under its
/// reversed key as an independent mirror entry and the group's face count
/// doubles. Free faces left unclaimed end up in a synthesized catch-all
/// group, which is also created on the host.
pub fn resolve_boundary_groups<M: MeshSource>(
    mesh: &mut M,
    config: &ExportConfig,
) -> Result<BoundaryTable, MeshFoamError> {
    let free: HashSet<ElemId> = mesh.free_faces().into_iter().collect();
    let groups = mesh.face_groups();

    let mut table = BoundaryTable {
        free_face_count: free.len(),
        ..BoundaryTable::default()
    };

    for group in &groups {
        if group.members.is_empty() {
            log::debug!("skipping empty face group `{}`", group.name);
            continue;
        }
        log::debug!(
            "found face group `{}` with {} member(s)",
            group.name,
            group.members.len()
        );

        let patch = table.patches.len();
        let offset = table.faces.len();
        table.patches.push(PatchSpec {
            name: group.name.clone(),
            patch_type: config.patch_type_for(&group.name),
            nr_faces: 0,
            offset,
        });

        let mut member_nodes = Vec::with_capacity(group.members.len());
        for &face in &group.members {
            let nodes = mesh.face_nodes(face)?;
            let key = FaceKey::canonical(&nodes);
            if let Some(prev) = table.lookup(&key) {
                return Err(MeshFoamError::GroupConflict {
                    face,
                    first_group: table.group_of(prev).to_string(),
                    second_group: group.name.clone(),
                });
            }
            table.register(key, nodes.clone(), patch, None);
            member_nodes.push((face, nodes));
        }

        let mut nr_faces = group.members.len();
        if group.members.iter().any(|face| !free.contains(face)) {
            // At least one member is a two-sided face forced into the
            // boundary list: the whole group becomes a baffle.
            log::debug!("group `{}` is a baffle", group.name);
            for (face, nodes) in &member_nodes {
                let reversed = FaceKey::reversed(nodes);
                if let Some(prev) = table.lookup(&reversed) {
                    return Err(MeshFoamError::GroupConflict {
                        face: *face,
                        first_group: table.group_of(prev).to_string(),
                        second_group: group.name.clone(),
                    });
                }
                let natural = table
                    .lookup(&FaceKey::canonical(nodes))
                    .expect("baffle face was registered above");
                let mirror = table.faces.len();
                table.register(reversed, nodes.clone(), patch, Some(natural));
                table.twin[natural] = Some(mirror);
            }
            table.baffle_faces += group.members.len();
            nr_faces *= 2;
        }
        table.patches[patch].nr_faces = nr_faces;
    }

    // Do the declared groups cover all free faces? Anything unclaimed goes
    // into a synthesized catch-all group so that every boundary face ends up
    // in exactly one patch.
    let mut unclaimed = Vec::new();
    for face in free.iter().copied().sorted() {
        let nodes = mesh.face_nodes(face)?;
        if table.lookup(&FaceKey::canonical(&nodes)).is_none() {
            unclaimed.push((face, nodes));
        }
    }
    if !unclaimed.is_empty() {
        log::warn!(
            "{} boundary face(s) don't have a group; adding them to a new group",
            unclaimed.len()
        );
        let mut name = DEFAULT_PATCH_NAME.to_string();
        let mut suffix = 1;
        while groups.iter().any(|g| g.name == name) {
            name = format!("{DEFAULT_PATCH_NAME}_{suffix}");
            suffix += 1;
        }
        let patch = table.patches.len();
        let offset = table.faces.len();
        table.patches.push(PatchSpec {
            name: name.clone(),
            patch_type: config.patch_type_for(&name),
            nr_faces: unclaimed.len(),
            offset,
        });
        let members: Vec<ElemId> = unclaimed.iter().map(|(face, _)| *face).collect();
        for (_, nodes) in unclaimed {
            let key = FaceKey::canonical(&nodes);
            table.register(key, nodes, patch, None);
        }
        mesh.create_face_group(&name, &members)?;
    }

    Ok(table)
}
