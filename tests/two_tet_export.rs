//! The canonical two-tetrahedra scenario: one shared internal face, six
//! outer boundary faces, and no declared boundary groups.

use mesh_foam::geometry;
use mesh_foam::prelude::*;

fn two_tets() -> (InMemoryMesh, Vec<ElemId>) {
    let mut mesh = InMemoryMesh::new();
    let a = mesh.add_node([0.0, 0.0, 0.0]);
    let b = mesh.add_node([1.0, 0.0, 0.0]);
    let c = mesh.add_node([0.0, 1.0, 0.0]);
    let d = mesh.add_node([0.0, 0.0, 1.0]);
    let e = mesh.add_node([1.0, 1.0, 1.0]);
    mesh.add_volume(CellType::Tetrahedron, &[a, b, c, d]).unwrap();
    mesh.add_volume(CellType::Tetrahedron, &[e, b, c, d]).unwrap();
    let outer = [
        [a, b, c],
        [a, b, d],
        [a, c, d],
        [e, b, c],
        [e, b, d],
        [e, c, d],
    ];
    let faces = outer
        .iter()
        .map(|nodes| mesh.add_face(nodes).unwrap())
        .collect();
    (mesh, faces)
}

#[test]
fn counts_match_the_shared_face_arithmetic() {
    let (mut mesh, _) = two_tets();
    let config = ExportConfig::new("unused");
    let poly = build_poly_mesh(&mut mesh, &config).unwrap();

    // 8 cell-side faces + 6 free faces, halved: 7 faces, 1 internal.
    assert_eq!(poly.nr_faces(), 7);
    assert_eq!(poly.nr_internal_faces, 1);
    assert_eq!(poly.owner.len(), 7);
    assert_eq!(poly.neighbour.len(), 1);
    assert_eq!(poly.nr_cells, 2);
    assert_eq!(poly.nr_points(), 5);
}

#[test]
fn shared_face_is_owned_by_the_first_cell() {
    let (mut mesh, _) = two_tets();
    let config = ExportConfig::new("unused");
    let poly = build_poly_mesh(&mut mesh, &config).unwrap();

    assert_eq!(poly.owner[0], 0);
    assert_eq!(poly.neighbour[0], 1);
    // The three outer faces of each tet are owned by that tet.
    assert_eq!(&poly.owner[1..4], &[0, 0, 0]);
    assert_eq!(&poly.owner[4..7], &[1, 1, 1]);
}

#[test]
fn internal_face_winds_outward_from_its_owner() {
    let (mut mesh, _) = two_tets();
    let config = ExportConfig::new("unused");
    let poly = build_poly_mesh(&mut mesh, &config).unwrap();

    let face_points: Vec<[f64; 3]> = poly.faces[0].iter().map(|&i| poly.points[i]).collect();
    let owner_nodes = [0usize, 1, 2, 3]; // cell 0 is the first tet
    let owner_points: Vec<[f64; 3]> = owner_nodes.iter().map(|&i| poly.points[i]).collect();
    let cell_centroid = geometry::centroid(&owner_points);
    let normal = geometry::face_normal(&face_points);
    let to_cell = geometry::sub(cell_centroid, geometry::centroid(&face_points));
    assert!(geometry::dot(normal, to_cell) <= 0.0);
}

#[test]
fn unassigned_faces_form_a_default_patch_spanning_the_boundary() {
    let (mut mesh, faces) = two_tets();
    let config = ExportConfig::new("unused");
    let poly = build_poly_mesh(&mut mesh, &config).unwrap();

    assert_eq!(poly.patches.len(), 1);
    let patch = &poly.patches[0];
    assert_eq!(patch.name, "defaultPatches");
    assert_eq!(patch.patch_type, PatchType::Patch);
    assert_eq!(patch.nr_faces, 6);
    assert_eq!(patch.start_face, 1);

    // The synthesized group was also created on the host, with every free
    // face as a member.
    let created = mesh.face_group("defaultPatches").unwrap();
    let mut members = created.members.clone();
    members.sort_unstable();
    assert_eq!(members, faces);
}

#[test]
fn declared_groups_keep_their_boundary_types() {
    let (mut mesh, faces) = two_tets();
    mesh.add_face_group("lower", &faces[..3]);
    mesh.add_face_group("upper", &faces[3..]);
    let config = ExportConfig::new("unused")
        .with_boundary_type("lower", PatchType::Wall)
        .with_boundary_type("upper", PatchType::Symmetry);
    let poly = build_poly_mesh(&mut mesh, &config).unwrap();

    assert_eq!(poly.patches.len(), 2);
    assert_eq!(poly.patches[0].name, "lower");
    assert_eq!(poly.patches[0].patch_type, PatchType::Wall);
    assert_eq!(poly.patches[0].start_face, 1);
    assert_eq!(poly.patches[0].nr_faces, 3);
    assert_eq!(poly.patches[1].name, "upper");
    assert_eq!(poly.patches[1].patch_type, PatchType::Symmetry);
    assert_eq!(poly.patches[1].start_face, 4);
    assert_eq!(poly.patches[1].nr_faces, 3);

    // Patch ranges tile [nr_internal_faces, nr_faces) exactly.
    let mut next = poly.nr_internal_faces;
    for patch in &poly.patches {
        assert_eq!(patch.start_face, next);
        next += patch.nr_faces;
    }
    assert_eq!(next, poly.nr_faces());
}
