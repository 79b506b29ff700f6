//! End-to-end export: the polyMesh directory contents, the conditional
//! `cellZones` file, and the 0-based id shift in the written artifacts.

use std::fs;
use std::path::PathBuf;

use mesh_foam::prelude::*;

fn temp_case_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("mesh-foam-{}-{}", name, std::process::id()))
}

fn single_tet() -> InMemoryMesh {
    let mut mesh = InMemoryMesh::new();
    let a = mesh.add_node([0.0, 0.0, 0.0]);
    let b = mesh.add_node([1.0, 0.0, 0.0]);
    let c = mesh.add_node([0.0, 1.0, 0.0]);
    let d = mesh.add_node([0.0, 0.0, 1.0]);
    mesh.add_volume(CellType::Tetrahedron, &[a, b, c, d]).unwrap();
    for nodes in [[a, b, c], [a, b, d], [b, c, d], [a, c, d]] {
        mesh.add_face(&nodes).unwrap();
    }
    mesh
}

#[test]
fn export_writes_the_required_files() {
    let dir = temp_case_dir("required");
    let mut mesh = single_tet();
    let config = ExportConfig::new(&dir);

    let summary = export_mesh(&mut mesh, &config).unwrap();
    assert_eq!(summary.nr_points, 4);
    assert_eq!(summary.nr_cells, 1);
    assert_eq!(summary.nr_faces, 4);
    assert_eq!(summary.nr_internal_faces, 0);

    for name in ["points", "faces", "owner", "neighbour", "boundary"] {
        assert!(dir.join(name).exists(), "missing `{name}`");
    }
    // A mesh without volume groups gets no cellZones file.
    assert!(!dir.join("cellZones").exists());

    let points = fs::read_to_string(dir.join("points")).unwrap();
    assert!(points.contains("\tobject\t\tpoints;"));
    assert!(points.contains("\n4\n(\n"));
    assert!(points.contains("\t(0 0 0)\n"));
    assert!(points.contains("\t(1 0 0)\n"));

    // Node ids are written 0-based: the first face references indices 0..3.
    let faces = fs::read_to_string(dir.join("faces")).unwrap();
    assert!(faces.contains("\n4\n(\n"));
    assert!(faces.contains("\t3(0 1 2)\n"));

    let neighbour = fs::read_to_string(dir.join("neighbour")).unwrap();
    assert!(neighbour.contains("\n0\n(\n"));
    assert!(neighbour.contains("\"nPoints: 4 nCells: 1 nFaces: 4 nInternalFaces: 0\""));

    let boundary = fs::read_to_string(dir.join("boundary")).unwrap();
    assert!(boundary.contains("\tdefaultPatches\n"));
    assert!(boundary.contains("\t\ttype\t\tpatch;\n"));
    assert!(boundary.contains("\t\tnFaces\t\t4;\n"));
    assert!(boundary.contains("\t\tstartFace\t0;\n"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn volume_groups_emit_cell_zones() {
    let dir = temp_case_dir("zones");
    let mut mesh = single_tet();
    let volume = mesh.volumes()[0];
    mesh.add_volume_group("fluid", &[volume]);
    let config = ExportConfig::new(&dir);

    export_mesh(&mut mesh, &config).unwrap();

    let zones = fs::read_to_string(dir.join("cellZones")).unwrap();
    assert!(zones.contains("\tclass\t\tregIOobject;"));
    assert!(zones.contains("\n1(\n"));
    assert!(zones.contains("fluid\n"));
    assert!(zones.contains("\ttype\tcellZone;\n"));
    // The zone lists the 0-based cell id.
    assert!(zones.contains("\n1\n(\n0\n);\n"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn coordinates_keep_ten_significant_digits() {
    let dir = temp_case_dir("digits");
    let mut mesh = InMemoryMesh::new();
    let a = mesh.add_node([0.1234567890123, 0.0, 0.0]);
    let b = mesh.add_node([1.0, 0.0, 0.0]);
    let c = mesh.add_node([0.0, 1.0, 0.0]);
    let d = mesh.add_node([0.0, 0.0, 1e-7]);
    mesh.add_volume(CellType::Tetrahedron, &[a, b, c, d]).unwrap();
    for nodes in [[a, b, c], [a, b, d], [b, c, d], [a, c, d]] {
        mesh.add_face(&nodes).unwrap();
    }
    let config = ExportConfig::new(&dir);

    export_mesh(&mut mesh, &config).unwrap();

    let points = fs::read_to_string(dir.join("points")).unwrap();
    assert!(points.contains("0.123456789"), "{points}");
    assert!(points.contains("1e-7"), "{points}");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn owner_file_counts_match_the_arrays() {
    let dir = temp_case_dir("owner");
    let mut mesh = single_tet();
    let config = ExportConfig::new(&dir);

    export_mesh(&mut mesh, &config).unwrap();

    let owner = fs::read_to_string(dir.join("owner")).unwrap();
    // Four boundary faces, all owned by cell 0.
    assert!(owner.contains("\n4\n(\n"));
    assert_eq!(owner.matches(" 0\n").count(), 4, "{owner}");

    let _ = fs::remove_dir_all(&dir);
}
