//! ASCII polyMesh writers.
//!
//! One file per artifact (`points`, `faces`, `owner`, `neighbour`,
//! `boundary`, and `cellZones` when cell zones exist), each led by a
//! FoamFile header identifying format version 2.0, ascii encoding, and the
//! fixed `constant/polyMesh` location. [`PolyMeshWriter`] serializes into
//! any [`Write`] sink; [`PolyMeshDir`] owns the on-disk layout and the
//! open-before-convert contract.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use itertools::Itertools;

use crate::export::PolyMesh;
use crate::mesh_error::MeshFoamError;

const LOCATION: &str = "constant/polyMesh";
const BANNER: &str = "Face-addressed mesh exported by mesh-foam";
const REQUIRED_FILES: [&str; 5] = ["points", "faces", "owner", "neighbour", "boundary"];

/// Serializes [`PolyMesh`] artifacts into `Write` sinks.
#[derive(Debug, Default, Clone)]
pub struct PolyMeshWriter;

impl PolyMeshWriter {
    /// Writes the `points` file: one coordinate triple per node, 0-based
    /// node order, at least 10 significant digits per value.
    pub fn write_points<W: Write>(&self, mut w: W, mesh: &PolyMesh) -> Result<(), MeshFoamError> {
        write_header(&mut w, "points", "vectorField", None)?;
        writeln!(w, "\n{}\n(", mesh.points.len())?;
        for p in &mesh.points {
            writeln!(
                w,
                "\t({} {} {})",
                fmt_general(p[0], 10),
                fmt_general(p[1], 10),
                fmt_general(p[2], 10)
            )?;
        }
        writeln!(w, ")")?;
        w.flush()?;
        Ok(())
    }

    /// Writes the `faces` file: internal faces first, then boundary faces
    /// grouped per patch, each as `<n>(<id0> <id1> ...)`.
    pub fn write_faces<W: Write>(&self, mut w: W, mesh: &PolyMesh) -> Result<(), MeshFoamError> {
        write_header(&mut w, "faces", "faceList", None)?;
        writeln!(w, "\n{}\n(", mesh.faces.len())?;
        for face in &mesh.faces {
            writeln!(w, "\t{}({})", face.len(), face.iter().join(" "))?;
        }
        writeln!(w, ")")?;
        w.flush()?;
        Ok(())
    }

    /// Writes the `owner` file: one cell id per face.
    pub fn write_owner<W: Write>(&self, mut w: W, mesh: &PolyMesh) -> Result<(), MeshFoamError> {
        write_header(&mut w, "owner", "labelList", Some(&counts_note(mesh)))?;
        write_labels(&mut w, &mesh.owner)?;
        w.flush()?;
        Ok(())
    }

    /// Writes the `neighbour` file: one cell id per internal face.
    pub fn write_neighbour<W: Write>(
        &self,
        mut w: W,
        mesh: &PolyMesh,
    ) -> Result<(), MeshFoamError> {
        write_header(&mut w, "neighbour", "labelList", Some(&counts_note(mesh)))?;
        write_labels(&mut w, &mesh.neighbour)?;
        w.flush()?;
        Ok(())
    }

    /// Writes the `boundary` file: one record per patch with its type,
    /// face count, and start face.
    pub fn write_boundary<W: Write>(
        &self,
        mut w: W,
        mesh: &PolyMesh,
    ) -> Result<(), MeshFoamError> {
        write_header(&mut w, "boundary", "polyBoundaryMesh", None)?;
        writeln!(w, "{}\n(", mesh.patches.len())?;
        for patch in &mesh.patches {
            writeln!(w, "\t{}", patch.name)?;
            writeln!(w, "\t{{")?;
            writeln!(w, "\t\ttype\t\t{};", patch.patch_type)?;
            writeln!(w, "\t\tnFaces\t\t{};", patch.nr_faces)?;
            writeln!(w, "\t\tstartFace\t{};", patch.start_face)?;
            writeln!(w, "\t}}")?;
        }
        writeln!(w, ")")?;
        w.flush()?;
        Ok(())
    }

    /// Writes the `cellZones` file: the literal 0-based cell-id list per
    /// zone.
    pub fn write_cell_zones<W: Write>(
        &self,
        mut w: W,
        mesh: &PolyMesh,
    ) -> Result<(), MeshFoamError> {
        write_header(&mut w, "cellZones", "regIOobject", None)?;
        writeln!(w, "\n{}(", mesh.cell_zones.len())?;
        for zone in &mesh.cell_zones {
            writeln!(w, "{}", zone.name)?;
            writeln!(w, "{{")?;
            writeln!(w, "\ttype\tcellZone;")?;
            writeln!(w, "\tcellLabels\tList<label>")?;
            writeln!(w, "{}", zone.cells.len())?;
            writeln!(w, "(")?;
            for cell in &zone.cells {
                writeln!(w, "{cell}")?;
            }
            writeln!(w, ");")?;
            writeln!(w, "}}")?;
        }
        writeln!(w, ")")?;
        w.flush()?;
        Ok(())
    }
}

/// The polyMesh output directory with its five required files held open.
///
/// Opening everything up front honors the export failure contract: if the
/// directory or any required file cannot be created, the export aborts
/// before conversion starts and no half-created file set is left behind.
#[derive(Debug)]
pub struct PolyMeshDir {
    dir: PathBuf,
    points: File,
    faces: File,
    owner: File,
    neighbour: File,
    boundary: File,
}

impl PolyMeshDir {
    /// Creates `dir` (and parents) and opens every required file.
    pub fn create(dir: &Path) -> Result<Self, MeshFoamError> {
        fs::create_dir_all(dir)?;
        match Self::open_all(dir) {
            Ok(handle) => Ok(handle),
            Err(err) => {
                remove_required_files(dir);
                Err(err)
            }
        }
    }

    fn open_all(dir: &Path) -> Result<Self, MeshFoamError> {
        Ok(Self {
            dir: dir.to_path_buf(),
            points: File::create(dir.join("points"))?,
            faces: File::create(dir.join("faces"))?,
            owner: File::create(dir.join("owner"))?,
            neighbour: File::create(dir.join("neighbour"))?,
            boundary: File::create(dir.join("boundary"))?,
        })
    }

    /// Removes the files created by this handle; used when the conversion
    /// fails after the files were opened.
    pub fn discard(self) {
        let dir = self.dir.clone();
        drop(self);
        remove_required_files(&dir);
    }

    /// Writes every artifact. `cellZones` is only emitted when the mesh has
    /// cell zones; a late failure opening it is reported but does not fail
    /// the export, since the required files are already on disk.
    pub fn write_all(&mut self, mesh: &PolyMesh) -> Result<(), MeshFoamError> {
        let writer = PolyMeshWriter;
        log::debug!("writing the file points");
        writer.write_points(BufWriter::new(&mut self.points), mesh)?;
        log::debug!("writing the file faces");
        writer.write_faces(BufWriter::new(&mut self.faces), mesh)?;
        log::debug!("writing the file owner");
        writer.write_owner(BufWriter::new(&mut self.owner), mesh)?;
        log::debug!("writing the file neighbour");
        writer.write_neighbour(BufWriter::new(&mut self.neighbour), mesh)?;
        log::debug!("writing the file boundary");
        writer.write_boundary(BufWriter::new(&mut self.boundary), mesh)?;
        if !mesh.cell_zones.is_empty() {
            log::debug!("writing the file cellZones");
            match File::create(self.dir.join("cellZones")) {
                Ok(file) => writer.write_cell_zones(BufWriter::new(file), mesh)?,
                Err(err) => {
                    log::error!("could not open the cellZones file, other files are ok: {err}");
                }
            }
        }
        Ok(())
    }
}

fn remove_required_files(dir: &Path) {
    for name in REQUIRED_FILES {
        let _ = fs::remove_file(dir.join(name));
    }
}

fn counts_note(mesh: &PolyMesh) -> String {
    format!(
        "nPoints: {} nCells: {} nFaces: {} nInternalFaces: {}",
        mesh.points.len(),
        mesh.nr_cells,
        mesh.faces.len(),
        mesh.nr_internal_faces
    )
}

fn write_labels<W: Write>(w: &mut W, labels: &[i64]) -> Result<(), MeshFoamError> {
    writeln!(w, "\n{}\n(", labels.len())?;
    for label in labels {
        writeln!(w, " {label}")?;
    }
    writeln!(w, ")")?;
    Ok(())
}

fn write_header<W: Write>(
    w: &mut W,
    object: &str,
    class: &str,
    note: Option<&str>,
) -> Result<(), MeshFoamError> {
    writeln!(w, "/*{}*\\", "-".repeat(68))?;
    writeln!(w, "|{}|", " ".repeat(70))?;
    writeln!(w, "|{BANNER:^70}|")?;
    writeln!(w, "|{}|", " ".repeat(70))?;
    writeln!(w, "\\*{}*/", "-".repeat(68))?;
    writeln!(w, "FoamFile")?;
    writeln!(w, "{{")?;
    writeln!(w, "\tversion\t\t2.0;")?;
    writeln!(w, "\tformat\t\tascii;")?;
    writeln!(w, "\tclass\t\t{class};")?;
    if let Some(note) = note {
        writeln!(w, "\tnote\t\t\"{note}\";")?;
    }
    writeln!(w, "\tlocation\t\"{LOCATION}\";")?;
    writeln!(w, "\tobject\t\t{object};")?;
    writeln!(w, "}}")?;
    writeln!(w)?;
    Ok(())
}

/// Formats `value` like C's `%.*g`: `sig` significant digits, scientific
/// notation outside `[1e-4, 10^sig)`, trailing zeros trimmed.
pub(crate) fn fmt_general(value: f64, sig: usize) -> String {
    let sig = sig.max(1);
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }
    let exponent = value.abs().log10().floor() as i32;
    if exponent < -4 || exponent >= sig as i32 {
        let formatted = format!("{:.*e}", sig - 1, value);
        trim_exponential(&formatted)
    } else {
        let decimals = (sig as i32 - 1 - exponent).max(0) as usize;
        let formatted = format!("{value:.decimals$}");
        trim_decimal(&formatted)
    }
}

fn trim_decimal(s: &str) -> String {
    if !s.contains('.') {
        return s.to_string();
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn trim_exponential(s: &str) -> String {
    match s.split_once('e') {
        Some((mantissa, exponent)) => format!("{}e{exponent}", trim_decimal(mantissa)),
        None => s.to_string(),
    }
}
