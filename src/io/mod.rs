//! Writers for the exported mesh artifacts.

pub mod polymesh;

pub use polymesh::{PolyMeshDir, PolyMeshWriter};
