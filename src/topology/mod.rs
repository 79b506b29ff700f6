//! Strong identifiers, cell type metadata, and face identity keys.

pub mod cell_type;
pub mod elem;
pub mod face_key;

pub use cell_type::CellType;
pub use elem::ElemId;
pub use face_key::FaceKey;
