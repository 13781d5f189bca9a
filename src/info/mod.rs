// Thu Feb 12 2026 - Alex

pub mod alignment;
pub mod array;
pub mod base;
pub mod complex;
pub mod primitive;
pub mod serializer;
pub mod union;
pub mod var;

pub use alignment::Alignment;
pub use array::{ArrayStructureInfo, StructureArrayInfo};
pub use base::{LayoutInfo, ScalarInfo, StructureInfo};
pub use complex::ComplexStructureInfo;
pub use primitive::PrimitiveType;
pub use serializer::{SerializableInfo, SerializableMember};
pub use union::ComplexUnionInfo;
pub use var::{FieldMeta, StructVarInfo};
