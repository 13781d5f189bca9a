// Fri Feb 13 2026 - Alex

pub mod array;
pub mod base;
pub mod complex;
pub mod error;
pub mod factory;
pub mod root;
pub mod scalar;
pub mod union;

pub use array::{ArrayStructure, ArrayView, StructureArray};
pub use base::{Binding, Structure, StructureFactory};
pub use complex::ComplexStructure;
pub use error::StructureError;
pub use factory::{
    complex_factory, default_factory_for, flat_array_factory, scalar_factory,
    struct_array_factory, union_factory,
};
pub use root::StructureRoot;
pub use scalar::ScalarStructure;
pub use union::ComplexUnion;
