// Fri Feb 13 2026 - Alex

use crate::info::{PrimitiveType, StructureInfo};
use crate::structure::{
    ArrayStructure, ComplexStructure, ComplexUnion, ScalarStructure, Structure, StructureArray,
    StructureFactory,
};
use std::sync::Arc;

pub fn scalar_factory(info: Arc<StructureInfo>) -> Box<dyn Structure> {
    let ty = info
        .as_scalar()
        .map(|s| s.primitive())
        .unwrap_or(PrimitiveType::U8);
    Box::new(ScalarStructure::from_info(ty, info))
}

pub fn complex_factory(info: Arc<StructureInfo>) -> Box<dyn Structure> {
    Box::new(ComplexStructure::from_info(info))
}

pub fn union_factory(info: Arc<StructureInfo>) -> Box<dyn Structure> {
    Box::new(ComplexUnion::from_info(info))
}

pub fn struct_array_factory(info: Arc<StructureInfo>) -> Box<dyn Structure> {
    Box::new(StructureArray::from_info(info))
}

pub fn flat_array_factory(info: Arc<StructureInfo>) -> Box<dyn Structure> {
    Box::new(ArrayStructure::from_info(info))
}

/// Picks the runtime representation matching a resolved layout.
pub fn default_factory_for(info: &StructureInfo) -> StructureFactory {
    match info {
        StructureInfo::Scalar(_) | StructureInfo::Opaque(_) => scalar_factory,
        StructureInfo::Complex(_) => complex_factory,
        StructureInfo::Union(_) => union_factory,
        StructureInfo::StructArray(_) => struct_array_factory,
        StructureInfo::FlatArray(_) => flat_array_factory,
    }
}
