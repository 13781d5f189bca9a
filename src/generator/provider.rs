// Sat Feb 14 2026 - Alex

use crate::info::{FieldMeta, PrimitiveType, StructureInfo};
use bitflags::bitflags;
use std::sync::Arc;

bitflags! {
    /// Class-level layout settings a structure type declares about itself.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StructureSettings: u32 {
        /// Layout must be computed by a generator; without it the type must
        /// supply a fixed descriptor instead.
        const REQUIRES_COMPUTATION = 1 << 0;
        /// Packed layout: no padding anywhere.
        const COMPRESSED = 1 << 1;
        /// Members overlap instead of following each other.
        const UNION = 1 << 2;
        /// Members may (and array members must) carry an explicit length.
        const CUSTOM_LENGTH = 1 << 3;
        /// Members may substitute their declared element type.
        const CUSTOM_ELEMENT_TYPE = 1 << 4;
        /// A parent may never force a different ABI onto this type.
        const FORBID_ABI_OVERRIDE = 1 << 5;
    }
}

/// Declared type of one member field.
#[derive(Debug, Clone)]
pub enum MemberType {
    Primitive(PrimitiveType),
    /// Another registered structure type.
    Named(&'static str),
    /// Fixed-length array of a registered structure type.
    StructArray { element: &'static str },
    /// Fixed-length flat array of scalars.
    PrimitiveArray { element: PrimitiveType },
}

/// One declared member field, as a structure type reports it.
#[derive(Debug, Clone)]
pub struct MemberDecl {
    pub name: &'static str,
    pub ty: MemberType,
    pub index: Option<u32>,
    pub meta: FieldMeta,
}

impl MemberDecl {
    pub fn primitive(name: &'static str, ty: PrimitiveType) -> Self {
        Self {
            name,
            ty: MemberType::Primitive(ty),
            index: None,
            meta: FieldMeta::default(),
        }
    }

    pub fn named(name: &'static str, type_name: &'static str) -> Self {
        Self {
            name,
            ty: MemberType::Named(type_name),
            index: None,
            meta: FieldMeta::default(),
        }
    }

    pub fn struct_array(name: &'static str, element: &'static str) -> Self {
        Self {
            name,
            ty: MemberType::StructArray { element },
            index: None,
            meta: FieldMeta::default(),
        }
    }

    pub fn primitive_array(name: &'static str, element: PrimitiveType) -> Self {
        Self {
            name,
            ty: MemberType::PrimitiveArray { element },
            index: None,
            meta: FieldMeta::default(),
        }
    }

    pub fn with_index(mut self, index: u32) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.meta.length = Some(length);
        self
    }

    pub fn with_element_type(mut self, element: &str) -> Self {
        self.meta.element_type = Some(element.to_string());
        self
    }

    pub fn with_abi(mut self, abi: &str) -> Self {
        self.meta.abi_override = Some(abi.to_string());
        self
    }
}

/// What a structure type exposes to the layout engine.
///
/// Types whose settings lack `REQUIRES_COMPUTATION` must return an identity-
/// stable descriptor from `fixed_info` (store the `Arc` and clone it); all
/// other types report their members instead.
pub trait LayoutProvider: Send + Sync {
    fn type_name(&self) -> &'static str;

    fn settings(&self) -> StructureSettings;

    fn fixed_info(&self) -> Option<Arc<StructureInfo>> {
        None
    }

    fn members(&self) -> Vec<MemberDecl> {
        Vec::new()
    }
}
