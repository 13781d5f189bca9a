// Thu Feb 12 2026 - Alex

use crate::info::{
    Alignment, ArrayStructureInfo, ComplexStructureInfo, ComplexUnionInfo, PrimitiveType,
    StructureArrayInfo,
};
use std::fmt;
use std::sync::Arc;

/// Base layout descriptor: alignment, total size and the packed flag.
///
/// Unless `compressed` is set, `required_size` is a multiple of `alignment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutInfo {
    alignment: Alignment,
    required_size: usize,
    compressed: bool,
}

impl LayoutInfo {
    pub fn new(alignment: Alignment, required_size: usize, compressed: bool) -> Self {
        debug_assert!(compressed || alignment.is_aligned(required_size));
        Self {
            alignment,
            required_size,
            compressed,
        }
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn required_size(&self) -> usize {
        self.required_size
    }

    pub fn compressed(&self) -> bool {
        self.compressed
    }
}

impl fmt::Display for LayoutInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bytes, align {}{}",
            self.required_size,
            self.alignment,
            if self.compressed { ", packed" } else { "" }
        )
    }
}

/// Layout of a single scalar member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalarInfo {
    base: LayoutInfo,
    primitive: PrimitiveType,
}

impl ScalarInfo {
    pub fn of(primitive: PrimitiveType) -> Self {
        Self {
            base: LayoutInfo::new(
                Alignment::new(primitive.alignment()),
                primitive.size(),
                false,
            ),
            primitive,
        }
    }

    pub fn layout(&self) -> &LayoutInfo {
        &self.base
    }

    pub fn primitive(&self) -> PrimitiveType {
        self.primitive
    }
}

/// The resolved layout descriptor family.
///
/// Descriptors are immutable and shared as `Arc<StructureInfo>`; the generator
/// cache hands out the same `Arc` for every lookup of one (type, ABI) pair, so
/// identity comparison (`Arc::ptr_eq`) is meaningful.
#[derive(Debug)]
pub enum StructureInfo {
    /// A scalar leaf.
    Scalar(ScalarInfo),
    /// A fixed-size opaque region with no member breakdown.
    Opaque(LayoutInfo),
    /// Sequentially laid out members.
    Complex(ComplexStructureInfo),
    /// Overlapping members.
    Union(ComplexUnionInfo),
    /// Fixed-length array of structure elements.
    StructArray(StructureArrayInfo),
    /// Fixed-length array of scalar elements.
    FlatArray(ArrayStructureInfo),
}

impl StructureInfo {
    pub fn scalar(primitive: PrimitiveType) -> Arc<Self> {
        Arc::new(Self::Scalar(ScalarInfo::of(primitive)))
    }

    pub fn layout(&self) -> &LayoutInfo {
        match self {
            Self::Scalar(s) => s.layout(),
            Self::Opaque(l) => l,
            Self::Complex(c) => c.layout(),
            Self::Union(u) => u.layout(),
            Self::StructArray(a) => a.layout(),
            Self::FlatArray(a) => a.layout(),
        }
    }

    pub fn alignment(&self) -> Alignment {
        self.layout().alignment()
    }

    pub fn required_size(&self) -> usize {
        self.layout().required_size()
    }

    pub fn compressed(&self) -> bool {
        self.layout().compressed()
    }

    pub fn as_scalar(&self) -> Option<&ScalarInfo> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_complex(&self) -> Option<&ComplexStructureInfo> {
        match self {
            Self::Complex(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_union(&self) -> Option<&ComplexUnionInfo> {
        match self {
            Self::Union(u) => Some(u),
            _ => None,
        }
    }

    pub fn as_struct_array(&self) -> Option<&StructureArrayInfo> {
        match self {
            Self::StructArray(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_flat_array(&self) -> Option<&ArrayStructureInfo> {
        match self {
            Self::FlatArray(a) => Some(a),
            _ => None,
        }
    }
}
