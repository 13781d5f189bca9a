// Thu Feb 12 2026 - Alex

use crate::info::{LayoutInfo, PrimitiveType, StructureInfo};
use std::sync::Arc;

/// Layout of a fixed-length array of structure elements.
///
/// `stride` is the element size rounded up to the element alignment (the raw
/// element size when packed); element `i` starts at `i * stride`.
#[derive(Debug)]
pub struct StructureArrayInfo {
    base: LayoutInfo,
    element: Arc<StructureInfo>,
    length: usize,
    stride: usize,
}

impl StructureArrayInfo {
    pub fn new(
        base: LayoutInfo,
        element: Arc<StructureInfo>,
        length: usize,
        stride: usize,
    ) -> Self {
        debug_assert!(stride >= element.required_size() || base.compressed());
        debug_assert_eq!(base.required_size(), stride * length);
        Self {
            base,
            element,
            length,
            stride,
        }
    }

    pub fn layout(&self) -> &LayoutInfo {
        &self.base
    }

    pub fn element(&self) -> &Arc<StructureInfo> {
        &self.element
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn position_of(&self, index: usize) -> usize {
        index * self.stride
    }
}

/// Layout of a fixed-length array of scalar elements, stored flat.
#[derive(Debug, Clone, Copy)]
pub struct ArrayStructureInfo {
    base: LayoutInfo,
    element: PrimitiveType,
    length: usize,
}

impl ArrayStructureInfo {
    pub fn new(base: LayoutInfo, element: PrimitiveType, length: usize) -> Self {
        debug_assert_eq!(base.required_size(), element.size() * length);
        Self {
            base,
            element,
            length,
        }
    }

    pub fn layout(&self) -> &LayoutInfo {
        &self.base
    }

    pub fn element(&self) -> PrimitiveType {
        self.element
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn position_of(&self, index: usize) -> usize {
        index * self.element.size()
    }
}
