// Thu Feb 12 2026 - Alex

use crate::info::{LayoutInfo, StructVarInfo};
use crate::structure::Structure;

/// Layout of an overlapping composite structure.
///
/// One position per member; every `position + size` stays within
/// `required_size` and the largest of them equals it.
#[derive(Debug)]
pub struct ComplexUnionInfo {
    base: LayoutInfo,
    children: Vec<StructVarInfo>,
    positions: Vec<usize>,
}

impl ComplexUnionInfo {
    pub fn new(base: LayoutInfo, children: Vec<StructVarInfo>, positions: Vec<usize>) -> Self {
        debug_assert_eq!(positions.len(), children.len());
        debug_assert!(children
            .iter()
            .zip(&positions)
            .all(|(c, &p)| p + c.info().required_size() <= base.required_size()));
        Self {
            base,
            children,
            positions,
        }
    }

    pub fn layout(&self) -> &LayoutInfo {
        &self.base
    }

    pub fn children(&self) -> &[StructVarInfo] {
        &self.children
    }

    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn position_of(&self, index: usize) -> usize {
        self.positions[index]
    }

    pub fn child_index(&self, name: &str) -> Option<usize> {
        self.children.iter().position(|c| c.name() == name)
    }

    pub fn make_items(&self) -> Vec<Option<Box<dyn Structure>>> {
        self.children
            .iter()
            .map(|c| c.factory().map(|f| f(c.info().clone())))
            .collect()
    }
}
