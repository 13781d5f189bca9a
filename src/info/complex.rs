// Thu Feb 12 2026 - Alex

use crate::info::{LayoutInfo, StructVarInfo};
use crate::structure::Structure;

/// Layout of a sequentially placed composite structure.
///
/// `sizes` interleaves padding and member sizes as
/// `[pad0, size0, pad1, size1, ..., trailing_pad]` (length `2n + 1`); the
/// cumulative sum equals `required_size`.
#[derive(Debug)]
pub struct ComplexStructureInfo {
    base: LayoutInfo,
    children: Vec<StructVarInfo>,
    sizes: Vec<usize>,
}

impl ComplexStructureInfo {
    pub fn new(base: LayoutInfo, children: Vec<StructVarInfo>, sizes: Vec<usize>) -> Self {
        debug_assert_eq!(sizes.len(), children.len() * 2 + 1);
        debug_assert_eq!(sizes.iter().sum::<usize>(), base.required_size());
        Self {
            base,
            children,
            sizes,
        }
    }

    pub fn layout(&self) -> &LayoutInfo {
        &self.base
    }

    pub fn children(&self) -> &[StructVarInfo] {
        &self.children
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Byte offset of member `index` within the structure.
    pub fn offset_of(&self, index: usize) -> usize {
        self.sizes[..2 * index + 1].iter().sum()
    }

    pub fn padding_before(&self, index: usize) -> usize {
        self.sizes[2 * index]
    }

    pub fn trailing_padding(&self) -> usize {
        *self.sizes.last().unwrap_or(&0)
    }

    pub fn child_index(&self, name: &str) -> Option<usize> {
        self.children.iter().position(|c| c.name() == name)
    }

    /// Materializes one runtime child slot per member, in declaration order.
    ///
    /// Slots without a known factory stay empty and are skipped during
    /// binding.
    pub fn make_items(&self) -> Vec<Option<Box<dyn Structure>>> {
        self.children
            .iter()
            .map(|c| c.factory().map(|f| f(c.info().clone())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::{Alignment, FieldMeta, PrimitiveType, StructureInfo};

    fn member(name: &str, ty: PrimitiveType) -> StructVarInfo {
        StructVarInfo::new(
            name,
            ty.name().to_string(),
            None,
            FieldMeta::default(),
            StructureInfo::scalar(ty),
        )
    }

    #[test]
    fn test_offsets_follow_interleaved_sizes() {
        // int at 0, 4 bytes of padding, double at 8, no trailing padding
        let info = ComplexStructureInfo::new(
            LayoutInfo::new(Alignment::new(8), 16, false),
            vec![member("a", PrimitiveType::I32), member("b", PrimitiveType::F64)],
            vec![0, 4, 4, 8, 0],
        );
        assert_eq!(info.offset_of(0), 0);
        assert_eq!(info.offset_of(1), 8);
        assert_eq!(info.padding_before(1), 4);
        assert_eq!(info.trailing_padding(), 0);
        assert_eq!(info.sizes().iter().sum::<usize>(), 16);
    }

    #[test]
    fn test_make_items_is_ordered() {
        let info = ComplexStructureInfo::new(
            LayoutInfo::new(Alignment::new(4), 8, false),
            vec![member("x", PrimitiveType::F32), member("y", PrimitiveType::F32)],
            vec![0, 4, 0, 4, 0],
        );
        let items = info.make_items();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.is_some()));
    }
}
