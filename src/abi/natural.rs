// Sat Feb 14 2026 - Alex

use crate::abi::Abi;
use crate::info::{
    Alignment, ComplexStructureInfo, ComplexUnionInfo, LayoutInfo, StructureArrayInfo,
    StructureInfo, StructVarInfo,
};
use crate::structure::StructureError;
use std::sync::Arc;

/// Natural-alignment layout rules.
///
/// Every member lands on the next multiple of its own alignment, the
/// aggregate alignment is the largest member alignment, and the total size is
/// padded to a multiple of it. Compressed mode skips all padding.
#[derive(Debug, Default, Clone, Copy)]
pub struct NaturalAbi;

impl NaturalAbi {
    pub const IDENTIFIER: &'static str = "natural";

    pub fn new() -> Self {
        Self
    }
}

impl Abi for NaturalAbi {
    fn identifier(&self) -> &str {
        Self::IDENTIFIER
    }

    fn calculate_struct_layout(
        &self,
        members: &[StructVarInfo],
        compressed: bool,
    ) -> Result<ComplexStructureInfo, StructureError> {
        let mut sizes = Vec::with_capacity(members.len() * 2 + 1);
        let mut cursor = 0usize;
        let mut aggregate = Alignment::BYTE;
        for member in members {
            let info = member.info();
            let alignment = info.alignment();
            let size = info.required_size();
            aggregate = aggregate.max(alignment);
            let start = if compressed {
                cursor
            } else {
                alignment.align_up(cursor)
            };
            sizes.push(start - cursor);
            sizes.push(size);
            cursor = start + size;
        }
        let total = if compressed {
            cursor
        } else {
            aggregate.align_up(cursor)
        };
        sizes.push(total - cursor);
        Ok(ComplexStructureInfo::new(
            LayoutInfo::new(aggregate, total, compressed),
            members.to_vec(),
            sizes,
        ))
    }

    fn calculate_union_layout(
        &self,
        members: &[StructVarInfo],
        compressed: bool,
    ) -> Result<ComplexUnionInfo, StructureError> {
        let mut aggregate = Alignment::BYTE;
        let mut largest = 0usize;
        for member in members {
            aggregate = aggregate.max(member.info().alignment());
            largest = largest.max(member.info().required_size());
        }
        let total = if compressed {
            largest
        } else {
            aggregate.align_up(largest)
        };
        let positions = vec![0; members.len()];
        Ok(ComplexUnionInfo::new(
            LayoutInfo::new(aggregate, total, compressed),
            members.to_vec(),
            positions,
        ))
    }

    fn calculate_array_layout(
        &self,
        element: &Arc<StructureInfo>,
        length: usize,
        compressed: bool,
    ) -> Result<StructureArrayInfo, StructureError> {
        let alignment = element.alignment();
        let stride = if compressed {
            element.required_size()
        } else {
            alignment.align_up(element.required_size())
        };
        Ok(StructureArrayInfo::new(
            LayoutInfo::new(alignment, stride * length, compressed),
            element.clone(),
            length,
            stride,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::{FieldMeta, PrimitiveType};

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
    fn test_natural_struct_inserts_padding() {
        // 4-byte then 8-byte member: the latter lands at offset 8
        let abi = NaturalAbi::new();
        let info = abi
            .calculate_struct_layout(
                &[member("a", PrimitiveType::I32), member("b", PrimitiveType::F64)],
                false,
            )
            .unwrap();
        assert_eq!(info.offset_of(0), 0);
        assert_eq!(info.offset_of(1), 8);
        assert_eq!(info.layout().required_size(), 16);
        assert_eq!(info.layout().alignment().as_usize(), 8);
        assert_eq!(info.sizes(), &[0, 4, 4, 8, 0]);
    }

    #[test]
    fn test_compressed_struct_skips_padding() {
        let abi = NaturalAbi::new();
        let info = abi
            .calculate_struct_layout(
                &[member("a", PrimitiveType::I32), member("b", PrimitiveType::F64)],
                true,
            )
            .unwrap();
        assert_eq!(info.offset_of(1), 4);
        assert_eq!(info.layout().required_size(), 12);
        assert!(info.layout().compressed());
    }

    #[test]
    fn test_trailing_padding() {
        // 8-byte then 4-byte member: 4 bytes of trailing padding
        let abi = NaturalAbi::new();
        let info = abi
            .calculate_struct_layout(
                &[member("a", PrimitiveType::F64), member("b", PrimitiveType::I32)],
                false,
            )
            .unwrap();
        assert_eq!(info.layout().required_size(), 16);
        assert_eq!(info.trailing_padding(), 4);
        assert_eq!(info.sizes().iter().sum::<usize>(), 16);
    }

    #[test]
    fn test_union_members_overlap() {
        let abi = NaturalAbi::new();
        let info = abi
            .calculate_union_layout(
                &[member("a", PrimitiveType::I32), member("b", PrimitiveType::F64)],
                false,
            )
            .unwrap();
        assert_eq!(info.positions(), &[0, 0]);
        assert_eq!(info.layout().required_size(), 8);
        assert_eq!(info.layout().alignment().as_usize(), 8);
    }

    #[test]
    fn test_array_stride() {
        let abi = NaturalAbi::new();
        let element = StructureInfo::scalar(PrimitiveType::F32);
        let info = abi.calculate_array_layout(&element, 5, false).unwrap();
        assert_eq!(info.stride(), 4);
        assert_eq!(info.layout().required_size(), 20);
        assert_eq!(info.position_of(3), 12);
    }
}
