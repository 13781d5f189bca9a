// Fri Feb 13 2026 - Alex

use crate::info::{PrimitiveType, StructureInfo};
use crate::structure::{Binding, Structure, StructureError};
use std::any::Any;
use std::sync::Arc;

/// Leaf node over a single primitive value in the shared buffer.
///
/// Accessors use native byte order, matching what a device-side struct sees.
pub struct ScalarStructure {
    binding: Binding,
    ty: PrimitiveType,
}

macro_rules! scalar_accessors {
    ($getter:ident, $setter:ident, $rust:ty, $variant:ident, $bytes:expr) => {
        pub fn $getter(&self) -> Result<$rust, StructureError> {
            self.check(PrimitiveType::$variant)?;
            let mut buf = [0u8; $bytes];
            self.read_bytes(0, &mut buf)?;
            Ok(<$rust>::from_ne_bytes(buf))
        }

        pub fn $setter(&mut self, value: $rust) -> Result<(), StructureError> {
            self.check(PrimitiveType::$variant)?;
            self.write_bytes(0, &value.to_ne_bytes())
        }
    };
}

impl ScalarStructure {
    pub fn new(ty: PrimitiveType) -> Self {
        Self {
            binding: Binding::with_info(StructureInfo::scalar(ty)),
            ty,
        }
    }

    /// Builds a scalar over an already-resolved (cached) layout.
    pub fn from_info(ty: PrimitiveType, info: Arc<StructureInfo>) -> Self {
        Self {
            binding: Binding::with_info(info),
            ty,
        }
    }

    pub fn primitive(&self) -> PrimitiveType {
        self.ty
    }

    fn check(&self, expected: PrimitiveType) -> Result<(), StructureError> {
        if self.ty != expected {
            return Err(StructureError::TypeMismatch {
                expected: expected.name(),
                actual: self.ty.name(),
            });
        }
        Ok(())
    }

    scalar_accessors!(get_u8, set_u8, u8, U8, 1);
    scalar_accessors!(get_u16, set_u16, u16, U16, 2);
    scalar_accessors!(get_u32, set_u32, u32, U32, 4);
    scalar_accessors!(get_u64, set_u64, u64, U64, 8);
    scalar_accessors!(get_i8, set_i8, i8, I8, 1);
    scalar_accessors!(get_i16, set_i16, i16, I16, 2);
    scalar_accessors!(get_i32, set_i32, i32, I32, 4);
    scalar_accessors!(get_i64, set_i64, i64, I64, 8);
    scalar_accessors!(get_f32, set_f32, f32, F32, 4);
    scalar_accessors!(get_f64, set_f64, f64, F64, 8);

    pub fn get_bool(&self) -> Result<bool, StructureError> {
        self.check(PrimitiveType::Bool)?;
        let mut buf = [0u8; 1];
        self.read_bytes(0, &mut buf)?;
        Ok(buf[0] != 0)
    }

    pub fn set_bool(&mut self, value: bool) -> Result<(), StructureError> {
        self.check(PrimitiveType::Bool)?;
        self.write_bytes(0, &[value as u8])
    }

    pub fn get_ptr(&self) -> Result<u64, StructureError> {
        self.check(PrimitiveType::Ptr)?;
        let mut buf = [0u8; 8];
        self.read_bytes(0, &mut buf)?;
        Ok(u64::from_ne_bytes(buf))
    }

    pub fn set_ptr(&mut self, value: u64) -> Result<(), StructureError> {
        self.check(PrimitiveType::Ptr)?;
        self.write_bytes(0, &value.to_ne_bytes())
    }
}

impl Structure for ScalarStructure {
    fn binding(&self) -> &Binding {
        &self.binding
    }

    fn binding_mut(&mut self) -> &mut Binding {
        &mut self.binding
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_round_trip() {
        let mut s = ScalarStructure::new(PrimitiveType::F32);
        s.allocate().unwrap();
        s.set_f32(1.5).unwrap();
        assert_eq!(s.get_f32().unwrap(), 1.5);
    }

    #[test]
    fn test_type_mismatch_rejected() {
        let mut s = ScalarStructure::new(PrimitiveType::I32);
        s.allocate().unwrap();
        assert!(matches!(
            s.get_f64(),
            Err(StructureError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_access_before_binding_fails() {
        let s = ScalarStructure::new(PrimitiveType::I32);
        assert!(matches!(s.get_i32(), Err(StructureError::NotBound)));
    }

    #[test]
    fn test_huge_relative_offset_is_rejected() {
        let mut s = ScalarStructure::new(PrimitiveType::U64);
        s.allocate().unwrap();
        let mut out = [0u8; 8];
        assert!(matches!(
            s.read_bytes(usize::MAX, &mut out),
            Err(StructureError::OutOfBounds { .. })
        ));
        assert!(matches!(
            s.write_bytes(usize::MAX - 4, &[0; 8]),
            Err(StructureError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_write_marks_modified() {
        let mut s = ScalarStructure::new(PrimitiveType::U64);
        s.allocate().unwrap();
        assert!(!s.is_modified());
        s.set_u64(7).unwrap();
        assert!(s.is_modified());
        s.clear_modified();
        assert!(!s.is_modified());
    }
}
