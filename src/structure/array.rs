// Fri Feb 13 2026 - Alex

use crate::info::{PrimitiveType, StructureInfo};
use crate::structure::{
    default_factory_for, Binding, Structure, StructureError, StructureFactory, StructureRoot,
};
use std::any::Any;
use std::rc::Rc;
use std::sync::Arc;

/// Fixed-length array of structure elements laid out at `stride * index`.
///
/// Elements are materialized lazily: `get` constructs and binds a slot on
/// first use and keeps returning that same instance afterwards.
pub struct StructureArray {
    binding: Binding,
    factory: StructureFactory,
    items: Vec<Option<Box<dyn Structure>>>,
}

impl StructureArray {
    pub fn new(info: Arc<StructureInfo>) -> Result<Self, StructureError> {
        let array = info.as_struct_array().ok_or_else(|| {
            StructureError::Unsupported("a structure array requires an array layout".into())
        })?;
        let factory = default_factory_for(array.element());
        let length = array.length();
        Ok(Self {
            binding: Binding::with_info(info),
            factory,
            items: (0..length).map(|_| None).collect(),
        })
    }

    /// Overrides the element constructor used for lazy materialization.
    pub fn with_factory(mut self, factory: StructureFactory) -> Self {
        self.factory = factory;
        self
    }

    pub(crate) fn from_info(info: Arc<StructureInfo>) -> Self {
        let (factory, length) = match info.as_struct_array() {
            Some(array) => (default_factory_for(array.element()), array.length()),
            None => (default_factory_for(&info) as StructureFactory, 0),
        };
        Self {
            binding: Binding::with_info(info),
            factory,
            items: (0..length).map(|_| None).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn stride(&self) -> Result<usize, StructureError> {
        Ok(self.array_info()?.stride())
    }

    fn array_info(&self) -> Result<&crate::info::StructureArrayInfo, StructureError> {
        self.binding
            .require_info()?
            .as_struct_array()
            .ok_or_else(|| {
                StructureError::Unsupported("a structure array requires an array layout".into())
            })
    }

    /// Returns the element at `index`, constructing and binding it on first
    /// access. Never returns an unbound element.
    pub fn get(&mut self, index: usize) -> Result<&mut Box<dyn Structure>, StructureError> {
        if index >= self.items.len() {
            return Err(StructureError::BadIndex {
                index,
                length: self.items.len(),
            });
        }
        let (element, position) = {
            let array = self.array_info()?;
            (array.element().clone(), array.position_of(index))
        };
        let (root, base) = {
            let (root, base) = self.binding.require_bound()?;
            (root.clone(), base)
        };
        if self.items[index].is_none() {
            let mut item = (self.factory)(element.clone());
            item.use_buffer(root, base + position, element)?;
            self.items[index] = Some(item);
        }
        match &mut self.items[index] {
            Some(item) => Ok(item),
            None => Err(StructureError::NotBound),
        }
    }

    /// Returns the cached element without creating one.
    pub fn get_or_null(&self, index: usize) -> Option<&dyn Structure> {
        self.items.get(index).and_then(|s| s.as_deref())
    }

    /// Binds a caller-supplied element at the computed offset, replacing any
    /// cached slot. On an unbound array the element is cached and bound later
    /// together with the array itself.
    pub fn set(
        &mut self,
        index: usize,
        mut element: Box<dyn Structure>,
    ) -> Result<(), StructureError> {
        if index >= self.items.len() {
            return Err(StructureError::BadIndex {
                index,
                length: self.items.len(),
            });
        }
        if self.binding.is_bound() {
            let (element_info, position) = {
                let array = self.array_info()?;
                (array.element().clone(), array.position_of(index))
            };
            let (root, base) = {
                let (root, base) = self.binding.require_bound()?;
                (root.clone(), base)
            };
            element.use_buffer(root, base + position, element_info)?;
        }
        self.items[index] = Some(element);
        Ok(())
    }

    /// Returns a read/write window over `[start, start + length)` sharing the
    /// backing buffer; valid only as long as that buffer is.
    pub fn view(&self, start: usize, length: usize) -> Result<ArrayView, StructureError> {
        if start + length > self.items.len() {
            return Err(StructureError::BadIndex {
                index: start + length,
                length: self.items.len(),
            });
        }
        let array = self.array_info()?;
        let (root, base) = self.binding.require_bound()?;
        Ok(ArrayView {
            root: root.clone(),
            base: base + array.position_of(start),
            stride: array.stride(),
            length,
            element: array.element().clone(),
        })
    }
}

impl Structure for StructureArray {
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

    fn bind_children(&mut self) -> Result<(), StructureError> {
        let (element, stride, length) = {
            let array = self.array_info()?;
            (array.element().clone(), array.stride(), array.length())
        };
        let (root, base) = {
            let (root, base) = self.binding.require_bound()?;
            (root.clone(), base)
        };
        if self.items.len() != length {
            self.items = (0..length).map(|_| None).collect();
        }
        for (index, slot) in self.items.iter_mut().enumerate() {
            if let Some(item) = slot {
                item.use_buffer(root.clone(), base + stride * index, element.clone())?;
            }
        }
        Ok(())
    }
}

/// Non-owning sub-range window into a bound `StructureArray`.
pub struct ArrayView {
    root: Rc<StructureRoot>,
    base: usize,
    stride: usize,
    length: usize,
    element: Arc<StructureInfo>,
}

impl ArrayView {
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn element_info(&self) -> &Arc<StructureInfo> {
        &self.element
    }

    /// Offset of element `index`, with the transfer clamped to the element's
    /// own byte range so an oversized slice cannot spill into siblings.
    fn element_offset(&self, index: usize, len: usize) -> Result<usize, StructureError> {
        if index >= self.length {
            return Err(StructureError::BadIndex {
                index,
                length: self.length,
            });
        }
        let size = self.element.required_size();
        if len > size {
            return Err(StructureError::OutOfBounds {
                offset: 0,
                len,
                capacity: size,
            });
        }
        Ok(self.base + self.stride * index)
    }

    pub fn read_element(&self, index: usize, out: &mut [u8]) -> Result<(), StructureError> {
        let offset = self.element_offset(index, out.len())?;
        self.root.read(offset, out)
    }

    pub fn write_element(&self, index: usize, src: &[u8]) -> Result<(), StructureError> {
        let offset = self.element_offset(index, src.len())?;
        self.root.write(offset, src)
    }

    /// Materializes a structure bound onto element `index` of the window.
    pub fn bind_element(&self, index: usize) -> Result<Box<dyn Structure>, StructureError> {
        let offset = self.element_offset(index, self.element.required_size())?;
        let factory = default_factory_for(&self.element);
        let mut item = factory(self.element.clone());
        item.use_buffer(self.root.clone(), offset, self.element.clone())?;
        Ok(item)
    }
}

/// Fixed-length flat array of scalar elements.
pub struct ArrayStructure {
    binding: Binding,
}

impl ArrayStructure {
    pub fn new(info: Arc<StructureInfo>) -> Result<Self, StructureError> {
        if info.as_flat_array().is_none() {
            return Err(StructureError::Unsupported(
                "a flat array requires a flat array layout".into(),
            ));
        }
        Ok(Self::from_info(info))
    }

    pub(crate) fn from_info(info: Arc<StructureInfo>) -> Self {
        Self {
            binding: Binding::with_info(info),
        }
    }

    fn flat_info(&self) -> Result<crate::info::ArrayStructureInfo, StructureError> {
        self.binding
            .require_info()?
            .as_flat_array()
            .copied()
            .ok_or_else(|| {
                StructureError::Unsupported("a flat array requires a flat array layout".into())
            })
    }

    pub fn len(&self) -> Result<usize, StructureError> {
        Ok(self.flat_info()?.length())
    }

    pub fn element(&self) -> Result<PrimitiveType, StructureError> {
        Ok(self.flat_info()?.element())
    }

    fn element_check(
        &self,
        index: usize,
        expected: PrimitiveType,
    ) -> Result<usize, StructureError> {
        let info = self.flat_info()?;
        if info.element() != expected {
            return Err(StructureError::TypeMismatch {
                expected: expected.name(),
                actual: info.element().name(),
            });
        }
        if index >= info.length() {
            return Err(StructureError::BadIndex {
                index,
                length: info.length(),
            });
        }
        Ok(info.position_of(index))
    }

    pub fn get_f32(&self, index: usize) -> Result<f32, StructureError> {
        let offset = self.element_check(index, PrimitiveType::F32)?;
        let mut buf = [0u8; 4];
        self.read_bytes(offset, &mut buf)?;
        Ok(f32::from_ne_bytes(buf))
    }

    pub fn set_f32(&mut self, index: usize, value: f32) -> Result<(), StructureError> {
        let offset = self.element_check(index, PrimitiveType::F32)?;
        self.write_bytes(offset, &value.to_ne_bytes())
    }

    pub fn get_i32(&self, index: usize) -> Result<i32, StructureError> {
        let offset = self.element_check(index, PrimitiveType::I32)?;
        let mut buf = [0u8; 4];
        self.read_bytes(offset, &mut buf)?;
        Ok(i32::from_ne_bytes(buf))
    }

    pub fn set_i32(&mut self, index: usize, value: i32) -> Result<(), StructureError> {
        let offset = self.element_check(index, PrimitiveType::I32)?;
        self.write_bytes(offset, &value.to_ne_bytes())
    }

    pub fn get_u8(&self, index: usize) -> Result<u8, StructureError> {
        let offset = self.element_check(index, PrimitiveType::U8)?;
        let mut buf = [0u8; 1];
        self.read_bytes(offset, &mut buf)?;
        Ok(buf[0])
    }

    pub fn set_u8(&mut self, index: usize, value: u8) -> Result<(), StructureError> {
        let offset = self.element_check(index, PrimitiveType::U8)?;
        self.write_bytes(offset, &[value])
    }
}

impl Structure for ArrayStructure {
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
    use crate::abi::{Abi, NaturalAbi};
    use crate::structure::ScalarStructure;

    fn f32_array(length: usize) -> StructureArray {
        let element = StructureInfo::scalar(PrimitiveType::F32);
        let info = NaturalAbi::new()
            .calculate_array_layout(&element, length, false)
            .unwrap();
        StructureArray::new(Arc::new(StructureInfo::StructArray(info))).unwrap()
    }

    #[test]
    fn test_get_is_lazy_and_stable() {
        let mut array = f32_array(4);
        array.allocate().unwrap();
        assert!(array.get_or_null(2).is_none());
        let first = &**array.get(2).unwrap() as *const dyn Structure as *const u8;
        let second = &**array.get(2).unwrap() as *const dyn Structure as *const u8;
        assert_eq!(first, second);
        assert!(array.get_or_null(2).is_some());
    }

    #[test]
    fn test_elements_land_at_stride_offsets() {
        let mut array = f32_array(3);
        array.allocate().unwrap();
        for index in 0..3 {
            let item = array.get(index).unwrap();
            assert_eq!(item.binding().offset(), index * 4);
            let scalar = item
                .as_any_mut()
                .downcast_mut::<ScalarStructure>()
                .unwrap();
            scalar.set_f32(index as f32 + 0.5).unwrap();
        }
        let view = array.view(0, 3).unwrap();
        let mut buf = [0u8; 4];
        view.read_element(1, &mut buf).unwrap();
        assert_eq!(f32::from_ne_bytes(buf), 1.5);
    }

    #[test]
    fn test_set_replaces_cached_slot() {
        let mut array = f32_array(2);
        array.allocate().unwrap();
        array.get(0).unwrap();
        let replacement = Box::new(ScalarStructure::new(PrimitiveType::F32));
        array.set(0, replacement).unwrap();
        let item = array.get(0).unwrap();
        assert_eq!(item.binding().offset(), 0);
    }

    #[test]
    fn test_view_is_windowed() {
        let mut array = f32_array(6);
        array.allocate().unwrap();
        let view = array.view(2, 3).unwrap();
        assert_eq!(view.len(), 3);
        view.write_element(0, &1.0f32.to_ne_bytes()).unwrap();
        let scalar_slot = array.get(2).unwrap();
        let scalar = scalar_slot
            .as_any_mut()
            .downcast_mut::<ScalarStructure>()
            .unwrap();
        assert_eq!(scalar.get_f32().unwrap(), 1.0);
        assert!(array.view(4, 3).is_err());
    }

    #[test]
    fn test_view_rejects_oversized_transfers() {
        let mut array = f32_array(6);
        array.allocate().unwrap();
        let view = array.view(2, 2).unwrap();
        // a slice wider than one element would spill into neighbors
        assert!(matches!(
            view.write_element(1, &[0xAB; 12]),
            Err(StructureError::OutOfBounds { .. })
        ));
        let mut big = [0u8; 12];
        assert!(view.read_element(0, &mut big).is_err());
        // elements past the window stay untouched
        let slot = array.get(5).unwrap();
        let scalar = slot.as_any_mut().downcast_mut::<ScalarStructure>().unwrap();
        assert_eq!(scalar.get_f32().unwrap(), 0.0);
    }

    #[test]
    fn test_get_before_binding_fails() {
        let mut array = f32_array(2);
        assert!(matches!(array.get(0), Err(StructureError::NotBound)));
    }

    #[test]
    fn test_out_of_range_index() {
        let mut array = f32_array(2);
        array.allocate().unwrap();
        assert!(matches!(
            array.get(5),
            Err(StructureError::BadIndex { index: 5, length: 2 })
        ));
    }
}
