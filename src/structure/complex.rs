// Fri Feb 13 2026 - Alex

use crate::abi::{self, Abi};
use crate::generator;
use crate::info::StructureInfo;
use crate::structure::{Binding, ScalarStructure, Structure, StructureError};
use std::any::Any;
use std::sync::Arc;

/// Composite node whose members are placed sequentially per a
/// `ComplexStructureInfo`.
///
/// `items` holds one slot per member in declaration order; empty slots are
/// placeholders and are skipped when binding.
pub struct ComplexStructure {
    binding: Binding,
    items: Vec<Option<Box<dyn Structure>>>,
}

impl ComplexStructure {
    pub fn new(info: Arc<StructureInfo>) -> Result<Self, StructureError> {
        if info.as_complex().is_none() {
            return Err(StructureError::Unsupported(
                "a complex structure requires a struct layout".into(),
            ));
        }
        Ok(Self::from_info(info))
    }

    /// Resolves the layout of `type_name` under `abi` through the process
    /// registry and builds an unbound instance for it.
    pub fn of(type_name: &str, abi: &dyn Abi) -> Result<Self, StructureError> {
        let info = generator::registry::global()
            .generator_for(type_name)?
            .calculate_info(abi, None)?;
        Self::new(info)
    }

    /// Like `of`, using the default natural-alignment ABI.
    pub fn of_default(type_name: &str) -> Result<Self, StructureError> {
        Self::of(type_name, abi::default_abi().as_ref())
    }

    pub(crate) fn from_info(info: Arc<StructureInfo>) -> Self {
        let items = info
            .as_complex()
            .map(|c| c.make_items())
            .unwrap_or_default();
        Self {
            binding: Binding::with_info(info),
            items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, index: usize) -> Option<&dyn Structure> {
        self.items.get(index).and_then(|s| s.as_deref())
    }

    pub fn item_mut(&mut self, index: usize) -> Option<&mut Box<dyn Structure>> {
        self.items.get_mut(index).and_then(|s| s.as_mut())
    }

    pub fn child_index(&self, name: &str) -> Option<usize> {
        self.binding.info()?.as_complex()?.child_index(name)
    }

    /// Installs a caller-built member into slot `index`, binding it
    /// immediately when this structure is already bound.
    pub fn set_item(
        &mut self,
        index: usize,
        mut item: Box<dyn Structure>,
    ) -> Result<(), StructureError> {
        if index >= self.items.len() {
            return Err(StructureError::BadIndex {
                index,
                length: self.items.len(),
            });
        }
        if self.binding.is_bound() {
            let info = self.binding.require_info()?.clone();
            let complex = info.as_complex().ok_or_else(|| {
                StructureError::Unsupported("a complex structure requires a struct layout".into())
            })?;
            let (root, base) = {
                let (root, base) = self.binding.require_bound()?;
                (root.clone(), base)
            };
            let child_info = complex.children()[index].info().clone();
            item.use_buffer(root, base + complex.offset_of(index), child_info)?;
        }
        self.items[index] = Some(item);
        Ok(())
    }

    /// Empties slot `index`, leaving a placeholder.
    pub fn clear_item(&mut self, index: usize) {
        if let Some(slot) = self.items.get_mut(index) {
            *slot = None;
        }
    }

    pub fn scalar(&self, name: &str) -> Result<&ScalarStructure, StructureError> {
        let index = self
            .child_index(name)
            .ok_or_else(|| StructureError::NoSuchMember(name.to_string()))?;
        self.item(index)
            .and_then(|s| s.as_any().downcast_ref::<ScalarStructure>())
            .ok_or_else(|| StructureError::NoSuchMember(name.to_string()))
    }

    pub fn scalar_mut(&mut self, name: &str) -> Result<&mut ScalarStructure, StructureError> {
        let index = self
            .child_index(name)
            .ok_or_else(|| StructureError::NoSuchMember(name.to_string()))?;
        self.items
            .get_mut(index)
            .and_then(|s| s.as_mut())
            .and_then(|s| s.as_any_mut().downcast_mut::<ScalarStructure>())
            .ok_or_else(|| StructureError::NoSuchMember(name.to_string()))
    }
}

impl Structure for ComplexStructure {
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
        let info = self.binding.require_info()?.clone();
        let complex = info.as_complex().ok_or_else(|| {
            StructureError::Unsupported("a complex structure requires a struct layout".into())
        })?;
        let (root, base) = {
            let (root, base) = self.binding.require_bound()?;
            (root.clone(), base)
        };
        if self.items.len() != complex.children().len() {
            self.items = complex.make_items();
        }
        for (index, slot) in self.items.iter_mut().enumerate() {
            if let Some(child) = slot {
                let child_info = complex.children()[index].info().clone();
                child.use_buffer(root.clone(), base + complex.offset_of(index), child_info)?;
            }
        }
        Ok(())
    }
}
