// Fri Feb 13 2026 - Alex

use crate::abi::{self, Abi};
use crate::generator;
use crate::info::StructureInfo;
use crate::structure::{Binding, ScalarStructure, Structure, StructureError};
use std::any::Any;
use std::sync::Arc;

/// Composite node whose members overlap per a `ComplexUnionInfo`.
///
/// All children alias the same base region; a write through one child is
/// visible through every other child covering those bytes.
pub struct ComplexUnion {
    binding: Binding,
    items: Vec<Option<Box<dyn Structure>>>,
}

impl ComplexUnion {
    pub fn new(info: Arc<StructureInfo>) -> Result<Self, StructureError> {
        if info.as_union().is_none() {
            return Err(StructureError::Unsupported(
                "a complex union requires a union layout".into(),
            ));
        }
        Ok(Self::from_info(info))
    }

    pub fn of(type_name: &str, abi: &dyn Abi) -> Result<Self, StructureError> {
        let info = generator::registry::global()
            .generator_for(type_name)?
            .calculate_info(abi, None)?;
        Self::new(info)
    }

    pub fn of_default(type_name: &str) -> Result<Self, StructureError> {
        Self::of(type_name, abi::default_abi().as_ref())
    }

    pub(crate) fn from_info(info: Arc<StructureInfo>) -> Self {
        let items = info.as_union().map(|u| u.make_items()).unwrap_or_default();
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
        self.binding.info()?.as_union()?.child_index(name)
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

impl Structure for ComplexUnion {
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
        let union_info = info.as_union().ok_or_else(|| {
            StructureError::Unsupported("a complex union requires a union layout".into())
        })?;
        let (root, base) = {
            let (root, base) = self.binding.require_bound()?;
            (root.clone(), base)
        };
        if self.items.len() != union_info.children().len() {
            self.items = union_info.make_items();
        }
        for (index, slot) in self.items.iter_mut().enumerate() {
            if let Some(child) = slot {
                let child_info = union_info.children()[index].info().clone();
                child.use_buffer(
                    root.clone(),
                    base + union_info.position_of(index),
                    child_info,
                )?;
            }
        }
        Ok(())
    }
}
