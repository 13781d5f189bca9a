// Thu Feb 12 2026 - Alex

use crate::info::StructureInfo;
use crate::structure::{default_factory_for, StructureFactory};
use std::fmt;
use std::sync::Arc;

/// Per-field layout annotations.
///
/// These mirror what a declaring structure type states about one of its
/// members: an explicit byte length for array members, a substitute element
/// type, or a different ABI for a nested structure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMeta {
    pub length: Option<usize>,
    pub element_type: Option<String>,
    pub abi_override: Option<String>,
}

impl FieldMeta {
    pub fn is_empty(&self) -> bool {
        self.length.is_none() && self.element_type.is_none() && self.abi_override.is_none()
    }
}

/// Immutable descriptor of one declared member field.
///
/// Produced once during member resolution; carries the member's resolved
/// layout and the factory used to materialize a runtime child for it.
#[derive(Debug, Clone)]
pub struct StructVarInfo {
    name: String,
    type_name: String,
    index: Option<u32>,
    meta: FieldMeta,
    info: Arc<StructureInfo>,
    factory: Option<StructureFactory>,
}

impl StructVarInfo {
    pub fn new(
        name: &str,
        type_name: String,
        index: Option<u32>,
        meta: FieldMeta,
        info: Arc<StructureInfo>,
    ) -> Self {
        let factory = Some(default_factory_for(&info));
        Self {
            name: name.to_string(),
            type_name,
            index,
            meta,
            info,
            factory,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Explicit ordering index, `None` meaning "declaration order".
    pub fn index(&self) -> Option<u32> {
        self.index
    }

    pub fn meta(&self) -> &FieldMeta {
        &self.meta
    }

    pub fn info(&self) -> &Arc<StructureInfo> {
        &self.info
    }

    pub fn factory(&self) -> Option<StructureFactory> {
        self.factory
    }
}

impl fmt::Display for StructVarInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.name, self.type_name, self.info.layout())
    }
}
