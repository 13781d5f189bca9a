// Sat Feb 14 2026 - Alex

use crate::info::{ComplexStructureInfo, ComplexUnionInfo, StructureArrayInfo, StructureInfo, StructVarInfo};
use crate::structure::StructureError;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Layout strategy for one target platform.
///
/// Stateless; a single instance is shared process-wide and identified by its
/// `identifier` string, which also keys the per-type layout caches.
pub trait Abi: Send + Sync {
    fn identifier(&self) -> &str;

    /// Sequential placement of already-ordered members.
    fn calculate_struct_layout(
        &self,
        members: &[StructVarInfo],
        compressed: bool,
    ) -> Result<ComplexStructureInfo, StructureError>;

    /// Overlapping placement of members.
    fn calculate_union_layout(
        &self,
        members: &[StructVarInfo],
        compressed: bool,
    ) -> Result<ComplexUnionInfo, StructureError>;

    /// Stride and total size for a fixed-length element sequence.
    fn calculate_array_layout(
        &self,
        element: &Arc<StructureInfo>,
        length: usize,
        compressed: bool,
    ) -> Result<StructureArrayInfo, StructureError>;
}

static ABIS: Lazy<RwLock<HashMap<String, Arc<dyn Abi>>>> = Lazy::new(|| {
    let mut map: HashMap<String, Arc<dyn Abi>> = HashMap::new();
    let natural: Arc<dyn Abi> = Arc::new(crate::abi::NaturalAbi::new());
    map.insert(natural.identifier().to_string(), natural);
    RwLock::new(map)
});

pub fn register_abi(abi: Arc<dyn Abi>) {
    log::debug!("registering ABI {}", abi.identifier());
    ABIS.write().insert(abi.identifier().to_string(), abi);
}

pub fn lookup_abi(identifier: &str) -> Option<Arc<dyn Abi>> {
    ABIS.read().get(identifier).cloned()
}

/// The natural-alignment ABI every layout falls back to.
pub fn default_abi() -> Arc<dyn Abi> {
    lookup_abi(crate::abi::NaturalAbi::IDENTIFIER)
        .unwrap_or_else(|| Arc::new(crate::abi::NaturalAbi::new()))
}
