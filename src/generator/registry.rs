// Sat Feb 14 2026 - Alex

use crate::generator::{LayoutProvider, StaticGenerator};
use crate::structure::StructureError;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

struct RegisteredType {
    provider: Arc<dyn LayoutProvider>,
    generator: Arc<StaticGenerator>,
}

/// Process-wide map from structure type name to its layout provider and
/// generator. Built once at startup; lookups afterwards are read-locked.
pub struct ProviderRegistry {
    types: RwLock<HashMap<&'static str, RegisteredType>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            types: RwLock::new(HashMap::new()),
        }
    }

    pub fn register(&self, provider: Arc<dyn LayoutProvider>) {
        let name = provider.type_name();
        log::debug!("registering structure type {}", name);
        let generator = Arc::new(StaticGenerator::new(provider.clone()));
        self.types.write().insert(
            name,
            RegisteredType {
                provider,
                generator,
            },
        );
    }

    pub fn lookup(&self, type_name: &str) -> Option<Arc<dyn LayoutProvider>> {
        self.types.read().get(type_name).map(|t| t.provider.clone())
    }

    pub fn generator_for(&self, type_name: &str) -> Result<Arc<StaticGenerator>, StructureError> {
        self.types
            .read()
            .get(type_name)
            .map(|t| t.generator.clone())
            .ok_or_else(|| StructureError::UnknownType(type_name.to_string()))
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.types.read().contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static REGISTRY: Lazy<ProviderRegistry> = Lazy::new(ProviderRegistry::new);

pub fn global() -> &'static ProviderRegistry {
    &REGISTRY
}
