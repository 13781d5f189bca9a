// Sat Feb 14 2026 - Alex

use crate::abi::{self, Abi};
use crate::generator::{registry, ClCodeGenerator, LayoutProvider, MemberType, StructureSettings};
use crate::info::{
    Alignment, ArrayStructureInfo, LayoutInfo, ScalarInfo, SerializableInfo, StructVarInfo,
    StructureInfo,
};
use crate::structure::StructureError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Per-type layout strategy: resolves member metadata against an ABI and
/// caches the resulting descriptor per ABI identifier.
///
/// The cache hands out the same `Arc` for repeated lookups, so two
/// resolutions of one (type, ABI) pair compare equal by identity.
pub struct StaticGenerator {
    provider: Arc<dyn LayoutProvider>,
    cache: Mutex<HashMap<String, Arc<StructureInfo>>>,
}

impl StaticGenerator {
    pub fn new(provider: Arc<dyn LayoutProvider>) -> Self {
        Self {
            provider,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn provider(&self) -> &Arc<dyn LayoutProvider> {
        &self.provider
    }

    pub fn type_name(&self) -> &'static str {
        self.provider.type_name()
    }

    /// Resolves (or returns the cached) layout of this type under `abi`.
    ///
    /// `overwrite_child_abi` forces the given ABI onto every nested structure
    /// member; a child whose settings forbid overriding fails the whole
    /// resolution.
    pub fn calculate_info(
        &self,
        abi: &dyn Abi,
        overwrite_child_abi: Option<&dyn Abi>,
    ) -> Result<Arc<StructureInfo>, StructureError> {
        let settings = self.provider.settings();
        if !settings.contains(StructureSettings::REQUIRES_COMPUTATION) {
            return self.provider.fixed_info().ok_or_else(|| {
                StructureError::MissingMetadata {
                    class: self.type_name().to_string(),
                    what: "a fixed layout descriptor".to_string(),
                }
            });
        }

        let key = match overwrite_child_abi {
            Some(forced) => format!("{}+force:{}", abi.identifier(), forced.identifier()),
            None => abi.identifier().to_string(),
        };
        let mut cache = self.cache.lock();
        if let Some(info) = cache.get(&key) {
            return Ok(info.clone());
        }

        log::debug!(
            "computing layout of {} under ABI {}",
            self.type_name(),
            abi.identifier()
        );
        let members = self.resolve_members(abi, overwrite_child_abi)?;
        let ordered = self.order_members(members)?;
        let compressed = settings.contains(StructureSettings::COMPRESSED);
        let info = if settings.contains(StructureSettings::UNION) {
            Arc::new(StructureInfo::Union(
                abi.calculate_union_layout(&ordered, compressed)?,
            ))
        } else {
            Arc::new(StructureInfo::Complex(
                abi.calculate_struct_layout(&ordered, compressed)?,
            ))
        };
        cache.insert(key, info.clone());
        Ok(info)
    }

    fn resolve_members(
        &self,
        abi: &dyn Abi,
        overwrite_child_abi: Option<&dyn Abi>,
    ) -> Result<Vec<StructVarInfo>, StructureError> {
        let class = self.type_name();
        let settings = self.provider.settings();
        let decls = self.provider.members();
        if decls.is_empty() {
            return Err(StructureError::MissingMetadata {
                class: class.to_string(),
                what: "member declarations".to_string(),
            });
        }

        let mut resolved = Vec::with_capacity(decls.len());
        for decl in decls {
            let field = decl.name;
            if decl.meta.length.is_some() && !settings.contains(StructureSettings::CUSTOM_LENGTH) {
                return Err(StructureError::DisallowedMetadata {
                    class: class.to_string(),
                    field: field.to_string(),
                    what: "an explicit length".to_string(),
                });
            }
            if decl.meta.element_type.is_some()
                && !settings.contains(StructureSettings::CUSTOM_ELEMENT_TYPE)
            {
                return Err(StructureError::DisallowedMetadata {
                    class: class.to_string(),
                    field: field.to_string(),
                    what: "a custom element type".to_string(),
                });
            }
            if decl.meta.length.is_some()
                && !matches!(
                    decl.ty,
                    MemberType::StructArray { .. } | MemberType::PrimitiveArray { .. }
                )
            {
                return Err(StructureError::DisallowedMetadata {
                    class: class.to_string(),
                    field: field.to_string(),
                    what: "an explicit length on a non-array member".to_string(),
                });
            }
            if decl.meta.abi_override.is_some()
                && matches!(
                    decl.ty,
                    MemberType::Primitive(_) | MemberType::PrimitiveArray { .. }
                )
            {
                return Err(StructureError::DisallowedMetadata {
                    class: class.to_string(),
                    field: field.to_string(),
                    what: "an ABI override on a non-structure member".to_string(),
                });
            }

            let (type_name, info) = match &decl.ty {
                MemberType::Primitive(ty) => (
                    ty.name().to_string(),
                    Arc::new(StructureInfo::Scalar(ScalarInfo::of(*ty))),
                ),
                MemberType::Named(name) => {
                    let child_abi = self.child_abi(
                        class,
                        field,
                        name,
                        abi,
                        overwrite_child_abi,
                        decl.meta.abi_override.as_deref(),
                    )?;
                    let info = registry::global()
                        .generator_for(name)
                        .map_err(|_| field_scoped_unknown(class, field, name))?
                        .calculate_info(child_abi.as_ref(), overwrite_child_abi)?;
                    (name.to_string(), info)
                }
                MemberType::StructArray { element } => {
                    let length =
                        decl.meta
                            .length
                            .ok_or_else(|| StructureError::MissingFieldMetadata {
                                class: class.to_string(),
                                field: field.to_string(),
                                what: "an explicit array length".to_string(),
                            })?;
                    let element_name = decl
                        .meta
                        .element_type
                        .clone()
                        .unwrap_or_else(|| element.to_string());
                    let child_abi = self.child_abi(
                        class,
                        field,
                        &element_name,
                        abi,
                        overwrite_child_abi,
                        decl.meta.abi_override.as_deref(),
                    )?;
                    let element_info = registry::global()
                        .generator_for(&element_name)
                        .map_err(|_| field_scoped_unknown(class, field, &element_name))?
                        .calculate_info(child_abi.as_ref(), overwrite_child_abi)?;
                    let compressed = settings.contains(StructureSettings::COMPRESSED);
                    let info = Arc::new(StructureInfo::StructArray(abi.calculate_array_layout(
                        &element_info,
                        length,
                        compressed,
                    )?));
                    (format!("{}[{}]", element_name, length), info)
                }
                MemberType::PrimitiveArray { element } => {
                    let length =
                        decl.meta
                            .length
                            .ok_or_else(|| StructureError::MissingFieldMetadata {
                                class: class.to_string(),
                                field: field.to_string(),
                                what: "an explicit array length".to_string(),
                            })?;
                    let base = LayoutInfo::new(
                        Alignment::new(element.alignment()),
                        element.size() * length,
                        false,
                    );
                    let info = Arc::new(StructureInfo::FlatArray(ArrayStructureInfo::new(
                        base, *element, length,
                    )));
                    (format!("{}[{}]", element.name(), length), info)
                }
            };
            resolved.push(StructVarInfo::new(
                field,
                type_name,
                decl.index,
                decl.meta,
                info,
            ));
        }
        Ok(resolved)
    }

    /// Picks the ABI a nested member resolves under, honoring forced parent
    /// overrides and per-field annotations against the child's own settings.
    fn child_abi(
        &self,
        class: &str,
        field: &str,
        child_type: &str,
        abi: &dyn Abi,
        overwrite_child_abi: Option<&dyn Abi>,
        field_override: Option<&str>,
    ) -> Result<Arc<dyn Abi>, StructureError> {
        let child_settings = registry::global()
            .lookup(child_type)
            .map(|p| p.settings())
            .ok_or_else(|| field_scoped_unknown(class, field, child_type))?;

        let requested = overwrite_child_abi
            .map(|forced| forced.identifier().to_string())
            .or_else(|| field_override.map(str::to_string));
        match requested {
            Some(identifier) => {
                if child_settings.contains(StructureSettings::FORBID_ABI_OVERRIDE) {
                    return Err(StructureError::AbiOverrideForbidden {
                        class: child_type.to_string(),
                    });
                }
                abi::lookup_abi(&identifier).ok_or(StructureError::UnknownAbi(identifier))
            }
            None => abi::lookup_abi(abi.identifier())
                .ok_or_else(|| StructureError::UnknownAbi(abi.identifier().to_string())),
        }
    }

    /// Places members into their final order: explicit indices claim their
    /// slot first, the rest claim their declaration position. Any collision
    /// is a configuration error.
    fn order_members(
        &self,
        members: Vec<StructVarInfo>,
    ) -> Result<Vec<StructVarInfo>, StructureError> {
        let class = self.type_name();
        let count = members.len();
        let mut slots: Vec<Option<StructVarInfo>> = (0..count).map(|_| None).collect();

        let (explicit, auto): (Vec<_>, Vec<_>) =
            members.into_iter().partition(|m| m.index().is_some());

        for member in explicit {
            let index = member.index().unwrap_or(0);
            if index as usize >= count {
                return Err(StructureError::IndexOutOfRange {
                    class: class.to_string(),
                    field: member.name().to_string(),
                    index,
                    count,
                });
            }
            let slot = &mut slots[index as usize];
            if slot.is_some() {
                return Err(StructureError::IndexCollision {
                    class: class.to_string(),
                    field: member.name().to_string(),
                    index,
                });
            }
            *slot = Some(member);
        }

        let mut free = slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_none())
            .map(|(i, _)| i)
            .collect::<Vec<_>>()
            .into_iter();
        for member in auto {
            match free.next() {
                Some(index) => slots[index] = Some(member),
                None => {
                    return Err(StructureError::MissingMetadata {
                        class: class.to_string(),
                        what: "a free ordering slot".to_string(),
                    })
                }
            }
        }

        Ok(slots.into_iter().flatten().collect())
    }

    /// The strategy emitting struct-declaration source for this type.
    pub fn code_generator(&self) -> ClCodeGenerator {
        ClCodeGenerator::new()
    }

    /// Serde-friendly description of the resolved layout.
    pub fn describe(&self, abi: &dyn Abi) -> Result<SerializableInfo, StructureError> {
        let info = self.calculate_info(abi, None)?;
        Ok(SerializableInfo::from_info(self.type_name(), &info))
    }
}

fn field_scoped_unknown(class: &str, field: &str, type_name: &str) -> StructureError {
    StructureError::UnknownType(format!("{} (member {}.{})", type_name, class, field))
}
