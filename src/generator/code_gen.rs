// Sat Feb 14 2026 - Alex

use crate::info::{StructVarInfo, StructureInfo};
use crate::structure::StructureError;
use std::collections::HashSet;

/// Target description language for regenerated struct declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionLanguage {
    OpenCl,
    C99,
}

impl DescriptionLanguage {
    fn primitive_name(self, ty: crate::info::PrimitiveType) -> &'static str {
        match self {
            Self::OpenCl => ty.cl_name(),
            Self::C99 => ty.c_name(),
        }
    }

    fn byte_name(self) -> &'static str {
        match self {
            Self::OpenCl => "uchar",
            Self::C99 => "uint8_t",
        }
    }
}

/// Emits struct/union declarations matching a resolved layout.
pub trait StructCodeGenerator {
    fn generate_struct_code(
        &self,
        language: DescriptionLanguage,
        name: &str,
        info: &StructureInfo,
    ) -> Result<String, StructureError>;
}

/// Default emitter: typedef-style declarations with explicit byte-padding
/// members for every gap, nested types declared before their first use.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClCodeGenerator;

impl ClCodeGenerator {
    pub fn new() -> Self {
        Self
    }

    fn emit(
        &self,
        language: DescriptionLanguage,
        name: &str,
        info: &StructureInfo,
        emitted: &mut HashSet<String>,
        out: &mut String,
    ) -> Result<(), StructureError> {
        if !emitted.insert(name.to_string()) {
            return Ok(());
        }
        match info {
            StructureInfo::Complex(complex) => {
                self.emit_nested(language, complex.children(), emitted, out)?;
                out.push_str("typedef struct {\n");
                let mut pad = 0usize;
                for (index, child) in complex.children().iter().enumerate() {
                    let padding = complex.padding_before(index);
                    if padding > 0 {
                        out.push_str(&format!(
                            "    {} _pad{}[{}];\n",
                            language.byte_name(),
                            pad,
                            padding
                        ));
                        pad += 1;
                    }
                    out.push_str(&format!("    {};\n", member_decl(language, child)?));
                }
                let trailing = complex.trailing_padding();
                if trailing > 0 {
                    out.push_str(&format!(
                        "    {} _pad{}[{}];\n",
                        language.byte_name(),
                        pad,
                        trailing
                    ));
                }
                out.push_str(&format!("}} {};\n\n", name));
                Ok(())
            }
            StructureInfo::Union(union_info) => {
                self.emit_nested(language, union_info.children(), emitted, out)?;
                out.push_str("typedef union {\n");
                for child in union_info.children() {
                    out.push_str(&format!("    {};\n", member_decl(language, child)?));
                }
                out.push_str(&format!("}} {};\n\n", name));
                Ok(())
            }
            _ => Err(StructureError::Unsupported(
                "code generation requires a struct or union layout".into(),
            )),
        }
    }

    fn emit_nested(
        &self,
        language: DescriptionLanguage,
        children: &[StructVarInfo],
        emitted: &mut HashSet<String>,
        out: &mut String,
    ) -> Result<(), StructureError> {
        for child in children {
            match child.info().as_ref() {
                StructureInfo::Complex(_) | StructureInfo::Union(_) => {
                    self.emit(language, child.type_name(), child.info(), emitted, out)?;
                }
                StructureInfo::StructArray(array) => {
                    if let Some(element_name) = array_element_name(child.type_name()) {
                        match array.element().as_ref() {
                            StructureInfo::Complex(_) | StructureInfo::Union(_) => {
                                self.emit(language, element_name, array.element(), emitted, out)?;
                            }
                            _ => {}
                        }
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }
}

impl StructCodeGenerator for ClCodeGenerator {
    fn generate_struct_code(
        &self,
        language: DescriptionLanguage,
        name: &str,
        info: &StructureInfo,
    ) -> Result<String, StructureError> {
        let mut emitted = HashSet::new();
        let mut out = String::new();
        self.emit(language, name, info, &mut emitted, &mut out)?;
        Ok(out)
    }
}

fn member_decl(
    language: DescriptionLanguage,
    child: &StructVarInfo,
) -> Result<String, StructureError> {
    Ok(match child.info().as_ref() {
        StructureInfo::Scalar(scalar) => format!(
            "{} {}",
            language.primitive_name(scalar.primitive()),
            child.name()
        ),
        StructureInfo::Opaque(layout) => format!(
            "{} {}[{}]",
            language.byte_name(),
            child.name(),
            layout.required_size()
        ),
        StructureInfo::Complex(_) | StructureInfo::Union(_) => {
            format!("{} {}", child.type_name(), child.name())
        }
        StructureInfo::StructArray(array) => {
            let element = array_element_name(child.type_name()).ok_or_else(|| {
                StructureError::Unsupported(format!(
                    "cannot name the element type of {}",
                    child.name()
                ))
            })?;
            format!("{} {}[{}]", element, child.name(), array.length())
        }
        StructureInfo::FlatArray(array) => format!(
            "{} {}[{}]",
            language.primitive_name(array.element()),
            child.name(),
            array.length()
        ),
    })
}

/// Member type names for arrays are recorded as `Element[len]`.
fn array_element_name(type_name: &str) -> Option<&str> {
    type_name.split('[').next().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::{Abi, NaturalAbi};
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
    fn test_padding_members_are_explicit() {
        let abi = NaturalAbi::new();
        let info = StructureInfo::Complex(
            abi.calculate_struct_layout(
                &[member("a", PrimitiveType::I32), member("b", PrimitiveType::F64)],
                false,
            )
            .unwrap(),
        );
        let code = ClCodeGenerator::new()
            .generate_struct_code(DescriptionLanguage::OpenCl, "Pair", &info)
            .unwrap();
        assert!(code.contains("typedef struct {"));
        assert!(code.contains("int a;"));
        assert!(code.contains("uchar _pad0[4];"));
        assert!(code.contains("double b;"));
        assert!(code.contains("} Pair;"));
    }

    #[test]
    fn test_union_declaration() {
        let abi = NaturalAbi::new();
        let info = StructureInfo::Union(
            abi.calculate_union_layout(
                &[member("i", PrimitiveType::I32), member("f", PrimitiveType::F32)],
                false,
            )
            .unwrap(),
        );
        let code = ClCodeGenerator::new()
            .generate_struct_code(DescriptionLanguage::C99, "Value", &info)
            .unwrap();
        assert!(code.contains("typedef union {"));
        assert!(code.contains("int32_t i;"));
        assert!(code.contains("float f;"));
    }

    #[test]
    fn test_scalar_layout_rejected() {
        let info = StructureInfo::Scalar(crate::info::ScalarInfo::of(PrimitiveType::F32));
        assert!(ClCodeGenerator::new()
            .generate_struct_code(DescriptionLanguage::OpenCl, "f", &info)
            .is_err());
    }
}
