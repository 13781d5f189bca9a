// Thu Feb 12 2026 - Alex

use crate::info::StructureInfo;
use serde::{Deserialize, Serialize};

/// Flat, serde-friendly description of a resolved layout, for export to
/// external tooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializableInfo {
    pub name: String,
    pub size: usize,
    pub alignment: usize,
    pub compressed: bool,
    pub members: Vec<SerializableMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializableMember {
    pub name: String,
    pub type_name: String,
    pub offset: usize,
    pub size: usize,
}

impl SerializableInfo {
    pub fn from_info(name: &str, info: &StructureInfo) -> Self {
        let mut members = Vec::new();
        match info {
            StructureInfo::Complex(c) => {
                for (i, child) in c.children().iter().enumerate() {
                    members.push(SerializableMember {
                        name: child.name().to_string(),
                        type_name: child.type_name().to_string(),
                        offset: c.offset_of(i),
                        size: child.info().required_size(),
                    });
                }
            }
            StructureInfo::Union(u) => {
                for (i, child) in u.children().iter().enumerate() {
                    members.push(SerializableMember {
                        name: child.name().to_string(),
                        type_name: child.type_name().to_string(),
                        offset: u.position_of(i),
                        size: child.info().required_size(),
                    });
                }
            }
            _ => {}
        }
        Self {
            name: name.to_string(),
            size: info.required_size(),
            alignment: info.alignment().as_usize(),
            compressed: info.compressed(),
            members,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
