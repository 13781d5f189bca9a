// Sat Feb 14 2026 - Alex

pub mod code_gen;
pub mod provider;
pub mod registry;
pub mod static_gen;

pub use code_gen::{ClCodeGenerator, DescriptionLanguage, StructCodeGenerator};
pub use provider::{LayoutProvider, MemberDecl, MemberType, StructureSettings};
pub use registry::ProviderRegistry;
pub use static_gen::StaticGenerator;
