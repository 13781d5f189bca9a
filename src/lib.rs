// Sat Feb 14 2026 - Alex

pub mod abi;
pub mod buffer;
pub mod generator;
pub mod info;
pub mod structure;
pub mod utils;

pub use abi::{Abi, NaturalAbi};
pub use buffer::{BufferError, BufferUtils, ByteBuffer};
pub use generator::{
    ClCodeGenerator, DescriptionLanguage, LayoutProvider, MemberDecl, MemberType,
    ProviderRegistry, StaticGenerator, StructCodeGenerator, StructureSettings,
};
pub use info::{
    Alignment, ArrayStructureInfo, ComplexStructureInfo, ComplexUnionInfo, FieldMeta, LayoutInfo,
    PrimitiveType, ScalarInfo, SerializableInfo, StructVarInfo, StructureInfo,
};
pub use structure::{
    ArrayStructure, ArrayView, ComplexStructure, ComplexUnion, ScalarStructure, Structure,
    StructureArray, StructureError, StructureRoot,
};
pub use utils::LoggingUtils;
