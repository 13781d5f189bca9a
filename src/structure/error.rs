// Fri Feb 13 2026 - Alex

use crate::buffer::BufferError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StructureError {
    #[error("structure is not bound to a buffer yet")]
    NotBound,
    #[error("structure is already bound to a buffer")]
    AlreadyBound,
    #[error("no layout info resolved for this structure")]
    InfoUnresolved,
    #[error("{class}: missing {what}")]
    MissingMetadata { class: String, what: String },
    #[error("{class}.{field}: missing {what}")]
    MissingFieldMetadata {
        class: String,
        field: String,
        what: String,
    },
    #[error("{class}.{field}: {what} is not supported by this structure's settings")]
    DisallowedMetadata {
        class: String,
        field: String,
        what: String,
    },
    #[error("{class}.{field}: ordering index {index} is already taken")]
    IndexCollision {
        class: String,
        field: String,
        index: u32,
    },
    #[error("{class}.{field}: ordering index {index} out of range for {count} members")]
    IndexOutOfRange {
        class: String,
        field: String,
        index: u32,
        count: usize,
    },
    #[error("{class} does not allow its ABI to be overridden")]
    AbiOverrideForbidden { class: String },
    #[error("unknown structure type: {0}")]
    UnknownType(String),
    #[error("unknown ABI: {0}")]
    UnknownAbi(String),
    #[error("no such member: {0}")]
    NoSuchMember(String),
    #[error("unsupported operation: {0}")]
    Unsupported(String),
    #[error("scalar type mismatch: expected {expected}, found {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
    #[error("range at offset {offset} (+{len} bytes) exceeds the bound region of {capacity} bytes")]
    OutOfBounds {
        offset: usize,
        len: usize,
        capacity: usize,
    },
    #[error("buffer of {actual} bytes is too small, the layout requires {expected}")]
    BufferTooSmall { expected: usize, actual: usize },
    #[error("array index {index} out of range (length {length})")]
    BadIndex { index: usize, length: usize },
    #[error(transparent)]
    Buffer(#[from] BufferError),
}
