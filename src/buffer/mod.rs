// Thu Feb 12 2026 - Alex

pub mod byte_buf;
pub mod error;
pub mod utils;

pub use byte_buf::ByteBuffer;
pub use error::BufferError;
pub use utils::{BufferUtils, PointerToBuffer};
