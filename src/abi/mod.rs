// Sat Feb 14 2026 - Alex

pub mod natural;
pub mod traits;

pub use natural::NaturalAbi;
pub use traits::{default_abi, lookup_abi, register_abi, Abi};
