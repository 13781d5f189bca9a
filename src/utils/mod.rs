// Thu Feb 12 2026 - Alex

pub mod logging;
pub mod math;

pub use logging::LoggingUtils;
pub use math::MathUtils;
