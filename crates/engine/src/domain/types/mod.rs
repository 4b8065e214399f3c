// Re-export all types so consumers keep a flat `domain::types::*` surface
// while the definitions stay organized internally.

pub use self::core::*;
pub use self::trust::*;
pub use self::config::*;

// Module declarations
mod core;
mod trust;
mod config;
