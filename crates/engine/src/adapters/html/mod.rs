//! Signature discovery and extraction from raw page markup.

pub mod legacy;
pub mod meta;
pub mod strip;

pub use legacy::extract_legacy_signature;
pub use meta::parse_declarations;
pub use strip::strip_signatures;
