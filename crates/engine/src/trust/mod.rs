pub mod pattern;
pub mod store;

pub use pattern::MatchPattern;
pub use store::TrustStore;
