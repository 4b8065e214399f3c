pub mod decision;
pub mod error;
pub mod types;
