// crates/engine/src/domain/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
  #[error("invalid match pattern: {0}")]
  Pattern(String),

  #[error("no normalization algorithm registered for version {0}")]
  UnknownNormalization(String),

  #[error("crypto capability: {0}")]
  Crypto(String),

  #[error(transparent)]
  Json(#[from] serde_json::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
