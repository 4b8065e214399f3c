use serde::{Deserialize, Serialize};

use crate::domain::error::EngineResult;

/// One record of the external trust configuration store.
///
/// `regex` keeps its historical field name for wire compatibility with
/// existing stores; it holds one or more newline-separated URL match
/// patterns, all bound to the same public key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrustPatternRecord {
    pub regex: String,
    /// Armored public key material for every pattern in this record.
    pub pubkey: String,
}

impl TrustPatternRecord {
    pub fn new(patterns: impl Into<String>, pubkey: impl Into<String>) -> Self {
        Self {
            regex: patterns.into(),
            pubkey: pubkey.into(),
        }
    }

    /// Individually-matchable patterns, in declaration order. Blank lines
    /// are skipped.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.regex
            .split('\n')
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

/// Decode the external store's `items` value (a JSON array of records).
pub fn records_from_json(items: &str) -> EngineResult<Vec<TrustPatternRecord>> {
    Ok(serde_json::from_str(items)?)
}
