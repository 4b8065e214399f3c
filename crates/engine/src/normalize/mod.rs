// crates/engine/src/normalize/mod.rs

//! Versioned content normalization.
//!
//! Signatures are produced over a canonical byte form of the page, so the
//! verifier must reproduce the exact transform the signer used. Algorithms
//! are registered per version; old versions stay available because old
//! signatures were produced with them.

mod v1;

use crate::domain::error::{EngineError, EngineResult};

type NormalizeFn = fn(&str) -> String;

/// Registered normalization algorithms, exact version -> transform.
/// Adding a future algorithm means adding a row here.
const REGISTRY: [(&str, NormalizeFn); 1] = [("1.0.0", v1::normalize)];

/// Canonicalize raw markup under the named algorithm version.
pub fn normalize(version: &str, raw: &str) -> EngineResult<String> {
    REGISTRY
        .iter()
        .find(|(v, _)| *v == version)
        .map(|(_, f)| f(raw))
        .ok_or_else(|| EngineError::UnknownNormalization(version.to_string()))
}

/// Whether a declaration's version is compatible with a target algorithm.
///
/// Compatible iff both are exactly three dot-separated integers, major and
/// minor are equal, and the candidate's patch is <= the target's patch: an
/// algorithm may be bug-fixed forward, never changed in major/minor
/// semantics without explicit new algorithm support. Malformed versions are
/// never compatible with anything.
pub fn matches_version(candidate: &str, target: &str) -> bool {
    match (parse_version(candidate), parse_version(target)) {
        (Some(c), Some(t)) => c.0 == t.0 && c.1 == t.1 && c.2 <= t.2,
        _ => false,
    }
}

fn parse_version(version: &str) -> Option<(u64, u64, u64)> {
    let mut parts = version.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    let patch = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((major, minor, patch))
}
