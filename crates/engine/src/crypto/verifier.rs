//! Crypto capability boundary for the engine.
//! The engine never parses key or signature material itself; backends do.

use crate::domain::error::EngineResult;

/// Detached-signature verification capability.
///
/// `Ok(false)` is a well-formed "does not verify"; `Err` is a capability
/// failure (malformed key or signature material, decode failure). The
/// verification protocol degrades both to a failed attempt and moves on,
/// so implementations never need to mask their own errors.
pub trait SignatureVerifier {
    fn verify_detached(
        &self,
        content: &[u8],
        signature: &str,
        public_key: &str,
    ) -> EngineResult<bool>;
}
