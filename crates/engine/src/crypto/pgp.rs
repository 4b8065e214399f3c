// crates/engine/src/crypto/pgp.rs

//! OpenPGP verification backend (rPGP).

use pgp::{Deserializable, SignedPublicKey, StandaloneSignature};

use crate::crypto::verifier::SignatureVerifier;
use crate::domain::error::{EngineError, EngineResult};

/// Verifies armored detached PGP signatures against armored public keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgpVerifier;

impl PgpVerifier {
    pub fn new() -> Self {
        Self
    }
}

impl SignatureVerifier for PgpVerifier {
    fn verify_detached(
        &self,
        content: &[u8],
        signature: &str,
        public_key: &str,
    ) -> EngineResult<bool> {
        let (key, _) = SignedPublicKey::from_string(public_key)
            .map_err(|e| EngineError::Crypto(format!("public key parse: {e}")))?;
        let (sig, _) = StandaloneSignature::from_string(signature)
            .map_err(|e| EngineError::Crypto(format!("signature parse: {e}")))?;

        // Pages are commonly signed with a signing subkey; try the primary
        // key first, then each subkey.
        if sig.verify(&key, content).is_ok() {
            return Ok(true);
        }
        for subkey in &key.public_subkeys {
            if sig.verify(subkey, content).is_ok() {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
