// crates/engine/src/protocol.rs

//! Multi-signature verification protocol.
//!
//! A document may carry several signatures (e.g. from a migration between
//! signing schemes); validity under any one of them is sufficient.
//! Declarations are tried strictly in document order and the first success
//! wins — a sequential short-circuiting fold, never a race.

use tracing::{debug, warn};

use crate::crypto::SignatureVerifier;
use crate::domain::types::{
    DeliveryMethod, EngineDefaults, SignatureType, VerificationOptions,
};
use crate::normalize;

/// Run the verification chain for one content observation.
///
/// Returns `true` iff some declaration is eligible for `method` and
/// verifies against `public_key`. An error from the crypto capability or
/// the normalizer counts as a failed attempt for that declaration only;
/// the chain continues.
pub fn verify<V: SignatureVerifier + ?Sized>(
    content: &str,
    options: &VerificationOptions,
    public_key: &str,
    method: DeliveryMethod,
    verifier: &V,
) -> bool {
    if options.is_empty() {
        return false;
    }

    for (idx, decl) in options.signatures.iter().enumerate() {
        if !decl.applies_to(method) {
            debug!(idx, method = method.token(), "declaration not eligible for method");
            continue;
        }

        let attempt = match &decl.sig_type {
            SignatureType::Pgp => {
                verifier.verify_detached(content.as_bytes(), &decl.signature, public_key)
            }
            SignatureType::PgpMinimized => {
                if !normalize::matches_version(
                    &decl.version,
                    EngineDefaults::MINIMIZED_TARGET_VERSION,
                ) {
                    debug!(idx, version = %decl.version, "no compatible normalization");
                    continue;
                }
                match normalize::normalize(EngineDefaults::MINIMIZED_TARGET_VERSION, content) {
                    Ok(normalized) => verifier.verify_detached(
                        normalized.as_bytes(),
                        &decl.signature,
                        public_key,
                    ),
                    Err(e) => Err(e),
                }
            }
            SignatureType::Other(name) => {
                debug!(idx, sig_type = %name, "unknown signature type skipped");
                continue;
            }
        };

        match attempt {
            Ok(true) => {
                debug!(idx, "signature verified");
                return true;
            }
            Ok(false) => {}
            Err(err) => {
                warn!(idx, %err, "verification attempt degraded to failure");
            }
        }
    }

    false
}
