// crates/engine/src/lib.rs

//! Public facade for the PageSeal engine.
//!
//! The engine is a pure decision function plus a small amount of cached
//! state: collaborators feed it raw page content (from network interception
//! or in-page extraction), a URL, and a delivery method; it answers with a
//! [`TrustDecision`]. It never fetches content and never persists anything.

pub mod adapters;
pub mod crypto;
pub mod domain;
pub mod normalize;
pub mod protocol;
pub mod trust;

use std::sync::Arc;

use tracing::warn;

use adapters::html;
use crypto::SignatureVerifier;
use domain::decision::ResultCache;
use trust::TrustStore;

/// One content observation delivered by a collaborator feed.
#[derive(Debug, Clone)]
pub struct ContentObservation {
    /// Full page markup, UTF-8 text.
    pub raw_content: String,
    /// Legacy signature pre-extracted by the in-page feed, if any.
    pub legacy_signature: Option<String>,
    pub url: String,
    /// Opaque identifier of the originating tab; carried through for the
    /// indicator collaborator, never interpreted.
    pub tab_id: i64,
    pub method: DeliveryMethod,
}

/// The Content Integrity Verification Engine.
///
/// Owns the trust store view and the per-URL result cache; the crypto
/// capability is injected. Tab pipelines may call `observe_content`
/// concurrently; the only shared state is the store (atomically swapped)
/// and the cache (per-URL last-write-wins).
pub struct Engine<V> {
    store: TrustStore,
    cache: ResultCache,
    verifier: Arc<V>,
}

impl<V> Engine<V>
where
    V: SignatureVerifier + Send + Sync + 'static,
{
    /// Engine seeded with the built-in default trust configuration.
    pub fn new(verifier: V) -> Self {
        Self {
            store: TrustStore::new(),
            cache: ResultCache::new(),
            verifier: Arc::new(verifier),
        }
    }

    /// Engine with an explicit initial trust configuration.
    pub fn with_records(verifier: V, records: &[TrustPatternRecord]) -> Self {
        let engine = Self::new(verifier);
        engine.store.update(records);
        engine
    }

    /// Configuration-change notification: rebuild the trust view from a
    /// full snapshot. Atomic with respect to concurrent observations.
    pub fn update_trust_config(&self, records: &[TrustPatternRecord]) {
        self.store.update(records);
    }

    /// Run the full verification pipeline for one observation.
    ///
    /// Always produces exactly one decision and records it in the cache;
    /// no code path is fatal. A run in flight is never cancelled — a newer
    /// navigation's decision simply overwrites the cache afterward.
    pub async fn observe_content(&self, observation: ContentObservation) -> TrustDecision {
        let ContentObservation {
            raw_content,
            legacy_signature,
            url,
            tab_id,
            method,
        } = observation;

        let Some(public_key) = self.store.resolve(&url) else {
            return self.cache.decide_not_applicable(&url);
        };

        let mut options = html::parse_declarations(&raw_content);
        if options.is_empty() {
            // Legacy extraction only runs when no current-format
            // declarations were found; a document uses one scheme or the
            // other.
            let legacy = legacy_signature
                .or_else(|| html::extract_legacy_signature(&raw_content));
            if let Some(signature) = legacy {
                options.signatures.push(SignatureDeclaration::legacy(signature));
            }
        }

        let content = html::strip_signatures(&raw_content, &mut options);

        // Cryptographic verification is the one operation that may take a
        // while; run it off the async executor so other tabs' pipelines
        // keep moving.
        let verifier = Arc::clone(&self.verifier);
        let key = public_key.to_string();
        let verified = tokio::task::spawn_blocking(move || {
            protocol::verify(&content, &options, &key, method, verifier.as_ref())
        })
        .await
        .unwrap_or_else(|err| {
            warn!(tab_id, %err, "verification task failed; treating as unverified");
            false
        });

        self.cache.decide(&url, verified)
    }

    /// Replay the last decision for a URL when a navigation recurs without
    /// a fresh content observation.
    pub fn replay(&self, url: &str) -> TrustDecision {
        self.cache.replay(url, self.store.is_in_scope(url))
    }
}

// Re-exports for convenience
pub use domain::decision::{DecisionData, TrustDecision};
pub use domain::error::{EngineError, EngineResult};
pub use domain::types::{
    records_from_json, DeliveryMethod, EngineDefaults, SignatureDeclaration,
    SignatureType, TrustPatternRecord, VerificationOptions,
};
#[cfg(feature = "pgp")]
pub use crypto::PgpVerifier;
