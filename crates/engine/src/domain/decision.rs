// crates/engine/src/domain/decision.rs

use std::collections::HashMap;
use std::sync::RwLock;

use serde::Serialize;
use tracing::warn;

/// Final classification of a page observation.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum TrustDecision {
    /// A declared signature verified against the resolved key.
    Valid,
    /// A trust pattern matched but no eligible signature verified.
    Invalid,
    /// No trust pattern matched the URL; the engine has no opinion.
    NotApplicable,
    /// Internal inconsistency: the URL matches a pattern but no decision is
    /// cached for it. Only the replay path may produce this.
    Unsure,
}

/// Indicator payload for a decision: icon, hover text, enabled flag.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DecisionData {
    pub icon: &'static str,
    pub title: &'static str,
    pub disable: bool,
}

impl TrustDecision {
    pub fn data(self) -> DecisionData {
        match self {
            TrustDecision::Valid => DecisionData {
                icon: "images/sigGood.png",
                title: "Valid Signature!",
                disable: false,
            },
            TrustDecision::Invalid => DecisionData {
                icon: "images/sigBad.png",
                title: "Bad or Missing Signature!",
                disable: false,
            },
            TrustDecision::NotApplicable => DecisionData {
                icon: "images/sigNeutral.png",
                title: "No signature expected.",
                disable: true,
            },
            TrustDecision::Unsure => DecisionData {
                icon: "images/sigWarn.png",
                title: "Inconsistent state.",
                disable: false,
            },
        }
    }
}

/// Last decision per URL, kept for replay when a navigation recurs without a
/// fresh content observation (e.g. the page came out of a cache layer the
/// engine never saw).
///
/// Process-lifetime only. Entries are overwritten on every fresh decision
/// and never evicted; staleness across distinct pages sharing a URL string
/// is an accepted limitation.
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: RwLock<HashMap<String, TrustDecision>>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a fresh verification outcome to a decision and record it.
    pub fn decide(&self, url: &str, verified: bool) -> TrustDecision {
        let decision = if verified {
            TrustDecision::Valid
        } else {
            TrustDecision::Invalid
        };
        self.store(url, decision);
        decision
    }

    /// Record that no trust pattern matched the URL.
    pub fn decide_not_applicable(&self, url: &str) -> TrustDecision {
        self.store(url, TrustDecision::NotApplicable);
        TrustDecision::NotApplicable
    }

    /// Replay the last decision for a URL without a content observation.
    ///
    /// A cache miss while a trust pattern matches the URL is an inconsistent
    /// state and surfaces as `Unsure` rather than quietly defaulting.
    pub fn replay(&self, url: &str, pattern_matched: bool) -> TrustDecision {
        if let Some(decision) = self.get(url) {
            return decision;
        }
        if pattern_matched {
            warn!(url, "replay without cached decision for trusted URL");
            TrustDecision::Unsure
        } else {
            TrustDecision::NotApplicable
        }
    }

    pub fn get(&self, url: &str) -> Option<TrustDecision> {
        self.entries
            .read()
            .ok()
            .and_then(|map| map.get(url).copied())
    }

    fn store(&self, url: &str, decision: TrustDecision) {
        if let Ok(mut map) = self.entries.write() {
            map.insert(url.to_string(), decision);
        }
    }
}
