// crates/engine/src/trust/store.rs

//! In-memory projection of "trust pattern -> public key".
//!
//! The view is rebuilt wholesale on every configuration-change notification
//! and swapped atomically: a concurrent `resolve` sees either the old or the
//! new view, never a mix.

use std::sync::{Arc, RwLock};

use tracing::debug;
use url::Url;

use crate::domain::types::{EngineDefaults, TrustPatternRecord};
use crate::trust::pattern::{self, MatchPattern};

#[derive(Debug)]
struct TrustEntry {
    compiled: Arc<MatchPattern>,
    pubkey: Arc<str>,
}

#[derive(Debug)]
pub struct TrustStore {
    view: RwLock<Arc<Vec<TrustEntry>>>,
}

impl TrustStore {
    /// A store seeded with the built-in default records.
    pub fn new() -> Self {
        let store = Self {
            view: RwLock::new(Arc::new(Vec::new())),
        };
        store.update(&EngineDefaults::seed_records());
        store
    }

    /// Rebuild the view from a full configuration snapshot.
    ///
    /// Each record's pattern field is split on newlines into individually
    /// matchable patterns, all sharing that record's key. Unparseable
    /// patterns are dropped. Entry order is record order then line order;
    /// `resolve` relies on it.
    pub fn update(&self, records: &[TrustPatternRecord]) {
        let mut entries = Vec::new();
        for record in records {
            let pubkey: Arc<str> = Arc::from(record.pubkey.as_str());
            for pat in record.patterns() {
                if let Some(compiled) = pattern::compile(pat) {
                    entries.push(TrustEntry {
                        compiled,
                        pubkey: Arc::clone(&pubkey),
                    });
                }
            }
        }
        debug!(entries = entries.len(), "trust store view rebuilt");
        if let Ok(mut view) = self.view.write() {
            *view = Arc::new(entries);
        }
    }

    /// Public key for the first pattern matching the URL, by insertion
    /// order. `None` means the URL is outside the engine's scope.
    pub fn resolve(&self, url: &str) -> Option<Arc<str>> {
        let parsed = Url::parse(url).ok()?;
        let view = self.view.read().ok()?.clone();
        view.iter()
            .find(|entry| entry.compiled.matches_url(&parsed))
            .map(|entry| Arc::clone(&entry.pubkey))
    }

    /// Whether any trust pattern matches the URL.
    pub fn is_in_scope(&self, url: &str) -> bool {
        self.resolve(url).is_some()
    }
}

impl Default for TrustStore {
    fn default() -> Self {
        Self::new()
    }
}
