// crates/engine/src/trust/pattern.rs

//! Browser-style URL match patterns.
//!
//! Patterns take the form `<scheme>://<host><path>`:
//! - scheme: a literal scheme, or `*` for http/https
//! - host: a literal host, `*`, or `*.domain` (the domain itself and any
//!   subdomain); ports are never part of a pattern
//! - path: `/`-rooted, `*` matches any run of characters including `/`
//!
//! `<all_urls>` matches every supported scheme. Patterns anchor to the full
//! URL; there are no partial matches. Compilation happens once per distinct
//! pattern string, cached process-wide.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;
use tracing::warn;
use url::Url;

use crate::domain::error::{EngineError, EngineResult};

const SUPPORTED_SCHEMES: [&str; 4] = ["http", "https", "file", "ftp"];

#[derive(Debug, Clone, PartialEq, Eq)]
enum SchemeMatcher {
    /// `*` — http or https only.
    Wildcard,
    Exact(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum HostMatcher {
    Any,
    /// `*.domain` — the domain itself or any subdomain.
    Subdomain(String),
    Exact(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPattern {
    all_urls: bool,
    scheme: SchemeMatcher,
    host: HostMatcher,
    path: String,
}

impl MatchPattern {
    pub fn parse(pattern: &str) -> EngineResult<Self> {
        if pattern == "<all_urls>" {
            return Ok(Self {
                all_urls: true,
                scheme: SchemeMatcher::Wildcard,
                host: HostMatcher::Any,
                path: "/*".to_string(),
            });
        }

        let (scheme_part, rest) = pattern
            .split_once("://")
            .ok_or_else(|| EngineError::Pattern(pattern.to_string()))?;

        let scheme = match scheme_part {
            "*" => SchemeMatcher::Wildcard,
            s if SUPPORTED_SCHEMES.contains(&s) => SchemeMatcher::Exact(s.to_string()),
            _ => return Err(EngineError::Pattern(pattern.to_string())),
        };

        let (host_part, path_part) = match rest.find('/') {
            Some(idx) => (&rest[..idx], &rest[idx..]),
            None => return Err(EngineError::Pattern(pattern.to_string())),
        };

        let host = if host_part == "*" {
            HostMatcher::Any
        } else if let Some(domain) = host_part.strip_prefix("*.") {
            if domain.is_empty() || domain.contains('*') {
                return Err(EngineError::Pattern(pattern.to_string()));
            }
            HostMatcher::Subdomain(domain.to_ascii_lowercase())
        } else if host_part.contains('*') || host_part.contains(':') {
            return Err(EngineError::Pattern(pattern.to_string()));
        } else {
            HostMatcher::Exact(host_part.to_ascii_lowercase())
        };

        Ok(Self {
            all_urls: false,
            scheme,
            host,
            path: path_part.to_string(),
        })
    }

    pub fn matches_url(&self, url: &Url) -> bool {
        if !self.scheme_matches(url.scheme()) {
            return false;
        }
        if self.all_urls {
            return true;
        }
        if !self.host_matches(url.host_str().unwrap_or("")) {
            return false;
        }

        // The path component matches against the URL path plus any query
        // string, as browser match patterns do. Fragments are ignored.
        let mut target = url.path().to_string();
        if let Some(query) = url.query() {
            target.push('?');
            target.push_str(query);
        }
        glob_match(&self.path, &target)
    }

    fn scheme_matches(&self, scheme: &str) -> bool {
        if self.all_urls {
            return SUPPORTED_SCHEMES.contains(&scheme);
        }
        match &self.scheme {
            SchemeMatcher::Wildcard => scheme == "http" || scheme == "https",
            SchemeMatcher::Exact(s) => scheme == s,
        }
    }

    fn host_matches(&self, host: &str) -> bool {
        let host = host.to_ascii_lowercase();
        match &self.host {
            HostMatcher::Any => true,
            HostMatcher::Subdomain(domain) => {
                host == *domain || host.ends_with(&format!(".{domain}"))
            }
            HostMatcher::Exact(h) => host == *h,
        }
    }
}

/// Anchored glob match where `*` matches any run of characters.
fn glob_match(pattern: &str, text: &str) -> bool {
    let pat: Vec<u8> = pattern.bytes().collect();
    let txt: Vec<u8> = text.bytes().collect();

    let (mut p, mut t) = (0usize, 0usize);
    let mut star: Option<(usize, usize)> = None;

    while t < txt.len() {
        if p < pat.len() && (pat[p] == txt[t]) {
            p += 1;
            t += 1;
        } else if p < pat.len() && pat[p] == b'*' {
            star = Some((p, t));
            p += 1;
        } else if let Some((sp, st)) = star {
            // Backtrack: let the last `*` absorb one more character.
            p = sp + 1;
            t = st + 1;
            star = Some((sp, st + 1));
        } else {
            return false;
        }
    }

    while p < pat.len() && pat[p] == b'*' {
        p += 1;
    }
    p == pat.len()
}

/// Compiled patterns, keyed by the exact pattern string. Invalid patterns
/// are cached as `None` so they are reported once and never match.
static COMPILED: Lazy<Mutex<HashMap<String, Option<Arc<MatchPattern>>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Compile (or fetch the cached compilation of) a pattern string.
pub fn compile(pattern: &str) -> Option<Arc<MatchPattern>> {
    let mut cache = match COMPILED.lock() {
        Ok(c) => c,
        Err(_) => return MatchPattern::parse(pattern).ok().map(Arc::new),
    };
    if let Some(entry) = cache.get(pattern) {
        return entry.clone();
    }
    let compiled = match MatchPattern::parse(pattern) {
        Ok(p) => Some(Arc::new(p)),
        Err(err) => {
            warn!(pattern, %err, "ignoring unparseable trust pattern");
            None
        }
    };
    cache.insert(pattern.to_string(), compiled.clone());
    compiled
}

/// Test a URL string against a pattern string. Unparseable patterns and
/// unparseable URLs never match.
pub fn matches(pattern: &str, url: &str) -> bool {
    let Some(compiled) = compile(pattern) else {
        return false;
    };
    match Url::parse(url) {
        Ok(parsed) => compiled.matches_url(&parsed),
        Err(_) => false,
    }
}
