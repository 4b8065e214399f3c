// crates/engine/src/adapters/html/meta.rs

//! `<meta name="signature">` declaration parsing.
//!
//! Declarations live in the document head as
//! `<meta name="signature" content="type=pgp,version=1.0.0,signature=...,allowedmethods=...">`.
//! The `content` attribute is a comma-separated `name=value` list. Field
//! names are a closed set; unrecognized names are stored and ignored so
//! future fields do not break old verifiers.

use std::collections::BTreeMap;

use tracing::warn;

use crate::domain::types::{
    EngineDefaults, SignatureDeclaration, SignatureType, VerificationOptions,
};

/// Extract every well-formed declaration from the document head, in
/// document order.
///
/// Only the substring preceding the first case-insensitive `</head>` is
/// scanned; a document without a closing head tag declares nothing. This is
/// an explicit scope limit, not an oversight.
pub fn parse_declarations(raw: &str) -> VerificationOptions {
    let head = match find_ci(raw, "</head>") {
        Some(idx) => &raw[..idx],
        None => "",
    };

    let mut signatures = Vec::new();
    let mut at = 0;
    while let Some(rel) = find_ci(&head[at..], "<meta") {
        let start = at + rel;
        // Token boundary: "<metadata" is not a meta tag.
        match head.as_bytes().get(start + 5) {
            Some(b) if b.is_ascii_whitespace() || *b == b'/' || *b == b'>' => {}
            _ => {
                at = start + 5;
                continue;
            }
        }
        let end = find_tag_end(head.as_bytes(), start);
        let tag = &head[start..end];
        at = end;

        let attrs = parse_attributes(tag);
        let is_signature = attrs
            .get("name")
            .map(|v| v.eq_ignore_ascii_case("signature"))
            .unwrap_or(false);
        if !is_signature {
            continue;
        }
        let Some(content) = attrs.get("content") else {
            continue;
        };
        match parse_declaration(content) {
            Some(decl) => signatures.push(decl),
            None => warn!("dropping malformed signature declaration"),
        }
    }

    VerificationOptions { signatures }
}

/// Parse one `content` attribute value into a declaration.
///
/// Returns `None` when any of `type`, `version`, `signature` is missing.
fn parse_declaration(content: &str) -> Option<SignatureDeclaration> {
    let mut sig_type = None;
    let mut version = None;
    let mut signature = None;
    let mut allowed_methods = None;
    let mut extra: BTreeMap<String, String> = BTreeMap::new();

    for pair in content.split(',') {
        let Some((name, value)) = pair.split_once('=') else {
            continue;
        };
        match name.trim().to_ascii_lowercase().as_str() {
            "type" => sig_type = Some(SignatureType::from_token(&value.trim().to_ascii_lowercase())),
            "version" => version = Some(value.trim().to_ascii_lowercase()),
            // Whitespace-significant: matched byte-for-byte against the
            // document when stripping.
            "signature" => signature = Some(value.to_string()),
            "allowedmethods" => {
                allowed_methods = Some(
                    value
                        .split(' ')
                        .filter(|m| !m.is_empty())
                        .map(|m| m.to_ascii_lowercase())
                        .collect(),
                )
            }
            unknown => {
                extra.insert(unknown.to_string(), value.trim().to_string());
            }
        }
    }

    Some(SignatureDeclaration {
        sig_type: sig_type?,
        version: version?,
        signature: signature?,
        allowed_methods: allowed_methods.unwrap_or_else(|| {
            EngineDefaults::DEFAULT_ALLOWED_METHODS
                .iter()
                .map(|m| m.to_string())
                .collect()
        }),
    })
}

/// Case-insensitive substring search (ASCII).
pub(crate) fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    let hay = haystack.as_bytes();
    let ned = needle.as_bytes();
    if ned.is_empty() || hay.len() < ned.len() {
        return None;
    }
    (0..=hay.len() - ned.len()).find(|&i| {
        hay[i..i + ned.len()]
            .iter()
            .zip(ned)
            .all(|(a, b)| a.eq_ignore_ascii_case(b))
    })
}

/// Index one past the closing '>' of the tag starting at `start`, honoring
/// quoted attribute values.
fn find_tag_end(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 1;
    let mut quote: Option<u8> = None;
    while i < bytes.len() {
        match (quote, bytes[i]) {
            (Some(q), b) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"') | (None, b'\'') => quote = Some(bytes[i]),
            (None, b'>') => return i + 1,
            (None, _) => {}
        }
        i += 1;
    }
    bytes.len()
}

/// Attribute map of a single tag; names lower-cased, values verbatim.
fn parse_attributes(tag: &str) -> BTreeMap<String, String> {
    let mut attrs = BTreeMap::new();
    let interior = tag
        .strip_prefix('<')
        .unwrap_or(tag)
        .trim_end_matches('>')
        .trim_end_matches('/');

    // Skip the element name.
    let rest = match interior.find(|c: char| c.is_ascii_whitespace()) {
        Some(idx) => &interior[idx..],
        None => return attrs,
    };

    let mut rest = rest.trim_start();
    while !rest.is_empty() {
        let name_end = rest
            .find(|c: char| c.is_ascii_whitespace() || c == '=')
            .unwrap_or(rest.len());
        let name = rest[..name_end].to_ascii_lowercase();
        rest = rest[name_end..].trim_start();

        if let Some(after_eq) = rest.strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            let (value, remainder) = read_attr_value(after_eq);
            if !name.is_empty() {
                attrs.insert(name, value.to_string());
            }
            rest = remainder.trim_start();
        } else if !name.is_empty() {
            attrs.insert(name, String::new());
        } else {
            break;
        }
    }
    attrs
}

fn read_attr_value(s: &str) -> (&str, &str) {
    match s.chars().next() {
        Some(q @ ('"' | '\'')) => {
            let body = &s[1..];
            match body.find(q) {
                Some(idx) => (&body[..idx], &body[idx + 1..]),
                None => (body, ""),
            }
        }
        _ => {
            let end = s
                .find(|c: char| c.is_ascii_whitespace())
                .unwrap_or(s.len());
            (&s[..end], &s[end..])
        }
    }
}
