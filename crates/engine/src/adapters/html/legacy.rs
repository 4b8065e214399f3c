// crates/engine/src/adapters/html/legacy.rs

//! Legacy comment-embedded signature extraction.
//!
//! The original signing scheme embedded a single armored PGP signature as
//! an HTML comment opened with `<!--!`, anywhere in the document. Absence
//! is not an error; a document either uses this scheme or the current
//! `<meta>` declarations, never both.

const COMMENT_OPEN: &str = "<!--!";
const COMMENT_CLOSE: &str = "-->";
const SIG_BEGIN: &str = "-----BEGIN PGP SIGNATURE-----";
const SIG_END: &str = "-----END PGP SIGNATURE-----";

/// Inner armored signature block of the first `<!--!` comment that carries
/// one, trimmed.
pub fn extract_legacy_signature(raw: &str) -> Option<String> {
    let mut at = 0;
    while let Some(rel) = raw[at..].find(COMMENT_OPEN) {
        let body_start = at + rel + COMMENT_OPEN.len();
        let body_end = raw[body_start..]
            .find(COMMENT_CLOSE)
            .map(|i| body_start + i)
            .unwrap_or(raw.len());
        let body = &raw[body_start..body_end];

        if let Some(block) = armored_block(body) {
            return Some(block.trim().to_string());
        }
        at = body_end;
    }
    None
}

fn armored_block(body: &str) -> Option<&str> {
    let begin = body.find(SIG_BEGIN)?;
    let end = body[begin..].find(SIG_END)? + begin + SIG_END.len();
    Some(&body[begin..end])
}
