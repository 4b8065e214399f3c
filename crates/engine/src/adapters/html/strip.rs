// crates/engine/src/adapters/html/strip.rs

//! Signature payload stripping.
//!
//! The embedded signature markup is part of the document but not part of
//! what the signer signed, so each declaration's payload is removed from
//! the content before normalization and verification.

use crate::domain::types::VerificationOptions;

/// Remove the first literal occurrence of each declaration's trimmed
/// signature text from the content, in declaration order.
///
/// Also trims each stored signature in place; later byte-for-byte
/// comparisons rely on the trimmed form. Idempotent: stripping twice yields
/// the same content as stripping once.
pub fn strip_signatures(content: &str, options: &mut VerificationOptions) -> String {
    let mut stripped = content.to_string();
    for decl in &mut options.signatures {
        let trimmed = decl.signature.trim();
        if trimmed.len() != decl.signature.len() {
            decl.signature = trimmed.to_string();
        }
        if !decl.signature.is_empty() {
            stripped = stripped.replacen(&decl.signature, "", 1);
        }
    }
    stripped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::SignatureDeclaration;

    fn options_with(sig: &str) -> VerificationOptions {
        VerificationOptions {
            signatures: vec![SignatureDeclaration::legacy(sig.to_string())],
        }
    }

    #[test]
    fn removes_first_occurrence_only() {
        let mut opts = options_with("SIGDATA");
        let out = strip_signatures("<a>SIGDATA</a>SIGDATA", &mut opts);
        assert_eq!(out, "<a></a>SIGDATA");
    }

    #[test]
    fn trims_stored_signature_in_place() {
        let mut opts = options_with("  SIGDATA\n");
        let out = strip_signatures("<a>SIGDATA</a>", &mut opts);
        assert_eq!(out, "<a></a>");
        assert_eq!(opts.signatures[0].signature, "SIGDATA");
    }

    #[test]
    fn idempotent() {
        let mut opts = options_with("SIGDATA");
        let once = strip_signatures("<a>SIGDATA</a>", &mut opts);
        let twice = strip_signatures(&once, &mut opts);
        assert_eq!(once, twice);
    }
}
