use pageseal_engine::crypto::SignatureVerifier;
use pageseal_engine::domain::error::{EngineError, EngineResult};
use pageseal_engine::TrustPatternRecord;

/// Test stand-in for the crypto capability.
///
/// Accepts a signature iff its text equals `accept_token` and (when set)
/// the presented content equals `expected_content`. A signature equal to
/// `error_token` simulates a capability failure (malformed material).
pub struct MockVerifier {
    pub accept_token: String,
    pub expected_content: Option<Vec<u8>>,
    pub error_token: Option<String>,
}

impl MockVerifier {
    /// Accept `token` over any content.
    pub fn accepting(token: &str) -> Self {
        Self {
            accept_token: token.to_string(),
            expected_content: None,
            error_token: None,
        }
    }

    /// Accept `token` only over exactly `content`.
    pub fn expecting(token: &str, content: impl Into<Vec<u8>>) -> Self {
        Self {
            accept_token: token.to_string(),
            expected_content: Some(content.into()),
            error_token: None,
        }
    }

    pub fn erroring_on(mut self, token: &str) -> Self {
        self.error_token = Some(token.to_string());
        self
    }
}

impl SignatureVerifier for MockVerifier {
    fn verify_detached(
        &self,
        content: &[u8],
        signature: &str,
        _public_key: &str,
    ) -> EngineResult<bool> {
        if self.error_token.as_deref() == Some(signature) {
            return Err(EngineError::Crypto("simulated capability failure".into()));
        }
        if let Some(expected) = &self.expected_content {
            if content != expected.as_slice() {
                return Ok(false);
            }
        }
        Ok(signature == self.accept_token)
    }
}

/// A record with a single pattern line.
pub fn record(pattern: &str, pubkey: &str) -> TrustPatternRecord {
    TrustPatternRecord::new(pattern, pubkey)
}

/// A document whose head carries the given `<meta name="signature">`
/// content attributes, in order.
pub fn doc_with_declarations(contents: &[&str]) -> String {
    let metas: String = contents
        .iter()
        .map(|c| format!("<meta name=\"signature\" content=\"{c}\">"))
        .collect();
    format!("<html><head>{metas}</head><body>hi</body></html>")
}
