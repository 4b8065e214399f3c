use std::collections::BTreeSet;

use super::config::EngineDefaults;

/// Channel through which page content reached the engine.
///
/// The lower-cased token is what declarations gate on via `allowedmethods`;
/// the spelling of each token is part of the in-document micro-format and
/// must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMethod {
    /// Streamed network interception of the response body.
    FilterResponseData,
    /// In-page script extraction of the rendered markup.
    OutsideHtml,
}

impl DeliveryMethod {
    /// Parse a collaborator-supplied method name ("filterResponseData",
    /// "outsideHTML"); case-insensitive.
    pub fn parse(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("filterresponsedata") {
            Some(DeliveryMethod::FilterResponseData)
        } else if name.eq_ignore_ascii_case("outsidehtml") {
            Some(DeliveryMethod::OutsideHtml)
        } else {
            None
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            DeliveryMethod::FilterResponseData => "filterresponsedata",
            DeliveryMethod::OutsideHtml => "outsidehtml",
        }
    }
}

/// Signature scheme named by a declaration's `type` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureType {
    /// Detached signature over the raw content bytes.
    Pgp,
    /// Detached signature over normalized (minified) content.
    PgpMinimized,
    /// Unrecognized scheme; carried through so the protocol can skip it.
    Other(String),
}

impl SignatureType {
    /// Parse a lower-cased `type` value from a declaration.
    pub fn from_token(token: &str) -> Self {
        match token {
            "pgp" => SignatureType::Pgp,
            "pgpminimized" => SignatureType::PgpMinimized,
            other => SignatureType::Other(other.to_string()),
        }
    }
}

/// One parsed `<meta name="signature">` entry (or its legacy equivalent).
///
/// `signature` is whitespace-significant: it is matched byte-for-byte against
/// the document when stripping the payload out of the signed content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureDeclaration {
    pub sig_type: SignatureType,
    /// Normalization algorithm version the signer used ("X.Y.Z").
    pub version: String,
    pub signature: String,
    /// Lower-cased delivery-method tokens this signature applies to.
    pub allowed_methods: BTreeSet<String>,
}

impl SignatureDeclaration {
    /// Declaration synthesized from a legacy comment-embedded signature.
    pub fn legacy(signature: String) -> Self {
        Self {
            sig_type: SignatureType::PgpMinimized,
            version: EngineDefaults::LEGACY_VERSION.to_string(),
            signature,
            allowed_methods: EngineDefaults::LEGACY_ALLOWED_METHODS
                .iter()
                .map(|m| m.to_string())
                .collect(),
        }
    }

    pub fn applies_to(&self, method: DeliveryMethod) -> bool {
        self.allowed_methods.contains(method.token())
    }
}

/// A document's parsed trust intent; rebuilt per verification attempt.
#[derive(Debug, Clone, Default)]
pub struct VerificationOptions {
    /// Declarations in document order. Order is significant: verification
    /// tries them first to last and stops at the first success.
    pub signatures: Vec<SignatureDeclaration>,
}

impl VerificationOptions {
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}
