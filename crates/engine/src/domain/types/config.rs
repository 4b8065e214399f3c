use super::trust::TrustPatternRecord;

/// Centralized defaults for the PageSeal engine.
/// All opinionated defaults should be defined here for consistency.
pub struct EngineDefaults;

impl EngineDefaults {
    /// Methods a current-format declaration applies to when it carries no
    /// `allowedmethods` field. Token spellings are part of the micro-format.
    pub const DEFAULT_ALLOWED_METHODS: [&'static str; 2] =
        ["filteredrequestdata", "outsidehtml"];

    /// Methods a synthesized legacy declaration applies to.
    pub const LEGACY_ALLOWED_METHODS: [&'static str; 2] =
        ["filterrequestmetadata", "outsidehtml"];

    /// Normalization algorithm version legacy signatures were produced with.
    pub const LEGACY_VERSION: &'static str = "1.0.0";

    /// Normalization algorithm version the minimized-signature path targets.
    pub const MINIMIZED_TARGET_VERSION: &'static str = "1.0.0";

    /// Built-in trust configuration used when the external store holds no
    /// records yet. Empty: trust is bring-your-own.
    pub fn seed_records() -> Vec<TrustPatternRecord> {
        Vec::new()
    }
}
