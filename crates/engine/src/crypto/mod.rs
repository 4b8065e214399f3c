pub mod verifier;

#[cfg(feature = "pgp")]
pub mod pgp;

pub use verifier::SignatureVerifier;

#[cfg(feature = "pgp")]
pub use pgp::PgpVerifier;
