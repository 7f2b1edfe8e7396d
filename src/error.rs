// src/error.rs
//! Error taxonomy for the claim signing system.
//!
//! Every fallible operation in the crate surfaces one of these variants.
//! Each error is scoped to a single user-triggered action: the caller reports
//! it as a notification and the session continues. Nothing here is fatal to
//! the process and no automatic retries are attempted.

use thiserror::Error;

/// Errors raised by signing, verification, import and export operations.
///
/// # Variant semantics
/// - A signature that recovers to the *wrong* address is NOT an error: the
///   verifier reports it through the `is_valid` flag of its result. Only
///   malformed input (unparseable signature or address hex) raises
///   [`IdentityError::VerificationFailure`].
/// - [`IdentityError::HashMismatch`] distinguishes a tampered document
///   payload from a bad signature; it is raised before any recovery attempt.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// No usable wallet session (missing key material or environment).
    #[error("no wallet available: {0}")]
    WalletUnavailable(String),

    /// The wallet declined the signing request.
    #[error("signing request rejected by the wallet")]
    UserRejected,

    /// An imported artifact file did not match the expected schema.
    #[error("malformed import: {0}")]
    MalformedImport(String),

    /// The recomputed document hash disagrees with the imported proof.
    #[error("document hash mismatch: proof carries {expected}, recomputed {computed}")]
    HashMismatch { expected: String, computed: String },

    /// Verification input (signature or address) could not be parsed.
    #[error("verification input rejected: {0}")]
    VerificationFailure(String),

    /// Any other failure (I/O, signer fault).
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl From<std::io::Error> for IdentityError {
    fn from(err: std::io::Error) -> Self {
        IdentityError::Unexpected(err.to_string())
    }
}
