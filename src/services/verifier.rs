// src/services/verifier.rs
//! Verification service: recovers signing addresses and checks artifacts.
//!
//! Verification needs no wallet and no private key: the signing address is
//! recovered from the signature itself and compared, case-insensitively,
//! against the expected address.
//!
//! For documents the freshly computed file hash is compared against the
//! imported proof BEFORE any recovery attempt, so a tampered payload is
//! distinguishable from a bad signature.

use crate::error::IdentityError;
use crate::models::artifact::{DocumentSignature, VerificationRequest, VerificationResult};
use crate::utils::crypto::{format_address, keccak_hash, parse_address, sha256_hex};
use ethers_core::types::{Address, RecoveryMessage, Signature};
use log::{info, warn};
use std::str::FromStr;

/// Stateless verifier for signed claims and document proofs.
pub struct VerificationService;

impl VerificationService {
    pub fn new() -> Self {
        VerificationService
    }

    /// Verifies a signed identity claim.
    ///
    /// # Process flow
    /// 1. Recompute the Keccak-256 hash of the supplied message
    /// 2. Recover the signing address over the 32 hash bytes (EIP-191)
    /// 3. Compare the recovered address to the expected one, ignoring case
    ///
    /// # Errors
    /// [`IdentityError::VerificationFailure`] when the signature or the
    /// expected address cannot be parsed. A signature that parses but
    /// recovers to a different address is NOT an error: it yields
    /// `is_valid == false`.
    pub fn verify_claim(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationResult, IdentityError> {
        let expected = parse_address(&request.expected_address)?;
        let signature = Self::parse_signature(&request.signature)?;

        let hash = keccak_hash(request.message.as_bytes());
        self.recover_and_compare(&signature, RecoveryMessage::Data(hash.to_vec()), expected)
    }

    /// Verifies a document against its imported proof.
    ///
    /// # Process flow
    /// 1. Recompute the SHA-256 hash of the supplied document bytes
    /// 2. Compare it to the hash carried by the proof; on mismatch, report
    ///    invalid immediately with no recovered address
    /// 3. Reconstruct the signed payload from the proof's hash and timestamp
    /// 4. Recover the signing address and compare to `expected_address`
    ///
    /// # Errors
    /// Same as [`VerificationService::verify_claim`].
    pub fn verify_document(
        &self,
        document: &[u8],
        proof: &DocumentSignature,
        expected_address: &str,
    ) -> Result<VerificationResult, IdentityError> {
        let expected = parse_address(expected_address)?;
        let signature = Self::parse_signature(&proof.signature)?;

        match Self::check_document_hash(document, proof) {
            Ok(()) => {}
            Err(IdentityError::HashMismatch { expected, computed }) => {
                warn!(
                    "document hash mismatch: proof carries {}, recomputed {}",
                    expected, computed
                );
                return Ok(VerificationResult {
                    recovered_address: None,
                    is_valid: false,
                });
            }
            Err(e) => return Err(e),
        }

        let payload = DocumentSignature::signed_payload(&proof.file_hash, &proof.timestamp);
        self.recover_and_compare(
            &signature,
            RecoveryMessage::Data(payload.into_bytes()),
            expected,
        )
    }

    /// Compares the recomputed hash of `document` against the proof.
    fn check_document_hash(
        document: &[u8],
        proof: &DocumentSignature,
    ) -> Result<(), IdentityError> {
        let computed = sha256_hex(document);
        if !computed.eq_ignore_ascii_case(proof.file_hash.trim()) {
            return Err(IdentityError::HashMismatch {
                expected: proof.file_hash.clone(),
                computed,
            });
        }
        Ok(())
    }

    fn parse_signature(input: &str) -> Result<Signature, IdentityError> {
        let input = input.trim();
        let stripped = input.strip_prefix("0x").unwrap_or(input);
        Signature::from_str(stripped).map_err(|e| {
            IdentityError::VerificationFailure(format!("bad signature {:?}: {}", input, e))
        })
    }

    fn recover_and_compare(
        &self,
        signature: &Signature,
        message: RecoveryMessage,
        expected: Address,
    ) -> Result<VerificationResult, IdentityError> {
        let recovered = match signature.recover(message) {
            Ok(address) => address,
            Err(e) => {
                // A signature with an unrecoverable point is invalid, not a
                // caller mistake
                warn!("signature recovery failed: {}", e);
                return Ok(VerificationResult {
                    recovered_address: None,
                    is_valid: false,
                });
            }
        };

        let is_valid = recovered == expected;
        info!(
            "recovered {}, expected {}: {}",
            format_address(recovered),
            format_address(expected),
            if is_valid { "valid" } else { "invalid" }
        );
        Ok(VerificationResult {
            recovered_address: Some(format_address(recovered)),
            is_valid,
        })
    }
}

impl Default for VerificationService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::claim::IdentityClaim;
    use crate::services::signer::SigningService;
    use crate::wallet::session::WalletSession;

    fn test_claim() -> IdentityClaim {
        IdentityClaim::new("Alice", "X", "Student", "a@x.edu")
    }

    #[tokio::test]
    async fn test_round_trip_claim_verifies() {
        let session = WalletSession::random();
        let signer = SigningService::new(session);
        let artifact = signer.sign_claim(&test_claim()).await.unwrap();

        let result = VerificationService::new()
            .verify_claim(&VerificationRequest::from_artifact(&artifact))
            .unwrap();

        assert!(result.is_valid);
        assert_eq!(result.recovered_address.unwrap(), artifact.address);
    }

    #[tokio::test]
    async fn test_lowercase_expected_address_still_verifies() {
        let signer = SigningService::new(WalletSession::random());
        let artifact = signer.sign_claim(&test_claim()).await.unwrap();

        let mut request = VerificationRequest::from_artifact(&artifact);
        request.expected_address = artifact.address.to_lowercase();
        let result = VerificationService::new().verify_claim(&request).unwrap();

        assert!(result.is_valid);
    }

    #[tokio::test]
    async fn test_tampered_message_is_invalid() {
        let signer = SigningService::new(WalletSession::random());
        let artifact = signer.sign_claim(&test_claim()).await.unwrap();

        let mut request = VerificationRequest::from_artifact(&artifact);
        request.message = request.message.replace("Alice", "Mallory");
        let result = VerificationService::new().verify_claim(&request).unwrap();

        assert!(!result.is_valid);
    }

    #[tokio::test]
    async fn test_wrong_expected_address_is_invalid() {
        let signer = SigningService::new(WalletSession::random());
        let artifact = signer.sign_claim(&test_claim()).await.unwrap();

        let mut request = VerificationRequest::from_artifact(&artifact);
        request.expected_address = "0x0000000000000000000000000000000000000001".to_string();
        let result = VerificationService::new().verify_claim(&request).unwrap();

        assert!(!result.is_valid);
        // The honest signer is still the one recovered
        assert_eq!(result.recovered_address.unwrap(), artifact.address);
    }

    #[tokio::test]
    async fn test_malformed_signature_is_an_error_not_a_panic() {
        let signer = SigningService::new(WalletSession::random());
        let artifact = signer.sign_claim(&test_claim()).await.unwrap();

        let mut request = VerificationRequest::from_artifact(&artifact);
        request.signature = "0xnot-hex".to_string();
        let result = VerificationService::new().verify_claim(&request);

        assert!(matches!(
            result,
            Err(IdentityError::VerificationFailure(_))
        ));
    }

    #[tokio::test]
    async fn test_malformed_expected_address_is_an_error() {
        let signer = SigningService::new(WalletSession::random());
        let artifact = signer.sign_claim(&test_claim()).await.unwrap();

        let mut request = VerificationRequest::from_artifact(&artifact);
        request.expected_address = "banana".to_string();
        assert!(matches!(
            VerificationService::new().verify_claim(&request),
            Err(IdentityError::VerificationFailure(_))
        ));
    }

    #[tokio::test]
    async fn test_document_round_trip_verifies() {
        let session = WalletSession::random();
        let address = session.checksum_address();
        let signer = SigningService::new(session);
        let proof = signer.sign_document("report.txt", b"contents").await.unwrap();

        let result = VerificationService::new()
            .verify_document(b"contents", &proof, &address)
            .unwrap();

        assert!(result.is_valid);
        assert_eq!(result.recovered_address.unwrap(), address);
    }

    #[tokio::test]
    async fn test_document_hash_mismatch_trumps_valid_signature() {
        let session = WalletSession::random();
        let address = session.checksum_address();
        let signer = SigningService::new(session);
        // Proof is honestly signed over the original content
        let proof = signer.sign_document("report.txt", b"original").await.unwrap();

        // The document presented for verification was altered: invalid with
        // no recovery attempt, even though the signature itself is good
        let result = VerificationService::new()
            .verify_document(b"altered", &proof, &address)
            .unwrap();

        assert!(!result.is_valid);
        assert!(result.recovered_address.is_none());
    }

    #[tokio::test]
    async fn test_document_wrong_expected_address_is_invalid() {
        let signer = SigningService::new(WalletSession::random());
        let proof = signer.sign_document("report.txt", b"contents").await.unwrap();

        let result = VerificationService::new()
            .verify_document(
                b"contents",
                &proof,
                "0x0000000000000000000000000000000000000001",
            )
            .unwrap();

        assert!(!result.is_valid);
        assert!(result.recovered_address.is_some());
    }
}
