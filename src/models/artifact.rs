// src/models/artifact.rs
//! Signed artifact data models.
//!
//! Defines the value objects exchanged between the signer, the exporter and
//! the verifier:
//! - [`SignedArtifact`]: a signed identity claim (JSON export)
//! - [`DocumentSignature`]: a signed document proof (plain-text export)
//! - [`VerificationRequest`] / [`VerificationResult`]: one verification attempt
//!
//! All of these are immutable value objects: a `SignedArtifact` is produced
//! from exactly one claim, exported once, and consumed by exactly one
//! verification request.

use serde::{Deserialize, Serialize};

/// A signed identity claim, as exported to `identity_claim.json`.
///
/// # Invariant
/// `signature` is a 65-byte ECDSA signature by the key controlling `address`
/// over the 32 Keccak-256 hash bytes of `message`, wrapped as an EIP-191
/// personal message. The JSON field names below are the wire contract.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SignedArtifact {
    /// The canonical claim JSON that was signed
    pub message: String,

    /// Keccak-256 hash of `message`, 0x-prefixed hex
    #[serde(rename = "messageHash")]
    pub message_hash: String,

    /// 65-byte ECDSA signature, 0x-prefixed hex
    pub signature: String,

    /// Signer address, 0x-prefixed hex (EIP-55 checksum casing)
    pub address: String,

    /// Signing time, ISO-8601 with millisecond precision
    pub timestamp: String,
}

/// A signed document proof, as exported to the `*_signed.txt` text block.
///
/// The signed payload is not the file itself but the string produced by
/// [`DocumentSignature::signed_payload`] over the file hash and timestamp,
/// so the proof stays valid for any file with the same content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSignature {
    /// Name of the signed file
    pub file_name: String,

    /// SHA-256 hash of the raw file bytes, unprefixed lowercase hex
    pub file_hash: String,

    /// 65-byte ECDSA signature over the signed payload, 0x-prefixed hex
    pub signature: String,

    /// Signer address, 0x-prefixed hex
    pub address: String,

    /// Signing time, ISO-8601 with millisecond precision
    pub timestamp: String,
}

impl DocumentSignature {
    /// Reconstructs the exact string that was signed for a document proof.
    ///
    /// Both signer and verifier derive the payload through this function;
    /// any drift between the two would make every proof unverifiable.
    pub fn signed_payload(file_hash: &str, timestamp: &str) -> String {
        format!("Document hash: {}\nTimestamp: {}", file_hash, timestamp)
    }
}

/// One verification attempt over an identity claim.
///
/// Transient and user-assembled (re-imported from a file or typed manually);
/// never persisted.
#[derive(Debug, Clone)]
pub struct VerificationRequest {
    /// The claim message exactly as signed
    pub message: String,

    /// The signature to check, 0x-prefixed hex
    pub signature: String,

    /// The address the signature is expected to recover to, any casing
    pub expected_address: String,
}

impl VerificationRequest {
    /// Assembles a request from an imported [`SignedArtifact`].
    ///
    /// The artifact's own `address` field is used as the expected address,
    /// matching the import-then-verify flow; callers may override it for
    /// manual verification.
    pub fn from_artifact(artifact: &SignedArtifact) -> Self {
        VerificationRequest {
            message: artifact.message.clone(),
            signature: artifact.signature.clone(),
            expected_address: artifact.address.clone(),
        }
    }
}

/// Outcome of one verification attempt. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    /// The address recovered from the signature, EIP-55 checksum casing.
    /// `None` when recovery was never attempted (document hash mismatch).
    pub recovered_address: Option<String>,

    /// Whether the artifact is authentic: recovery succeeded AND the
    /// recovered address matches the expected one AND (for documents) the
    /// recomputed file hash matched the imported proof.
    pub is_valid: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_artifact_json_field_names() {
        let artifact = SignedArtifact {
            message: "{}".to_string(),
            message_hash: "0xabc".to_string(),
            signature: "0xdef".to_string(),
            address: "0x123".to_string(),
            timestamp: "2026-01-01T00:00:00.000Z".to_string(),
        };
        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&artifact).unwrap()).unwrap();

        // Wire contract: these exact five keys, camelCase hash key included
        assert!(value.get("message").is_some());
        assert!(value.get("messageHash").is_some());
        assert!(value.get("signature").is_some());
        assert!(value.get("address").is_some());
        assert!(value.get("timestamp").is_some());
        assert!(value.get("message_hash").is_none());
    }

    #[test]
    fn test_signed_payload_layout() {
        let payload = DocumentSignature::signed_payload("cafe", "2026-01-01T00:00:00.000Z");
        assert_eq!(
            payload,
            "Document hash: cafe\nTimestamp: 2026-01-01T00:00:00.000Z"
        );
    }

    #[test]
    fn test_request_from_artifact_uses_embedded_address() {
        let artifact = SignedArtifact {
            message: "m".to_string(),
            message_hash: "0x1".to_string(),
            signature: "0x2".to_string(),
            address: "0x3".to_string(),
            timestamp: "t".to_string(),
        };
        let request = VerificationRequest::from_artifact(&artifact);
        assert_eq!(request.message, "m");
        assert_eq!(request.signature, "0x2");
        assert_eq!(request.expected_address, "0x3");
    }
}
