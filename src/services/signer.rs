// src/services/signer.rs
//! Signing service: turns claims and documents into signed artifacts.
//!
//! One fixed convention per artifact kind, mirrored exactly by the verifier:
//! - Identity claims: the canonical claim JSON is hashed with Keccak-256 and
//!   the 32 raw hash bytes are signed as an EIP-191 personal message.
//! - Documents: the raw file bytes are hashed with SHA-256 and the payload
//!   string `"Document hash: <hex>\nTimestamp: <iso>"` is signed as an
//!   EIP-191 personal message.

use crate::error::IdentityError;
use crate::models::artifact::{DocumentSignature, SignedArtifact};
use crate::models::claim::IdentityClaim;
use crate::utils::crypto::{keccak_hash, sha256_hex};
use crate::utils::time::now_iso8601;
use crate::wallet::session::WalletSession;
use log::info;

/// Produces signed artifacts on behalf of one wallet session.
///
/// The service owns nothing but the injected session; every call is a pure
/// function of its inputs plus one wallet round-trip and one clock read.
pub struct SigningService {
    session: WalletSession,
}

impl SigningService {
    /// Binds a signing service to an active wallet session.
    pub fn new(session: WalletSession) -> Self {
        SigningService { session }
    }

    /// Signs an identity claim.
    ///
    /// # Process flow
    /// 1. Serialize the claim to its canonical message
    /// 2. Hash the message bytes with Keccak-256
    /// 3. Sign the 32 hash bytes as an EIP-191 personal message
    /// 4. Stamp the artifact with the session address and the current time
    ///
    /// # Errors
    /// - [`IdentityError::UserRejected`] when the wallet denies the request
    /// - [`IdentityError::Unexpected`] on a signer fault
    pub async fn sign_claim(&self, claim: &IdentityClaim) -> Result<SignedArtifact, IdentityError> {
        let message = claim.canonical_message();
        let hash = keccak_hash(message.as_bytes());
        let signature = self.session.sign_bytes(&hash).await?;

        let artifact = SignedArtifact {
            message,
            message_hash: format!("0x{}", hex::encode(hash)),
            signature: format!("0x{}", signature),
            address: self.session.checksum_address(),
            timestamp: now_iso8601(),
        };
        info!("signed identity claim as {}", artifact.address);
        Ok(artifact)
    }

    /// Signs a document given its file name and raw content bytes.
    ///
    /// The signature covers the hash-plus-timestamp payload rather than the
    /// file itself, so the proof file alone carries everything the verifier
    /// needs to reconstruct the signed string.
    ///
    /// # Errors
    /// Same as [`SigningService::sign_claim`].
    pub async fn sign_document(
        &self,
        file_name: &str,
        content: &[u8],
    ) -> Result<DocumentSignature, IdentityError> {
        let file_hash = sha256_hex(content);
        let timestamp = now_iso8601();
        let payload = DocumentSignature::signed_payload(&file_hash, &timestamp);
        let signature = self.session.sign_text(&payload).await?;

        let proof = DocumentSignature {
            file_name: file_name.to_string(),
            file_hash,
            signature: format!("0x{}", signature),
            address: self.session.checksum_address(),
            timestamp,
        };
        info!("signed document {:?} as {}", proof.file_name, proof.address);
        Ok(proof)
    }
}
