// src/services/exporter.rs
//! Artifact export and import.
//!
//! Two portable file formats, both bit-exact and deterministic for a given
//! artifact:
//! - Signed identity claims: a pretty-printed JSON object with exactly the
//!   keys `message`, `messageHash`, `signature`, `address`, `timestamp`.
//! - Document proofs: a plain-text block of labeled lines
//!   (`Nom du fichier:`, `Adresse:`, `Signature:`, `Hash (SHA256):`,
//!   `Timestamp:`), parsed on import by splitting on the label and trimming.
//!
//! Import is schema-validated: anything that does not parse into the typed
//! artifact becomes a [`IdentityError::MalformedImport`], never a silently
//! missing field.

use crate::error::IdentityError;
use crate::models::artifact::{DocumentSignature, SignedArtifact};
use log::info;
use std::fs;
use std::path::Path;

/// Suggested file name for a claim export.
pub const CLAIM_EXPORT_FILE_NAME: &str = "identity_claim.json";

const LABEL_FILE_NAME: &str = "Nom du fichier:";
const LABEL_ADDRESS: &str = "Adresse:";
const LABEL_SIGNATURE: &str = "Signature:";
const LABEL_HASH: &str = "Hash (SHA256):";
const LABEL_TIMESTAMP: &str = "Timestamp:";

/// Serializes a signed claim to its portable JSON form.
pub fn export_claim(artifact: &SignedArtifact) -> Result<String, IdentityError> {
    serde_json::to_string_pretty(artifact)
        .map_err(|e| IdentityError::Unexpected(format!("claim serialization failed: {}", e)))
}

/// Parses and validates a claim export.
///
/// # Errors
/// [`IdentityError::MalformedImport`] when the JSON does not match the
/// schema or a hex field lacks its 0x prefix.
pub fn import_claim(json: &str) -> Result<SignedArtifact, IdentityError> {
    let artifact: SignedArtifact = serde_json::from_str(json)
        .map_err(|e| IdentityError::MalformedImport(format!("claim JSON: {}", e)))?;

    for (field, value) in [
        ("messageHash", &artifact.message_hash),
        ("signature", &artifact.signature),
        ("address", &artifact.address),
    ] {
        if !value.starts_with("0x") {
            return Err(IdentityError::MalformedImport(format!(
                "claim field {} is not 0x-prefixed hex",
                field
            )));
        }
    }
    Ok(artifact)
}

/// Writes a claim export to a file.
pub fn export_claim_file(artifact: &SignedArtifact, path: &Path) -> Result<(), IdentityError> {
    fs::write(path, export_claim(artifact)?)?;
    info!("exported signed claim to {}", path.display());
    Ok(())
}

/// Reads and parses a claim export from a file.
pub fn import_claim_file(path: &Path) -> Result<SignedArtifact, IdentityError> {
    import_claim(&fs::read_to_string(path)?)
}

/// Serializes a document proof to its labeled plain-text block.
pub fn export_document_proof(proof: &DocumentSignature) -> String {
    format!(
        "{} {}\n{} {}\n{} {}\n{} {}\n{} {}\n",
        LABEL_FILE_NAME,
        proof.file_name,
        LABEL_ADDRESS,
        proof.address,
        LABEL_SIGNATURE,
        proof.signature,
        LABEL_HASH,
        proof.file_hash,
        LABEL_TIMESTAMP,
        proof.timestamp,
    )
}

/// Parses a document proof from its labeled plain-text block.
///
/// Lines may appear in any order; each value is whatever follows its label,
/// trimmed. Extra lines are ignored.
///
/// # Errors
/// [`IdentityError::MalformedImport`] when any of the five labels is missing
/// or carries an empty value.
pub fn import_document_proof(text: &str) -> Result<DocumentSignature, IdentityError> {
    let mut file_name = None;
    let mut address = None;
    let mut signature = None;
    let mut file_hash = None;
    let mut timestamp = None;

    for line in text.lines() {
        for (label, slot) in [
            (LABEL_FILE_NAME, &mut file_name),
            (LABEL_ADDRESS, &mut address),
            (LABEL_SIGNATURE, &mut signature),
            (LABEL_HASH, &mut file_hash),
            (LABEL_TIMESTAMP, &mut timestamp),
        ] {
            if let Some(idx) = line.find(label) {
                let value = line[idx + label.len()..].trim();
                if !value.is_empty() {
                    *slot = Some(value.to_string());
                }
            }
        }
    }

    let require = |slot: Option<String>, label: &str| {
        slot.ok_or_else(|| {
            IdentityError::MalformedImport(format!("document proof is missing {:?}", label))
        })
    };

    Ok(DocumentSignature {
        file_name: require(file_name, LABEL_FILE_NAME)?,
        address: require(address, LABEL_ADDRESS)?,
        signature: require(signature, LABEL_SIGNATURE)?,
        file_hash: require(file_hash, LABEL_HASH)?,
        timestamp: require(timestamp, LABEL_TIMESTAMP)?,
    })
}

/// Writes a document proof to a file.
pub fn export_document_proof_file(
    proof: &DocumentSignature,
    path: &Path,
) -> Result<(), IdentityError> {
    fs::write(path, export_document_proof(proof))?;
    info!("exported document proof to {}", path.display());
    Ok(())
}

/// Reads and parses a document proof from a file.
pub fn import_document_proof_file(path: &Path) -> Result<DocumentSignature, IdentityError> {
    import_document_proof(&fs::read_to_string(path)?)
}

/// Suggested proof file name for a signed document: the original name with
/// its final extension replaced by `_signed.txt`.
pub fn proof_file_name(file_name: &str) -> String {
    let stem = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !ext.is_empty() && !ext.contains('/') => stem,
        _ => file_name,
    };
    format!("{}_signed.txt", stem)
}
