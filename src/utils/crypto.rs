// src/utils/crypto.rs
//! Cryptographic utilities for the claim signing system.
//!
//! Two fixed, documented hash functions are used and never mixed:
//! - Keccak-256 (Ethereum's standard hash, via `ethers-core`) for identity
//!   claim messages
//! - SHA-256 (via `ring`) for raw document bytes
//!
//! Also provides hex-address parsing: comparing two parsed addresses is the
//! case-insensitive comparison the verifier relies on.

use crate::error::IdentityError;
use ethers_core::types::Address;
use ethers_core::utils::{keccak256, to_checksum};
use ring::digest;
use std::str::FromStr;

/// Computes the Keccak-256 hash of the input data (Ethereum-compatible).
///
/// # Arguments
/// * `data` - Binary data to hash
///
/// # Returns
/// Fixed-size 32-byte array containing the hash.
pub fn keccak_hash(data: &[u8]) -> [u8; 32] {
    keccak256(data)
}

/// Computes the SHA-256 hash of the input and renders it as unprefixed
/// lowercase hex, matching the document proof format.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(digest::digest(&digest::SHA256, data))
}

/// Parses a 20-byte Ethereum address from hex, with or without 0x prefix.
///
/// # Errors
/// Returns [`IdentityError::VerificationFailure`] when the string is not
/// valid 40-character hex.
pub fn parse_address(input: &str) -> Result<Address, IdentityError> {
    Address::from_str(input.trim())
        .map_err(|e| IdentityError::VerificationFailure(format!("bad address {:?}: {}", input, e)))
}

/// Renders an address in EIP-55 checksum casing with 0x prefix.
pub fn format_address(address: Address) -> String {
    to_checksum(&address, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak_known_vector() {
        // keccak256("hello world")
        assert_eq!(
            hex::encode(keccak_hash(b"hello world")),
            "47173285a8d7341e5e972fc677286384f802f8ef42a5ec5f03bbfa254cb01fad"
        );
    }

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            sha256_hex(b"hello world"),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_hash_determinism() {
        let payload = b"the same payload";
        assert_eq!(keccak_hash(payload), keccak_hash(payload));
        assert_eq!(sha256_hex(payload), sha256_hex(payload));
    }

    #[test]
    fn test_parse_address_ignores_case() {
        let checksummed = "0x8ba1f109551bD432803012645Ac136ddd64DBA72";
        let lower = checksummed.to_lowercase();
        let upper = format!("0x{}", checksummed[2..].to_uppercase());
        assert_eq!(
            parse_address(checksummed).unwrap(),
            parse_address(&lower).unwrap()
        );
        assert_eq!(
            parse_address(&lower).unwrap(),
            parse_address(&upper).unwrap()
        );
    }

    #[test]
    fn test_parse_address_distinct_values() {
        assert_ne!(
            parse_address("0x8ba1f109551bD432803012645Ac136ddd64DBA72").unwrap(),
            parse_address("0x0000000000000000000000000000000000000001").unwrap()
        );
    }

    #[test]
    fn test_parse_address_rejects_garbage() {
        assert!(matches!(
            parse_address("not-an-address"),
            Err(IdentityError::VerificationFailure(_))
        ));
        assert!(matches!(
            parse_address("0x1234"),
            Err(IdentityError::VerificationFailure(_))
        ));
    }

    #[test]
    fn test_format_address_checksums() {
        let address = parse_address("0x8ba1f109551bd432803012645ac136ddd64dba72").unwrap();
        assert_eq!(
            format_address(address),
            "0x8ba1f109551bD432803012645Ac136ddd64DBA72"
        );
    }
}
