// src/wallet/session.rs
//! Wallet session management.
//!
//! A [`WalletSession`] is an explicit, injectable handle on a signing key:
//! its address plus the capability to sign EIP-191 personal messages. The
//! signing services receive a session as an argument; no signing capability
//! is ever reachable through global state.
//!
//! Key material comes from one of:
//! - fresh random generation (secp256k1 via `k256`)
//! - a hex-encoded private key
//! - a BIP-39 mnemonic phrase
//! - the `PRIVATE_KEY` / `MNEMONIC` environment variables
//!
//! The interactive approve/deny prompt of a browser wallet is modeled by a
//! [`SigningApproval`] policy, so the rejection path stays reachable in a
//! headless environment.

use crate::error::IdentityError;
use ethers::signers::coins_bip39::{English, Mnemonic};
use ethers::signers::{LocalWallet, MnemonicBuilder, Signer};
use ethers_core::types::{Address, Signature};
use k256::ecdsa::SigningKey;

/// Whether the session honors signing requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningApproval {
    /// Every signing request is approved
    Automatic,
    /// Every signing request is denied, as a user declining the wallet prompt
    Denied,
}

/// An active wallet session: one address and the capability to sign with it.
///
/// The private key stays inside the wrapped wallet and is never exposed by
/// the signing path; [`WalletSession::private_key_hex`] exists only for the
/// wallet-creation flow that reveals a freshly generated key to its owner.
#[derive(Clone)]
pub struct WalletSession {
    wallet: LocalWallet,
    address: Address,
    approval: SigningApproval,
}

#[allow(dead_code)]
impl WalletSession {
    fn from_wallet(wallet: LocalWallet) -> Self {
        let address = wallet.address();
        WalletSession {
            wallet,
            address,
            approval: SigningApproval::Automatic,
        }
    }

    /// Generates a session around a fresh random secp256k1 key.
    pub fn random() -> Self {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        Self::from_wallet(LocalWallet::from(signing_key))
    }

    /// Generates a session from a fresh 12-word BIP-39 mnemonic and returns
    /// the phrase alongside it, so the wallet-creation flow can reveal the
    /// recovery phrase to its owner.
    ///
    /// # Errors
    /// Returns [`IdentityError::WalletUnavailable`] when mnemonic generation
    /// or derivation fails.
    pub fn generate() -> Result<(Self, String), IdentityError> {
        let mnemonic = Mnemonic::<English>::new_with_count(&mut rand::thread_rng(), 12)
            .map_err(|e| {
                IdentityError::WalletUnavailable(format!("mnemonic generation failed: {}", e))
            })?;
        let phrase = mnemonic.to_phrase();
        let session = Self::from_mnemonic(&phrase)?;
        Ok((session, phrase))
    }

    /// Opens a session from a hex-encoded private key, with or without
    /// 0x prefix.
    ///
    /// # Errors
    /// Returns [`IdentityError::WalletUnavailable`] when the key does not
    /// decode to a valid secp256k1 scalar.
    pub fn from_private_key(key: &str) -> Result<Self, IdentityError> {
        let key = key.trim();
        let key = key.strip_prefix("0x").unwrap_or(key);
        let wallet: LocalWallet = key
            .parse()
            .map_err(|e| IdentityError::WalletUnavailable(format!("invalid private key: {}", e)))?;
        Ok(Self::from_wallet(wallet))
    }

    /// Recreates a session from a BIP-39 mnemonic phrase (default
    /// derivation path).
    ///
    /// # Errors
    /// Returns [`IdentityError::WalletUnavailable`] when the phrase is not a
    /// valid mnemonic.
    pub fn from_mnemonic(phrase: &str) -> Result<Self, IdentityError> {
        let wallet = MnemonicBuilder::<English>::default()
            .phrase(phrase.trim())
            .build()
            .map_err(|e| IdentityError::WalletUnavailable(format!("invalid mnemonic: {}", e)))?;
        Ok(Self::from_wallet(wallet))
    }

    /// Opens a session from the environment: `MNEMONIC` if set, otherwise
    /// `PRIVATE_KEY`.
    ///
    /// # Errors
    /// Returns [`IdentityError::WalletUnavailable`] when neither variable is
    /// set or the material is invalid.
    pub fn connect_from_env() -> Result<Self, IdentityError> {
        if let Ok(phrase) = std::env::var("MNEMONIC") {
            return Self::from_mnemonic(&phrase);
        }
        if let Ok(key) = std::env::var("PRIVATE_KEY") {
            return Self::from_private_key(&key);
        }
        Err(IdentityError::WalletUnavailable(
            "set PRIVATE_KEY or MNEMONIC in the environment".to_string(),
        ))
    }

    /// Replaces the session's approval policy.
    pub fn with_approval(mut self, approval: SigningApproval) -> Self {
        self.approval = approval;
        self
    }

    /// The session's 20-byte address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// The session's address in EIP-55 checksum form.
    pub fn checksum_address(&self) -> String {
        crate::utils::crypto::format_address(self.address)
    }

    /// The session's private key as unprefixed hex.
    pub fn private_key_hex(&self) -> String {
        hex::encode(self.wallet.signer().to_bytes())
    }

    /// Signs a byte payload as an EIP-191 personal message
    /// (`"\x19Ethereum Signed Message:\n" + len + payload`).
    ///
    /// # Errors
    /// - [`IdentityError::UserRejected`] when the approval policy denies
    /// - [`IdentityError::Unexpected`] on a signer fault
    pub async fn sign_bytes(&self, payload: &[u8]) -> Result<Signature, IdentityError> {
        if self.approval == SigningApproval::Denied {
            return Err(IdentityError::UserRejected);
        }
        self.wallet
            .sign_message(payload)
            .await
            .map_err(|e| IdentityError::Unexpected(format!("wallet signing failed: {}", e)))
    }

    /// Signs a UTF-8 string as an EIP-191 personal message.
    pub async fn sign_text(&self, text: &str) -> Result<Signature, IdentityError> {
        self.sign_bytes(text.as_bytes()).await
    }
}
