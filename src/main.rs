// src/main.rs

//! # Identity Claim Signer - Main Entry Point
//!
//! Command-line demo for the claim signing system. It wires the wallet
//! session, signing service, exporter and verifier into five workflows:
//!
//! 1. `create` - generate a fresh wallet, reveal its address, key and phrase
//! 2. `sign` - sign an identity claim and export `identity_claim.json`
//! 3. `verify <claim.json> [expected-address]` - re-verify a claim export
//! 4. `verify-manual <message> <signature> <address>` - verify a typed-in triple
//! 5. `sign-document <file> [output]` - sign a document, export the proof
//! 6. `verify-document <file> <proof.txt> [expected-address]` - re-verify
//!
//! ## Environment Variables
//! - `PRIVATE_KEY` or `MNEMONIC`: wallet key material for the signing flows
//! - `CLAIM_NAME`, `CLAIM_UNIVERSITY`, `CLAIM_ROLE`, `CLAIM_EMAIL`: claim
//!   fields for `sign` (all optional, empty strings permitted)
//!
//! Every failure is reported as a notification for the one triggered
//! command; nothing here retries or crashes the session.

use crate::models::artifact::VerificationRequest;
use crate::models::claim::IdentityClaim;
use crate::services::exporter;
use crate::services::signer::SigningService;
use crate::services::verifier::VerificationService;
use crate::wallet::session::WalletSession;
use anyhow::{bail, Context, Result};
use dotenv::dotenv;
use std::path::{Path, PathBuf};

// Module declarations (organized by functional domain)
mod error; // Error taxonomy
mod models; // Data structures
mod services; // Business logic
mod utils; // Helper functions
mod wallet; // Wallet key material and sessions

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(err) = run(&args).await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

async fn run(args: &[String]) -> Result<()> {
    let command = args.first().map(String::as_str).unwrap_or("help");
    match command {
        "create" => create_wallet(),
        "sign" => sign_claim(args.get(1)).await,
        "verify" => verify_claim(
            args.get(1)
                .context("usage: verify <claim.json> [expected-address]")?,
            args.get(2),
        ),
        "verify-manual" => verify_manual(
            args.get(1)
                .context("usage: verify-manual <message> <signature> <address>")?,
            args.get(2)
                .context("usage: verify-manual <message> <signature> <address>")?,
            args.get(3)
                .context("usage: verify-manual <message> <signature> <address>")?,
        ),
        "sign-document" => {
            sign_document(
                args.get(1).context("usage: sign-document <file> [output]")?,
                args.get(2),
            )
            .await
        }
        "verify-document" => verify_document(
            args.get(1)
                .context("usage: verify-document <file> <proof.txt> [expected-address]")?,
            args.get(2)
                .context("usage: verify-document <file> <proof.txt> [expected-address]")?,
            args.get(3),
        ),
        "help" => {
            print_usage();
            Ok(())
        }
        other => bail!("unknown command {:?} (try `help`)", other),
    }
}

fn print_usage() {
    println!("claim-signer: sign and verify self-declared identity claims");
    println!();
    println!("Commands:");
    println!("  create                                          generate a fresh wallet");
    println!("  sign [output.json]                              sign a claim from CLAIM_* env vars");
    println!("  verify <claim.json> [expected-address]          re-verify a claim export");
    println!("  verify-manual <message> <signature> <address>   verify a typed-in triple");
    println!("  sign-document <file> [output.txt]               sign a document");
    println!("  verify-document <file> <proof.txt> [address]    re-verify a document");
}

/// Generates a fresh wallet and reveals its credentials to the owner.
fn create_wallet() -> Result<()> {
    let (session, phrase) = WalletSession::generate()?;
    println!("Address:     {}", session.checksum_address());
    println!("Private key: 0x{}", session.private_key_hex());
    println!("Mnemonic:    {}", phrase);
    println!();
    println!("Export PRIVATE_KEY or MNEMONIC to sign with this wallet.");
    Ok(())
}

fn claim_from_env() -> IdentityClaim {
    let field = |name: &str| std::env::var(name).unwrap_or_default();
    IdentityClaim::new(
        &field("CLAIM_NAME"),
        &field("CLAIM_UNIVERSITY"),
        &field("CLAIM_ROLE"),
        &field("CLAIM_EMAIL"),
    )
}

/// Signs the claim described by the `CLAIM_*` environment variables and
/// exports it as JSON.
async fn sign_claim(output: Option<&String>) -> Result<()> {
    let session = WalletSession::connect_from_env()?;
    let signer = SigningService::new(session);

    let claim = claim_from_env();
    let artifact = signer.sign_claim(&claim).await?;

    let path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(exporter::CLAIM_EXPORT_FILE_NAME));
    exporter::export_claim_file(&artifact, &path)?;

    println!("Message:   {}", artifact.message);
    println!("Hash:      {}", artifact.message_hash);
    println!("Signature: {}", artifact.signature);
    println!("Address:   {}", artifact.address);
    println!("Timestamp: {}", artifact.timestamp);
    println!("Exported to {}", path.display());
    Ok(())
}

/// Re-verifies an exported claim. The expected address defaults to the one
/// embedded in the export; pass one explicitly to check someone else's file.
fn verify_claim(path: &str, expected: Option<&String>) -> Result<()> {
    let artifact = exporter::import_claim_file(Path::new(path))?;

    let mut request = VerificationRequest::from_artifact(&artifact);
    if let Some(address) = expected {
        request.expected_address = address.clone();
    }
    let result = VerificationService::new().verify_claim(&request)?;

    report_result(
        &result.recovered_address,
        &request.expected_address,
        result.is_valid,
    );
    Ok(())
}

/// Verifies a manually entered message/signature/address triple, without
/// re-importing an export file.
fn verify_manual(message: &str, signature: &str, expected: &str) -> Result<()> {
    let request = VerificationRequest {
        message: message.to_string(),
        signature: signature.to_string(),
        expected_address: expected.to_string(),
    };
    let result = VerificationService::new().verify_claim(&request)?;

    report_result(&result.recovered_address, expected, result.is_valid);
    Ok(())
}

/// Signs a document file and exports the proof block next to it.
async fn sign_document(file: &str, output: Option<&String>) -> Result<()> {
    let session = WalletSession::connect_from_env()?;
    let signer = SigningService::new(session);

    let path = Path::new(file);
    let content =
        std::fs::read(path).with_context(|| format!("cannot read document {:?}", file))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_string());

    let proof = signer.sign_document(&file_name, &content).await?;

    let proof_path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(exporter::proof_file_name(&file_name)));
    exporter::export_document_proof_file(&proof, &proof_path)?;

    println!("File:      {}", proof.file_name);
    println!("SHA-256:   {}", proof.file_hash);
    println!("Signature: {}", proof.signature);
    println!("Address:   {}", proof.address);
    println!("Exported to {}", proof_path.display());
    Ok(())
}

/// Re-verifies a document against an exported proof. The expected address
/// defaults to the one embedded in the proof.
fn verify_document(file: &str, proof_path: &str, expected: Option<&String>) -> Result<()> {
    let content = std::fs::read(file).with_context(|| format!("cannot read document {:?}", file))?;
    let proof = exporter::import_document_proof_file(Path::new(proof_path))?;

    let expected_address = expected.cloned().unwrap_or_else(|| proof.address.clone());
    let result = VerificationService::new().verify_document(&content, &proof, &expected_address)?;

    if result.recovered_address.is_none() {
        println!("Document content does not match the signed hash.");
    }
    report_result(&result.recovered_address, &expected_address, result.is_valid);
    Ok(())
}

fn report_result(recovered: &Option<String>, expected: &str, is_valid: bool) {
    println!(
        "Recovered address: {}",
        recovered.as_deref().unwrap_or("N/A")
    );
    println!("Expected address:  {}", expected);
    if is_valid {
        println!("Signature valid: this artifact was signed by the expected address.");
    } else {
        println!("Signature INVALID: the artifact was not signed by the expected address.");
    }
}
