// src/services/mod.rs
//! Business logic: signing, verification, export/import.

pub mod exporter;
pub mod signer;
pub mod verifier;
