// src/wallet/mod.rs
//! Wallet key material and session handling.

pub mod session;
