// src/utils/mod.rs
//! Helper functions: hashing, address handling, timestamps.

pub mod crypto;
pub mod time;
