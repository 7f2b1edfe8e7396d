// src/models/mod.rs
//! Data structures shared across the signing and verification services.

pub mod artifact;
pub mod claim;
