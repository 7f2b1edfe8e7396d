// src/models/claim.rs
//! Self-declared identity claim data model.
//!
//! An [`IdentityClaim`] is a user-asserted statement of identity attributes,
//! not verified by any authority. It carries no validation rules beyond field
//! presence: empty strings are permitted everywhere.

use serde::{Deserialize, Serialize};

/// A self-declared identity claim.
///
/// # Fields
/// - `name`: full name of the claimant
/// - `university`: affiliated institution
/// - `role`: claimed role (e.g. "Student")
/// - `email`: contact address
///
/// # Canonical serialization
/// The claim is hashed and signed as the exact byte sequence produced by
/// [`IdentityClaim::canonical_message`]. Field order in this struct is
/// therefore part of the wire contract: the verifier must reproduce the same
/// bytes to recover a matching address, so the declaration order must never
/// change.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaim {
    /// Full name of the claimant
    pub name: String,

    /// Affiliated institution
    pub university: String,

    /// Claimed role within the institution
    pub role: String,

    /// Contact email address
    pub email: String,
}

impl IdentityClaim {
    /// Builds a claim from its four attribute values.
    pub fn new(name: &str, university: &str, role: &str, email: &str) -> Self {
        IdentityClaim {
            name: name.to_string(),
            university: university.to_string(),
            role: role.to_string(),
            email: email.to_string(),
        }
    }

    /// Serializes the claim to its canonical compact JSON form.
    ///
    /// Key order follows the struct declaration (`name`, `university`,
    /// `role`, `email`) with no whitespace, so identical field values always
    /// produce identical bytes.
    ///
    /// # Returns
    /// The canonical message string to be hashed and signed.
    pub fn canonical_message(&self) -> String {
        serde_json::to_string(self).expect("claim serialization cannot fail")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_message_is_deterministic() {
        let a = IdentityClaim::new("Alice", "X", "Student", "a@x.edu");
        let b = IdentityClaim::new("Alice", "X", "Student", "a@x.edu");
        assert_eq!(a.canonical_message(), b.canonical_message());
    }

    #[test]
    fn test_canonical_message_key_order() {
        let claim = IdentityClaim::new("Alice", "X", "Student", "a@x.edu");
        assert_eq!(
            claim.canonical_message(),
            r#"{"name":"Alice","university":"X","role":"Student","email":"a@x.edu"}"#
        );
    }

    #[test]
    fn test_empty_fields_are_permitted() {
        let claim = IdentityClaim::new("", "", "", "");
        assert_eq!(
            claim.canonical_message(),
            r#"{"name":"","university":"","role":"","email":""}"#
        );
    }

    #[test]
    fn test_canonical_message_round_trips() {
        let claim = IdentityClaim::new("Alice", "X", "Student", "a@x.edu");
        let parsed: IdentityClaim = serde_json::from_str(&claim.canonical_message()).unwrap();
        assert_eq!(parsed, claim);
    }
}
