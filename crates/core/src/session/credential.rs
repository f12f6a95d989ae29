//! Bearer credential newtype

use std::fmt;

use partsdesk_domain::{PartsDeskError, Result};
use serde::{Deserialize, Serialize};

/// Opaque bearer token proving an authenticated session.
///
/// `Debug` never prints the token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Credential(String);

impl Credential {
    /// Wrap a token, rejecting blank values.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(PartsDeskError::InvalidInput("credential must not be empty".into()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Raw token, for signing requests.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl TryFrom<String> for Credential {
    type Error = PartsDeskError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Credential> for String {
    fn from(value: Credential) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_tokens() {
        assert!(Credential::new("").is_err());
        assert!(Credential::new("   ").is_err());
    }

    #[test]
    fn debug_is_redacted() {
        let credential = Credential::new("eyJhbGciOi.secret.sig").unwrap();
        assert_eq!(format!("{credential:?}"), "Credential(***)");
        assert_eq!(credential.bearer(), "Bearer eyJhbGciOi.secret.sig");
    }

    #[test]
    fn serde_round_trips_as_plain_string() {
        let credential = Credential::new("abc").unwrap();
        assert_eq!(serde_json::to_string(&credential).unwrap(), "\"abc\"");
        assert!(serde_json::from_str::<Credential>("\"\"").is_err());
    }
}
