//! Unverified JWT payload decoding
//!
//! The client never validates signatures (the backend does); it only reads
//! claims for display, e.g. the `profileId` of the signed-in user.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde_json::{Map, Value};
use tracing::debug;

/// Claims carried in the session token
#[derive(Debug, Clone, PartialEq)]
pub struct TokenClaims {
    claims: Map<String, Value>,
}

impl TokenClaims {
    /// Decode the payload segment of `token`.
    ///
    /// Returns `None` for anything that is not a three-part JWT with a JSON
    /// object payload.
    pub fn decode(token: &str) -> Option<Self> {
        let mut segments = token.split('.');
        let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
            (Some(_), Some(payload), Some(_), None) => payload,
            _ => {
                debug!("token is not a three-part JWT");
                return None;
            }
        };

        let bytes = match URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')) {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!(error = %err, "token payload is not base64url");
                return None;
            }
        };

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(claims)) => Some(Self { claims }),
            Ok(_) => None,
            Err(err) => {
                debug!(error = %err, "token payload is not JSON");
                None
            }
        }
    }

    /// `profileId` claim; accepts numbers and numeric strings.
    pub fn profile_id(&self) -> Option<i64> {
        match self.claims.get("profileId")? {
            Value::Number(number) => number.as_i64(),
            Value::String(text) => text.parse().ok(),
            _ => None,
        }
    }

    /// `sub` claim.
    pub fn subject(&self) -> Option<&str> {
        self.claims.get("sub").and_then(Value::as_str)
    }

    /// `email` claim.
    pub fn email(&self) -> Option<&str> {
        self.claims.get("email").and_then(Value::as_str)
    }

    /// `exp` claim as seconds since the epoch.
    pub fn expires_at(&self) -> Option<i64> {
        self.claims.get("exp").and_then(Value::as_i64)
    }

    /// Any other claim.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.claims
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn token_with(payload: &Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(serde_json::to_vec(payload).unwrap());
        format!("{header}.{body}.signature")
    }

    #[test]
    fn reads_profile_id_and_standard_claims() {
        let token = token_with(&json!({
            "sub": "12", "email": "ana@example.com", "profileId": 7, "exp": 1_900_000_000
        }));
        let claims = TokenClaims::decode(&token).unwrap();

        assert_eq!(claims.profile_id(), Some(7));
        assert_eq!(claims.subject(), Some("12"));
        assert_eq!(claims.email(), Some("ana@example.com"));
        assert_eq!(claims.expires_at(), Some(1_900_000_000));
    }

    #[test]
    fn profile_id_may_be_a_string() {
        let token = token_with(&json!({ "profileId": "31" }));
        assert_eq!(TokenClaims::decode(&token).unwrap().profile_id(), Some(31));
    }

    #[test]
    fn non_ascii_claims_survive_decoding() {
        let token = token_with(&json!({ "name": "José Núñez" }));
        let claims = TokenClaims::decode(&token).unwrap();
        assert_eq!(claims.get("name"), Some(&json!("José Núñez")));
    }

    #[test]
    fn malformed_tokens_decode_to_none() {
        assert!(TokenClaims::decode("opaque-token").is_none());
        assert!(TokenClaims::decode("a.!!!.c").is_none());
        assert!(TokenClaims::decode("a.b.c.d").is_none());
        let not_object = format!("h.{}.s", URL_SAFE_NO_PAD.encode(b"[1,2]"));
        assert!(TokenClaims::decode(&not_object).is_none());
    }
}
