//! Token service
//!
//! HS256 tokens over whatever claims the client posts to `/jwt`. Only `email`
//! is read back; every other claim is carried through untouched.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Decoded token payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
    /// Caller-supplied claims other than the three above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Token errors
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid claims: {0}")]
    InvalidClaims(String),

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

/// Identity attached to a request once its token verifies
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub email: Option<String>,
    pub claims: Map<String, Value>,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            email: claims.email,
            claims: claims.extra,
        }
    }
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry: Duration,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("expiry", &self.expiry)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    pub fn new(secret: &str, expiry: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry,
        }
    }

    /// Sign `payload` as-is, adding `iat` and `exp`.
    ///
    /// Client-supplied `iat`/`exp` are replaced; `email`, if present, must be
    /// a string.
    pub fn issue(&self, mut payload: Map<String, Value>) -> Result<String, JwtError> {
        let email = match payload.remove("email") {
            None | Some(Value::Null) => None,
            Some(Value::String(email)) => Some(email),
            Some(_) => return Err(JwtError::InvalidClaims("email must be a string".into())),
        };
        payload.remove("iat");
        payload.remove("exp");

        let now = Utc::now();
        let exp = now
            .checked_add_signed(self.expiry)
            .ok_or_else(|| JwtError::GenerationFailed("expiry out of range".into()))?;
        let claims = Claims {
            email,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            extra: payload,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Check signature and expiry, then decode
    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                    ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                    _ => JwtError::InvalidToken(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Token part of an `Authorization: Bearer <token>` header
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service() -> JwtService {
        JwtService::new("test-secret-for-unit-tests", Duration::days(6))
    }

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_issue_and_validate() {
        let svc = service();
        let token = svc
            .issue(payload(json!({"email": "a@x.com", "name": "Ann"})))
            .unwrap();
        let claims = svc.validate(&token).unwrap();
        assert_eq!(claims.email.as_deref(), Some("a@x.com"));
        assert_eq!(claims.extra.get("name").unwrap(), "Ann");
        assert_eq!(claims.exp - claims.iat, 6 * 24 * 3600);
    }

    #[test]
    fn test_client_cannot_choose_expiry() {
        let svc = service();
        let token = svc
            .issue(payload(json!({"email": "a@x.com", "exp": 1, "iat": 1})))
            .unwrap();
        let claims = svc.validate(&token).unwrap();
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_payload_without_email() {
        let svc = service();
        let token = svc.issue(payload(json!({"uid": 7}))).unwrap();
        let claims = svc.validate(&token).unwrap();
        assert!(claims.email.is_none());
    }

    #[test]
    fn test_non_string_email_rejected() {
        let err = service().issue(payload(json!({"email": 42}))).unwrap_err();
        assert!(matches!(err, JwtError::InvalidClaims(_)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = service().issue(payload(json!({"email": "a@x.com"}))).unwrap();
        let other = JwtService::new("another-secret", Duration::days(6));
        assert!(matches!(
            other.validate(&token),
            Err(JwtError::InvalidSignature)
        ));
    }

    #[test]
    fn test_expired_token() {
        let svc = JwtService::new("test-secret-for-unit-tests", Duration::days(-1));
        let token = svc.issue(payload(json!({"email": "a@x.com"}))).unwrap();
        assert!(matches!(svc.validate(&token), Err(JwtError::ExpiredToken)));
    }

    #[test]
    fn test_unrepresentable_expiry_fails_instead_of_panicking() {
        let svc = JwtService::new("test-secret-for-unit-tests", Duration::MAX);
        let err = svc.issue(payload(json!({"email": "a@x.com"}))).unwrap_err();
        assert!(matches!(err, JwtError::GenerationFailed(_)));
    }

    #[test]
    fn test_garbage_token() {
        assert!(matches!(
            service().validate("not.a.token"),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_extract_from_header() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Bearer "), None);
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
        assert_eq!(JwtService::extract_from_header("abc"), None);
    }
}
