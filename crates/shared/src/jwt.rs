//! JWT verification using RS256 algorithm.
//!
//! Identity tokens are issued by the external auth provider; this module
//! only verifies RS256 (RSA-SHA256) signatures and extracts the
//! authenticated subject. No signing keys are held by the backend.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error type for JWT verification.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to decode token: {0}")]
    DecodingError(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Claims carried by an identity token.
///
/// The auth provider sets `sub` to the user's UUID. `jti` is optional on
/// the wire; providers that omit it leave an empty string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// JWT ID (unique token identifier)
    #[serde(default)]
    pub jti: String,
}

/// Default leeway in seconds for clock skew tolerance
pub const DEFAULT_LEEWAY_SECS: u64 = 30;

/// Verifies identity tokens against the auth provider's public key.
#[derive(Clone)]
pub struct JwtVerifier {
    /// RSA public key for validating token signatures
    decoding_key: DecodingKey,
    /// Leeway in seconds for clock skew tolerance (default: 30)
    pub leeway_secs: u64,
}

impl std::fmt::Debug for JwtVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtVerifier")
            .field("leeway_secs", &self.leeway_secs)
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

impl JwtVerifier {
    /// Creates a verifier from an RSA public key in PEM format.
    pub fn new(public_key_pem: &str) -> Result<Self, JwtError> {
        Self::with_leeway(public_key_pem, DEFAULT_LEEWAY_SECS)
    }

    /// Creates a verifier from an RSA public key in PEM format with custom leeway.
    pub fn with_leeway(public_key_pem: &str, leeway_secs: u64) -> Result<Self, JwtError> {
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
            .map_err(|e| JwtError::InvalidKey(format!("Invalid public key: {}", e)))?;

        Ok(Self {
            decoding_key,
            leeway_secs,
        })
    }

    /// Creates a verifier for testing with an HS256 symmetric key.
    /// DO NOT use in production - only for tests.
    #[cfg(test)]
    pub fn new_for_testing(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            leeway_secs: 0, // Strict for testing - no leeway
        }
    }

    /// Validates a token and returns its claims.
    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm());
        validation.validate_exp = true;
        // Allow for minor clock differences between the auth provider and us
        validation.leeway = self.leeway_secs;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidToken,
                _ => JwtError::DecodingError(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Returns the algorithm used by this verifier.
    /// Tests use HS256, production uses RS256.
    fn algorithm(&self) -> Algorithm {
        #[cfg(test)]
        {
            Algorithm::HS256
        }
        #[cfg(not(test))]
        {
            Algorithm::RS256
        }
    }
}

/// Extracts the user ID from validated claims.
pub fn extract_user_id(claims: &Claims) -> Result<Uuid, JwtError> {
    Uuid::parse_str(&claims.sub).map_err(|_| JwtError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const TEST_SECRET: &str = "test_secret_key_for_jwt_testing_12345";

    fn issue_token(claims: &Claims) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap()
    }

    fn claims_for(user_id: Uuid, expiry_secs: i64) -> Claims {
        let now = Utc::now().timestamp();
        Claims {
            sub: user_id.to_string(),
            exp: now + expiry_secs,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        }
    }

    #[test]
    fn test_validate_token() {
        let verifier = JwtVerifier::new_for_testing(TEST_SECRET);
        let user_id = Uuid::new_v4();
        let claims = claims_for(user_id, 900);

        let token = issue_token(&claims);
        let validated = verifier.validate(&token).unwrap();

        assert_eq!(validated.sub, user_id.to_string());
        assert_eq!(validated.jti, claims.jti);
    }

    #[test]
    fn test_expired_token() {
        let verifier = JwtVerifier::new_for_testing(TEST_SECRET);
        let claims = claims_for(Uuid::new_v4(), -120);

        let token = issue_token(&claims);
        let result = verifier.validate(&token);

        assert!(
            matches!(result, Err(JwtError::TokenExpired)),
            "Expected TokenExpired, got: {:?}",
            result
        );
    }

    #[test]
    fn test_tampered_token_rejected() {
        let verifier = JwtVerifier::new_for_testing(TEST_SECRET);
        let claims = claims_for(Uuid::new_v4(), 900);

        let mut token = issue_token(&claims);
        // Corrupt the signature segment
        token.push('x');

        let result = verifier.validate(&token);
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let verifier = JwtVerifier::new_for_testing(TEST_SECRET);
        let claims = claims_for(Uuid::new_v4(), 900);

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"some_other_secret_entirely_0000"),
        )
        .unwrap();

        let result = verifier.validate(&token);
        assert!(matches!(
            result,
            Err(JwtError::InvalidToken) | Err(JwtError::DecodingError(_))
        ));
    }

    #[test]
    fn test_invalid_token() {
        let verifier = JwtVerifier::new_for_testing(TEST_SECRET);
        let result = verifier.validate("invalid.token.here");

        assert!(matches!(
            result,
            Err(JwtError::InvalidToken) | Err(JwtError::DecodingError(_))
        ));
    }

    #[test]
    fn test_malformed_token() {
        let verifier = JwtVerifier::new_for_testing(TEST_SECRET);
        let result = verifier.validate("not_a_jwt");

        assert!(result.is_err());
    }

    #[test]
    fn test_extract_user_id() {
        let user_id = Uuid::new_v4();
        let claims = claims_for(user_id, 900);

        let extracted = extract_user_id(&claims).unwrap();
        assert_eq!(extracted, user_id);
    }

    #[test]
    fn test_extract_user_id_non_uuid_subject() {
        let mut claims = claims_for(Uuid::new_v4(), 900);
        claims.sub = "not-a-uuid".to_string();

        let result = extract_user_id(&claims);
        assert!(matches!(result, Err(JwtError::InvalidToken)));
    }

    #[test]
    fn test_missing_jti_defaults_empty() {
        let verifier = JwtVerifier::new_for_testing(TEST_SECRET);
        let now = Utc::now().timestamp();

        // Provider tokens without jti must still verify
        #[derive(Serialize)]
        struct BareClaims {
            sub: String,
            exp: i64,
            iat: i64,
        }
        let bare = BareClaims {
            sub: Uuid::new_v4().to_string(),
            exp: now + 900,
            iat: now,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &bare,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        let claims = verifier.validate(&token).unwrap();
        assert_eq!(claims.jti, "");
    }

    #[test]
    fn test_invalid_public_key_pem() {
        let result = JwtVerifier::new("not a pem");
        assert!(matches!(result, Err(JwtError::InvalidKey(_))));
    }

    #[test]
    fn test_jwt_error_display() {
        assert!(format!("{}", JwtError::TokenExpired).contains("expired"));
        assert!(format!("{}", JwtError::InvalidToken).contains("Invalid"));
        assert!(format!("{}", JwtError::DecodingError("test".to_string())).contains("decode"));
    }

    #[test]
    fn test_verifier_debug_redacts_key() {
        let verifier = JwtVerifier::new_for_testing(TEST_SECRET);
        let debug = format!("{:?}", verifier);

        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains(TEST_SECRET));
    }
}
