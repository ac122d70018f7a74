/// JWT bearer token issuance and validation
///
/// Access tokens carry the user id as the subject claim and expire after a
/// configurable TTL (default 24 hours). The signing algorithm is configurable
/// (HS256 by default); secret and algorithm come from server configuration.
///
/// # Example
///
/// ```
/// use taskdeck_shared::auth::jwt::{decode_token, issue_token};
/// use chrono::Duration;
/// use jsonwebtoken::Algorithm;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = Uuid::new_v4();
/// let secret = "your-secret-key-at-least-32-bytes-long";
///
/// let token = issue_token(user_id, secret, Algorithm::HS256, Duration::hours(24))?;
/// let claims = decode_token(&token, secret, Algorithm::HS256)?;
/// assert_eq!(claims.sub, user_id);
/// # Ok(())
/// # }
/// ```
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default access token lifetime in seconds (24 hours)
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 86_400;

/// Default access token lifetime
pub fn default_token_ttl() -> Duration {
    Duration::seconds(DEFAULT_TOKEN_TTL_SECONDS)
}

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Signature, format, or claim validation failed
    #[error("Failed to validate token: {0}")]
    ValidationError(String),
}

/// JWT claims
///
/// - `sub`: Subject (user ID)
/// - `iat`: Issued at (Unix timestamp)
/// - `exp`: Expiration time (Unix timestamp)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user ID
    pub sub: Uuid,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates claims for a user, expiring `ttl` from now
    pub fn new(user_id: Uuid, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Checks whether the expiry claim is in the past
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Issues a signed access token for a user
///
/// # Errors
///
/// Returns `JwtError::CreateError` if encoding fails
pub fn issue_token(
    user_id: Uuid,
    secret: &str,
    algorithm: Algorithm,
    ttl: Duration,
) -> Result<String, JwtError> {
    let claims = Claims::new(user_id, ttl);
    let header = Header::new(algorithm);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, &claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a token and extracts its claims
///
/// Verifies the signature and the expiry claim. Malformed tokens, bad
/// signatures, and expired tokens all fail; the API layer maps every failure
/// to an unauthorized response, but `JwtError::Expired` is kept distinct for
/// logging.
///
/// # Errors
///
/// Returns `JwtError::Expired` for expired tokens and
/// `JwtError::ValidationError` for everything else
pub fn decode_token(token: &str, secret: &str, algorithm: Algorithm) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::new(algorithm);

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_claims_creation() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id, default_token_ttl());

        assert_eq!(claims.sub, user_id);
        assert!(!claims.is_expired());
        assert_eq!(claims.exp - claims.iat, default_token_ttl().num_seconds());
    }

    #[test]
    fn test_issue_and_decode_token() {
        let user_id = Uuid::new_v4();

        let token = issue_token(user_id, SECRET, Algorithm::HS256, default_token_ttl())
            .expect("Should issue token");
        let claims =
            decode_token(&token, SECRET, Algorithm::HS256).expect("Should validate token");

        assert_eq!(claims.sub, user_id);
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let token = issue_token(Uuid::new_v4(), SECRET, Algorithm::HS256, default_token_ttl())
            .expect("Should issue token");

        let result = decode_token(&token, "wrong-secret", Algorithm::HS256);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_expired_token() {
        let user_id = Uuid::new_v4();

        // Negative TTL = already expired
        let token = issue_token(user_id, SECRET, Algorithm::HS256, Duration::seconds(-3600))
            .expect("Should issue token");

        let result = decode_token(&token, SECRET, Algorithm::HS256);
        assert!(matches!(result, Err(JwtError::Expired)));
    }

    #[test]
    fn test_decode_garbage_token() {
        assert!(decode_token("not-a-jwt", SECRET, Algorithm::HS256).is_err());
        assert!(decode_token("", SECRET, Algorithm::HS256).is_err());
        assert!(decode_token("a.b.c", SECRET, Algorithm::HS256).is_err());
    }

    #[test]
    fn test_algorithm_mismatch_rejected() {
        let token = issue_token(Uuid::new_v4(), SECRET, Algorithm::HS256, default_token_ttl())
            .expect("Should issue token");

        let result = decode_token(&token, SECRET, Algorithm::HS384);
        assert!(result.is_err());
    }
}
