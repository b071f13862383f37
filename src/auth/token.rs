use crate::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents the claims encoded within an access token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject of the token: the account's email address.
    pub sub: String,
    /// Expiration timestamp (seconds since epoch) for the token.
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct RawClaims {
    #[serde(default)]
    sub: Option<String>,
    exp: i64,
}

/// Why a token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    Expired,
    InvalidSignature,
    Malformed,
    MissingSubject,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenError::Expired => write!(f, "token has expired"),
            TokenError::InvalidSignature => write!(f, "token signature is invalid"),
            TokenError::Malformed => write!(f, "token is malformed"),
            TokenError::MissingSubject => write!(f, "token carries no subject"),
        }
    }
}

/// Keys, algorithm and default lifetime used to issue and verify access tokens.
///
/// Built once from `Config` and shared with handlers through `web::Data`.
#[derive(Clone)]
pub struct TokenSettings {
    encoding: EncodingKey,
    decoding: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenSettings {
    pub fn new(secret: &str, algorithm: Algorithm, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

/// Generates an access token for `subject` that expires after the configured ttl.
pub fn generate_token(settings: &TokenSettings, subject: &str) -> Result<String, AppError> {
    generate_token_with_ttl(settings, subject, settings.ttl)
}

/// Generates an access token for `subject` expiring `ttl` after now.
pub fn generate_token_with_ttl(
    settings: &TokenSettings,
    subject: &str,
    ttl: Duration,
) -> Result<String, AppError> {
    let claims = Claims {
        sub: subject.to_string(),
        exp: (Utc::now() + ttl).timestamp(),
    };

    encode(&Header::new(settings.algorithm), &claims, &settings.encoding)
        .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
}

/// Verifies a token's signature and expiry and decodes its claims.
///
/// A token without a non-empty `sub` claim is rejected even when correctly signed.
pub fn verify_token(settings: &TokenSettings, token: &str) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(settings.algorithm);
    validation.leeway = 0;

    let data = decode::<RawClaims>(token, &settings.decoding, &validation)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            _ => TokenError::Malformed,
        })?;

    match data.claims.sub {
        Some(sub) if !sub.is_empty() => Ok(Claims {
            sub,
            exp: data.claims.exp,
        }),
        _ => Err(TokenError::MissingSubject),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(secret: &str) -> TokenSettings {
        TokenSettings::new(secret, Algorithm::HS256, Duration::minutes(30))
    }

    #[test_log::test]
    fn test_token_generation_and_verification() {
        let settings = settings("test_secret_for_gen_verify");
        let token = generate_token(&settings, "user@example.com").unwrap();
        let claims = verify_token(&settings, &token).unwrap();
        assert_eq!(claims.sub, "user@example.com");

        let expected_exp = (Utc::now() + Duration::minutes(30)).timestamp();
        assert!((claims.exp - expected_exp).abs() <= 5);
    }

    #[test]
    fn test_repeated_tokens_verify_to_the_same_subject() {
        let settings = settings("secret");
        let first = generate_token(&settings, "a@b.com").unwrap();
        let second = generate_token(&settings, "a@b.com").unwrap();
        assert_eq!(
            verify_token(&settings, &first).unwrap().sub,
            verify_token(&settings, &second).unwrap().sub
        );
    }

    #[test]
    fn test_token_expiration() {
        let settings = settings("test_secret_for_expiration");
        let expired = generate_token_with_ttl(&settings, "late@example.com", Duration::hours(-2))
            .unwrap();
        assert_eq!(verify_token(&settings, &expired), Err(TokenError::Expired));
    }

    #[test]
    fn test_recently_expired_token_is_rejected() {
        let settings = settings("test_secret_for_expiration");
        let expired = generate_token_with_ttl(&settings, "a@b.com", Duration::seconds(-5))
            .unwrap();
        assert_eq!(verify_token(&settings, &expired), Err(TokenError::Expired));
    }

    #[test]
    fn test_invalid_token_signature() {
        let signer = settings("one_secret");
        let verifier = settings("a_completely_different_secret");
        let token = generate_token(&signer, "user@example.com").unwrap();
        assert_eq!(
            verify_token(&verifier, &token),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_malformed_token() {
        let settings = settings("secret");
        assert_eq!(
            verify_token(&settings, "not-a-jwt"),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn test_token_without_subject_is_rejected() {
        #[derive(Serialize)]
        struct NoSubject {
            exp: i64,
        }

        let settings = settings("secret");
        let claims = NoSubject {
            exp: (Utc::now() + Duration::minutes(5)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("secret".as_bytes()),
        )
        .unwrap();

        assert_eq!(
            verify_token(&settings, &token),
            Err(TokenError::MissingSubject)
        );
    }
}
