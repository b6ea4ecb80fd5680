use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// JWT claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the authenticated user's id
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token generation error: {0}")]
    Generation(String),
    #[error("Invalid session token")]
    Invalid,
}

/// Signs and verifies session tokens with a fixed HMAC secret.
///
/// The secret is handed in at construction; the codec never looks at the
/// environment, so tests can build one with any key they like.
#[derive(Clone)]
pub struct SessionTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl SessionTokenCodec {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, user_id: Uuid) -> Result<String, TokenError> {
        self.issue_at(user_id, Utc::now())
    }

    pub fn issue_at(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims::new(user_id, now, self.ttl);
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Generation(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Every failure mode (signature, shape, algorithm, subject, expiry)
    /// collapses to [`TokenError::Invalid`].
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Uuid, TokenError> {
        // Expiry is checked below against `now`, strictly and without leeway
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| TokenError::Invalid)?;

        if now.timestamp() >= data.claims.exp {
            return Err(TokenError::Invalid);
        }

        Uuid::parse_str(&data.claims.sub).map_err(|_| TokenError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> SessionTokenCodec {
        SessionTokenCodec::new(b"test-signing-secret", Duration::days(7))
    }

    #[test]
    fn issue_then_verify_returns_user() {
        let codec = codec();
        let user_id = Uuid::new_v4();
        let token = codec.issue(user_id).unwrap();
        assert_eq!(codec.verify(&token).unwrap(), user_id);
    }

    #[test]
    fn token_is_valid_until_the_expiry_instant() {
        let codec = codec();
        let user_id = Uuid::new_v4();
        let issued = Utc::now();
        let token = codec.issue_at(user_id, issued).unwrap();

        let just_before = issued + Duration::days(7) - Duration::seconds(1);
        assert_eq!(codec.verify_at(&token, just_before).unwrap(), user_id);

        let at_expiry = issued + Duration::days(7);
        assert!(matches!(codec.verify_at(&token, at_expiry), Err(TokenError::Invalid)));

        let after = issued + Duration::days(8);
        assert!(matches!(codec.verify_at(&token, after), Err(TokenError::Invalid)));
    }

    #[test]
    fn flipped_bit_invalidates_token() {
        let codec = codec();
        let token = codec.issue(Uuid::new_v4()).unwrap();

        for index in [0, token.len() / 2, token.len() - 1] {
            let mut bytes = token.clone().into_bytes();
            bytes[index] ^= 0x01;
            let tampered = String::from_utf8_lossy(&bytes).into_owned();
            assert!(
                matches!(codec.verify(&tampered), Err(TokenError::Invalid)),
                "tampered byte {} still verified",
                index
            );
        }
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let other = SessionTokenCodec::new(b"another-secret", Duration::days(7));
        let token = other.issue(Uuid::new_v4()).unwrap();
        assert!(matches!(codec().verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn garbage_is_rejected() {
        let codec = codec();
        for token in ["", "abc", "a.b.c", "not-a-jwt-at-all"] {
            assert!(matches!(codec.verify(token), Err(TokenError::Invalid)));
        }
    }

    #[test]
    fn non_uuid_subject_is_rejected() {
        let codec = codec();
        let now = Utc::now();
        let claims = Claims {
            sub: "not-a-uuid".to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::days(1)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-signing-secret"),
        )
        .unwrap();
        assert!(matches!(codec.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn claims_span_seven_days() {
        let now = Utc::now();
        let claims = Claims::new(Uuid::new_v4(), now, Duration::days(7));
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }
}
