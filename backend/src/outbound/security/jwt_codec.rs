//! HS256 bearer tokens carrying the user id.
//!
//! Expiry is checked against the injected clock rather than the system time,
//! so jsonwebtoken's own `exp` validation is switched off.

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::{TokenCodec, TokenError};
use crate::domain::{AuthToken, UserId};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Claims {
    user_id: Uuid,
    iat: i64,
    exp: i64,
}

/// Signs and verifies tokens with a shared secret.
pub struct JwtTokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtTokenCodec {
    /// Build a codec issuing tokens valid for `ttl`.
    pub fn new(secret: &[u8], ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp"]);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
            clock,
        }
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(&self, user_id: &UserId) -> Result<AuthToken, TokenError> {
        let issued_at = self.clock.utc();
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::encoding("token expiry out of range"))?;
        let claims = Claims {
            user_id: *user_id.as_uuid(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(AuthToken::new)
            .map_err(|err| TokenError::encoding(err.to_string()))
    }

    fn decode(&self, token: &str) -> Result<UserId, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::invalid(err.to_string()),
            })?;
        if data.claims.exp <= self.clock.utc().timestamp() {
            return Err(TokenError::Expired);
        }
        Ok(UserId::from_uuid(data.claims.user_id))
    }
}
