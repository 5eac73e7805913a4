//! Driven port for signing and verifying bearer tokens.

use uuid::Uuid;

use crate::domain::{AuthToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token codecs.
    pub enum TokenError {
        /// Token is malformed or carries a bad signature.
        Invalid { message: String } => "token invalid: {message}",
        /// Token signature is valid but the expiry has passed.
        Expired => "token expired",
        /// Token could not be produced.
        Encoding { message: String } => "token encoding failed: {message}",
    }
}

/// Issues signed, time-limited tokens embedding a user id and decodes them.
#[cfg_attr(test, mockall::automock)]
pub trait TokenCodec: Send + Sync {
    /// Sign a token for `user_id`.
    fn issue(&self, user_id: &UserId) -> Result<AuthToken, TokenError>;

    /// Verify `token` and return the embedded user id.
    fn decode(&self, token: &str) -> Result<UserId, TokenError>;
}

/// Unsigned codec for tests: tokens are `fixture.<uuid>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTokenCodec;

const FIXTURE_PREFIX: &str = "fixture.";

impl TokenCodec for FixtureTokenCodec {
    fn issue(&self, user_id: &UserId) -> Result<AuthToken, TokenError> {
        Ok(AuthToken::new(format!("{FIXTURE_PREFIX}{user_id}")))
    }

    fn decode(&self, token: &str) -> Result<UserId, TokenError> {
        let raw = token
            .strip_prefix(FIXTURE_PREFIX)
            .ok_or_else(|| TokenError::invalid("missing fixture prefix"))?;
        Uuid::parse_str(raw)
            .map(UserId::from_uuid)
            .map_err(|err| TokenError::invalid(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn fixture_codec_round_trips_user_id() {
        let codec = FixtureTokenCodec;
        let user_id = UserId::random();
        let token = codec.issue(&user_id).expect("issue");

        assert_eq!(codec.decode(token.as_str()), Ok(user_id));
    }

    #[rstest]
    #[case("")]
    #[case("fixture.nope")]
    #[case("Bearer abc")]
    fn fixture_codec_rejects_foreign_tokens(#[case] token: &str) {
        assert!(matches!(
            FixtureTokenCodec.decode(token),
            Err(TokenError::Invalid { .. })
        ));
    }
}
