//! Driving port resolving bearer tokens to users.

use async_trait::async_trait;

use crate::domain::{Email, Error, User, UserId, UserName};

/// Resolve a presented bearer token to the user it was issued for.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// # Errors
    ///
    /// Returns unauthorized when the token is malformed, expired, signed with
    /// another secret, or names a user that no longer exists.
    async fn verify(&self, token: &str) -> Result<User, Error>;
}

/// Fixture resolving every non-empty token to the same user.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTokenVerifier;

/// Identifier of the user returned by [`FixtureTokenVerifier`].
pub const FIXTURE_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

#[async_trait]
impl TokenVerifier for FixtureTokenVerifier {
    async fn verify(&self, token: &str) -> Result<User, Error> {
        if token.trim().is_empty() {
            return Err(Error::unauthorized("Invalid or missing token"));
        }
        let fixture = |err: crate::domain::UserValidationError| {
            Error::internal(format!("invalid fixture user: {err}"))
        };
        Ok(User::new(
            UserId::new(FIXTURE_USER_ID).map_err(fixture)?,
            UserName::new("Fixture User").map_err(fixture)?,
            Email::new("fixture@example.com").map_err(fixture)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("anything", true)]
    #[case("   ", false)]
    #[tokio::test]
    async fn fixture_verifier_accepts_non_empty_tokens(
        #[case] token: &str,
        #[case] accepted: bool,
    ) {
        match (accepted, FixtureTokenVerifier.verify(token).await) {
            (true, Ok(user)) => assert_eq!(user.id().to_string(), FIXTURE_USER_ID),
            (false, Err(err)) => assert_eq!(err.code(), ErrorCode::Unauthorized),
            (_, other) => panic!("unexpected verification result: {other:?}"),
        }
    }
}
