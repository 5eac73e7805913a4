//! Driving port for registration and login.
//!
//! Inbound adapters call this port with already-validated payloads and never
//! touch the credential store or token codec directly.

use async_trait::async_trait;

use crate::domain::{AuthSession, AuthToken, Email, Error, LoginCredentials, Registration, User};
use crate::domain::{UserId, UserName};

/// Domain use-case port for creating accounts and signing in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthCommand: Send + Sync {
    /// Create an account and issue a token for it.
    ///
    /// # Errors
    ///
    /// Returns a conflict when the email is already registered.
    async fn register(&self, registration: Registration) -> Result<AuthSession, Error>;

    /// Check credentials and issue a token.
    ///
    /// # Errors
    ///
    /// Returns unauthorized for an unknown email or a wrong password.
    async fn login(&self, credentials: LoginCredentials) -> Result<AuthSession, Error>;
}

/// Fixture that accepts every registration and login.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAuthCommand;

fn fixture_session(name: UserName, email: Email) -> AuthSession {
    let user = User::new(UserId::random(), name, email);
    AuthSession {
        token: AuthToken::new(format!("fixture.{}", user.id())),
        user,
    }
}

#[async_trait]
impl AuthCommand for FixtureAuthCommand {
    async fn register(&self, registration: Registration) -> Result<AuthSession, Error> {
        Ok(fixture_session(
            registration.name().clone(),
            registration.email().clone(),
        ))
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<AuthSession, Error> {
        let email = Email::new(credentials.email())
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let name = UserName::new("Fixture User")
            .map_err(|err| Error::internal(format!("invalid fixture name: {err}")))?;
        Ok(fixture_session(name, email))
    }
}
