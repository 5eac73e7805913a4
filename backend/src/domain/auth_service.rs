//! Authentication domain service.
//!
//! Implements registration, login and bearer-token resolution on top of the
//! credential store, password hasher and token codec ports.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    AuthCommand, PasswordHashError, PasswordHasher, TokenCodec, TokenError, TokenVerifier,
    UserRepository, UserRepositoryError,
};
use crate::domain::{
    AuthSession, Email, Error, LoginCredentials, Registration, User, UserAccount, UserId,
};

const EMAIL_IN_USE: &str = "Email already in use";
const INVALID_CREDENTIALS: &str = "Invalid credentials";
const INVALID_TOKEN: &str = "Invalid or missing token";

/// Authentication service implementing [`AuthCommand`] and [`TokenVerifier`].
#[derive(Clone)]
pub struct AuthService<U, H, T> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<U, H, T> AuthService<U, H, T> {
    /// Create a new service over the given adapters.
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::internal(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateEmail { .. } => Error::conflict(EMAIL_IN_USE),
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

fn map_issue_error(error: TokenError) -> Error {
    Error::internal(format!("failed to issue token: {error}"))
}

impl<U, H, T> AuthService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: TokenCodec,
{
    fn open_session(&self, user: User) -> Result<AuthSession, Error> {
        let token = self.tokens.issue(user.id()).map_err(map_issue_error)?;
        Ok(AuthSession { token, user })
    }

    async fn resolve_user(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| {
                debug!(%user_id, "token names an unknown user");
                Error::unauthorized(INVALID_TOKEN)
            })
    }
}

#[async_trait]
impl<U, H, T> AuthCommand for AuthService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: TokenCodec,
{
    async fn register(&self, registration: Registration) -> Result<AuthSession, Error> {
        if self
            .users
            .find_by_email(registration.email())
            .await
            .map_err(map_user_error)?
            .is_some()
        {
            return Err(Error::conflict(EMAIL_IN_USE));
        }

        let password_hash = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(map_hash_error)?;
        let user = User::new(
            UserId::random(),
            registration.name().clone(),
            registration.email().clone(),
        );
        let account = UserAccount::new(user, password_hash);
        self.users
            .create(&account)
            .await
            .map_err(map_user_error)?;

        let user = account.into_user();
        info!(user_id = %user.id(), "user registered");
        self.open_session(user)
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<AuthSession, Error> {
        let Ok(email) = Email::new(credentials.email()) else {
            warn!("login rejected: unparseable email");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        let Some(account) = self
            .users
            .find_by_email(&email)
            .await
            .map_err(map_user_error)?
        else {
            warn!("login rejected: unknown email");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), account.password_hash())
            .await
            .map_err(map_hash_error)?;
        if !matches {
            warn!(user_id = %account.user().id(), "login rejected: password mismatch");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        let user = account.into_user();
        info!(user_id = %user.id(), "user logged in");
        self.open_session(user)
    }
}

#[async_trait]
impl<U, H, T> TokenVerifier for AuthService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: TokenCodec,
{
    async fn verify(&self, token: &str) -> Result<User, Error> {
        let user_id = self.tokens.decode(token).map_err(|err| {
            debug!(error = %err, "bearer token rejected");
            Error::unauthorized(INVALID_TOKEN)
        })?;
        self.resolve_user(&user_id).await
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
