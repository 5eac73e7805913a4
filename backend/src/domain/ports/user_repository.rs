//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Email, User, UserAccount, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already uses the email address.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

/// Credential store for user accounts.
///
/// Email lookups are exact and case-sensitive.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account. Fails with
    /// [`UserRepositoryError::DuplicateEmail`] when the email is taken.
    async fn create(&self, account: &UserAccount) -> Result<(), UserRepositoryError>;

    /// Fetch an account, including its password hash, by email.
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserAccount>, UserRepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;
}

/// Fixture repository that stores nothing and finds nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn create(&self, _account: &UserAccount) -> Result<(), UserRepositoryError> {
        Ok(())
    }

    async fn find_by_email(
        &self,
        _email: &Email,
    ) -> Result<Option<UserAccount>, UserRepositoryError> {
        Ok(None)
    }

    async fn find_by_id(&self, _id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn fixture_repository_finds_nothing() {
        let repo = FixtureUserRepository;
        let email = Email::new("demo@example.com").expect("valid email");

        assert!(repo.find_by_email(&email).await.expect("lookup").is_none());
        assert!(repo
            .find_by_id(&UserId::random())
            .await
            .expect("lookup")
            .is_none());
    }

    #[rstest]
    fn duplicate_email_error_names_address() {
        let err = UserRepositoryError::duplicate_email("demo@example.com");
        assert_eq!(err.to_string(), "email already registered: demo@example.com");
    }
}
