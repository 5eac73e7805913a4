//! Driven port for one-way password hashing.

use async_trait::async_trait;

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Hashing or verification failed inside the algorithm.
        Algorithm { message: String } => "password hashing failed: {message}",
        /// The blocking worker running the hash could not complete.
        Worker { message: String } => "password hashing worker failed: {message}",
    }
}

/// Slow salted password hashing.
///
/// Implementations are expected to be deliberately expensive; async so they
/// can move the work off the request executor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a fresh salt.
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError>;

    /// Compare `password` against a stored hash.
    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError>;
}

/// Reversible stand-in for tests. Never use outside fixtures.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePasswordHasher;

const FIXTURE_PREFIX: &str = "fixture$";

#[async_trait]
impl PasswordHasher for FixturePasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        Ok(PasswordHash::new(format!("{FIXTURE_PREFIX}{password}")))
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        Ok(hash
            .as_str()
            .strip_prefix(FIXTURE_PREFIX)
            .is_some_and(|stored| stored == password))
    }
}
