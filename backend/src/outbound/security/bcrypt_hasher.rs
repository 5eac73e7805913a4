//! `PasswordHasher` backed by bcrypt.
//!
//! bcrypt is CPU-bound, so both operations run on Tokio's blocking
//! pool via [`TraceId::spawn_blocking`] to keep request workers responsive.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{PasswordHash, TraceId};

/// Work factor used unless configured otherwise.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Salted bcrypt hashing with a fixed work factor.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// `cost` must lie within bcrypt's 4..=31 range; out-of-range values
    /// surface as [`PasswordHashError::Algorithm`] on first use.
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

fn worker_failed(error: tokio::task::JoinError) -> PasswordHashError {
    PasswordHashError::worker(error.to_string())
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let cost = self.cost;
        let password = zeroize::Zeroizing::new(password.to_owned());
        let encoded = TraceId::spawn_blocking(move || bcrypt::hash(password.as_str(), cost))
            .await
            .map_err(worker_failed)?
            .map_err(|err| PasswordHashError::algorithm(err.to_string()))?;
        Ok(PasswordHash::new(encoded))
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let password = zeroize::Zeroizing::new(password.to_owned());
        let stored = hash.as_str().to_owned();
        let outcome = TraceId::spawn_blocking(move || bcrypt::verify(password.as_str(), &stored))
            .await
            .map_err(worker_failed)?;
        match outcome {
            Ok(matches) => Ok(matches),
            // A malformed stored hash can never match.
            Err(err) => {
                debug!(error = %err, "stored password hash rejected by bcrypt");
                Ok(false)
            }
        }
    }
}
