//! Port for trip aggregate persistence.
//!
//! Every lookup is scoped by owner. A trip that exists but belongs to another
//! user is indistinguishable from a missing one.

use async_trait::async_trait;

use crate::domain::{Trip, TripId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by trip repository adapters.
    pub enum TripRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "trip repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "trip repository query failed: {message}",
        /// Optimistic concurrency check failed.
        RevisionMismatch { expected: u32, actual: u32 } =>
            "revision mismatch: expected {expected}, found {actual}",
        /// The trip disappeared between load and save.
        NotFound { trip_id: String } =>
            "trip not found: {trip_id}",
    }
}

/// Port for storing whole trip aggregates.
///
/// # Revision Semantics
///
/// - New trips are created at revision 1.
/// - The caller advances `trip.revision()` before calling
///   [`TripRepository::save`]; the repository never increments it.
/// - `save` succeeds only when the stored revision equals
///   `expected_revision`, otherwise it returns
///   [`TripRepositoryError::RevisionMismatch`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TripRepository: Send + Sync {
    /// Insert a freshly created trip.
    async fn create(&self, trip: &Trip) -> Result<(), TripRepositoryError>;

    /// Fetch one trip owned by `owner_id`.
    async fn find_for_owner(
        &self,
        owner_id: &UserId,
        trip_id: &TripId,
    ) -> Result<Option<Trip>, TripRepositoryError>;

    /// All trips owned by `owner_id`, newest first.
    async fn list_for_owner(&self, owner_id: &UserId) -> Result<Vec<Trip>, TripRepositoryError>;

    /// Replace the stored aggregate guarded by a revision check.
    async fn save(&self, trip: &Trip, expected_revision: u32) -> Result<(), TripRepositoryError>;

    /// Delete one trip owned by `owner_id`. Returns whether a row was removed.
    async fn delete_for_owner(
        &self,
        owner_id: &UserId,
        trip_id: &TripId,
    ) -> Result<bool, TripRepositoryError>;
}

/// Fixture repository that discards writes and finds nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTripRepository;

#[async_trait]
impl TripRepository for FixtureTripRepository {
    async fn create(&self, _trip: &Trip) -> Result<(), TripRepositoryError> {
        Ok(())
    }

    async fn find_for_owner(
        &self,
        _owner_id: &UserId,
        _trip_id: &TripId,
    ) -> Result<Option<Trip>, TripRepositoryError> {
        Ok(None)
    }

    async fn list_for_owner(&self, _owner_id: &UserId) -> Result<Vec<Trip>, TripRepositoryError> {
        Ok(Vec::new())
    }

    async fn save(&self, _trip: &Trip, _expected_revision: u32) -> Result<(), TripRepositoryError> {
        Ok(())
    }

    async fn delete_for_owner(
        &self,
        _owner_id: &UserId,
        _trip_id: &TripId,
    ) -> Result<bool, TripRepositoryError> {
        Ok(false)
    }
}
