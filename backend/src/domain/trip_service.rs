//! Trip aggregate domain service.
//!
//! Implements the trip driving ports. Every mutation loads the whole
//! aggregate owned by the caller, applies the change in memory, advances the
//! revision and persists the aggregate with a revision check. Lost updates
//! surface as conflicts; nothing is retried.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{TripCommand, TripQuery, TripRepository, TripRepositoryError};
use crate::domain::{
    Activity, ActivityId, Error, Expense, ExpenseDraft, NewTrip, NotesUpdate, Trip, TripId,
    TripNotes, TripUpdateError, UserId, validation_failure,
};

const TRIP_NOT_FOUND: &str = "Trip not found";

/// Trip service implementing [`TripCommand`] and [`TripQuery`].
#[derive(Clone)]
pub struct TripService<R> {
    trips: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> TripService<R> {
    /// Create a new service with the given repository and clock.
    pub fn new(trips: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { trips, clock }
    }
}

fn map_repository_error(error: TripRepositoryError) -> Error {
    match error {
        TripRepositoryError::Connection { message } => {
            Error::internal(format!("trip repository unavailable: {message}"))
        }
        TripRepositoryError::Query { message } => {
            Error::internal(format!("trip repository error: {message}"))
        }
        TripRepositoryError::RevisionMismatch { expected, actual } => {
            warn!(expected, actual, "trip modified concurrently");
            Error::conflict("revision mismatch").with_details(json!({
                "expectedRevision": expected,
                "actualRevision": actual,
                "code": "revision_mismatch",
            }))
        }
        TripRepositoryError::NotFound { .. } => Error::not_found(TRIP_NOT_FOUND),
    }
}

fn map_update_error(error: TripUpdateError) -> Error {
    match error {
        TripUpdateError::Invalid(inner) => validation_failure(&inner),
        TripUpdateError::ReorderMismatch => Error::invalid_request(error.to_string())
            .with_details(json!({ "field": "activities", "code": "reorder_mismatch" })),
        TripUpdateError::DuplicateActivity { ref id } => Error::conflict(error.to_string())
            .with_details(json!({ "field": "id", "code": "duplicate_id", "id": id })),
        TripUpdateError::DuplicateExpense { ref id } => Error::conflict(error.to_string())
            .with_details(json!({ "field": "id", "code": "duplicate_id", "id": id })),
        TripUpdateError::ActivityNotFound { .. } => Error::not_found(error.to_string()),
    }
}

impl<R> TripService<R>
where
    R: TripRepository,
{
    async fn load(&self, owner: &UserId, trip_id: &TripId) -> Result<Trip, Error> {
        self.trips
            .find_for_owner(owner, trip_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(TRIP_NOT_FOUND))
    }

    async fn mutate<F>(&self, owner: &UserId, trip_id: &TripId, change: F) -> Result<Trip, Error>
    where
        F: FnOnce(&mut Trip) -> Result<(), TripUpdateError> + Send,
    {
        let mut trip = self.load(owner, trip_id).await?;
        change(&mut trip).map_err(map_update_error)?;
        let expected = trip.begin_revision(self.clock.utc());
        self.trips
            .save(&trip, expected)
            .await
            .map_err(map_repository_error)?;
        debug!(%trip_id, revision = trip.revision(), "trip updated");
        Ok(trip)
    }
}

#[async_trait]
impl<R> TripCommand for TripService<R>
where
    R: TripRepository,
{
    async fn create_trip(&self, owner: &UserId, new_trip: NewTrip) -> Result<Trip, Error> {
        let trip = Trip::create(*owner, new_trip, self.clock.utc())
            .map_err(|err| validation_failure(&err))?;
        self.trips
            .create(&trip)
            .await
            .map_err(map_repository_error)?;
        info!(trip_id = %trip.id(), owner_id = %owner, "trip created");
        Ok(trip)
    }

    async fn add_activity(
        &self,
        owner: &UserId,
        trip_id: &TripId,
        activity: Activity,
    ) -> Result<Vec<Activity>, Error> {
        let trip = self
            .mutate(owner, trip_id, |trip| trip.add_activity(activity))
            .await?;
        Ok(trip.activities().to_vec())
    }

    async fn reorder_activities(
        &self,
        owner: &UserId,
        trip_id: &TripId,
        activities: Vec<Activity>,
    ) -> Result<Vec<Activity>, Error> {
        let trip = self
            .mutate(owner, trip_id, |trip| trip.reorder_activities(activities))
            .await?;
        Ok(trip.activities().to_vec())
    }

    async fn add_expense(
        &self,
        owner: &UserId,
        trip_id: &TripId,
        expense: ExpenseDraft,
    ) -> Result<Vec<Expense>, Error> {
        let expense =
            Expense::new(expense, self.clock.utc()).map_err(|err| validation_failure(&err))?;
        let trip = self
            .mutate(owner, trip_id, |trip| trip.add_expense(expense))
            .await?;
        Ok(trip.expenses().to_vec())
    }

    async fn update_notes(
        &self,
        owner: &UserId,
        trip_id: &TripId,
        update: NotesUpdate,
    ) -> Result<TripNotes, Error> {
        let trip = self
            .mutate(owner, trip_id, |trip| {
                trip.update_notes(update);
                Ok(())
            })
            .await?;
        Ok(trip.notes_view())
    }

    async fn set_activity_completion(
        &self,
        owner: &UserId,
        trip_id: &TripId,
        activity_id: &ActivityId,
        completed: bool,
    ) -> Result<Vec<Activity>, Error> {
        let trip = self
            .mutate(owner, trip_id, |trip| {
                trip.set_activity_completion(activity_id, completed)
            })
            .await?;
        Ok(trip.activities().to_vec())
    }

    async fn delete_trip(&self, owner: &UserId, trip_id: &TripId) -> Result<(), Error> {
        let removed = self
            .trips
            .delete_for_owner(owner, trip_id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(Error::not_found(TRIP_NOT_FOUND));
        }
        info!(%trip_id, owner_id = %owner, "trip deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> TripQuery for TripService<R>
where
    R: TripRepository,
{
    async fn list_trips(&self, owner: &UserId) -> Result<Vec<Trip>, Error> {
        let trips = self
            .trips
            .list_for_owner(owner)
            .await
            .map_err(map_repository_error)?;
        debug!(owner_id = %owner, count = trips.len(), "trips listed");
        Ok(trips)
    }

    async fn get_trip(&self, owner: &UserId, trip_id: &TripId) -> Result<Trip, Error> {
        self.load(owner, trip_id).await
    }

    async fn budget(&self, owner: &UserId, trip_id: &TripId) -> Result<Vec<Expense>, Error> {
        let trip = self.load(owner, trip_id).await?;
        Ok(trip.expenses().to_vec())
    }

    async fn itinerary(&self, owner: &UserId, trip_id: &TripId) -> Result<Vec<Activity>, Error> {
        let trip = self.load(owner, trip_id).await?;
        Ok(trip.activities().to_vec())
    }
}

#[cfg(test)]
#[path = "trip_service_tests.rs"]
mod tests;
