//! Driving port for trip aggregate mutations.
//!
//! Every operation is scoped to the calling user. Mutations return the
//! sub-sequence they changed rather than the whole trip.

use async_trait::async_trait;

use crate::domain::{
    Activity, ActivityId, Error, Expense, ExpenseDraft, NewTrip, NotesUpdate, Trip, TripId,
    TripNotes, UserId,
};

/// Domain use-case port for changing trips.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TripCommand: Send + Sync {
    /// Create an empty trip owned by `owner`.
    async fn create_trip(&self, owner: &UserId, new_trip: NewTrip) -> Result<Trip, Error>;

    /// Append an activity and return the itinerary.
    async fn add_activity(
        &self,
        owner: &UserId,
        trip_id: &TripId,
        activity: Activity,
    ) -> Result<Vec<Activity>, Error>;

    /// Replace the itinerary order and return it.
    async fn reorder_activities(
        &self,
        owner: &UserId,
        trip_id: &TripId,
        activities: Vec<Activity>,
    ) -> Result<Vec<Activity>, Error>;

    /// Append an expense and return the budget. A missing date defaults to
    /// the moment the expense is recorded.
    async fn add_expense(
        &self,
        owner: &UserId,
        trip_id: &TripId,
        expense: ExpenseDraft,
    ) -> Result<Vec<Expense>, Error>;

    /// Apply a partial notes update and return the current notes.
    async fn update_notes(
        &self,
        owner: &UserId,
        trip_id: &TripId,
        update: NotesUpdate,
    ) -> Result<TripNotes, Error>;

    /// Mark an activity completed or pending and return the itinerary.
    async fn set_activity_completion(
        &self,
        owner: &UserId,
        trip_id: &TripId,
        activity_id: &ActivityId,
        completed: bool,
    ) -> Result<Vec<Activity>, Error>;

    /// Delete a trip with everything it owns.
    async fn delete_trip(&self, owner: &UserId, trip_id: &TripId) -> Result<(), Error>;
}

/// Fixture that creates trips in memory and finds nothing afterwards.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTripCommand;

fn missing() -> Error {
    Error::not_found("Trip not found")
}

#[async_trait]
impl TripCommand for FixtureTripCommand {
    async fn create_trip(&self, owner: &UserId, new_trip: NewTrip) -> Result<Trip, Error> {
        Trip::create(*owner, new_trip, chrono::Utc::now())
            .map_err(|err| Error::invalid_request(err.to_string()))
    }

    async fn add_activity(
        &self,
        _owner: &UserId,
        _trip_id: &TripId,
        _activity: Activity,
    ) -> Result<Vec<Activity>, Error> {
        Err(missing())
    }

    async fn reorder_activities(
        &self,
        _owner: &UserId,
        _trip_id: &TripId,
        _activities: Vec<Activity>,
    ) -> Result<Vec<Activity>, Error> {
        Err(missing())
    }

    async fn add_expense(
        &self,
        _owner: &UserId,
        _trip_id: &TripId,
        _expense: ExpenseDraft,
    ) -> Result<Vec<Expense>, Error> {
        Err(missing())
    }

    async fn update_notes(
        &self,
        _owner: &UserId,
        _trip_id: &TripId,
        _update: NotesUpdate,
    ) -> Result<TripNotes, Error> {
        Err(missing())
    }

    async fn set_activity_completion(
        &self,
        _owner: &UserId,
        _trip_id: &TripId,
        _activity_id: &ActivityId,
        _completed: bool,
    ) -> Result<Vec<Activity>, Error> {
        Err(missing())
    }

    async fn delete_trip(&self, _owner: &UserId, _trip_id: &TripId) -> Result<(), Error> {
        Err(missing())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    #[tokio::test]
    async fn fixture_command_creates_empty_trip() {
        let owner = UserId::random();
        let trip = FixtureTripCommand
            .create_trip(
                &owner,
                NewTrip {
                    title: "Paris Getaway".to_owned(),
                    destinations: Vec::new(),
                    trip_start_date: None,
                    trip_end_date: None,
                },
            )
            .await
            .expect("fixture create");

        assert!(trip.is_owned_by(&owner));
        assert!(trip.activities().is_empty());
    }

    #[tokio::test]
    async fn fixture_command_reports_missing_trips() {
        let err = FixtureTripCommand
            .delete_trip(&UserId::random(), &TripId::random())
            .await
            .expect_err("nothing to delete");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
