//! Driving port for reading trips and their projections.

use async_trait::async_trait;

use crate::domain::{Activity, Error, Expense, Trip, TripId, UserId};

/// Domain use-case port for reading trips owned by the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TripQuery: Send + Sync {
    /// Trips owned by `owner`, newest first.
    async fn list_trips(&self, owner: &UserId) -> Result<Vec<Trip>, Error>;

    /// One trip owned by `owner`.
    async fn get_trip(&self, owner: &UserId, trip_id: &TripId) -> Result<Trip, Error>;

    /// The trip's expenses, verbatim.
    async fn budget(&self, owner: &UserId, trip_id: &TripId) -> Result<Vec<Expense>, Error>;

    /// The trip's activities in itinerary order.
    async fn itinerary(&self, owner: &UserId, trip_id: &TripId) -> Result<Vec<Activity>, Error>;
}

/// Fixture with no trips.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTripQuery;

#[async_trait]
impl TripQuery for FixtureTripQuery {
    async fn list_trips(&self, _owner: &UserId) -> Result<Vec<Trip>, Error> {
        Ok(Vec::new())
    }

    async fn get_trip(&self, _owner: &UserId, _trip_id: &TripId) -> Result<Trip, Error> {
        Err(Error::not_found("Trip not found"))
    }

    async fn budget(&self, _owner: &UserId, _trip_id: &TripId) -> Result<Vec<Expense>, Error> {
        Err(Error::not_found("Trip not found"))
    }

    async fn itinerary(
        &self,
        _owner: &UserId,
        _trip_id: &TripId,
    ) -> Result<Vec<Activity>, Error> {
        Err(Error::not_found("Trip not found"))
    }
}
