use std::cmp::Reverse;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{TripRepository, TripRepositoryError};
use crate::domain::{Trip, TripId, UserId};

use super::lock;

/// Trips in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryTripRepository {
    trips: Mutex<Vec<Trip>>,
}

impl InMemoryTripRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TripRepository for InMemoryTripRepository {
    async fn create(&self, trip: &Trip) -> Result<(), TripRepositoryError> {
        let mut trips = lock(&self.trips);
        if trips.iter().any(|stored| stored.id() == trip.id()) {
            return Err(TripRepositoryError::query(format!(
                "trip {} already exists",
                trip.id()
            )));
        }
        trips.push(trip.clone());
        Ok(())
    }

    async fn find_for_owner(
        &self,
        owner_id: &UserId,
        trip_id: &TripId,
    ) -> Result<Option<Trip>, TripRepositoryError> {
        Ok(lock(&self.trips)
            .iter()
            .find(|trip| trip.id() == trip_id && trip.is_owned_by(owner_id))
            .cloned())
    }

    async fn list_for_owner(&self, owner_id: &UserId) -> Result<Vec<Trip>, TripRepositoryError> {
        let mut owned: Vec<Trip> = lock(&self.trips)
            .iter()
            .rev()
            .filter(|trip| trip.is_owned_by(owner_id))
            .cloned()
            .collect();
        owned.sort_by_key(|trip| Reverse(trip.created_at()));
        Ok(owned)
    }

    async fn save(&self, trip: &Trip, expected_revision: u32) -> Result<(), TripRepositoryError> {
        let mut trips = lock(&self.trips);
        let stored = trips
            .iter_mut()
            .find(|stored| stored.id() == trip.id())
            .ok_or_else(|| TripRepositoryError::not_found(trip.id().to_string()))?;
        if stored.revision() != expected_revision {
            return Err(TripRepositoryError::revision_mismatch(
                expected_revision,
                stored.revision(),
            ));
        }
        *stored = trip.clone();
        Ok(())
    }

    async fn delete_for_owner(
        &self,
        owner_id: &UserId,
        trip_id: &TripId,
    ) -> Result<bool, TripRepositoryError> {
        let mut trips = lock(&self.trips);
        let before = trips.len();
        trips.retain(|trip| !(trip.id() == trip_id && trip.is_owned_by(owner_id)));
        Ok(trips.len() < before)
    }
}
