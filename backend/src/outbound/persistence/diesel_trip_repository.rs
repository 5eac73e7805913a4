//! PostgreSQL-backed `TripRepository`.
//!
//! A trip is one row. Destinations, activities and expenses are stored as
//! JSONB arrays in their wire shape and rebuilt through the domain
//! constructors on read, so corrupt rows surface as query errors rather than
//! invalid aggregates. `save` is a compare-and-swap on `revision`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{TripRepository, TripRepositoryError};
use crate::domain::{
    Activity, ActivityDraft, Destination, DestinationDraft, Expense, ExpenseDraft, Trip,
    TripDraft, TripId, UserId,
};

use super::diesel_error_mapping::{
    map_diesel_error, pool_error_message, revision_from_db, revision_to_db,
};
use super::models::{NewTripRow, TripRow, TripUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::trips;

/// Diesel implementation of trip persistence.
#[derive(Clone)]
pub struct DieselTripRepository {
    pool: DbPool,
}

impl DieselTripRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TripRepositoryError {
    TripRepositoryError::connection(pool_error_message(error))
}

fn map_error(error: diesel::result::Error) -> TripRepositoryError {
    map_diesel_error(
        error,
        TripRepositoryError::query,
        TripRepositoryError::connection,
    )
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, TripRepositoryError> {
    serde_json::to_value(value)
        .map_err(|err| TripRepositoryError::query(format!("encode trip document: {err}")))
}

fn from_json<T: DeserializeOwned>(
    trip_id: Uuid,
    column: &str,
    value: serde_json::Value,
) -> Result<T, TripRepositoryError> {
    serde_json::from_value(value).map_err(|err| {
        TripRepositoryError::query(format!("stored trip {trip_id} has invalid {column}: {err}"))
    })
}

/// JSON columns of a trip, shared by inserts and updates.
struct TripDocuments {
    destinations: serde_json::Value,
    activities: serde_json::Value,
    expenses: serde_json::Value,
    collaborators: Vec<Uuid>,
}

impl TripDocuments {
    fn encode(trip: &Trip) -> Result<Self, TripRepositoryError> {
        Ok(Self {
            destinations: to_json(&trip.destinations())?,
            activities: to_json(&trip.activities())?,
            expenses: to_json(&trip.expenses())?,
            collaborators: trip
                .collaborators()
                .iter()
                .map(|id| *id.as_uuid())
                .collect(),
        })
    }
}

fn row_to_trip(row: TripRow) -> Result<Trip, TripRepositoryError> {
    let id = row.id;
    let invalid =
        |err: &dyn std::fmt::Display| TripRepositoryError::query(format!("stored trip {id} is invalid: {err}"));

    let destinations = from_json::<Vec<DestinationDraft>>(id, "destinations", row.destinations)?
        .into_iter()
        .map(Destination::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| invalid(&err))?;
    let activities = from_json::<Vec<ActivityDraft>>(id, "activities", row.activities)?
        .into_iter()
        .map(Activity::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| invalid(&err))?;
    let expenses = from_json::<Vec<ExpenseDraft>>(id, "expenses", row.expenses)?
        .into_iter()
        .map(|draft| Expense::new(draft, row.created_at))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| invalid(&err))?;

    Trip::new(TripDraft {
        id: TripId::from_uuid(id),
        owner_id: UserId::from_uuid(row.owner_id),
        title: row.title,
        trip_start_date: row.trip_start_date,
        trip_end_date: row.trip_end_date,
        notes: row.notes,
        highlights: row.highlights,
        destinations,
        activities,
        expenses,
        collaborators: row
            .collaborators
            .into_iter()
            .map(UserId::from_uuid)
            .collect(),
        created_at: row.created_at,
        updated_at: row.updated_at,
        revision: revision_from_db(row.revision),
    })
    .map_err(|err| invalid(&err))
}

#[async_trait]
impl TripRepository for DieselTripRepository {
    async fn create(&self, trip: &Trip) -> Result<(), TripRepositoryError> {
        let documents = TripDocuments::encode(trip)?;
        let row = NewTripRow {
            id: *trip.id().as_uuid(),
            owner_id: *trip.owner_id().as_uuid(),
            title: trip.title(),
            trip_start_date: trip.trip_start_date(),
            trip_end_date: trip.trip_end_date(),
            notes: trip.notes(),
            highlights: trip.highlights(),
            destinations: documents.destinations,
            activities: documents.activities,
            expenses: documents.expenses,
            collaborators: documents.collaborators,
            revision: revision_to_db(trip.revision()),
            created_at: trip.created_at(),
            updated_at: trip.updated_at(),
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(trips::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_error)
    }

    async fn find_for_owner(
        &self,
        owner_id: &UserId,
        trip_id: &TripId,
    ) -> Result<Option<Trip>, TripRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = trips::table
            .filter(trips::id.eq(trip_id.as_uuid()))
            .filter(trips::owner_id.eq(owner_id.as_uuid()))
            .select(TripRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;
        row.map(row_to_trip).transpose()
    }

    async fn list_for_owner(&self, owner_id: &UserId) -> Result<Vec<Trip>, TripRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TripRow> = trips::table
            .filter(trips::owner_id.eq(owner_id.as_uuid()))
            .order(trips::created_at.desc())
            .select(TripRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_error)?;
        rows.into_iter().map(row_to_trip).collect()
    }

    async fn save(&self, trip: &Trip, expected_revision: u32) -> Result<(), TripRepositoryError> {
        let documents = TripDocuments::encode(trip)?;
        let update = TripUpdate {
            title: trip.title(),
            trip_start_date: trip.trip_start_date(),
            trip_end_date: trip.trip_end_date(),
            notes: trip.notes(),
            highlights: trip.highlights(),
            destinations: documents.destinations,
            activities: documents.activities,
            expenses: documents.expenses,
            collaborators: documents.collaborators,
            revision: revision_to_db(trip.revision()),
            updated_at: trip.updated_at(),
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated_rows = diesel::update(trips::table)
            .filter(trips::id.eq(trip.id().as_uuid()))
            .filter(trips::owner_id.eq(trip.owner_id().as_uuid()))
            .filter(trips::revision.eq(revision_to_db(expected_revision)))
            .set(&update)
            .execute(&mut conn)
            .await
            .map_err(map_error)?;
        if updated_rows > 0 {
            return Ok(());
        }

        let current: Option<i32> = trips::table
            .filter(trips::id.eq(trip.id().as_uuid()))
            .filter(trips::owner_id.eq(trip.owner_id().as_uuid()))
            .select(trips::revision)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;
        match current {
            Some(actual) => {
                debug!(trip_id = %trip.id(), expected_revision, actual, "trip revision mismatch");
                Err(TripRepositoryError::revision_mismatch(
                    expected_revision,
                    revision_from_db(actual),
                ))
            }
            None => Err(TripRepositoryError::not_found(trip.id().to_string())),
        }
    }

    async fn delete_for_owner(
        &self,
        owner_id: &UserId,
        trip_id: &TripId,
    ) -> Result<bool, TripRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            trips::table
                .filter(trips::id.eq(trip_id.as_uuid()))
                .filter(trips::owner_id.eq(owner_id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_error)?;
        Ok(deleted > 0)
    }
}
