//! Internal Diesel row structs.
//!
//! These types never cross into the domain; repositories translate them to
//! and from aggregates.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{trips, users};

/// Row read from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Insertable account record.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// Row read from `trips`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = trips)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TripRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub trip_start_date: Option<DateTime<Utc>>,
    pub trip_end_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub highlights: Option<String>,
    pub destinations: serde_json::Value,
    pub activities: serde_json::Value,
    pub expenses: serde_json::Value,
    pub collaborators: Vec<Uuid>,
    pub revision: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable trip record.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = trips)]
pub(crate) struct NewTripRow<'a> {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: &'a str,
    pub trip_start_date: Option<DateTime<Utc>>,
    pub trip_end_date: Option<DateTime<Utc>>,
    pub notes: Option<&'a str>,
    pub highlights: Option<&'a str>,
    pub destinations: serde_json::Value,
    pub activities: serde_json::Value,
    pub expenses: serde_json::Value,
    pub collaborators: Vec<Uuid>,
    pub revision: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full-aggregate changeset applied by `save`.
///
/// `treat_none_as_null` so clearing an optional field persists.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = trips)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct TripUpdate<'a> {
    pub title: &'a str,
    pub trip_start_date: Option<DateTime<Utc>>,
    pub trip_end_date: Option<DateTime<Utc>>,
    pub notes: Option<&'a str>,
    pub highlights: Option<&'a str>,
    pub destinations: serde_json::Value,
    pub activities: serde_json::Value,
    pub expenses: serde_json::Value,
    pub collaborators: Vec<Uuid>,
    pub revision: i32,
    pub updated_at: DateTime<Utc>,
}
