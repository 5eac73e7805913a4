//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts. `email` is unique and matched exactly.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        /// bcrypt hash; never leaves the persistence layer except for
        /// credential checks.
        password_hash -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Trip aggregates, one row each. Destinations, activities and expenses
    /// are embedded JSON arrays so the aggregate is read and written whole.
    trips (id) {
        id -> Uuid,
        owner_id -> Uuid,
        title -> Text,
        trip_start_date -> Nullable<Timestamptz>,
        trip_end_date -> Nullable<Timestamptz>,
        notes -> Nullable<Text>,
        highlights -> Nullable<Text>,
        destinations -> Jsonb,
        activities -> Jsonb,
        expenses -> Jsonb,
        collaborators -> Array<Uuid>,
        /// Optimistic concurrency counter, starting at 1.
        revision -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(trips -> users (owner_id));

diesel::allow_tables_to_appear_in_same_query!(trips, users);
