//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories are thin: they translate between row structs and domain
//! aggregates and map driver failures into port errors. Row structs
//! (`models.rs`) and table definitions (`schema.rs`) stay private to this
//! module. Connections come from a `bb8` pool through `diesel-async`.
//!
//! # Example
//!
//! ```ignore
//! use trip_planner::outbound::persistence::{DbPool, DieselTripRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/trips")).await?;
//! let trips = DieselTripRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_trip_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_trip_repository::DieselTripRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
