//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **memory**: process-local repositories for runs without a database
//! - **security**: bcrypt password hashing and JWT bearer tokens
//! - **places**: Google Places autocomplete over reqwest
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod memory;
pub mod persistence;
pub mod places;
pub mod security;
