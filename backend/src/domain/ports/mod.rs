//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`AuthCommand`, `TokenVerifier`, `TripCommand`, `TripQuery`,
//! `PlaceSearch`) are called by inbound adapters. Driven ports
//! (`UserRepository`, `TripRepository`, `PasswordHasher`, `TokenCodec`,
//! `PlaceSource`) are implemented by outbound adapters and expose typed
//! errors instead of `anyhow::Result`.

mod macros;
pub(crate) use macros::define_port_error;

mod auth_command;
mod password_hasher;
mod place_search;
mod place_source;
mod token_codec;
mod token_verifier;
mod trip_command;
mod trip_query;
mod trip_repository;
mod user_repository;

#[cfg(test)]
pub use auth_command::MockAuthCommand;
pub use auth_command::{AuthCommand, FixtureAuthCommand};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{FixturePasswordHasher, PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use place_search::MockPlaceSearch;
pub use place_search::{FixturePlaceSearch, PlaceSearch};
#[cfg(test)]
pub use place_source::MockPlaceSource;
pub use place_source::{FixturePlaceSource, PlaceQuery, PlaceSource, PlaceSourceError};
#[cfg(test)]
pub use token_codec::MockTokenCodec;
pub use token_codec::{FixtureTokenCodec, TokenCodec, TokenError};
#[cfg(test)]
pub use token_verifier::MockTokenVerifier;
pub use token_verifier::{FIXTURE_USER_ID, FixtureTokenVerifier, TokenVerifier};
#[cfg(test)]
pub use trip_command::MockTripCommand;
pub use trip_command::{FixtureTripCommand, TripCommand};
#[cfg(test)]
pub use trip_query::MockTripQuery;
pub use trip_query::{FixtureTripQuery, TripQuery};
#[cfg(test)]
pub use trip_repository::MockTripRepository;
pub use trip_repository::{FixtureTripRepository, TripRepository, TripRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserRepository, UserRepositoryError};
