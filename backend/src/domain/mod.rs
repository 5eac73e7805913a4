//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed entities used by the API and persistence
//! layers, and the services implementing the driving ports. Types validate
//! on construction and document their invariants and serde contracts in
//! Rustdoc.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic error payload.
//! - `User`, `UserAccount` and their value objects.
//! - `Trip` aggregate with `Destination`, `Activity` and `Expense`.
//! - `AuthService`, `TripService`, `PlaceSearchService`, `DemoSeeder`.

pub mod auth;
mod auth_service;
mod demo_seed;
pub mod error;
mod place_search_service;
pub mod ports;
pub mod trace_id;
mod trip_service;
pub mod trips;
pub mod user;

pub use self::auth::{
    AuthSession, AuthToken, AuthValidationError, LoginCredentials, PASSWORD_MIN, PasswordHash,
    Registration,
};
pub use self::auth_service::AuthService;
pub use self::demo_seed::{
    DEMO_EMAIL, DEMO_NAME, DEMO_PASSWORD, DEMO_TRIP_TITLE, DemoSeedOutcome, DemoSeeder,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::place_search_service::{PLACES_NOT_CONFIGURED, PlaceSearchService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::trip_service::TripService;
pub use self::trips::{
    Activity, ActivityDraft, ActivityId, ActivityKind, ActivityValidationError, Currency,
    DEFAULT_CURRENCY, Destination, DestinationDraft, DestinationValidationError, Expense,
    ExpenseDraft, ExpenseId, ExpenseValidationError, NewTrip, NotesUpdate, TITLE_MIN, Trip,
    TripDraft, TripId, TripNotes, TripUpdateError, TripValidationError, ValidationDetails,
    validation_failure,
};
pub use self::user::{
    EMAIL_MAX, Email, USER_NAME_MAX, User, UserAccount, UserId, UserName, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use trip_planner::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<u32> {
///     Err(Error::not_found("Trip not found"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
