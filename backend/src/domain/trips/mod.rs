//! Trip aggregate: trips and the destinations, activities and expenses they
//! own.
//!
//! Sub-entities have no existence outside their trip. Constructors validate
//! raw drafts so adapters can decode untrusted input into drafts first and
//! then convert.

mod activity;
mod destination;
mod expense;
mod trip;
mod validation;

pub use activity::{Activity, ActivityDraft, ActivityId, ActivityKind};
pub use destination::{Destination, DestinationDraft};
pub use expense::{Currency, DEFAULT_CURRENCY, Expense, ExpenseDraft, ExpenseId};
pub use trip::{NewTrip, NotesUpdate, TITLE_MIN, Trip, TripDraft, TripId, TripNotes};
pub use validation::{
    ActivityValidationError, DestinationValidationError, ExpenseValidationError,
    TripUpdateError, TripValidationError, ValidationDetails, validation_failure,
};
