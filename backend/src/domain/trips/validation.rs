//! Validation and mutation errors for the trip aggregate.

/// Errors raised while building a destination.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DestinationValidationError {
    #[error("destination name must not be empty")]
    EmptyName,
    #[error("destination latitude must be within [-90, 90]")]
    LatitudeOutOfRange { value: f64 },
    #[error("destination longitude must be within [-180, 180]")]
    LongitudeOutOfRange { value: f64 },
    #[error("destination endDate must not be before startDate")]
    DatesOutOfOrder,
}

/// Errors raised while building an activity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActivityValidationError {
    #[error("activity id must not be empty")]
    EmptyId,
    #[error("activity title must not be empty")]
    EmptyTitle,
    #[error("activity day must be a positive integer")]
    DayOutOfRange { value: i64 },
    #[error("activity type must be one of food, travel, sightseeing, stay, other")]
    UnknownKind { value: String },
}

/// Errors raised while building an expense.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExpenseValidationError {
    #[error("expense id must not be empty")]
    EmptyId,
    #[error("expense category must not be empty")]
    EmptyCategory,
    #[error("expense amount must be a non-negative number")]
    InvalidAmount { value: f64 },
    #[error("expense currency must be a three-letter code")]
    InvalidCurrency { value: String },
}

/// Invariant violations of a whole trip.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TripValidationError {
    #[error("title must be at least {min} characters")]
    TitleTooShort { min: usize },
    #[error("tripEndDate must not be before tripStartDate")]
    DatesOutOfOrder,
    #[error(transparent)]
    Destination(#[from] DestinationValidationError),
    #[error(transparent)]
    Activity(#[from] ActivityValidationError),
    #[error(transparent)]
    Expense(#[from] ExpenseValidationError),
    #[error("activity ids must be unique within a trip: {id}")]
    DuplicateActivityId { id: String },
    #[error("expense ids must be unique within a trip: {id}")]
    DuplicateExpenseId { id: String },
}

/// Failures of an aggregate mutation.
///
/// Adapters map `Invalid` and `ReorderMismatch` to bad input, the duplicate
/// variants to a conflict and `ActivityNotFound` to not found.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TripUpdateError {
    #[error(transparent)]
    Invalid(#[from] TripValidationError),
    #[error("reordered activities must contain exactly the trip's current activities")]
    ReorderMismatch,
    #[error("an activity with id {id} already exists in this trip")]
    DuplicateActivity { id: String },
    #[error("an expense with id {id} already exists in this trip")]
    DuplicateExpense { id: String },
    #[error("Activity not found")]
    ActivityNotFound { id: String },
}

/// Machine-readable field/code pairs attached to validation error details.
pub trait ValidationDetails {
    /// Request field the failure refers to.
    fn field(&self) -> &'static str;
    /// Stable snake_case failure code.
    fn code(&self) -> &'static str;
}

impl ValidationDetails for DestinationValidationError {
    fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::LatitudeOutOfRange { .. } => "lat",
            Self::LongitudeOutOfRange { .. } => "lng",
            Self::DatesOutOfOrder => "endDate",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::EmptyName => "empty_name",
            Self::LatitudeOutOfRange { .. } | Self::LongitudeOutOfRange { .. } => {
                "coordinate_out_of_range"
            }
            Self::DatesOutOfOrder => "dates_out_of_order",
        }
    }
}

impl ValidationDetails for ActivityValidationError {
    fn field(&self) -> &'static str {
        match self {
            Self::EmptyId => "id",
            Self::EmptyTitle => "title",
            Self::DayOutOfRange { .. } => "day",
            Self::UnknownKind { .. } => "type",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::EmptyId => "empty_id",
            Self::EmptyTitle => "empty_title",
            Self::DayOutOfRange { .. } => "day_out_of_range",
            Self::UnknownKind { .. } => "unknown_activity_type",
        }
    }
}

impl ValidationDetails for ExpenseValidationError {
    fn field(&self) -> &'static str {
        match self {
            Self::EmptyId => "id",
            Self::EmptyCategory => "category",
            Self::InvalidAmount { .. } => "amount",
            Self::InvalidCurrency { .. } => "currency",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::EmptyId => "empty_id",
            Self::EmptyCategory => "empty_category",
            Self::InvalidAmount { .. } => "invalid_amount",
            Self::InvalidCurrency { .. } => "invalid_currency",
        }
    }
}

impl ValidationDetails for TripValidationError {
    fn field(&self) -> &'static str {
        match self {
            Self::TitleTooShort { .. } => "title",
            Self::DatesOutOfOrder => "tripEndDate",
            Self::Destination(inner) => inner.field(),
            Self::Activity(inner) => inner.field(),
            Self::Expense(inner) => inner.field(),
            Self::DuplicateActivityId { .. } => "activities",
            Self::DuplicateExpenseId { .. } => "expenses",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::TitleTooShort { .. } => "title_too_short",
            Self::DatesOutOfOrder => "dates_out_of_order",
            Self::Destination(inner) => inner.code(),
            Self::Activity(inner) => inner.code(),
            Self::Expense(inner) => inner.code(),
            Self::DuplicateActivityId { .. } | Self::DuplicateExpenseId { .. } => "duplicate_id",
        }
    }
}

/// Build an invalid-request error carrying `{field, code}` details.
pub fn validation_failure<E>(error: &E) -> crate::domain::Error
where
    E: ValidationDetails + std::fmt::Display,
{
    crate::domain::Error::invalid_request(error.to_string()).with_details(serde_json::json!({
        "field": error.field(),
        "code": error.code(),
    }))
}
