//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`. The
//! wrappers here mirror their serialised shape so handlers can reference them
//! in `#[utoipa::path]` annotations.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The resource does not exist or belongs to someone else.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request conflicts with stored state.
    #[schema(rename = "conflict")]
    Conflict,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Trip not found")]
    message: String,
    /// Correlation identifier echoed in the `Trace-Id` header.
    #[schema(example = "9b2d6a3c-5e4f-4a1b-8c7d-0e9f1a2b3c4d")]
    trace_id: Option<String>,
    /// Supplementary details, such as `{field, code}` for validation failures.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Destination`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Destination)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct DestinationSchema {
    #[schema(example = "Paris")]
    name: String,
    #[schema(example = "ChIJD7fiBh9u5kcRYJSMaMOCCwQ")]
    place_id: Option<String>,
    #[schema(example = 48.8566)]
    lat: Option<f64>,
    #[schema(example = 2.3522)]
    lng: Option<f64>,
    #[schema(format = DateTime)]
    start_date: String,
    #[schema(format = DateTime)]
    end_date: String,
}

/// OpenAPI schema for [`crate::domain::ActivityKind`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ActivityKind)]
pub enum ActivityKindSchema {
    #[schema(rename = "food")]
    Food,
    #[schema(rename = "travel")]
    Travel,
    #[schema(rename = "sightseeing")]
    Sightseeing,
    #[schema(rename = "stay")]
    Stay,
    #[schema(rename = "other")]
    Other,
}

/// OpenAPI schema for [`crate::domain::Activity`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Activity)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ActivitySchema {
    #[schema(example = "a1")]
    id: String,
    #[schema(example = "Louvre Museum")]
    title: String,
    #[schema(example = "10:00")]
    time: Option<String>,
    notes: Option<String>,
    /// One-based day of the trip.
    #[schema(minimum = 1, example = 1)]
    day: u32,
    #[schema(rename = "type")]
    kind: ActivityKindSchema,
    completed: bool,
}

/// OpenAPI schema for [`crate::domain::Expense`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Expense)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ExpenseSchema {
    #[schema(example = "e1")]
    id: String,
    #[schema(example = "Flights")]
    category: String,
    #[schema(minimum = 0, example = 550)]
    amount: f64,
    #[schema(example = "USD")]
    currency: String,
    notes: Option<String>,
    #[schema(format = DateTime)]
    date: String,
}
