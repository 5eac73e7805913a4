//! Request and response payloads for the trip endpoints.
//!
//! Request fields are optional at the serde layer so missing values surface
//! as `missing_field` validation errors rather than opaque JSON failures.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::ToSchema;

use crate::domain::{
    Activity, ActivityDraft, ActivityKind, Destination, DestinationDraft, Error, Expense,
    ExpenseDraft, NewTrip, NotesUpdate, Trip, TripNotes, validation_failure,
};
use crate::inbound::http::schemas::{ActivitySchema, DestinationSchema, ExpenseSchema};
use crate::inbound::http::validation::{
    FieldName, parse_optional_timestamp, parse_timestamp, require, text_value,
};

/// Destination as supplied by clients.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DestinationPayload {
    pub name: Option<String>,
    pub place_id: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    /// ISO 8601 date or RFC 3339 timestamp.
    pub start_date: Option<String>,
    /// ISO 8601 date or RFC 3339 timestamp.
    pub end_date: Option<String>,
}

impl TryFrom<DestinationPayload> for Destination {
    type Error = Error;

    fn try_from(payload: DestinationPayload) -> Result<Self, Self::Error> {
        let start_date = require(payload.start_date, FieldName::new("startDate"))?;
        let end_date = require(payload.end_date, FieldName::new("endDate"))?;
        let draft = DestinationDraft {
            name: require(payload.name, FieldName::new("name"))?,
            place_id: payload.place_id,
            lat: payload.lat,
            lng: payload.lng,
            start_date: parse_timestamp(&start_date, FieldName::new("startDate"))?,
            end_date: parse_timestamp(&end_date, FieldName::new("endDate"))?,
        };
        Self::try_from(draft).map_err(|err| validation_failure(&err))
    }
}

/// Body of `POST /api/trips`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTripRequest {
    #[schema(example = "Paris Getaway")]
    pub title: Option<String>,
    pub destinations: Option<Vec<DestinationPayload>>,
    pub trip_start_date: Option<String>,
    pub trip_end_date: Option<String>,
}

impl TryFrom<CreateTripRequest> for NewTrip {
    type Error = Error;

    fn try_from(payload: CreateTripRequest) -> Result<Self, Self::Error> {
        let title = require(payload.title, FieldName::new("title"))?;
        let destinations = payload
            .destinations
            .unwrap_or_default()
            .into_iter()
            .map(Destination::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            title,
            destinations,
            trip_start_date: parse_optional_timestamp(
                payload.trip_start_date,
                FieldName::new("tripStartDate"),
            )?,
            trip_end_date: parse_optional_timestamp(
                payload.trip_end_date,
                FieldName::new("tripEndDate"),
            )?,
        })
    }
}

/// Activity as supplied by clients.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct ActivityPayload {
    #[schema(example = "a1")]
    pub id: Option<String>,
    #[schema(example = "Louvre Museum")]
    pub title: Option<String>,
    pub time: Option<String>,
    pub notes: Option<String>,
    #[schema(example = 1)]
    pub day: Option<i64>,
    /// One of `food`, `travel`, `sightseeing`, `stay`, `other`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub completed: Option<bool>,
}

impl TryFrom<ActivityPayload> for Activity {
    type Error = Error;

    fn try_from(payload: ActivityPayload) -> Result<Self, Self::Error> {
        let kind = payload
            .kind
            .as_deref()
            .map(str::parse::<ActivityKind>)
            .transpose()
            .map_err(|err| validation_failure(&err))?
            .unwrap_or_default();
        let draft = ActivityDraft {
            id: require(payload.id, FieldName::new("id"))?,
            title: require(payload.title, FieldName::new("title"))?,
            time: payload.time,
            notes: payload.notes,
            day: require(payload.day, FieldName::new("day"))?,
            kind,
            completed: payload.completed.unwrap_or(false),
        };
        Self::try_from(draft).map_err(|err| validation_failure(&err))
    }
}

/// Body of `POST /api/trips/{id}/activities`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct AddActivityRequest {
    pub activity: Option<ActivityPayload>,
}

/// Body of `PUT /api/trips/{id}/activities/reorder`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct ReorderActivitiesRequest {
    pub activities: Option<Vec<ActivityPayload>>,
}

/// Expense as supplied by clients.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct ExpensePayload {
    #[schema(example = "e1")]
    pub id: Option<String>,
    #[schema(example = "Flights")]
    pub category: Option<String>,
    #[schema(example = 550)]
    pub amount: Option<f64>,
    #[schema(example = "USD")]
    pub currency: Option<String>,
    pub notes: Option<String>,
    /// Defaults to the time the expense is recorded.
    pub date: Option<String>,
}

impl TryFrom<ExpensePayload> for ExpenseDraft {
    type Error = Error;

    fn try_from(payload: ExpensePayload) -> Result<Self, Self::Error> {
        Ok(Self {
            id: require(payload.id, FieldName::new("id"))?,
            category: require(payload.category, FieldName::new("category"))?,
            amount: require(payload.amount, FieldName::new("amount"))?,
            currency: payload.currency,
            notes: payload.notes,
            date: parse_optional_timestamp(payload.date, FieldName::new("date"))?,
        })
    }
}

/// Body of `POST /api/trips/{id}/expenses`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct AddExpenseRequest {
    pub expense: Option<ExpensePayload>,
}

/// Body of `PUT /api/trips/{id}/notes`.
///
/// Only string values are applied; other JSON types leave the field as is.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateNotesRequest {
    #[schema(value_type = Option<String>)]
    pub notes: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub highlights: Option<Value>,
}

impl From<UpdateNotesRequest> for NotesUpdate {
    fn from(payload: UpdateNotesRequest) -> Self {
        Self {
            notes: text_value(payload.notes),
            highlights: text_value(payload.highlights),
        }
    }
}

/// Body of `PATCH /api/trips/{id}/activities/{activityId}/complete`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct CompleteActivityRequest {
    /// Coerced to a boolean; falsy values clear completion.
    #[schema(value_type = Option<bool>)]
    pub completed: Option<Value>,
}

impl CompleteActivityRequest {
    /// Parse a raw request body. An empty body is treated as `{}`.
    pub fn from_body(body: &[u8]) -> Result<Self, Error> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body).map_err(|err| {
            Error::invalid_request("Invalid JSON body")
                .with_details(json!({ "code": "malformed_json", "reason": err.to_string() }))
        })
    }
}

/// Serialised trip aggregate.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub owner_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<String>,
    #[schema(value_type = Vec<DestinationSchema>)]
    pub destinations: Vec<Destination>,
    #[schema(value_type = Vec<ActivitySchema>)]
    pub activities: Vec<Activity>,
    #[schema(value_type = Vec<ExpenseSchema>)]
    pub expenses: Vec<Expense>,
    pub collaborators: Vec<String>,
    pub revision: u32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Trip> for TripResponse {
    fn from(trip: &Trip) -> Self {
        Self {
            id: trip.id().to_string(),
            owner_id: trip.owner_id().to_string(),
            title: trip.title().to_owned(),
            trip_start_date: trip.trip_start_date().map(|date| date.to_rfc3339()),
            trip_end_date: trip.trip_end_date().map(|date| date.to_rfc3339()),
            notes: trip.notes().map(str::to_owned),
            highlights: trip.highlights().map(str::to_owned),
            destinations: trip.destinations().to_vec(),
            activities: trip.activities().to_vec(),
            expenses: trip.expenses().to_vec(),
            collaborators: trip
                .collaborators()
                .iter()
                .map(ToString::to_string)
                .collect(),
            revision: trip.revision(),
            created_at: trip.created_at().to_rfc3339(),
            updated_at: trip.updated_at().to_rfc3339(),
        }
    }
}

/// Envelope for `{trip}` responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct TripEnvelope {
    pub trip: TripResponse,
}

/// Envelope for `GET /api/trips`.
#[derive(Debug, Serialize, ToSchema)]
pub struct TripsEnvelope {
    pub trips: Vec<TripResponse>,
}

/// Envelope for `{activities}` responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActivitiesEnvelope {
    #[schema(value_type = Vec<ActivitySchema>)]
    pub activities: Vec<Activity>,
}

/// Envelope for `{expenses}` responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct ExpensesEnvelope {
    #[schema(value_type = Vec<ExpenseSchema>)]
    pub expenses: Vec<Expense>,
}

/// Notes and highlights after an update. Unset fields serialise as `null`.
#[derive(Debug, Serialize, ToSchema)]
pub struct NotesResponse {
    pub notes: Option<String>,
    pub highlights: Option<String>,
}

impl From<TripNotes> for NotesResponse {
    fn from(notes: TripNotes) -> Self {
        Self {
            notes: notes.notes,
            highlights: notes.highlights,
        }
    }
}

/// Confirmation body for deletions.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Trip deleted successfully")]
    pub message: String,
}
