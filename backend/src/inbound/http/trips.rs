//! Trip HTTP handlers.
//!
//! ```text
//! GET    /api/trips
//! POST   /api/trips {"title":"Paris Getaway"}
//! GET    /api/trips/{id}
//! DELETE /api/trips/{id}
//! POST   /api/trips/{id}/activities {"activity":{"id":"a1","title":"Louvre Museum","day":1}}
//! PUT    /api/trips/{id}/activities/reorder {"activities":[...]}
//! PATCH  /api/trips/{id}/activities/{activityId}/complete {"completed":true}
//! POST   /api/trips/{id}/expenses {"expense":{"id":"e1","category":"Flights","amount":550}}
//! PUT    /api/trips/{id}/notes {"notes":"...","highlights":"..."}
//! GET    /api/budget/{id}
//! GET    /api/itinerary/{id}
//! ```
//!
//! Every route requires a bearer token. Trips are owner-scoped: ids that are
//! malformed, missing, or owned by someone else all answer 404.

use actix_web::{HttpResponse, delete, get, patch, post, put, web};

use crate::domain::{Activity, ActivityId, Error, ExpenseDraft, NewTrip};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::trips_dto::{
    ActivitiesEnvelope, AddActivityRequest, AddExpenseRequest, CompleteActivityRequest,
    CreateTripRequest, ExpensesEnvelope, MessageResponse, NotesResponse,
    ReorderActivitiesRequest, TripEnvelope, TripResponse, TripsEnvelope, UpdateNotesRequest,
};
use crate::inbound::http::validation::{FieldName, is_truthy, parse_trip_id, require};

/// List the caller's trips, newest first.
#[utoipa::path(
    get,
    path = "/api/trips",
    responses(
        (status = 200, description = "Trips owned by the caller", body = TripsEnvelope),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["trips"],
    operation_id = "listTrips"
)]
#[get("/trips")]
pub async fn list_trips(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<TripsEnvelope>> {
    let trips = state.trips_query.list_trips(user.id()).await?;
    Ok(web::Json(TripsEnvelope {
        trips: trips.iter().map(TripResponse::from).collect(),
    }))
}

/// Create an empty trip owned by the caller.
#[utoipa::path(
    post,
    path = "/api/trips",
    request_body = CreateTripRequest,
    responses(
        (status = 201, description = "Trip created", body = TripEnvelope),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["trips"],
    operation_id = "createTrip"
)]
#[post("/trips")]
pub async fn create_trip(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<CreateTripRequest>,
) -> ApiResult<HttpResponse> {
    let new_trip = NewTrip::try_from(payload.into_inner())?;
    let trip = state.trips.create_trip(user.id(), new_trip).await?;
    Ok(HttpResponse::Created().json(TripEnvelope {
        trip: TripResponse::from(&trip),
    }))
}

/// Fetch one trip.
#[utoipa::path(
    get,
    path = "/api/trips/{id}",
    params(("id" = String, Path, description = "Trip identifier")),
    responses(
        (status = 200, description = "Trip", body = TripEnvelope),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Trip not found", body = ErrorSchema)
    ),
    tags = ["trips"],
    operation_id = "getTrip"
)]
#[get("/trips/{id}")]
pub async fn get_trip(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<TripEnvelope>> {
    let trip_id = parse_trip_id(&path)?;
    let trip = state.trips_query.get_trip(user.id(), &trip_id).await?;
    Ok(web::Json(TripEnvelope {
        trip: TripResponse::from(&trip),
    }))
}

/// Append an activity to the itinerary.
#[utoipa::path(
    post,
    path = "/api/trips/{id}/activities",
    params(("id" = String, Path, description = "Trip identifier")),
    request_body = AddActivityRequest,
    responses(
        (status = 201, description = "Updated activities", body = ActivitiesEnvelope),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Trip not found", body = ErrorSchema),
        (status = 409, description = "Duplicate activity id or stale revision", body = ErrorSchema)
    ),
    tags = ["trips"],
    operation_id = "addActivity"
)]
#[post("/trips/{id}/activities")]
pub async fn add_activity(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<AddActivityRequest>,
) -> ApiResult<HttpResponse> {
    let trip_id = parse_trip_id(&path)?;
    let activity = require(payload.into_inner().activity, FieldName::new("activity"))?;
    let activity = Activity::try_from(activity)?;
    let activities = state
        .trips
        .add_activity(user.id(), &trip_id, activity)
        .await?;
    Ok(HttpResponse::Created().json(ActivitiesEnvelope { activities }))
}

/// Replace the activity order with a permutation of the current activities.
#[utoipa::path(
    put,
    path = "/api/trips/{id}/activities/reorder",
    params(("id" = String, Path, description = "Trip identifier")),
    request_body = ReorderActivitiesRequest,
    responses(
        (status = 200, description = "Reordered activities", body = ActivitiesEnvelope),
        (status = 400, description = "Not a permutation of the current activities", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Trip not found", body = ErrorSchema),
        (status = 409, description = "Stale revision", body = ErrorSchema)
    ),
    tags = ["trips"],
    operation_id = "reorderActivities"
)]
#[put("/trips/{id}/activities/reorder")]
pub async fn reorder_activities(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<ReorderActivitiesRequest>,
) -> ApiResult<web::Json<ActivitiesEnvelope>> {
    let trip_id = parse_trip_id(&path)?;
    let ordered = require(
        payload.into_inner().activities,
        FieldName::new("activities"),
    )?
    .into_iter()
    .map(Activity::try_from)
    .collect::<Result<Vec<_>, Error>>()?;
    let activities = state
        .trips
        .reorder_activities(user.id(), &trip_id, ordered)
        .await?;
    Ok(web::Json(ActivitiesEnvelope { activities }))
}

/// Mark an activity as completed or not.
#[utoipa::path(
    patch,
    path = "/api/trips/{id}/activities/{activityId}/complete",
    params(
        ("id" = String, Path, description = "Trip identifier"),
        ("activityId" = String, Path, description = "Activity identifier")
    ),
    request_body = CompleteActivityRequest,
    responses(
        (status = 200, description = "Updated activities", body = ActivitiesEnvelope),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Trip or activity not found", body = ErrorSchema),
        (status = 409, description = "Stale revision", body = ErrorSchema)
    ),
    tags = ["trips"],
    operation_id = "completeActivity"
)]
#[patch("/trips/{id}/activities/{activity_id}/complete")]
pub async fn complete_activity(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<(String, String)>,
    body: web::Bytes,
) -> ApiResult<web::Json<ActivitiesEnvelope>> {
    let (raw_trip_id, raw_activity_id) = path.into_inner();
    let trip_id = parse_trip_id(&raw_trip_id)?;
    let activity_id =
        ActivityId::new(raw_activity_id).map_err(|_| Error::not_found("Activity not found"))?;
    let payload = CompleteActivityRequest::from_body(&body)?;
    let completed = is_truthy(payload.completed.as_ref());
    let activities = state
        .trips
        .set_activity_completion(user.id(), &trip_id, &activity_id, completed)
        .await?;
    Ok(web::Json(ActivitiesEnvelope { activities }))
}

/// Record an expense.
#[utoipa::path(
    post,
    path = "/api/trips/{id}/expenses",
    params(("id" = String, Path, description = "Trip identifier")),
    request_body = AddExpenseRequest,
    responses(
        (status = 201, description = "Updated expenses", body = ExpensesEnvelope),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Trip not found", body = ErrorSchema),
        (status = 409, description = "Duplicate expense id or stale revision", body = ErrorSchema)
    ),
    tags = ["trips"],
    operation_id = "addExpense"
)]
#[post("/trips/{id}/expenses")]
pub async fn add_expense(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<AddExpenseRequest>,
) -> ApiResult<HttpResponse> {
    let trip_id = parse_trip_id(&path)?;
    let expense = require(payload.into_inner().expense, FieldName::new("expense"))?;
    let draft = ExpenseDraft::try_from(expense)?;
    let expenses = state.trips.add_expense(user.id(), &trip_id, draft).await?;
    Ok(HttpResponse::Created().json(ExpensesEnvelope { expenses }))
}

/// Update free-text notes and highlights.
#[utoipa::path(
    put,
    path = "/api/trips/{id}/notes",
    params(("id" = String, Path, description = "Trip identifier")),
    request_body = UpdateNotesRequest,
    responses(
        (status = 200, description = "Current notes", body = NotesResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Trip not found", body = ErrorSchema),
        (status = 409, description = "Stale revision", body = ErrorSchema)
    ),
    tags = ["trips"],
    operation_id = "updateNotes"
)]
#[put("/trips/{id}/notes")]
pub async fn update_notes(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<UpdateNotesRequest>,
) -> ApiResult<web::Json<NotesResponse>> {
    let trip_id = parse_trip_id(&path)?;
    let notes = state
        .trips
        .update_notes(user.id(), &trip_id, payload.into_inner().into())
        .await?;
    Ok(web::Json(NotesResponse::from(notes)))
}

/// Delete a trip and everything it contains.
#[utoipa::path(
    delete,
    path = "/api/trips/{id}",
    params(("id" = String, Path, description = "Trip identifier")),
    responses(
        (status = 200, description = "Trip deleted", body = MessageResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Trip not found", body = ErrorSchema)
    ),
    tags = ["trips"],
    operation_id = "deleteTrip"
)]
#[delete("/trips/{id}")]
pub async fn delete_trip(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let trip_id = parse_trip_id(&path)?;
    state.trips.delete_trip(user.id(), &trip_id).await?;
    Ok(web::Json(MessageResponse {
        message: "Trip deleted successfully".to_owned(),
    }))
}

/// Expenses of a trip, verbatim.
#[utoipa::path(
    get,
    path = "/api/budget/{id}",
    params(("id" = String, Path, description = "Trip identifier")),
    responses(
        (status = 200, description = "Trip expenses", body = ExpensesEnvelope),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Trip not found", body = ErrorSchema)
    ),
    tags = ["trips"],
    operation_id = "getBudget"
)]
#[get("/budget/{id}")]
pub async fn budget(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<ExpensesEnvelope>> {
    let trip_id = parse_trip_id(&path)?;
    let expenses = state.trips_query.budget(user.id(), &trip_id).await?;
    Ok(web::Json(ExpensesEnvelope { expenses }))
}

/// Activities of a trip, verbatim.
#[utoipa::path(
    get,
    path = "/api/itinerary/{id}",
    params(("id" = String, Path, description = "Trip identifier")),
    responses(
        (status = 200, description = "Trip activities", body = ActivitiesEnvelope),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Trip not found", body = ErrorSchema)
    ),
    tags = ["trips"],
    operation_id = "getItinerary"
)]
#[get("/itinerary/{id}")]
pub async fn itinerary(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<ActivitiesEnvelope>> {
    let trip_id = parse_trip_id(&path)?;
    let activities = state.trips_query.itinerary(user.id(), &trip_id).await?;
    Ok(web::Json(ActivitiesEnvelope { activities }))
}

#[cfg(test)]
#[path = "trips_tests.rs"]
mod tests;
