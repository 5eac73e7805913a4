//! Handler tests for the trip endpoints.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test as actix_test, web};
use chrono::{TimeZone, Utc};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{FIXTURE_USER_ID, MockTripCommand, MockTripQuery};
use crate::domain::{ActivityDraft, ActivityKind, Expense, Trip, TripId, TripNotes, UserId};
use crate::inbound::http::state::HttpStatePorts;

const TRIP_ID: &str = "7c9e6679-7425-40de-944b-e07fc1f90ae7";

fn test_app(
    trips: MockTripCommand,
    trips_query: MockTripQuery,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(HttpStatePorts {
        trips: Arc::new(trips),
        trips_query: Arc::new(trips_query),
        ..HttpStatePorts::default()
    });
    App::new().app_data(web::Data::new(state)).service(
        web::scope("/api")
            .service(list_trips)
            .service(create_trip)
            .service(get_trip)
            .service(add_activity)
            .service(reorder_activities)
            .service(complete_activity)
            .service(add_expense)
            .service(update_notes)
            .service(delete_trip)
            .service(budget)
            .service(itinerary),
    )
}

fn fixture_user() -> UserId {
    UserId::new(FIXTURE_USER_ID).expect("fixture user id")
}

fn paris_trip() -> Trip {
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).single().expect("timestamp");
    Trip::create(
        fixture_user(),
        NewTrip {
            title: "Paris Getaway".to_owned(),
            destinations: Vec::new(),
            trip_start_date: None,
            trip_end_date: None,
        },
        now,
    )
    .expect("valid trip")
}

fn louvre() -> Activity {
    Activity::try_from(ActivityDraft {
        id: "a1".to_owned(),
        title: "Louvre Museum".to_owned(),
        time: None,
        notes: None,
        day: 1,
        kind: ActivityKind::Sightseeing,
        completed: false,
    })
    .expect("valid activity")
}

fn authorised(request: actix_test::TestRequest) -> actix_test::TestRequest {
    request.insert_header((AUTHORIZATION, "Bearer fixture"))
}

#[actix_web::test]
async fn list_trips_wraps_trips_in_envelope() {
    let mut query = MockTripQuery::new();
    query
        .expect_list_trips()
        .withf(|owner: &UserId| owner.to_string() == FIXTURE_USER_ID)
        .times(1)
        .returning(|_| Ok(vec![paris_trip()]));
    let app = actix_test::init_service(test_app(MockTripCommand::new(), query)).await;

    let res = actix_test::call_service(
        &app,
        authorised(actix_test::TestRequest::get().uri("/api/trips")).to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["trips"][0]["title"], "Paris Getaway");
    assert_eq!(body["trips"][0]["activities"], json!([]));
    assert_eq!(body["trips"][0]["ownerId"], FIXTURE_USER_ID);
}

#[actix_web::test]
async fn endpoints_require_a_bearer_token() {
    let app = actix_test::init_service(test_app(MockTripCommand::new(), MockTripQuery::new())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/trips").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["message"], "Invalid or missing token");
}

#[actix_web::test]
async fn create_trip_returns_created_trip() {
    let mut command = MockTripCommand::new();
    command
        .expect_create_trip()
        .withf(|_: &UserId, new_trip: &NewTrip| {
            new_trip.title == "Paris Getaway"
                && new_trip.destinations.len() == 1
                && new_trip.trip_start_date.is_some()
        })
        .times(1)
        .returning(|_, _| Ok(paris_trip()));
    let app = actix_test::init_service(test_app(command, MockTripQuery::new())).await;

    let res = actix_test::call_service(
        &app,
        authorised(actix_test::TestRequest::post().uri("/api/trips"))
            .set_json(json!({
                "title": "Paris Getaway",
                "tripStartDate": "2025-06-01",
                "destinations": [{
                    "name": "Paris",
                    "lat": 48.8566,
                    "lng": 2.3522,
                    "startDate": "2025-06-01",
                    "endDate": "2025-06-04T00:00:00Z"
                }]
            }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["trip"]["title"], "Paris Getaway");
    assert_eq!(body["trip"]["revision"], 1);
}

#[rstest]
#[case::missing_title(json!({}), "title", "missing_field")]
#[case::bad_date(json!({"title": "Paris", "tripStartDate": "June"}), "tripStartDate", "invalid_timestamp")]
#[case::destination_without_dates(json!({"title": "Paris", "destinations": [{"name": "Paris"}]}), "startDate", "missing_field")]
#[case::inverted_destination(
    json!({"title": "Paris", "destinations": [{"name": "Paris", "startDate": "2025-06-04", "endDate": "2025-06-01"}]}),
    "endDate",
    "dates_out_of_order"
)]
#[case::latitude(
    json!({"title": "Paris", "destinations": [{"name": "Paris", "lat": 95.0, "startDate": "2025-06-01", "endDate": "2025-06-02"}]}),
    "lat",
    "coordinate_out_of_range"
)]
#[actix_web::test]
async fn create_trip_rejects_invalid_payloads(
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let mut command = MockTripCommand::new();
    command.expect_create_trip().times(0);
    let app = actix_test::init_service(test_app(command, MockTripQuery::new())).await;

    let res = actix_test::call_service(
        &app,
        authorised(actix_test::TestRequest::post().uri("/api/trips"))
            .set_json(payload)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}

#[rstest]
#[case::malformed("/api/trips/not-a-uuid")]
#[case::budget("/api/budget/not-a-uuid")]
#[case::itinerary("/api/itinerary/42")]
#[actix_web::test]
async fn malformed_trip_ids_are_not_found(#[case] uri: &str) {
    let app = actix_test::init_service(test_app(MockTripCommand::new(), MockTripQuery::new())).await;

    let res = actix_test::call_service(
        &app,
        authorised(actix_test::TestRequest::get().uri(uri)).to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["message"], "Trip not found");
}

#[actix_web::test]
async fn get_trip_passes_parsed_id_to_query() {
    let mut query = MockTripQuery::new();
    query
        .expect_get_trip()
        .withf(|_: &UserId, trip_id: &TripId| trip_id.to_string() == TRIP_ID)
        .times(1)
        .returning(|_, _| Err(Error::not_found("Trip not found")));
    let app = actix_test::init_service(test_app(MockTripCommand::new(), query)).await;

    let res = actix_test::call_service(
        &app,
        authorised(actix_test::TestRequest::get().uri(&format!("/api/trips/{TRIP_ID}")))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn add_activity_returns_created_sequence() {
    let mut command = MockTripCommand::new();
    command
        .expect_add_activity()
        .withf(|_: &UserId, _: &TripId, activity: &Activity| {
            activity.id().as_ref() == "a1" && activity.kind() == ActivityKind::Other
        })
        .times(1)
        .returning(|_, _, activity| Ok(vec![activity]));
    let app = actix_test::init_service(test_app(command, MockTripQuery::new())).await;

    let res = actix_test::call_service(
        &app,
        authorised(
            actix_test::TestRequest::post().uri(&format!("/api/trips/{TRIP_ID}/activities")),
        )
        .set_json(json!({"activity": {"id": "a1", "title": "Louvre Museum", "day": 1}}))
        .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["activities"][0]["id"], "a1");
    assert_eq!(body["activities"][0]["type"], "other");
    assert_eq!(body["activities"][0]["completed"], false);
}

#[rstest]
#[case::missing_activity(json!({}), "activity", "missing_field")]
#[case::zero_day(json!({"activity": {"id": "a1", "title": "Louvre", "day": 0}}), "day", "day_out_of_range")]
#[case::unknown_kind(json!({"activity": {"id": "a1", "title": "Louvre", "day": 1, "type": "party"}}), "type", "unknown_activity_type")]
#[case::blank_title(json!({"activity": {"id": "a1", "title": "  ", "day": 1}}), "title", "empty_title")]
#[actix_web::test]
async fn add_activity_rejects_invalid_payloads(
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let mut command = MockTripCommand::new();
    command.expect_add_activity().times(0);
    let app = actix_test::init_service(test_app(command, MockTripQuery::new())).await;

    let res = actix_test::call_service(
        &app,
        authorised(
            actix_test::TestRequest::post().uri(&format!("/api/trips/{TRIP_ID}/activities")),
        )
        .set_json(payload)
        .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}

#[actix_web::test]
async fn reorder_forwards_supplied_order() {
    let mut command = MockTripCommand::new();
    command
        .expect_reorder_activities()
        .withf(|_: &UserId, _: &TripId, ordered: &Vec<Activity>| {
            ordered.iter().map(|a| a.id().as_ref()).collect::<Vec<_>>() == ["a2", "a1"]
        })
        .times(1)
        .returning(|_, _, ordered| Ok(ordered));
    let app = actix_test::init_service(test_app(command, MockTripQuery::new())).await;

    let res = actix_test::call_service(
        &app,
        authorised(
            actix_test::TestRequest::put()
                .uri(&format!("/api/trips/{TRIP_ID}/activities/reorder")),
        )
        .set_json(json!({"activities": [
            {"id": "a2", "title": "Eiffel Tower", "day": 1},
            {"id": "a1", "title": "Louvre Museum", "day": 1}
        ]}))
        .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["activities"][0]["id"], "a2");
    assert_eq!(body["activities"][1]["id"], "a1");
}

#[actix_web::test]
async fn reorder_mismatch_surfaces_as_bad_request() {
    let mut command = MockTripCommand::new();
    command.expect_reorder_activities().times(1).returning(|_, _, _| {
        Err(Error::invalid_request("reordered activities must contain exactly the trip's current activities"))
    });
    let app = actix_test::init_service(test_app(command, MockTripQuery::new())).await;

    let res = actix_test::call_service(
        &app,
        authorised(
            actix_test::TestRequest::put()
                .uri(&format!("/api/trips/{TRIP_ID}/activities/reorder")),
        )
        .set_json(json!({"activities": []}))
        .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[case::boolean(Some(json!({"completed": true})), true)]
#[case::number(Some(json!({"completed": 1})), true)]
#[case::text(Some(json!({"completed": "yes"})), true)]
#[case::zero(Some(json!({"completed": 0})), false)]
#[case::empty_text(Some(json!({"completed": ""})), false)]
#[case::absent(Some(json!({})), false)]
#[case::no_body(None, false)]
#[actix_web::test]
async fn complete_activity_coerces_flag(#[case] payload: Option<Value>, #[case] expected: bool) {
    let mut command = MockTripCommand::new();
    command
        .expect_set_activity_completion()
        .withf(move |_: &UserId, _: &TripId, activity_id: &ActivityId, completed: &bool| {
            activity_id.as_ref() == "a1" && *completed == expected
        })
        .times(1)
        .returning(|_, _, _, _| Ok(vec![louvre()]));
    let app = actix_test::init_service(test_app(command, MockTripQuery::new())).await;
    let request = authorised(
        actix_test::TestRequest::patch()
            .uri(&format!("/api/trips/{TRIP_ID}/activities/a1/complete")),
    );
    let request = match payload {
        Some(payload) => request.set_json(payload),
        None => request,
    };

    let res = actix_test::call_service(&app, request.to_request()).await;

    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn complete_activity_rejects_malformed_body() {
    let mut command = MockTripCommand::new();
    command.expect_set_activity_completion().times(0);
    let app = actix_test::init_service(test_app(command, MockTripQuery::new())).await;

    let res = actix_test::call_service(
        &app,
        authorised(
            actix_test::TestRequest::patch()
                .uri(&format!("/api/trips/{TRIP_ID}/activities/a1/complete")),
        )
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"completed\":")
        .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["code"], "malformed_json");
}

#[actix_web::test]
async fn complete_unknown_activity_is_not_found() {
    let mut command = MockTripCommand::new();
    command
        .expect_set_activity_completion()
        .times(1)
        .returning(|_, _, _, _| Err(Error::not_found("Activity not found")));
    let app = actix_test::init_service(test_app(command, MockTripQuery::new())).await;

    let res = actix_test::call_service(
        &app,
        authorised(
            actix_test::TestRequest::patch()
                .uri(&format!("/api/trips/{TRIP_ID}/activities/zz/complete")),
        )
        .set_json(json!({"completed": true}))
        .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["message"], "Activity not found");
}

#[actix_web::test]
async fn add_expense_defaults_are_left_to_the_domain() {
    let mut command = MockTripCommand::new();
    command
        .expect_add_expense()
        .withf(|_: &UserId, _: &TripId, draft: &ExpenseDraft| {
            draft.id == "e1" && draft.currency.is_none() && draft.date.is_none()
        })
        .times(1)
        .returning(|_, _, draft| {
            let recorded_at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).single().expect("timestamp");
            Ok(vec![Expense::new(draft, recorded_at).expect("valid expense")])
        });
    let app = actix_test::init_service(test_app(command, MockTripQuery::new())).await;

    let res = actix_test::call_service(
        &app,
        authorised(
            actix_test::TestRequest::post().uri(&format!("/api/trips/{TRIP_ID}/expenses")),
        )
        .set_json(json!({"expense": {"id": "e1", "category": "Flights", "amount": 550}}))
        .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["expenses"][0]["currency"], "USD");
    assert_eq!(body["expenses"][0]["amount"], 550.0);
}

#[actix_web::test]
async fn add_expense_requires_amount() {
    let mut command = MockTripCommand::new();
    command.expect_add_expense().times(0);
    let app = actix_test::init_service(test_app(command, MockTripQuery::new())).await;

    let res = actix_test::call_service(
        &app,
        authorised(
            actix_test::TestRequest::post().uri(&format!("/api/trips/{TRIP_ID}/expenses")),
        )
        .set_json(json!({"expense": {"id": "e1", "category": "Flights"}}))
        .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "amount");
}

#[actix_web::test]
async fn update_notes_ignores_non_string_values() {
    let mut command = MockTripCommand::new();
    command
        .expect_update_notes()
        .withf(|_: &UserId, _: &TripId, update: &crate::domain::NotesUpdate| {
            update.notes.as_deref() == Some("Pack an umbrella") && update.highlights.is_none()
        })
        .times(1)
        .returning(|_, _, update| {
            Ok(TripNotes {
                notes: update.notes,
                highlights: Some("Seine at dusk".to_owned()),
            })
        });
    let app = actix_test::init_service(test_app(command, MockTripQuery::new())).await;

    let res = actix_test::call_service(
        &app,
        authorised(actix_test::TestRequest::put().uri(&format!("/api/trips/{TRIP_ID}/notes")))
            .set_json(json!({"notes": "Pack an umbrella", "highlights": 42}))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(
        body,
        json!({"notes": "Pack an umbrella", "highlights": "Seine at dusk"})
    );
}

#[actix_web::test]
async fn delete_trip_confirms_removal() {
    let mut command = MockTripCommand::new();
    command
        .expect_delete_trip()
        .times(1)
        .returning(|_, _| Ok(()));
    let app = actix_test::init_service(test_app(command, MockTripQuery::new())).await;

    let res = actix_test::call_service(
        &app,
        authorised(actix_test::TestRequest::delete().uri(&format!("/api/trips/{TRIP_ID}")))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["message"], "Trip deleted successfully");
}

#[actix_web::test]
async fn budget_and_itinerary_return_sequences_verbatim() {
    let mut query = MockTripQuery::new();
    query.expect_budget().times(1).returning(|_, _| Ok(Vec::new()));
    query
        .expect_itinerary()
        .times(1)
        .returning(|_, _| Ok(vec![louvre()]));
    let app = actix_test::init_service(test_app(MockTripCommand::new(), query)).await;

    let budget_res = actix_test::call_service(
        &app,
        authorised(actix_test::TestRequest::get().uri(&format!("/api/budget/{TRIP_ID}")))
            .to_request(),
    )
    .await;
    assert_eq!(budget_res.status(), StatusCode::OK);
    let budget_body: Value = actix_test::read_body_json(budget_res).await;
    assert_eq!(budget_body, json!({"expenses": []}));

    let itinerary_res = actix_test::call_service(
        &app,
        authorised(actix_test::TestRequest::get().uri(&format!("/api/itinerary/{TRIP_ID}")))
            .to_request(),
    )
    .await;
    assert_eq!(itinerary_res.status(), StatusCode::OK);
    let itinerary_body: Value = actix_test::read_body_json(itinerary_res).await;
    assert_eq!(itinerary_body["activities"][0]["title"], "Louvre Museum");
    assert_eq!(itinerary_body["activities"][0]["type"], "sightseeing");
}
