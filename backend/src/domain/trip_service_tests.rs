//! Tests for the trip service.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockTripRepository;
use crate::domain::{ActivityDraft, ActivityKind, ErrorCode};

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn make_service(repo: MockTripRepository) -> TripService<MockTripRepository> {
    TripService::new(
        Arc::new(repo),
        Arc::new(FixtureClock {
            utc_now: fixture_now(),
        }),
    )
}

fn activity(id: &str) -> Activity {
    Activity::try_from(ActivityDraft {
        id: id.to_owned(),
        title: "Louvre Museum".to_owned(),
        time: None,
        notes: None,
        day: 1,
        kind: ActivityKind::Sightseeing,
        completed: false,
    })
    .expect("valid activity")
}

fn expense_draft(id: &str, amount: f64) -> ExpenseDraft {
    ExpenseDraft {
        id: id.to_owned(),
        category: "Flights".to_owned(),
        amount,
        currency: None,
        notes: None,
        date: None,
    }
}

#[fixture]
fn owner() -> UserId {
    UserId::random()
}

fn stored_trip(owner: UserId) -> Trip {
    Trip::create(
        owner,
        NewTrip {
            title: "Paris Getaway".to_owned(),
            destinations: Vec::new(),
            trip_start_date: None,
            trip_end_date: None,
        },
        fixture_now(),
    )
    .expect("valid trip")
}

fn expect_load(repo: &mut MockTripRepository, trip: Option<Trip>) {
    repo.expect_find_for_owner()
        .times(1)
        .return_once(move |_, _| Ok(trip));
}

#[rstest]
#[tokio::test]
async fn create_trip_persists_empty_aggregate(owner: UserId) {
    let mut repo = MockTripRepository::new();
    repo.expect_create()
        .withf(move |trip: &Trip| trip.is_owned_by(&owner) && trip.revision() == 1)
        .times(1)
        .return_once(|_| Ok(()));

    let trip = make_service(repo)
        .create_trip(
            &owner,
            NewTrip {
                title: "Paris Getaway".to_owned(),
                destinations: Vec::new(),
                trip_start_date: None,
                trip_end_date: None,
            },
        )
        .await
        .expect("trip created");

    assert!(trip.activities().is_empty());
    assert!(trip.expenses().is_empty());
    assert_eq!(trip.created_at(), fixture_now());
}

#[rstest]
#[tokio::test]
async fn create_trip_rejects_short_title(owner: UserId) {
    let mut repo = MockTripRepository::new();
    repo.expect_create().times(0);

    let err = make_service(repo)
        .create_trip(
            &owner,
            NewTrip {
                title: " P ".to_owned(),
                destinations: Vec::new(),
                trip_start_date: None,
                trip_end_date: None,
            },
        )
        .await
        .expect_err("title too short");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    let details = err.details().expect("details");
    assert_eq!(details["field"], "title");
}

#[rstest]
#[tokio::test]
async fn get_trip_reports_missing_trip_as_not_found(owner: UserId) {
    let mut repo = MockTripRepository::new();
    expect_load(&mut repo, None);

    let err = make_service(repo)
        .get_trip(&owner, &TripId::random())
        .await
        .expect_err("missing trip");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "Trip not found");
}

#[rstest]
#[tokio::test]
async fn add_activity_saves_with_expected_revision(owner: UserId) {
    let trip = stored_trip(owner);
    let trip_id = *trip.id();
    let mut repo = MockTripRepository::new();
    expect_load(&mut repo, Some(trip));
    repo.expect_save()
        .withf(|trip: &Trip, expected: &u32| {
            *expected == 1 && trip.revision() == 2 && trip.updated_at() == fixture_now()
        })
        .times(1)
        .return_once(|_, _| Ok(()));

    let activities = make_service(repo)
        .add_activity(&owner, &trip_id, activity("a1"))
        .await
        .expect("activity added");

    assert_eq!(activities, vec![activity("a1")]);
}

#[rstest]
#[tokio::test]
async fn add_activity_rejects_duplicate_id_without_saving(owner: UserId) {
    let mut trip = stored_trip(owner);
    trip.add_activity(activity("a1")).expect("seed activity");
    let trip_id = *trip.id();
    let mut repo = MockTripRepository::new();
    expect_load(&mut repo, Some(trip));
    repo.expect_save().times(0);

    let err = make_service(repo)
        .add_activity(&owner, &trip_id, activity("a1"))
        .await
        .expect_err("duplicate");

    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn reorder_rejects_unknown_ids(owner: UserId) {
    let mut trip = stored_trip(owner);
    trip.add_activity(activity("a1")).expect("seed activity");
    let trip_id = *trip.id();
    let mut repo = MockTripRepository::new();
    expect_load(&mut repo, Some(trip));
    repo.expect_save().times(0);

    let err = make_service(repo)
        .reorder_activities(&owner, &trip_id, vec![activity("zz")])
        .await
        .expect_err("not a permutation");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn add_expense_defaults_date_to_clock(owner: UserId) {
    let trip = stored_trip(owner);
    let trip_id = *trip.id();
    let mut repo = MockTripRepository::new();
    expect_load(&mut repo, Some(trip));
    repo.expect_save().times(1).return_once(|_, _| Ok(()));

    let expenses = make_service(repo)
        .add_expense(&owner, &trip_id, expense_draft("e1", 550.0))
        .await
        .expect("expense added");

    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].date(), fixture_now());
    assert_eq!(expenses[0].currency().as_ref(), "USD");
}

#[rstest]
#[tokio::test]
async fn add_expense_validates_before_loading(owner: UserId) {
    let mut repo = MockTripRepository::new();
    repo.expect_find_for_owner().times(0);

    let err = make_service(repo)
        .add_expense(&owner, &TripId::random(), expense_draft("e1", -5.0))
        .await
        .expect_err("negative amount");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn update_notes_returns_current_values(owner: UserId) {
    let trip = stored_trip(owner);
    let trip_id = *trip.id();
    let mut repo = MockTripRepository::new();
    expect_load(&mut repo, Some(trip));
    repo.expect_save().times(1).return_once(|_, _| Ok(()));

    let notes = make_service(repo)
        .update_notes(
            &owner,
            &trip_id,
            NotesUpdate {
                notes: None,
                highlights: Some("Sunset at Trocadero".to_owned()),
            },
        )
        .await
        .expect("notes updated");

    assert_eq!(notes.notes, None);
    assert_eq!(notes.highlights.as_deref(), Some("Sunset at Trocadero"));
}

#[rstest]
#[tokio::test]
async fn completion_of_unknown_activity_is_not_found(owner: UserId) {
    let trip = stored_trip(owner);
    let trip_id = *trip.id();
    let mut repo = MockTripRepository::new();
    expect_load(&mut repo, Some(trip));
    repo.expect_save().times(0);

    let err = make_service(repo)
        .set_activity_completion(
            &owner,
            &trip_id,
            &ActivityId::new("missing").expect("valid id"),
            true,
        )
        .await
        .expect_err("unknown activity");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "Activity not found");
}

#[rstest]
#[tokio::test]
async fn concurrent_modification_surfaces_conflict(owner: UserId) {
    let trip = stored_trip(owner);
    let trip_id = *trip.id();
    let mut repo = MockTripRepository::new();
    expect_load(&mut repo, Some(trip));
    repo.expect_save()
        .times(1)
        .return_once(|_, _| Err(TripRepositoryError::revision_mismatch(1_u32, 2_u32)));

    let err = make_service(repo)
        .add_activity(&owner, &trip_id, activity("a1"))
        .await
        .expect_err("lost update");

    assert_eq!(err.code(), ErrorCode::Conflict);
    let details = err.details().expect("details");
    assert_eq!(details["expectedRevision"], 1);
    assert_eq!(details["actualRevision"], 2);
}

#[rstest]
#[case(true, None)]
#[case(false, Some(ErrorCode::NotFound))]
#[tokio::test]
async fn delete_trip_requires_owned_row(
    owner: UserId,
    #[case] removed: bool,
    #[case] expected: Option<ErrorCode>,
) {
    let mut repo = MockTripRepository::new();
    repo.expect_delete_for_owner()
        .times(1)
        .return_once(move |_, _| Ok(removed));

    let result = make_service(repo)
        .delete_trip(&owner, &TripId::random())
        .await;

    assert_eq!(result.err().map(|err| err.code()), expected);
}

#[rstest]
#[tokio::test]
async fn projections_return_sequences_verbatim(owner: UserId) {
    let mut trip = stored_trip(owner);
    trip.add_activity(activity("a1")).expect("a1");
    trip.add_activity(activity("a2")).expect("a2");
    let trip_id = *trip.id();
    let copy = trip.clone();
    let mut repo = MockTripRepository::new();
    repo.expect_find_for_owner()
        .times(2)
        .returning(move |_, _| Ok(Some(copy.clone())));

    let service = make_service(repo);
    let itinerary = service.itinerary(&owner, &trip_id).await.expect("itinerary");
    let budget = service.budget(&owner, &trip_id).await.expect("budget");

    assert_eq!(itinerary, trip.activities());
    assert!(budget.is_empty());
}
