//! Demo seeding against the real services over in-memory storage.

use std::sync::Arc;

use chrono::{Duration, Utc};
use mockable::{Clock, DefaultClock};

use trip_planner::domain::ports::{AuthCommand, TripQuery};
use trip_planner::domain::{
    AuthService, DEMO_EMAIL, DEMO_NAME, DEMO_PASSWORD, DEMO_TRIP_TITLE, DemoSeedOutcome,
    DemoSeeder, Registration, TripService,
};
use trip_planner::outbound::memory::{InMemoryTripRepository, InMemoryUserRepository};
use trip_planner::outbound::security::{BcryptPasswordHasher, JwtTokenCodec};

const SECRET: &[u8] = b"integration-test-secret-0123456789";

type Auth = AuthService<InMemoryUserRepository, BcryptPasswordHasher, JwtTokenCodec>;
type Trips = TripService<InMemoryTripRepository>;

fn services() -> (Auth, Trips) {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let auth = AuthService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(BcryptPasswordHasher::new(4)),
        Arc::new(JwtTokenCodec::new(SECRET, Duration::days(7), Arc::clone(&clock))),
    );
    let trips = TripService::new(Arc::new(InMemoryTripRepository::new()), clock);
    (auth, trips)
}

#[tokio::test]
async fn seeding_twice_writes_once() {
    let (auth, trips) = services();
    let seeder = DemoSeeder::new(&auth, &trips, &trips);

    let first = seeder.seed(Utc::now()).await.expect("first seed");
    let second = seeder.seed(Utc::now()).await.expect("second seed");

    let DemoSeedOutcome::Seeded { user_id, .. } = first else {
        panic!("expected a fresh seed, got {first:?}");
    };
    assert_eq!(second, DemoSeedOutcome::AlreadyPresent);
    assert_eq!(trips.list_trips(&user_id).await.expect("trips").len(), 1);
}

#[tokio::test]
async fn seeding_completes_an_account_left_without_its_trip() {
    let (auth, trips) = services();
    let registration =
        Registration::try_from_parts(DEMO_NAME, DEMO_EMAIL, DEMO_PASSWORD).expect("registration");
    let session = auth.register(registration).await.expect("register");

    let outcome = DemoSeeder::new(&auth, &trips, &trips)
        .seed(Utc::now())
        .await
        .expect("seed");

    let owner = *session.user.id();
    assert!(matches!(
        outcome,
        DemoSeedOutcome::Completed { user_id, .. } if user_id == owner
    ));
    let listed = trips.list_trips(&owner).await.expect("trips");
    assert_eq!(listed.len(), 1);
    let trip = listed.first().expect("demo trip");
    assert_eq!(trip.title(), DEMO_TRIP_TITLE);
    assert_eq!(trip.activities().len(), 3);
    assert_eq!(trip.expenses().len(), 3);
}
