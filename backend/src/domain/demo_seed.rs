//! Demo account seeding.
//!
//! Creates the demo user with a sample "Paris Getaway" trip through the
//! regular driving ports, so seeded data obeys the same rules as user data.
//! When the demo email is already registered the seeder logs in with the demo
//! credentials and fills in whatever an interrupted earlier run left out.

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use crate::domain::ports::{AuthCommand, TripCommand, TripQuery};
use crate::domain::{
    Activity, ActivityDraft, ActivityKind, Destination, DestinationDraft, Error, ErrorCode,
    ExpenseDraft, LoginCredentials, NewTrip, Registration, Trip, TripId, UserId,
    validation_failure,
};

pub const DEMO_NAME: &str = "Demo User";
pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "password123";
pub const DEMO_TRIP_TITLE: &str = "Paris Getaway";

/// Outcome of a seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoSeedOutcome {
    /// The demo account and trip were created.
    Seeded { user_id: UserId, trip_id: TripId },
    /// The account existed but its trip was missing or incomplete; the gaps
    /// were filled in.
    Completed { user_id: UserId, trip_id: TripId },
    /// The demo data is already in place, or the demo email belongs to an
    /// account with other credentials. Nothing was written.
    AlreadyPresent,
}

/// Seeds the demo account via the auth and trip ports.
pub struct DemoSeeder<'a> {
    auth: &'a dyn AuthCommand,
    trips: &'a dyn TripCommand,
    trips_query: &'a dyn TripQuery,
}

struct ActivitySeed {
    id: &'static str,
    title: &'static str,
    time: &'static str,
    notes: Option<&'static str>,
    day: i64,
    kind: ActivityKind,
}

const ACTIVITIES: [ActivitySeed; 3] = [
    ActivitySeed {
        id: "a1",
        title: "Louvre Museum",
        time: "10:00",
        notes: Some("Skip-the-line"),
        day: 1,
        kind: ActivityKind::Sightseeing,
    },
    ActivitySeed {
        id: "a2",
        title: "Eiffel Tower Night View",
        time: "20:00",
        notes: None,
        day: 1,
        kind: ActivityKind::Sightseeing,
    },
    ActivitySeed {
        id: "a3",
        title: "Seine River Cruise",
        time: "18:00",
        notes: None,
        day: 2,
        kind: ActivityKind::Travel,
    },
];

const EXPENSES: [(&str, &str, f64); 3] = [
    ("e1", "Flights", 550.0),
    ("e2", "Food", 120.0),
    ("e3", "Activities", 90.0),
];

fn paris(now: DateTime<Utc>) -> Result<Destination, Error> {
    Destination::try_from(DestinationDraft {
        name: "Paris".to_owned(),
        place_id: Some("ChIJD7fiBh9u5kcRYJSMaMOCCwQ".to_owned()),
        lat: Some(48.8566),
        lng: Some(2.3522),
        start_date: now,
        end_date: now + Duration::days(3),
    })
    .map_err(|err| validation_failure(&err))
}

fn activity(seed: &ActivitySeed) -> Result<Activity, Error> {
    Activity::try_from(ActivityDraft {
        id: seed.id.to_owned(),
        title: seed.title.to_owned(),
        time: Some(seed.time.to_owned()),
        notes: seed.notes.map(str::to_owned),
        day: seed.day,
        kind: seed.kind,
        completed: false,
    })
    .map_err(|err| validation_failure(&err))
}

fn has_activity(trip: &Trip, id: &str) -> bool {
    trip.activities()
        .iter()
        .any(|activity| activity.id().as_ref() == id)
}

fn has_expense(trip: &Trip, id: &str) -> bool {
    trip.expenses()
        .iter()
        .any(|expense| expense.id().as_ref() == id)
}

fn is_complete(trip: &Trip) -> bool {
    ACTIVITIES.iter().all(|seed| has_activity(trip, seed.id))
        && EXPENSES.iter().all(|(id, _, _)| has_expense(trip, id))
}

impl<'a> DemoSeeder<'a> {
    pub fn new(
        auth: &'a dyn AuthCommand,
        trips: &'a dyn TripCommand,
        trips_query: &'a dyn TripQuery,
    ) -> Self {
        Self {
            auth,
            trips,
            trips_query,
        }
    }

    /// Create the demo account and trip, or complete a partial earlier seed.
    pub async fn seed(&self, now: DateTime<Utc>) -> Result<DemoSeedOutcome, Error> {
        let registration = Registration::try_from_parts(DEMO_NAME, DEMO_EMAIL, DEMO_PASSWORD)
            .map_err(|err| Error::internal(format!("invalid demo registration: {err}")))?;
        let session = match self.auth.register(registration).await {
            Ok(session) => session,
            Err(err) if err.code() == ErrorCode::Conflict => return self.resume(now).await,
            Err(err) => return Err(err),
        };
        let owner = *session.user.id();
        let trip_id = self.fill_trip(&owner, None, now).await?;

        info!(user_id = %owner, %trip_id, "demo data seeded");
        Ok(DemoSeedOutcome::Seeded {
            user_id: owner,
            trip_id,
        })
    }

    async fn resume(&self, now: DateTime<Utc>) -> Result<DemoSeedOutcome, Error> {
        let credentials = LoginCredentials::try_from_parts(DEMO_EMAIL, DEMO_PASSWORD)
            .map_err(|err| Error::internal(format!("invalid demo credentials: {err}")))?;
        let owner = match self.auth.login(credentials).await {
            Ok(session) => *session.user.id(),
            Err(err) if err.code() == ErrorCode::Unauthorized => {
                info!("demo email registered with other credentials; skipping seed");
                return Ok(DemoSeedOutcome::AlreadyPresent);
            }
            Err(err) => return Err(err),
        };

        let existing = self
            .trips_query
            .list_trips(&owner)
            .await?
            .into_iter()
            .find(|trip| trip.title() == DEMO_TRIP_TITLE);
        if existing.as_ref().is_some_and(is_complete) {
            info!("demo data already present; skipping seed");
            return Ok(DemoSeedOutcome::AlreadyPresent);
        }

        warn!(user_id = %owner, "demo data incomplete; resuming seed");
        let trip_id = self.fill_trip(&owner, existing, now).await?;
        info!(user_id = %owner, %trip_id, "demo data completed");
        Ok(DemoSeedOutcome::Completed {
            user_id: owner,
            trip_id,
        })
    }

    /// Add every seed activity and expense missing from `existing`, creating
    /// the trip first when there is none.
    async fn fill_trip(
        &self,
        owner: &UserId,
        existing: Option<Trip>,
        now: DateTime<Utc>,
    ) -> Result<TripId, Error> {
        let trip = match existing {
            Some(trip) => trip,
            None => {
                self.trips
                    .create_trip(
                        owner,
                        NewTrip {
                            title: DEMO_TRIP_TITLE.to_owned(),
                            destinations: vec![paris(now)?],
                            trip_start_date: Some(now),
                            trip_end_date: Some(now + Duration::days(3)),
                        },
                    )
                    .await?
            }
        };
        let trip_id = *trip.id();

        for seed in ACTIVITIES.iter().filter(|seed| !has_activity(&trip, seed.id)) {
            self.trips
                .add_activity(owner, &trip_id, activity(seed)?)
                .await?;
        }
        for (id, category, amount) in EXPENSES
            .into_iter()
            .filter(|(id, _, _)| !has_expense(&trip, id))
        {
            self.trips
                .add_expense(
                    owner,
                    &trip_id,
                    ExpenseDraft {
                        id: id.to_owned(),
                        category: category.to_owned(),
                        amount,
                        currency: Some("USD".to_owned()),
                        notes: None,
                        date: None,
                    },
                )
                .await?;
        }
        Ok(trip_id)
    }
}
