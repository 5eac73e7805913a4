//! Wiring of domain services onto the configured adapters.

use std::sync::Arc;
use std::time::Duration;

use mockable::Clock;

use trip_planner::domain::ports::{PlaceSearch, TripRepository, UserRepository};
use trip_planner::domain::{AuthService, PlaceSearchService, TripService};
use trip_planner::inbound::http::state::HttpStatePorts;
use trip_planner::outbound::memory::{InMemoryTripRepository, InMemoryUserRepository};
use trip_planner::outbound::persistence::{DbPool, DieselTripRepository, DieselUserRepository};
use trip_planner::outbound::places::GooglePlacesSource;
use trip_planner::outbound::security::{BcryptPasswordHasher, JwtTokenCodec};
use trip_planner::settings::{AppSettings, SettingsError, TokenSettings};

const PLACES_TIMEOUT: Duration = Duration::from_secs(10);

/// Where users and trips are stored.
pub(crate) enum Storage {
    Postgres(DbPool),
    Memory,
}

/// Errors raised while assembling adapters.
#[derive(Debug, thiserror::Error)]
pub(crate) enum StateBuildError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("failed to build places HTTP client: {0}")]
    PlacesClient(#[from] reqwest::Error),
}

struct Security {
    hasher: Arc<BcryptPasswordHasher>,
    tokens: Arc<JwtTokenCodec>,
}

fn assemble<U, R>(
    users: Arc<U>,
    trips: Arc<R>,
    security: Security,
    places: Arc<dyn PlaceSearch>,
    clock: Arc<dyn Clock>,
) -> HttpStatePorts
where
    U: UserRepository + 'static,
    R: TripRepository + 'static,
{
    let auth = Arc::new(AuthService::new(users, security.hasher, security.tokens));
    let trip_service = Arc::new(TripService::new(trips, clock));
    HttpStatePorts {
        auth: auth.clone(),
        tokens: auth,
        trips: trip_service.clone(),
        trips_query: trip_service,
        places,
    }
}

/// Build every driving port for the HTTP adapter.
pub(crate) fn build_http_ports(
    settings: &AppSettings,
    token_settings: &TokenSettings,
    storage: &Storage,
    clock: Arc<dyn Clock>,
) -> Result<HttpStatePorts, StateBuildError> {
    let security = Security {
        hasher: Arc::new(BcryptPasswordHasher::new(settings.bcrypt_cost)),
        tokens: Arc::new(JwtTokenCodec::new(
            token_settings.secret.as_slice(),
            token_settings.ttl,
            Arc::clone(&clock),
        )),
    };
    let places_source = GooglePlacesSource::new(
        settings.places_endpoint()?,
        settings.places_api_key.clone(),
        PLACES_TIMEOUT,
    )?;
    let places: Arc<dyn PlaceSearch> =
        Arc::new(PlaceSearchService::new(Arc::new(places_source)));

    Ok(match storage {
        Storage::Postgres(pool) => assemble(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselTripRepository::new(pool.clone())),
            security,
            places,
            clock,
        ),
        Storage::Memory => assemble(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryTripRepository::new()),
            security,
            places,
            clock,
        ),
    })
}
