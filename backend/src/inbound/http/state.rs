//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AuthCommand, FixtureAuthCommand, FixturePlaceSearch, FixtureTokenVerifier,
    FixtureTripCommand, FixtureTripQuery, PlaceSearch, TokenVerifier, TripCommand, TripQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub auth: Arc<dyn AuthCommand>,
    pub tokens: Arc<dyn TokenVerifier>,
    pub trips: Arc<dyn TripCommand>,
    pub trips_query: Arc<dyn TripQuery>,
    pub places: Arc<dyn PlaceSearch>,
}

impl Default for HttpStatePorts {
    fn default() -> Self {
        Self {
            auth: Arc::new(FixtureAuthCommand),
            tokens: Arc::new(FixtureTokenVerifier),
            trips: Arc::new(FixtureTripCommand),
            trips_query: Arc::new(FixtureTripQuery),
            places: Arc::new(FixturePlaceSearch),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<dyn AuthCommand>,
    pub tokens: Arc<dyn TokenVerifier>,
    pub trips: Arc<dyn TripCommand>,
    pub trips_query: Arc<dyn TripQuery>,
    pub places: Arc<dyn PlaceSearch>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use trip_planner::domain::ports::FixturePlaceSearch;
    /// use trip_planner::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let state = HttpState::new(HttpStatePorts {
    ///     places: Arc::new(FixturePlaceSearch),
    ///     ..HttpStatePorts::default()
    /// });
    /// let _places = state.places.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            auth,
            tokens,
            trips,
            trips_query,
            places,
        } = ports;
        Self {
            auth,
            tokens,
            trips,
            trips_query,
            places,
        }
    }
}
