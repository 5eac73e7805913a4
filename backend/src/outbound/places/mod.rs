//! Google Places autocomplete adapter.

mod dto;
mod google_source;

pub use google_source::{DEFAULT_PLACES_ENDPOINT, GooglePlacesSource};
