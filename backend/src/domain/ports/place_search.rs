//! Driving port for place autocompletion.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::Error;

/// Domain use-case port for looking up places by free text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    /// # Errors
    ///
    /// Returns invalid request for a blank query and internal errors for
    /// provider or configuration failures.
    async fn autocomplete(&self, raw_query: &str) -> Result<Vec<Value>, Error>;
}

/// Fixture that validates the query and returns no predictions.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePlaceSearch;

#[async_trait]
impl PlaceSearch for FixturePlaceSearch {
    async fn autocomplete(&self, raw_query: &str) -> Result<Vec<Value>, Error> {
        if raw_query.trim().is_empty() {
            return Err(Error::invalid_request("Query required"));
        }
        Ok(Vec::new())
    }
}
