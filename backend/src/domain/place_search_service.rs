//! Place autocompletion service.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::Error;
use crate::domain::ports::{PlaceQuery, PlaceSearch, PlaceSource, PlaceSourceError};

/// Reported verbatim to clients when no Places API key is configured.
pub const PLACES_NOT_CONFIGURED: &str = "Places API key not configured";

/// Service implementing [`PlaceSearch`] over a [`PlaceSource`].
#[derive(Clone)]
pub struct PlaceSearchService<S> {
    source: Arc<S>,
}

impl<S> PlaceSearchService<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }
}

fn map_source_error(error: PlaceSourceError) -> Error {
    match error {
        PlaceSourceError::NotConfigured => Error::internal(PLACES_NOT_CONFIGURED),
        other => {
            warn!(error = %other, "places provider failed");
            Error::internal(format!("places lookup failed: {other}"))
        }
    }
}

#[async_trait]
impl<S> PlaceSearch for PlaceSearchService<S>
where
    S: PlaceSource,
{
    async fn autocomplete(&self, raw_query: &str) -> Result<Vec<Value>, Error> {
        let query =
            PlaceQuery::new(raw_query).ok_or_else(|| Error::invalid_request("Query required"))?;
        let predictions = self
            .source
            .autocomplete(&query)
            .await
            .map_err(map_source_error)?;
        debug!(count = predictions.len(), "place predictions fetched");
        Ok(predictions)
    }
}
