//! Driven port for third-party place autocompletion.

use async_trait::async_trait;
use serde_json::Value;

use super::define_port_error;

/// Non-blank free-text place query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceQuery(String);

impl PlaceQuery {
    /// Trim `raw`, returning `None` when nothing remains.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

define_port_error! {
    /// Errors surfaced while calling the places provider.
    pub enum PlaceSourceError {
        /// No provider API key is configured.
        NotConfigured => "places API key not configured",
        /// Network transport failed before a response arrived.
        Transport { message: String } => "places transport failed: {message}",
        /// Provider call exceeded its timeout.
        Timeout { message: String } => "places request timed out: {message}",
        /// Provider answered with a non-success status.
        Status { status: u16, message: String } =>
            "places provider returned {status}: {message}",
        /// Provider response could not be decoded.
        Decode { message: String } => "places response decode failed: {message}",
    }
}

/// Port returning raw provider predictions for a query.
///
/// Predictions are passed through unchanged; the provider's schema is not
/// modelled.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaceSource: Send + Sync {
    async fn autocomplete(&self, query: &PlaceQuery) -> Result<Vec<Value>, PlaceSourceError>;
}

/// Fixture with no predictions.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePlaceSource;

#[async_trait]
impl PlaceSource for FixturePlaceSource {
    async fn autocomplete(&self, _query: &PlaceQuery) -> Result<Vec<Value>, PlaceSourceError> {
        Ok(Vec::new())
    }
}
