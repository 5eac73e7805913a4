//! Reqwest-backed [`PlaceSource`] calling the Google Places autocomplete API.
//!
//! Queries are restricted to cities. Predictions are returned verbatim.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use tracing::debug;
use zeroize::Zeroizing;

use super::dto::AutocompleteResponseDto;
use crate::domain::ports::{PlaceQuery, PlaceSource, PlaceSourceError};

/// Public Google Places autocomplete endpoint.
pub const DEFAULT_PLACES_ENDPOINT: &str =
    "https://maps.googleapis.com/maps/api/place/autocomplete/json";

const PLACE_TYPES: &str = "(cities)";
const PREVIEW_CHAR_LIMIT: usize = 160;

/// Place source backed by one autocomplete endpoint.
pub struct GooglePlacesSource {
    client: Client,
    endpoint: Url,
    api_key: Option<Zeroizing<String>>,
}

impl GooglePlacesSource {
    /// Build the adapter. Without an `api_key` every lookup fails with
    /// [`PlaceSourceError::NotConfigured`].
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key
                .filter(|key| !key.trim().is_empty())
                .map(Zeroizing::new),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl PlaceSource for GooglePlacesSource {
    async fn autocomplete(&self, query: &PlaceQuery) -> Result<Vec<Value>, PlaceSourceError> {
        let api_key = self.api_key.as_ref().ok_or(PlaceSourceError::NotConfigured)?;
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("input", query.as_str()),
                ("types", PLACE_TYPES),
                ("key", api_key.as_str()),
            ])
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_predictions(body.as_ref())
    }
}

fn parse_predictions(body: &[u8]) -> Result<Vec<Value>, PlaceSourceError> {
    let decoded: AutocompleteResponseDto = serde_json::from_slice(body).map_err(|error| {
        PlaceSourceError::decode(format!("invalid autocomplete payload: {error}"))
    })?;
    if let Some(failure) = decoded.provider_failure() {
        debug!(status = %failure, "places provider reported a non-OK status");
    }
    Ok(decoded.predictions)
}

// reqwest errors embed the request URL, which carries the API key.
fn map_transport_error(error: reqwest::Error) -> PlaceSourceError {
    let error = error.without_url();
    if error.is_timeout() {
        PlaceSourceError::timeout(error.to_string())
    } else {
        PlaceSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> PlaceSourceError {
    PlaceSourceError::status(status.as_u16(), body_preview(body))
}

fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn endpoint() -> Url {
        Url::parse(DEFAULT_PLACES_ENDPOINT).expect("valid endpoint")
    }

    #[tokio::test]
    async fn missing_key_reports_not_configured() {
        let source =
            GooglePlacesSource::new(endpoint(), None, Duration::from_secs(1)).expect("client");
        let query = PlaceQuery::new("Paris").expect("query");

        assert!(!source.is_configured());
        assert_eq!(
            source.autocomplete(&query).await,
            Err(PlaceSourceError::NotConfigured)
        );
    }

    #[rstest]
    #[case(Some("   ".to_owned()), false)]
    #[case(Some("key-123".to_owned()), true)]
    fn blank_keys_count_as_missing(#[case] key: Option<String>, #[case] configured: bool) {
        let source =
            GooglePlacesSource::new(endpoint(), key, Duration::from_secs(1)).expect("client");
        assert_eq!(source.is_configured(), configured);
    }

    #[rstest]
    fn predictions_are_passed_through() {
        let body = json!({
            "status": "OK",
            "predictions": [{"description": "Paris, France", "place_id": "abc"}]
        });
        let predictions =
            parse_predictions(body.to_string().as_bytes()).expect("decode predictions");

        assert_eq!(
            predictions,
            vec![json!({"description": "Paris, France", "place_id": "abc"})]
        );
    }

    #[rstest]
    #[case(json!({"status": "ZERO_RESULTS"}))]
    #[case(json!({"status": "REQUEST_DENIED", "error_message": "bad key"}))]
    #[case(json!({}))]
    fn missing_predictions_default_to_empty(#[case] body: Value) {
        let predictions = parse_predictions(body.to_string().as_bytes()).expect("decode");
        assert!(predictions.is_empty());
    }

    #[rstest]
    fn invalid_json_is_a_decode_error() {
        let err = parse_predictions(b"<html>").expect_err("not json");
        assert!(matches!(err, PlaceSourceError::Decode { .. }));
    }

    #[rstest]
    fn status_errors_carry_a_compact_preview() {
        let body = format!("  quota\n exceeded {}", "x".repeat(400));
        let err = map_status_error(StatusCode::FORBIDDEN, body.as_bytes());

        let PlaceSourceError::Status { status, message } = err else {
            panic!("expected status error");
        };
        assert_eq!(status, 403);
        assert!(message.starts_with("quota exceeded"));
        assert!(message.ends_with("..."));
    }
}
