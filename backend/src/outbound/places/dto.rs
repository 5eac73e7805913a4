//! Wire shape of the autocomplete response.
//!
//! Only `predictions` is passed on; `status` and `error_message` are read for
//! logging.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub(super) struct AutocompleteResponseDto {
    #[serde(default)]
    pub(super) predictions: Vec<Value>,
    pub(super) status: Option<String>,
    pub(super) error_message: Option<String>,
}

impl AutocompleteResponseDto {
    /// Provider-level failure reported inside a 200 response.
    pub(super) fn provider_failure(&self) -> Option<String> {
        match self.status.as_deref() {
            None | Some("OK" | "ZERO_RESULTS") => None,
            Some(status) => Some(match &self.error_message {
                Some(message) => format!("{status}: {message}"),
                None => status.to_owned(),
            }),
        }
    }
}
