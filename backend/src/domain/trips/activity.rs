//! Itinerary activities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validation::ActivityValidationError;

/// Caller-supplied activity identifier, unique within its trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActivityId(String);

impl ActivityId {
    /// Validate and construct an [`ActivityId`].
    pub fn new(id: impl AsRef<str>) -> Result<Self, ActivityValidationError> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ActivityValidationError::EmptyId);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ActivityId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ActivityId {
    type Error = ActivityValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ActivityId> for String {
    fn from(value: ActivityId) -> Self {
        value.0
    }
}

/// Activity category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Food,
    Travel,
    Sightseeing,
    Stay,
    #[default]
    Other,
}

impl ActivityKind {
    /// Wire name of the kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Travel => "travel",
            Self::Sightseeing => "sightseeing",
            Self::Stay => "stay",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = ActivityValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "food" => Ok(Self::Food),
            "travel" => Ok(Self::Travel),
            "sightseeing" => Ok(Self::Sightseeing),
            "stay" => Ok(Self::Stay),
            "other" => Ok(Self::Other),
            other => Err(ActivityValidationError::UnknownKind {
                value: other.to_owned(),
            }),
        }
    }
}

/// Raw activity fields before validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDraft {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub day: i64,
    #[serde(rename = "type", default)]
    pub kind: ActivityKind,
    #[serde(default)]
    pub completed: bool,
}

/// A validated itinerary activity.
///
/// ## Invariants
/// - `id` and `title` are non-empty once trimmed.
/// - `day` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    id: ActivityId,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    day: u32,
    #[serde(rename = "type")]
    kind: ActivityKind,
    completed: bool,
}

impl Activity {
    pub fn id(&self) -> &ActivityId {
        &self.id
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn time(&self) -> Option<&str> {
        self.time.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn kind(&self) -> ActivityKind {
        self.kind
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub(crate) fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}

impl TryFrom<ActivityDraft> for Activity {
    type Error = ActivityValidationError;

    fn try_from(draft: ActivityDraft) -> Result<Self, Self::Error> {
        let ActivityDraft {
            id,
            title,
            time,
            notes,
            day,
            kind,
            completed,
        } = draft;

        let id = ActivityId::new(id)?;
        let title = title.trim();
        if title.is_empty() {
            return Err(ActivityValidationError::EmptyTitle);
        }
        let day = u32::try_from(day)
            .ok()
            .filter(|day| *day >= 1)
            .ok_or(ActivityValidationError::DayOutOfRange { value: day })?;

        Ok(Self {
            id,
            title: title.to_owned(),
            time,
            notes,
            day,
            kind,
            completed,
        })
    }
}
