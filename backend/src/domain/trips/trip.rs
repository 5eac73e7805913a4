//! The trip aggregate root.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::activity::{Activity, ActivityId};
use super::destination::Destination;
use super::expense::Expense;
use super::validation::{TripUpdateError, TripValidationError};
use crate::domain::UserId;

/// Minimum title length once trimmed.
pub const TITLE_MIN: usize = 2;

/// Server-generated trip identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct TripId(Uuid);

impl TripId {
    /// Generate a new random [`TripId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TripId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl From<TripId> for String {
    fn from(value: TripId) -> Self {
        value.to_string()
    }
}

/// Input accepted by trip creation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrip {
    pub title: String,
    pub destinations: Vec<Destination>,
    pub trip_start_date: Option<DateTime<Utc>>,
    pub trip_end_date: Option<DateTime<Utc>>,
}

/// Partial notes update; `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotesUpdate {
    pub notes: Option<String>,
    pub highlights: Option<String>,
}

/// Current notes and highlights of a trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripNotes {
    pub notes: Option<String>,
    pub highlights: Option<String>,
}

/// Every field of a trip, used to rebuild an aggregate from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct TripDraft {
    pub id: TripId,
    pub owner_id: UserId,
    pub title: String,
    pub trip_start_date: Option<DateTime<Utc>>,
    pub trip_end_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub highlights: Option<String>,
    pub destinations: Vec<Destination>,
    pub activities: Vec<Activity>,
    pub expenses: Vec<Expense>,
    pub collaborators: Vec<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub revision: u32,
}

/// A trip together with its destinations, activities and expenses.
///
/// The aggregate is loaded, mutated and persisted as one unit. Activities and
/// expenses keep insertion order. `revision` starts at 1 and increases by one
/// on every persisted mutation; repositories use it for optimistic
/// concurrency.
///
/// ## Invariants
/// - `title` has at least [`TITLE_MIN`] characters once trimmed.
/// - `trip_start_date <= trip_end_date` when both are present.
/// - Activity ids and expense ids are unique within the trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    id: TripId,
    owner_id: UserId,
    title: String,
    trip_start_date: Option<DateTime<Utc>>,
    trip_end_date: Option<DateTime<Utc>>,
    notes: Option<String>,
    highlights: Option<String>,
    destinations: Vec<Destination>,
    activities: Vec<Activity>,
    expenses: Vec<Expense>,
    collaborators: Vec<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    revision: u32,
}

fn validate_title(title: &str) -> Result<String, TripValidationError> {
    let trimmed = title.trim();
    if trimmed.chars().count() < TITLE_MIN {
        return Err(TripValidationError::TitleTooShort { min: TITLE_MIN });
    }
    Ok(trimmed.to_owned())
}

fn validate_window(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<(), TripValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(TripValidationError::DatesOutOfOrder),
        _ => Ok(()),
    }
}

fn first_duplicate<'a, I>(ids: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    ids.into_iter().find(|id| !seen.insert(*id))
}

impl Trip {
    /// Rebuild a trip from its stored fields, checking every invariant.
    pub fn new(draft: TripDraft) -> Result<Self, TripValidationError> {
        let TripDraft {
            id,
            owner_id,
            title,
            trip_start_date,
            trip_end_date,
            notes,
            highlights,
            destinations,
            activities,
            expenses,
            collaborators,
            created_at,
            updated_at,
            revision,
        } = draft;

        let title = validate_title(&title)?;
        validate_window(trip_start_date, trip_end_date)?;
        if let Some(id) = first_duplicate(activities.iter().map(|a| a.id().as_ref())) {
            return Err(TripValidationError::DuplicateActivityId { id: id.to_owned() });
        }
        if let Some(id) = first_duplicate(expenses.iter().map(|e| e.id().as_ref())) {
            return Err(TripValidationError::DuplicateExpenseId { id: id.to_owned() });
        }

        Ok(Self {
            id,
            owner_id,
            title,
            trip_start_date,
            trip_end_date,
            notes,
            highlights,
            destinations,
            activities,
            expenses,
            collaborators,
            created_at,
            updated_at,
            revision,
        })
    }

    /// Start a new, empty trip owned by `owner_id`.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use trip_planner::domain::{NewTrip, Trip, UserId};
    ///
    /// let trip = Trip::create(
    ///     UserId::random(),
    ///     NewTrip {
    ///         title: "Paris Getaway".to_owned(),
    ///         destinations: Vec::new(),
    ///         trip_start_date: None,
    ///         trip_end_date: None,
    ///     },
    ///     Utc::now(),
    /// )
    /// .unwrap();
    /// assert!(trip.activities().is_empty());
    /// assert!(trip.expenses().is_empty());
    /// assert_eq!(trip.revision(), 1);
    /// ```
    pub fn create(
        owner_id: UserId,
        new_trip: NewTrip,
        now: DateTime<Utc>,
    ) -> Result<Self, TripValidationError> {
        let NewTrip {
            title,
            destinations,
            trip_start_date,
            trip_end_date,
        } = new_trip;

        Self::new(TripDraft {
            id: TripId::random(),
            owner_id,
            title,
            trip_start_date,
            trip_end_date,
            notes: None,
            highlights: None,
            destinations,
            activities: Vec::new(),
            expenses: Vec::new(),
            collaborators: Vec::new(),
            created_at: now,
            updated_at: now,
            revision: 1,
        })
    }

    pub fn id(&self) -> &TripId {
        &self.id
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    /// Whether `user_id` owns this trip.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn trip_start_date(&self) -> Option<DateTime<Utc>> {
        self.trip_start_date
    }

    pub fn trip_end_date(&self) -> Option<DateTime<Utc>> {
        self.trip_end_date
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn highlights(&self) -> Option<&str> {
        self.highlights.as_deref()
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Declared collaborators. No access rule reads this list.
    pub fn collaborators(&self) -> &[UserId] {
        &self.collaborators
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn revision(&self) -> u32 {
        self.revision
    }

    /// Current notes and highlights.
    pub fn notes_view(&self) -> TripNotes {
        TripNotes {
            notes: self.notes.clone(),
            highlights: self.highlights.clone(),
        }
    }

    /// Sum of all expense amounts, regardless of currency.
    pub fn expense_total(&self) -> f64 {
        self.expenses.iter().map(Expense::amount).sum()
    }

    /// Activities scheduled on `day`, in itinerary order.
    pub fn activities_for_day(&self, day: u32) -> Vec<&Activity> {
        self.activities
            .iter()
            .filter(|activity| activity.day() == day)
            .collect()
    }

    /// Append an activity to the end of the itinerary.
    pub fn add_activity(&mut self, activity: Activity) -> Result<(), TripUpdateError> {
        if self.activities.iter().any(|a| a.id() == activity.id()) {
            return Err(TripUpdateError::DuplicateActivity {
                id: activity.id().to_string(),
            });
        }
        self.activities.push(activity);
        Ok(())
    }

    /// Replace the itinerary with `ordered`.
    ///
    /// `ordered` must hold exactly the ids of the current activities, each
    /// once. Field edits on those activities are accepted.
    pub fn reorder_activities(&mut self, ordered: Vec<Activity>) -> Result<(), TripUpdateError> {
        if ordered.len() != self.activities.len() {
            return Err(TripUpdateError::ReorderMismatch);
        }
        if first_duplicate(ordered.iter().map(|a| a.id().as_ref())).is_some() {
            return Err(TripUpdateError::ReorderMismatch);
        }
        let current: HashSet<&ActivityId> = self.activities.iter().map(Activity::id).collect();
        if !ordered.iter().all(|activity| current.contains(activity.id())) {
            return Err(TripUpdateError::ReorderMismatch);
        }
        self.activities = ordered;
        Ok(())
    }

    /// Append an expense to the budget.
    pub fn add_expense(&mut self, expense: Expense) -> Result<(), TripUpdateError> {
        if self.expenses.iter().any(|e| e.id() == expense.id()) {
            return Err(TripUpdateError::DuplicateExpense {
                id: expense.id().to_string(),
            });
        }
        self.expenses.push(expense);
        Ok(())
    }

    /// Apply the present fields of `update`.
    pub fn update_notes(&mut self, update: NotesUpdate) {
        let NotesUpdate { notes, highlights } = update;
        if let Some(notes) = notes {
            self.notes = Some(notes);
        }
        if let Some(highlights) = highlights {
            self.highlights = Some(highlights);
        }
    }

    /// Mark the activity `activity_id` as completed or pending.
    pub fn set_activity_completion(
        &mut self,
        activity_id: &ActivityId,
        completed: bool,
    ) -> Result<(), TripUpdateError> {
        let activity = self
            .activities
            .iter_mut()
            .find(|activity| activity.id() == activity_id)
            .ok_or_else(|| TripUpdateError::ActivityNotFound {
                id: activity_id.to_string(),
            })?;
        activity.set_completed(completed);
        Ok(())
    }

    /// Advance the revision ahead of persisting a mutation.
    ///
    /// Returns the revision the stored copy is expected to have.
    pub fn begin_revision(&mut self, now: DateTime<Utc>) -> u32 {
        let expected = self.revision;
        self.revision = expected.saturating_add(1);
        self.updated_at = now;
        expected
    }
}
