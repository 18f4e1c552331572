//! The trip record and its write-time preparation.
//!
//! Validation and default assignment happen here, explicitly, before any
//! store call. Handlers build a [`NewTrip`] or [`TripPatch`] and hand the
//! result to the repository. The store's only remaining job on a write is
//! assigning the record id.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle state of a trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    #[default]
    Planned,
    Ongoing,
    Completed,
    Cancelled,
}

impl TripStatus {
    /// Accepted wire values, in declaration order. Used in validation messages.
    pub const VALUES: [&'static str; 4] = ["planned", "ongoing", "completed", "cancelled"];

    pub fn parse(value: &str) -> Option<Self> {
        // ---
        match value {
            "planned" => Some(TripStatus::Planned),
            "ongoing" => Some(TripStatus::Ongoing),
            "completed" => Some(TripStatus::Completed),
            "cancelled" => Some(TripStatus::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        // ---
        match self {
            TripStatus::Planned => "planned",
            TripStatus::Ongoing => "ongoing",
            TripStatus::Completed => "completed",
            TripStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted trip as it appears on the wire (camelCase keys).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    /// Opaque identifier assigned by the store on creation, immutable after.
    pub id: String,
    pub title: String,
    pub description: String,
    pub destination: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub budget: f64,
    pub status: TripStatus,
    /// Set once at creation, never modified.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every successful update, no-op updates included.
    pub updated_at: DateTime<Utc>,
}

/// Write-time validation failure carrying one entry per offending field.
#[derive(Debug, Clone, Error)]
#[error("Trip validation failed: {}", .issues.join(", "))]
pub struct ValidationError {
    issues: Vec<String>,
}

impl ValidationError {
    pub fn issues(&self) -> &[String] {
        &self.issues
    }
}

/// Date value as clients are allowed to send it: an RFC 3339 timestamp, a
/// plain `YYYY-MM-DD` day (midnight UTC), or integer epoch milliseconds.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DateInput {
    Millis(i64),
    Text(String),
}

impl DateInput {
    fn resolve(&self) -> Option<DateTime<Utc>> {
        // ---
        match self {
            DateInput::Millis(ms) => DateTime::from_timestamp_millis(*ms),
            DateInput::Text(text) => DateTime::parse_from_rfc3339(text)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
                .or_else(|| {
                    NaiveDate::parse_from_str(text, "%Y-%m-%d")
                        .ok()
                        .and_then(|day| day.and_hms_opt(0, 0, 0))
                        .map(|dt| dt.and_utc())
                }),
        }
    }
}

impl fmt::Display for DateInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateInput::Millis(ms) => write!(f, "{ms}"),
            DateInput::Text(text) => f.write_str(text),
        }
    }
}

/// Request body for creating or updating a trip.
///
/// Every field is optional at the parsing layer so that presence checks can
/// report one issue per missing field instead of bailing on the first, which
/// is what the response's validation detail is expected to contain.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub destination: Option<String>,
    pub start_date: Option<DateInput>,
    pub end_date: Option<DateInput>,
    pub budget: Option<f64>,
    pub status: Option<String>,
}

/// A validated record ready for insertion.
///
/// Defaults and both timestamps are applied here; the store assigns `id`.
#[derive(Debug, Clone)]
pub struct NewTrip {
    pub title: String,
    pub description: String,
    pub destination: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub budget: f64,
    pub status: TripStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewTrip {
    /// Validates required fields and stamps creation defaults. Invoked by the
    /// create handler before every insert.
    ///
    /// `title` is trimmed and must be non-empty; the remaining required
    /// fields only need to be present. There is no ordering constraint
    /// between `startDate` and `endDate` and no sign constraint on
    /// `budget`; both are deliberately permissive.
    pub fn from_draft(draft: TripDraft) -> Result<Self, ValidationError> {
        // ---
        let mut issues = Vec::new();

        let title = match draft.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => Some(title.to_owned()),
            Some(_) => {
                issues.push("title: must not be blank".to_owned());
                None
            }
            None => {
                issues.push("title: field is required".to_owned());
                None
            }
        };
        let description = require_text(&mut issues, "description", draft.description);
        let destination = require_text(&mut issues, "destination", draft.destination);
        let start_date = require_date(&mut issues, "startDate", draft.start_date);
        let end_date = require_date(&mut issues, "endDate", draft.end_date);
        let budget = draft.budget.or_else(|| {
            issues.push("budget: field is required".to_owned());
            None
        });
        let status = parse_status(&mut issues, draft.status).unwrap_or_default();

        match (title, description, destination, start_date, end_date, budget) {
            (
                Some(title),
                Some(description),
                Some(destination),
                Some(start_date),
                Some(end_date),
                Some(budget),
            ) if issues.is_empty() => {
                let now = Utc::now();
                Ok(NewTrip {
                    title,
                    description,
                    destination,
                    start_date,
                    end_date,
                    budget,
                    status,
                    created_at: now,
                    updated_at: now,
                })
            }
            _ => Err(ValidationError { issues }),
        }
    }
}

/// A validated partial update.
///
/// Only supplied fields are written; `updated_at` is refreshed
/// unconditionally, so even an empty PUT body bumps it.
#[derive(Debug, Clone)]
pub struct TripPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub destination: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub budget: Option<f64>,
    pub status: Option<TripStatus>,
    pub updated_at: DateTime<Utc>,
}

impl TripPatch {
    /// Validates whatever fields the caller supplied and stamps the update
    /// time. Invoked by the update handler before every write. Fields set to
    /// JSON `null` deserialize to `None` and are treated as absent.
    pub fn from_draft(draft: TripDraft) -> Result<Self, ValidationError> {
        // ---
        let mut issues = Vec::new();

        let title = match draft.title.as_deref().map(str::trim) {
            Some(title) if title.is_empty() => {
                issues.push("title: must not be blank".to_owned());
                None
            }
            Some(title) => Some(title.to_owned()),
            None => None,
        };
        let start_date = optional_date(&mut issues, "startDate", draft.start_date);
        let end_date = optional_date(&mut issues, "endDate", draft.end_date);
        let status = parse_status(&mut issues, draft.status);

        if !issues.is_empty() {
            return Err(ValidationError { issues });
        }

        Ok(TripPatch {
            title,
            description: draft.description,
            destination: draft.destination,
            start_date,
            end_date,
            budget: draft.budget,
            status,
            updated_at: Utc::now(),
        })
    }

    /// Merges the patch into an existing record. The in-memory test store
    /// applies this directly; the MongoDB store mirrors it with a `$set`
    /// document built from the same fields.
    pub fn apply(&self, trip: &mut Trip) {
        // ---
        if let Some(title) = &self.title {
            trip.title = title.clone();
        }
        if let Some(description) = &self.description {
            trip.description = description.clone();
        }
        if let Some(destination) = &self.destination {
            trip.destination = destination.clone();
        }
        if let Some(start_date) = self.start_date {
            trip.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            trip.end_date = end_date;
        }
        if let Some(budget) = self.budget {
            trip.budget = budget;
        }
        if let Some(status) = self.status {
            trip.status = status;
        }
        trip.updated_at = self.updated_at;
    }
}

fn require_text(issues: &mut Vec<String>, field: &str, value: Option<String>) -> Option<String> {
    // ---
    if value.is_none() {
        issues.push(format!("{field}: field is required"));
    }
    value
}

fn require_date(
    issues: &mut Vec<String>,
    field: &str,
    value: Option<DateInput>,
) -> Option<DateTime<Utc>> {
    // ---
    match value {
        Some(input) => resolve_date(issues, field, input),
        None => {
            issues.push(format!("{field}: field is required"));
            None
        }
    }
}

fn optional_date(
    issues: &mut Vec<String>,
    field: &str,
    value: Option<DateInput>,
) -> Option<DateTime<Utc>> {
    // ---
    value.and_then(|input| resolve_date(issues, field, input))
}

fn resolve_date(issues: &mut Vec<String>, field: &str, input: DateInput) -> Option<DateTime<Utc>> {
    // ---
    match input.resolve() {
        Some(date) => Some(date),
        None => {
            issues.push(format!("{field}: cannot parse `{input}` as a date"));
            None
        }
    }
}

fn parse_status(issues: &mut Vec<String>, value: Option<String>) -> Option<TripStatus> {
    // ---
    value.and_then(|raw| match TripStatus::parse(&raw) {
        Some(status) => Some(status),
        None => {
            issues.push(format!(
                "status: `{raw}` is not one of {}",
                TripStatus::VALUES.join("|")
            ));
            None
        }
    })
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn draft(value: serde_json::Value) -> TripDraft {
        // ---
        serde_json::from_value(value).expect("draft should deserialize")
    }

    fn full_draft() -> TripDraft {
        // ---
        draft(json!({
            "title": "Paris",
            "description": "city of light",
            "destination": "Paris",
            "startDate": "2024-01-01",
            "endDate": "2024-01-10",
            "budget": 1000
        }))
    }

    #[test]
    fn create_applies_defaults_and_stamps_both_timestamps() {
        // ---
        let record = NewTrip::from_draft(full_draft()).unwrap();

        assert_eq!(record.status, TripStatus::Planned);
        assert_eq!(record.created_at, record.updated_at);
        assert_eq!(
            record.start_date,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn create_accepts_rfc3339_and_epoch_millis_dates() {
        // ---
        let record = NewTrip::from_draft(draft(json!({
            "title": "Oslo",
            "description": "fjords",
            "destination": "Oslo",
            "startDate": "2024-06-01T08:30:00Z",
            "endDate": 1_717_286_400_000_i64,
            "budget": 2500.5
        })))
        .unwrap();

        assert_eq!(
            record.start_date,
            Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap()
        );
        assert_eq!(
            record.end_date,
            Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn create_reports_every_missing_field() {
        // ---
        let err = NewTrip::from_draft(draft(json!({ "title": "Rome" }))).unwrap_err();
        let text = err.to_string();

        for field in ["description", "destination", "startDate", "endDate", "budget"] {
            assert!(text.contains(field), "expected `{field}` in: {text}");
        }
        assert!(!text.contains("title:"), "title was supplied: {text}");
        assert_eq!(err.issues().len(), 5);
    }

    #[test]
    fn create_rejects_blank_title() {
        // ---
        let mut body = full_draft();
        body.title = Some("   ".to_owned());

        let err = NewTrip::from_draft(body).unwrap_err();
        assert!(err.to_string().contains("title: must not be blank"));
    }

    #[test]
    fn create_rejects_unknown_status_and_unparseable_date() {
        // ---
        let err = NewTrip::from_draft(draft(json!({
            "title": "Lima",
            "description": "d",
            "destination": "Lima",
            "startDate": "tomorrow",
            "endDate": "2024-03-01",
            "budget": 10,
            "status": "paused"
        })))
        .unwrap_err();

        let text = err.to_string();
        assert!(text.contains("startDate: cannot parse `tomorrow`"), "{text}");
        assert!(text.contains("status: `paused` is not one of"), "{text}");
    }

    #[test]
    fn create_accepts_explicit_status() {
        // ---
        let mut body = full_draft();
        body.status = Some("ongoing".to_owned());

        let record = NewTrip::from_draft(body).unwrap();
        assert_eq!(record.status, TripStatus::Ongoing);
    }

    #[test]
    fn budget_sign_and_date_order_are_not_constrained() {
        // ---
        let record = NewTrip::from_draft(draft(json!({
            "title": "Backwards",
            "description": "d",
            "destination": "x",
            "startDate": "2024-02-01",
            "endDate": "2024-01-01",
            "budget": -50
        })))
        .unwrap();

        assert!(record.end_date < record.start_date);
        assert!(record.budget < 0.0);
    }

    #[test]
    fn patch_validates_only_supplied_fields() {
        // ---
        let patch = TripPatch::from_draft(draft(json!({ "budget": 1500 }))).unwrap();

        assert_eq!(patch.budget, Some(1500.0));
        assert!(patch.title.is_none());
        assert!(patch.start_date.is_none());

        let err = TripPatch::from_draft(draft(json!({ "status": "nope" }))).unwrap_err();
        assert!(err.to_string().contains("status: `nope`"));
    }

    #[test]
    fn empty_patch_still_refreshes_updated_at() {
        // ---
        let mut trip = sample_trip();
        let before = trip.updated_at;

        std::thread::sleep(std::time::Duration::from_millis(5));
        let patch = TripPatch::from_draft(TripDraft::default()).unwrap();
        patch.apply(&mut trip);

        assert!(trip.updated_at > before);
        assert_eq!(trip.budget, 1000.0);
    }

    #[test]
    fn patch_apply_merges_supplied_fields_and_keeps_created_at() {
        // ---
        let mut trip = sample_trip();
        let created = trip.created_at;

        let patch = TripPatch::from_draft(draft(json!({
            "budget": 750,
            "status": "completed"
        })))
        .unwrap();
        patch.apply(&mut trip);

        assert_eq!(trip.budget, 750.0);
        assert_eq!(trip.status, TripStatus::Completed);
        assert_eq!(trip.created_at, created);
        assert_eq!(trip.updated_at, patch.updated_at);
        assert_eq!(trip.title, "Paris");
    }

    #[test]
    fn trip_serializes_with_camel_case_keys_and_lowercase_status() {
        // ---
        let value = serde_json::to_value(sample_trip()).unwrap();

        assert_eq!(value["status"], "planned");
        assert!(value.get("startDate").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("start_date").is_none());
    }

    fn sample_trip() -> Trip {
        // ---
        let record = NewTrip::from_draft(full_draft()).unwrap();
        Trip {
            id: "test-id".to_owned(),
            title: record.title,
            description: record.description,
            destination: record.destination,
            start_date: record.start_date,
            end_date: record.end_date,
            budget: record.budget,
            status: record.status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
