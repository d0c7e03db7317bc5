// ============================================================================
// Relawan Core - Event Entity
// File: crates/relawan-core/src/domain/event.rs
// ============================================================================

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::DomainError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i32,
    pub title: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: String,
    pub requirements: String,
    pub organizer: String,
    pub point_reward: i32,
    pub max_volunteers: i32,
    pub image_url: String,
    pub organizer_logo: String,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Events accept volunteers until the day they start.
    pub fn is_open_on(&self, today: NaiveDate) -> bool {
        self.start_date >= today
    }
}

/// Event with its skill names and current number of volunteers.
#[derive(Debug, Clone, Serialize)]
pub struct EventSummary {
    #[serde(flatten)]
    pub event: Event,
    pub skills: Vec<String>,
    pub volunteer_count: i64,
}

impl EventSummary {
    pub fn is_full(&self) -> bool {
        self.volunteer_count >= i64::from(self.event.max_volunteers)
    }
}

/// Raw event fields as submitted by a form; every field is text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventInput {
    pub title: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub requirements: String,
    pub organizer: String,
    pub point_reward: String,
    pub max_volunteers: String,
    pub image_url: String,
    pub organizer_logo: String,
}

#[derive(Debug, Clone, PartialEq, Validate)]
#[validate(schema(function = "validate_schedule"))]
pub struct NewEvent {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 255))]
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub requirements: String,
    #[validate(length(min = 1, max = 200))]
    pub organizer: String,
    #[validate(range(min = 0, message = "point_reward must not be negative"))]
    pub point_reward: i32,
    #[validate(range(min = 1, message = "max_volunteers must be at least 1"))]
    pub max_volunteers: i32,
    #[validate(length(min = 1))]
    pub image_url: String,
    #[validate(length(min = 1))]
    pub organizer_logo: String,
}

fn validate_schedule(event: &NewEvent) -> Result<(), ValidationError> {
    if event.end_date < event.start_date {
        let mut err = ValidationError::new("schedule");
        err.message = Some("end_date must not be before start_date".into());
        return Err(err);
    }
    Ok(())
}

impl NewEvent {
    pub fn from_input(input: EventInput) -> Result<Self, DomainError> {
        let required = [
            ("title", &input.title),
            ("location", &input.location),
            ("start_date", &input.start_date),
            ("end_date", &input.end_date),
            ("description", &input.description),
            ("requirements", &input.requirements),
            ("organizer", &input.organizer),
            ("point_reward", &input.point_reward),
            ("max_volunteers", &input.max_volunteers),
            ("image", &input.image_url),
            ("organizer_logo", &input.organizer_logo),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(DomainError::ValidationError(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        let event = NewEvent {
            title: input.title.trim().to_string(),
            location: input.location.trim().to_string(),
            start_date: parse_event_date(&input.start_date)?,
            end_date: parse_event_date(&input.end_date)?,
            description: input.description.trim().to_string(),
            requirements: input.requirements.trim().to_string(),
            organizer: input.organizer.trim().to_string(),
            point_reward: parse_int("point_reward", &input.point_reward)?,
            max_volunteers: parse_int("max_volunteers", &input.max_volunteers)?,
            image_url: input.image_url,
            organizer_logo: input.organizer_logo,
        };
        event.validate()?;
        Ok(event)
    }
}

/// Accepts a plain `YYYY-MM-DD` date or an RFC 3339 timestamp, whose date
/// part is kept as written.
pub fn parse_event_date(raw: &str) -> Result<NaiveDate, DomainError> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| {
            DomainError::ValidationError(format!(
                "Invalid date '{}'. Expected ISO-8601 format",
                raw
            ))
        })
}

fn parse_int(field: &str, raw: &str) -> Result<i32, DomainError> {
    raw.trim()
        .parse()
        .map_err(|_| DomainError::ValidationError(format!("{} must be an integer", field)))
}
