//! Volunteer (user ↔ event enrolment) entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::event::Event;

/// Volunteer status. Only moves forward: `Mendatang` (upcoming) to
/// `Selesai` (completed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum VolunteerStatus {
    #[default]
    Mendatang,
    Selesai,
}

impl VolunteerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VolunteerStatus::Mendatang => "Mendatang",
            VolunteerStatus::Selesai => "Selesai",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Mendatang" => Some(VolunteerStatus::Mendatang),
            "Selesai" => Some(VolunteerStatus::Selesai),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Volunteer {
    pub id: i32,
    pub event_id: i32,
    pub user_id: i32,
    pub status: VolunteerStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Volunteer {
    pub fn is_completed(&self) -> bool {
        self.status == VolunteerStatus::Selesai
    }
}

/// An event the user signed up for, with the user's own enrolment state.
#[derive(Debug, Clone, Serialize)]
pub struct JoinedEvent {
    #[serde(flatten)]
    pub event: Event,
    pub status: VolunteerStatus,
    pub report_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate {
    pub message: String,
    pub updated_count: u64,
}
