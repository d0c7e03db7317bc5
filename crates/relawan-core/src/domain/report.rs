//! Completion report entity

use chrono::{DateTime, Utc};
use serde::Serialize;
use validator::Validate;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub id: i32,
    pub volunteer_id: i32,
    pub description: String,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Validate)]
pub struct NewReport {
    #[validate(length(min = 1, max = 5000, message = "Description is required"))]
    pub description: String,
    pub photo_url: Option<String>,
}
