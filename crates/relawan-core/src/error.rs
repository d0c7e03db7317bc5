//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User not found")]
    UserNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid or revoked token")]
    InvalidToken,

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Only {0} users may perform this action")]
    Forbidden(&'static str),

    #[error("Invalid skills format: {0}")]
    InvalidSkillFormat(String),

    #[error("Some skill IDs do not exist: {0:?}")]
    UnknownSkills(Vec<i32>),

    #[error("User has no skills")]
    UserHasNoSkills,

    #[error("Event not found: {0}")]
    EventNotFound(i32),

    #[error("Event {0} has already started")]
    EventClosed(i32),

    #[error("Event {0} has reached its volunteer capacity")]
    EventFull(i32),

    #[error("User {user_id} already volunteers for event {event_id}")]
    AlreadyVolunteered { event_id: i32, user_id: i32 },

    #[error("No volunteer found for event {event_id} and user {user_id}")]
    VolunteerNotFound { event_id: i32, user_id: i32 },

    #[error("Volunteer {0} has not completed the event yet")]
    VolunteerNotCompleted(i32),

    #[error("Report already exists for volunteer {0}")]
    ReportAlreadyExists(i32),

    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Token generation error: {0}")]
    TokenGenerationError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}
