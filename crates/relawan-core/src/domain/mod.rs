//! # Relawan Core - Domain Module
//! 
//! Domain entities for the volunteering backend.

pub mod user;
pub mod skill;
pub mod event;
pub mod volunteer;
pub mod report;

// Re-export all entities and enums
pub use user::{AuthUser, NewUser, User, UserProfile, UserRole};
pub use skill::{parse_skill_ids, Skill};
pub use event::{parse_event_date, Event, EventInput, EventSummary, NewEvent};
pub use volunteer::{JoinedEvent, StatusUpdate, Volunteer, VolunteerStatus};
pub use report::{NewReport, Report};
