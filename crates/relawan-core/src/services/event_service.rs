// ============================================================================
// Relawan Core - Event Service
// File: crates/relawan-core/src/services/event_service.rs
// ============================================================================
//! Event listing, volunteer enrolment, completion and reporting

use std::sync::Arc;
use chrono::NaiveDate;
use tracing::{info, warn};
use validator::Validate;

use relawan_shared::utils::local_today;

use crate::domain::{
    parse_skill_ids, AuthUser, Event, EventInput, EventSummary, JoinedEvent, NewEvent, NewReport,
    Report, StatusUpdate, Volunteer, VolunteerStatus,
};
use crate::error::DomainError;
use crate::repositories::{
    EventRepository, ReportRepository, SkillRepository, UserRepository, VolunteerRepository,
};
use super::ensure_skills_exist;

pub struct EventService {
    events: Arc<dyn EventRepository>,
    volunteers: Arc<dyn VolunteerRepository>,
    reports: Arc<dyn ReportRepository>,
    skills: Arc<dyn SkillRepository>,
    users: Arc<dyn UserRepository>,
    utc_offset_hours: i32,
}

impl EventService {
    pub fn new(
        events: Arc<dyn EventRepository>,
        volunteers: Arc<dyn VolunteerRepository>,
        reports: Arc<dyn ReportRepository>,
        skills: Arc<dyn SkillRepository>,
        users: Arc<dyn UserRepository>,
        utc_offset_hours: i32,
    ) -> Self {
        Self {
            events,
            volunteers,
            reports,
            skills,
            users,
            utc_offset_hours,
        }
    }

    fn today(&self) -> NaiveDate {
        local_today(self.utc_offset_hours)
    }

    pub async fn create_event(
        &self,
        actor: &AuthUser,
        input: EventInput,
        skill_ids: &str,
    ) -> Result<Event, DomainError> {
        if !actor.is_admin() {
            warn!("User {} tried to create an event without Admin role", actor.id);
            return Err(DomainError::Forbidden("Admin"));
        }

        let new_event = NewEvent::from_input(input)?;
        let skill_ids = parse_skill_ids(skill_ids)?;
        ensure_skills_exist(self.skills.as_ref(), &skill_ids).await?;

        let event = self.events.create(&new_event, &skill_ids).await?;
        info!("Event {} created by user {}", event.id, actor.id);
        Ok(event)
    }

    /// Upcoming events the user has not joined yet.
    pub async fn list_events(&self, user_id: i32) -> Result<Vec<EventSummary>, DomainError> {
        self.events.list_open(user_id, self.today(), None).await
    }

    /// Upcoming, not-yet-joined events sharing at least one of the user's skills.
    pub async fn list_events_by_user_skills(&self, user_id: i32) -> Result<Vec<EventSummary>, DomainError> {
        let skill_ids = self.users.skill_ids(user_id).await?;
        if skill_ids.is_empty() {
            return Err(DomainError::UserHasNoSkills);
        }
        self.events.list_open(user_id, self.today(), Some(skill_ids)).await
    }

    pub async fn get_event(&self, event_id: i32) -> Result<EventSummary, DomainError> {
        self.events
            .find_summary(event_id)
            .await?
            .ok_or(DomainError::EventNotFound(event_id))
    }

    pub async fn join_event(&self, event_id: i32, user_id: i32) -> Result<Volunteer, DomainError> {
        let summary = self.get_event(event_id).await?;

        if !summary.event.is_open_on(self.today()) {
            return Err(DomainError::EventClosed(event_id));
        }
        if self.volunteers.find(event_id, user_id).await?.is_some() {
            return Err(DomainError::AlreadyVolunteered { event_id, user_id });
        }
        if summary.is_full() {
            return Err(DomainError::EventFull(event_id));
        }

        let volunteer = self.volunteers.enroll(event_id, user_id).await?;
        info!("User {} joined event {} as volunteer {}", user_id, event_id, volunteer.id);
        Ok(volunteer)
    }

    pub async fn upcoming_events(&self, user_id: i32) -> Result<Vec<JoinedEvent>, DomainError> {
        self.events.list_joined(user_id).await
    }

    /// Marks the user's enrolment as `Selesai`. Completing twice is a no-op
    /// and reports `updated_count: 0`, since no row changed.
    pub async fn complete_volunteer(&self, event_id: i32, user_id: i32) -> Result<StatusUpdate, DomainError> {
        let volunteer = self
            .volunteers
            .find(event_id, user_id)
            .await?
            .ok_or(DomainError::VolunteerNotFound { event_id, user_id })?;

        if volunteer.is_completed() {
            return Ok(StatusUpdate {
                message: "Volunteer status is already 'selesai'; nothing updated.".to_string(),
                updated_count: 0,
            });
        }

        let updated_count = self
            .volunteers
            .update_status(event_id, user_id, VolunteerStatus::Selesai)
            .await?;
        if updated_count == 0 {
            return Err(DomainError::VolunteerNotFound { event_id, user_id });
        }

        info!("Volunteer {} completed event {}", volunteer.id, event_id);
        Ok(StatusUpdate {
            message: "Volunteer status updated to 'selesai' successfully.".to_string(),
            updated_count,
        })
    }

    pub async fn create_report(
        &self,
        event_id: i32,
        user_id: i32,
        report: NewReport,
    ) -> Result<Report, DomainError> {
        let report = NewReport {
            description: report.description.trim().to_string(),
            ..report
        };
        report.validate()?;

        let volunteer = self
            .volunteers
            .find(event_id, user_id)
            .await?
            .ok_or(DomainError::VolunteerNotFound { event_id, user_id })?;

        if !volunteer.is_completed() {
            return Err(DomainError::VolunteerNotCompleted(volunteer.id));
        }
        if self.reports.find_by_volunteer(volunteer.id).await?.is_some() {
            return Err(DomainError::ReportAlreadyExists(volunteer.id));
        }

        let created = self.reports.create(volunteer.id, &report).await?;
        info!("Report {} created for volunteer {}", created.id, volunteer.id);
        Ok(created)
    }
}
