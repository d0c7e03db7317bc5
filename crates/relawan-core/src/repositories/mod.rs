//! Repository traits (ports)

pub mod user_repository;
pub mod skill_repository;
pub mod event_repository;
pub mod volunteer_repository;
pub mod report_repository;

pub use user_repository::UserRepository;
pub use skill_repository::SkillRepository;
pub use event_repository::EventRepository;
pub use volunteer_repository::VolunteerRepository;
pub use report_repository::ReportRepository;

#[cfg(test)]
pub use event_repository::MockEventRepository;
#[cfg(test)]
pub use report_repository::MockReportRepository;
#[cfg(test)]
pub use skill_repository::MockSkillRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
#[cfg(test)]
pub use volunteer_repository::MockVolunteerRepository;
