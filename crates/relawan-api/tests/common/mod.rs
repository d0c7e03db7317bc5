//! Shared harness for HTTP tests: an in-memory store behind the repository
//! traits and helpers that drive the real router with `oneshot`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body, Bytes},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Days, NaiveDate, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use relawan_api::{build_router, AppState, UploadStore};
use relawan_core::domain::{
    Event, EventSummary, JoinedEvent, NewEvent, NewReport, NewUser, Report, Skill, User,
    UserProfile, UserRole, Volunteer, VolunteerStatus,
};
use relawan_core::error::DomainError;
use relawan_core::repositories::{
    EventRepository, ReportRepository, SkillRepository, UserRepository, VolunteerRepository,
};
use relawan_core::services::{AuthService, EventService, SkillService};
use relawan_security::{JwtService, PasswordService};
use relawan_shared::config::{
    AppConfig, AppSettings, DatabaseSettings, JwtSettings, LogFormat, LoggingSettings,
};
use relawan_shared::constants::DEFAULT_SKILLS;
use relawan_shared::utils::local_today;

pub const UTC_OFFSET: i32 = 7;
pub const PASSWORD: &str = "password123";

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    user_skills: Vec<(i32, i32)>,
    skills: Vec<Skill>,
    events: Vec<Event>,
    event_skills: Vec<(i32, i32)>,
    volunteers: Vec<Volunteer>,
    reports: Vec<Report>,
}

impl Tables {
    fn skill_name(&self, id: i32) -> Option<String> {
        self.skills.iter().find(|s| s.id == id).map(|s| s.name.clone())
    }

    fn summary(&self, event: &Event) -> EventSummary {
        let mut skill_ids: Vec<i32> = self
            .event_skills
            .iter()
            .filter(|(event_id, _)| *event_id == event.id)
            .map(|(_, skill_id)| *skill_id)
            .collect();
        skill_ids.sort_unstable();

        EventSummary {
            event: event.clone(),
            skills: skill_ids.into_iter().filter_map(|id| self.skill_name(id)).collect(),
            volunteer_count: self.volunteers.iter().filter(|v| v.event_id == event.id).count() as i64,
        }
    }
}

pub struct MemoryDb {
    tables: Mutex<Tables>,
}

impl MemoryDb {
    pub fn new() -> Self {
        let skills = DEFAULT_SKILLS
            .iter()
            .enumerate()
            .map(|(i, name)| Skill {
                id: i as i32 + 1,
                name: name.to_string(),
            })
            .collect();

        Self {
            tables: Mutex::new(Tables {
                skills,
                ..Tables::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    pub fn insert_user(&self, nama: &str, email: &str, role: UserRole, skill_ids: &[i32]) -> i32 {
        let password = PasswordService::hash(PASSWORD).unwrap();
        let mut t = self.lock();
        let id = t.users.len() as i32 + 1;
        t.users.push(User {
            id,
            nama: nama.to_string(),
            email: email.to_string(),
            password,
            foto: None,
            alamat: None,
            role,
            access_token: None,
            refresh_token: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });
        t.user_skills.extend(skill_ids.iter().map(|s| (id, *s)));
        id
    }

    pub fn insert_event(&self, title: &str, start_date: NaiveDate, max_volunteers: i32, skill_ids: &[i32]) -> i32 {
        let mut t = self.lock();
        let id = t.events.len() as i32 + 1;
        t.events.push(Event {
            id,
            title: title.to_string(),
            location: "Jakarta".to_string(),
            start_date,
            end_date: start_date,
            description: "Kegiatan relawan".to_string(),
            requirements: "Semangat".to_string(),
            organizer: "Komunitas".to_string(),
            point_reward: 20,
            max_volunteers,
            image_url: "/api/file/event.png".to_string(),
            organizer_logo: "/api/file/logo.png".to_string(),
            created_at: Utc::now(),
        });
        t.event_skills.extend(skill_ids.iter().map(|s| (id, *s)));
        id
    }

    pub fn stored_access_token(&self, user_id: i32) -> Option<String> {
        self.lock()
            .users
            .iter()
            .find(|u| u.id == user_id)
            .and_then(|u| u.access_token.clone())
    }
}

#[async_trait]
impl UserRepository for MemoryDb {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError> {
        Ok(self.lock().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create(&self, user: &NewUser, skill_ids: &[i32]) -> Result<User, DomainError> {
        let mut t = self.lock();
        if t.users.iter().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(DomainError::EmailAlreadyExists(user.email.clone()));
        }
        let id = t.users.len() as i32 + 1;
        let created = User {
            id,
            nama: user.nama.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
            foto: user.foto.clone(),
            alamat: user.alamat.clone(),
            role: UserRole::User,
            access_token: None,
            refresh_token: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        t.users.push(created.clone());
        t.user_skills.extend(skill_ids.iter().map(|s| (id, *s)));
        Ok(created)
    }

    async fn update_tokens(
        &self,
        id: i32,
        access_token: Option<String>,
        refresh_token: Option<String>,
    ) -> Result<(), DomainError> {
        let mut t = self.lock();
        let user = t
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(DomainError::UserNotFound)?;
        user.access_token = access_token;
        user.refresh_token = refresh_token;
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn rotate_tokens(
        &self,
        id: i32,
        expected_refresh: &str,
        access_token: String,
        refresh_token: String,
    ) -> Result<bool, DomainError> {
        let mut t = self.lock();
        let Some(user) = t
            .users
            .iter_mut()
            .find(|u| u.id == id && u.refresh_token.as_deref() == Some(expected_refresh))
        else {
            return Ok(false);
        };
        user.access_token = Some(access_token);
        user.refresh_token = Some(refresh_token);
        user.updated_at = Utc::now();
        Ok(true)
    }

    async fn skill_ids(&self, id: i32) -> Result<Vec<i32>, DomainError> {
        let mut ids: Vec<i32> = self
            .lock()
            .user_skills
            .iter()
            .filter(|(user_id, _)| *user_id == id)
            .map(|(_, skill_id)| *skill_id)
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    async fn skill_names(&self, id: i32) -> Result<Vec<String>, DomainError> {
        let ids = UserRepository::skill_ids(self, id).await?;
        let t = self.lock();
        Ok(ids.into_iter().filter_map(|id| t.skill_name(id)).collect())
    }

    async fn find_profile(&self, id: i32) -> Result<Option<UserProfile>, DomainError> {
        let skills = UserRepository::skill_names(self, id).await?;
        let t = self.lock();
        Ok(t.users.iter().find(|u| u.id == id).map(|u| UserProfile {
            id: u.id,
            email: u.email.clone(),
            nama: u.nama.clone(),
            foto: u.foto.clone(),
            alamat: u.alamat.clone(),
            skills,
            volunteer_count: t.volunteers.iter().filter(|v| v.user_id == id).count() as i64,
        }))
    }
}

#[async_trait]
impl SkillRepository for MemoryDb {
    async fn list(&self) -> Result<Vec<Skill>, DomainError> {
        Ok(self.lock().skills.clone())
    }

    async fn existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, DomainError> {
        let t = self.lock();
        Ok(ids
            .iter()
            .copied()
            .filter(|id| t.skills.iter().any(|s| s.id == *id))
            .collect())
    }
}

#[async_trait]
impl EventRepository for MemoryDb {
    async fn create(&self, event: &NewEvent, skill_ids: &[i32]) -> Result<Event, DomainError> {
        let mut t = self.lock();
        let id = t.events.len() as i32 + 1;
        let created = Event {
            id,
            title: event.title.clone(),
            location: event.location.clone(),
            start_date: event.start_date,
            end_date: event.end_date,
            description: event.description.clone(),
            requirements: event.requirements.clone(),
            organizer: event.organizer.clone(),
            point_reward: event.point_reward,
            max_volunteers: event.max_volunteers,
            image_url: event.image_url.clone(),
            organizer_logo: event.organizer_logo.clone(),
            created_at: Utc::now(),
        };
        t.events.push(created.clone());
        t.event_skills.extend(skill_ids.iter().map(|s| (id, *s)));
        Ok(created)
    }

    async fn find_summary(&self, id: i32) -> Result<Option<EventSummary>, DomainError> {
        let t = self.lock();
        Ok(t.events.iter().find(|e| e.id == id).map(|e| t.summary(e)))
    }

    async fn list_open(
        &self,
        user_id: i32,
        today: NaiveDate,
        skill_ids: Option<Vec<i32>>,
    ) -> Result<Vec<EventSummary>, DomainError> {
        let t = self.lock();
        Ok(t.events
            .iter()
            .filter(|e| e.start_date >= today)
            .filter(|e| !t.volunteers.iter().any(|v| v.event_id == e.id && v.user_id == user_id))
            .filter(|e| match &skill_ids {
                None => true,
                Some(ids) => t
                    .event_skills
                    .iter()
                    .any(|(event_id, skill_id)| *event_id == e.id && ids.contains(skill_id)),
            })
            .map(|e| t.summary(e))
            .collect())
    }

    async fn list_joined(&self, user_id: i32) -> Result<Vec<JoinedEvent>, DomainError> {
        let t = self.lock();
        Ok(t.volunteers
            .iter()
            .filter(|v| v.user_id == user_id)
            .filter_map(|v| {
                let event = t.events.iter().find(|e| e.id == v.event_id)?;
                Some(JoinedEvent {
                    event: event.clone(),
                    status: v.status,
                    report_id: t.reports.iter().find(|r| r.volunteer_id == v.id).map(|r| r.id),
                })
            })
            .collect())
    }
}

#[async_trait]
impl VolunteerRepository for MemoryDb {
    async fn find(&self, event_id: i32, user_id: i32) -> Result<Option<Volunteer>, DomainError> {
        Ok(self
            .lock()
            .volunteers
            .iter()
            .find(|v| v.event_id == event_id && v.user_id == user_id)
            .cloned())
    }

    async fn enroll(&self, event_id: i32, user_id: i32) -> Result<Volunteer, DomainError> {
        let mut t = self.lock();
        let capacity = t
            .events
            .iter()
            .find(|e| e.id == event_id)
            .map(|e| e.max_volunteers)
            .ok_or(DomainError::EventNotFound(event_id))?;
        if t.volunteers.iter().any(|v| v.event_id == event_id && v.user_id == user_id) {
            return Err(DomainError::AlreadyVolunteered { event_id, user_id });
        }
        if t.volunteers.iter().filter(|v| v.event_id == event_id).count() as i32 >= capacity {
            return Err(DomainError::EventFull(event_id));
        }

        let volunteer = Volunteer {
            id: t.volunteers.len() as i32 + 1,
            event_id,
            user_id,
            status: VolunteerStatus::Mendatang,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        t.volunteers.push(volunteer.clone());
        Ok(volunteer)
    }

    async fn update_status(
        &self,
        event_id: i32,
        user_id: i32,
        status: VolunteerStatus,
    ) -> Result<u64, DomainError> {
        let mut t = self.lock();
        let mut updated = 0;
        for v in t
            .volunteers
            .iter_mut()
            .filter(|v| v.event_id == event_id && v.user_id == user_id)
        {
            v.status = status;
            v.updated_at = Utc::now();
            updated += 1;
        }
        Ok(updated)
    }
}

#[async_trait]
impl ReportRepository for MemoryDb {
    async fn find_by_volunteer(&self, volunteer_id: i32) -> Result<Option<Report>, DomainError> {
        Ok(self
            .lock()
            .reports
            .iter()
            .find(|r| r.volunteer_id == volunteer_id)
            .cloned())
    }

    async fn create(&self, volunteer_id: i32, report: &NewReport) -> Result<Report, DomainError> {
        let mut t = self.lock();
        if t.reports.iter().any(|r| r.volunteer_id == volunteer_id) {
            return Err(DomainError::ReportAlreadyExists(volunteer_id));
        }
        let created = Report {
            id: t.reports.len() as i32 + 1,
            volunteer_id,
            description: report.description.clone(),
            photo_url: report.photo_url.clone(),
            created_at: Utc::now(),
        };
        t.reports.push(created.clone());
        Ok(created)
    }
}

// ============================================================================
// Application harness
// ============================================================================

pub fn test_config(upload_dir: &Path) -> AppConfig {
    AppConfig {
        app: AppSettings {
            env: "test".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            name: "relawan-test".to_string(),
            web_url: "http://localhost:3001".to_string(),
            upload_dir: upload_dir.display().to_string(),
            max_upload_mb: 10,
            utc_offset_hours: UTC_OFFSET,
        },
        database: DatabaseSettings {
            url: "postgres://localhost/unused".to_string(),
            max_connections: 1,
            min_connections: 0,
            acquire_timeout_secs: 1,
        },
        jwt: JwtSettings {
            access_secret: "test-access-secret".to_string(),
            refresh_secret: "test-refresh-secret".to_string(),
            access_token_expiry: 3600,
            refresh_token_expiry: 7200,
        },
        logging: LoggingSettings {
            format: LogFormat::Pretty,
            directory: None,
        },
    }
}

pub struct TestApp {
    pub router: Router,
    pub db: Arc<MemoryDb>,
    pub upload_dir: PathBuf,
}

impl TestApp {
    pub fn new() -> Self {
        let upload_dir = std::env::temp_dir().join(format!("relawan-api-test-{}", Uuid::new_v4()));
        let config = test_config(&upload_dir);
        let db = Arc::new(MemoryDb::new());

        let jwt = Arc::new(JwtService::new(
            &config.jwt.access_secret,
            &config.jwt.refresh_secret,
            config.jwt.access_token_expiry,
            config.jwt.refresh_token_expiry,
        ));
        let auth = AuthService::new(db.clone(), db.clone(), jwt);
        let events = EventService::new(
            db.clone(),
            db.clone(),
            db.clone(),
            db.clone(),
            db.clone(),
            config.app.utc_offset_hours,
        );
        let skills = SkillService::new(db.clone());
        let uploads = UploadStore::new(&upload_dir);

        let state = AppState::new(auth, events, skills, uploads, config);
        Self {
            router: build_router(state),
            db,
            upload_dir,
        }
    }

    pub async fn send_raw(&self, request: Request<Body>) -> (StatusCode, Bytes) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes)
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let (status, bytes) = self.send_raw(request).await;
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    pub async fn login(&self, email: &str) -> String {
        let (status, body) = self
            .send(json_request(
                Method::POST,
                "/api/auth/login",
                None,
                json!({ "identifier": email, "password": PASSWORD }),
            ))
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["data"]["access_token"].as_str().unwrap().to_string()
    }

    /// Inserts a user directly and signs them in over HTTP.
    pub async fn user_with_token(&self, email: &str, role: UserRole, skill_ids: &[i32]) -> (i32, String) {
        let id = self.db.insert_user("Relawan", email, role, skill_ids);
        (id, self.login(email).await)
    }

    pub fn uploaded_files(&self) -> usize {
        std::fs::read_dir(&self.upload_dir)
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.upload_dir);
    }
}

pub fn days_from_today(days: i64) -> NaiveDate {
    let today = local_today(UTC_OFFSET);
    if days >= 0 {
        today.checked_add_days(Days::new(days as u64)).unwrap()
    } else {
        today.checked_sub_days(Days::new(days.unsigned_abs())).unwrap()
    }
}

// ============================================================================
// Request builders
// ============================================================================

fn with_token(builder: axum::http::request::Builder, token: Option<&str>) -> axum::http::request::Builder {
    match token {
        Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {}", token)),
        None => builder,
    }
}

pub fn request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    with_token(Request::builder().method(method).uri(uri), token)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    with_token(Request::builder().method(method).uri(uri), token)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn multipart_request(uri: &str, token: Option<&str>, form: MultipartBody) -> Request<Body> {
    let (content_type, body) = form.finish();
    with_token(Request::builder().method(Method::POST).uri(uri), token)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap()
}

pub struct MultipartBody {
    boundary: String,
    buf: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self {
            boundary: "relawan-test-boundary".to_string(),
            buf: Vec::new(),
        }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                self.boundary, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, bytes: &[u8]) -> Self {
        let content_type = mime_guess::from_path(file_name).first_or_octet_stream();
        self.buf.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                self.boundary, name, file_name, content_type
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(bytes);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    fn finish(mut self) -> (String, Vec<u8>) {
        self.buf
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        (
            format!("multipart/form-data; boundary={}", self.boundary),
            self.buf,
        )
    }
}
