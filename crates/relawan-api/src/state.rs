use std::sync::Arc;

use relawan_core::services::{AuthService, EventService, SkillService};
use relawan_shared::config::AppConfig;

use crate::upload::UploadStore;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub events: Arc<EventService>,
    pub skills: Arc<SkillService>,
    pub uploads: Arc<UploadStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        auth: AuthService,
        events: EventService,
        skills: SkillService,
        uploads: UploadStore,
        config: AppConfig,
    ) -> Self {
        Self {
            auth: Arc::new(auth),
            events: Arc::new(events),
            skills: Arc::new(skills),
            uploads: Arc::new(uploads),
            config: Arc::new(config),
        }
    }
}
