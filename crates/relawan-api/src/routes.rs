//! Router assembly

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::warn;

use relawan_shared::constants::FILE_ROUTE_PREFIX;

use crate::handlers::{auth, event, health, skill};
use crate::middleware::require_auth;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let auth_layer = from_fn_with_state(state.clone(), require_auth);

    let public = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/token", post(auth::refresh_token))
        .route("/api/skill", get(skill::list_skills));

    let protected = Router::new()
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/data", get(auth::current_user))
        .route("/api/auth/profile", get(auth::profile))
        .route("/api/event", post(event::create_event).get(event::list_events))
        .route("/api/event/upcoming", get(event::upcoming_events))
        .route("/api/event/user-skills", get(event::list_events_by_user_skills))
        .route("/api/event/{id}", get(event::get_event))
        .route("/api/event/{id}/volunteer", post(event::join_event))
        .route("/api/event/{id}/volunteer/selesai", put(event::complete_volunteer))
        .route("/api/event/{id}/report", post(event::create_report))
        .route_layer(auth_layer);

    let body_limit = state.config.app.max_upload_mb * 1024 * 1024;

    Router::new()
        .merge(public)
        .merge(protected)
        .nest_service(FILE_ROUTE_PREFIX, ServeDir::new(state.uploads.root()))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors_layer(&state.config.app.web_url))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(web_url: &str) -> CorsLayer {
    let origin = match HeaderValue::from_str(web_url) {
        Ok(origin) => AllowOrigin::exact(origin),
        Err(e) => {
            warn!("Invalid web_url {:?} for CORS, allowing any origin: {}", web_url, e);
            AllowOrigin::any()
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
