// ============================================================================
// Relawan API - Event Handlers
// File: crates/relawan-api/src/handlers/event.rs
// ============================================================================
//! Event catalogue, volunteering and report handlers

use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::PathRejection,
        Multipart, Path, State,
    },
    http::StatusCode,
    Extension, Json,
};

use relawan_core::domain::{
    AuthUser, Event, EventInput, EventSummary, JoinedEvent, NewReport, Report, StatusUpdate,
    Volunteer,
};

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::upload::MultipartForm;

fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ApiError::BadRequest(format!("Invalid event id: {}", raw)))
}

fn event_id(path: Result<Path<String>, PathRejection>) -> Result<i32, ApiError> {
    let Path(raw) = path?;
    parse_id(&raw)
}

/// POST /api/event (Admin, multipart with `image` and `organizer_logo`)
pub async fn create_event(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Event>>), ApiError> {
    let mut form = MultipartForm::read(multipart?).await?;

    let mut stored = Vec::new();
    let mut image_url = String::new();
    let mut organizer_logo = String::new();
    for (field, target) in [("image", &mut image_url), ("organizer_logo", &mut organizer_logo)] {
        if let Some(file) = form.take_file(field) {
            match state.uploads.save_image(&file).await {
                Ok(saved) => {
                    *target = saved.public_url.clone();
                    stored.push(saved);
                }
                Err(e) => {
                    state.uploads.discard(&stored).await;
                    return Err(e);
                }
            }
        }
    }

    let input = EventInput {
        title: form.text_or_empty("title"),
        location: form.text_or_empty("location"),
        start_date: form.text_or_empty("start_date"),
        end_date: form.text_or_empty("end_date"),
        description: form.text_or_empty("description"),
        requirements: form.text_or_empty("requirements"),
        organizer: form.text_or_empty("organizer"),
        point_reward: form.text_or_empty("point_reward"),
        max_volunteers: form.text_or_empty("max_volunteers"),
        image_url,
        organizer_logo,
    };
    let skills = form
        .text("skills")
        .or_else(|| form.text("skillIds"))
        .unwrap_or_default()
        .to_string();

    let result = state.events.create_event(&user, input, &skills).await;
    if result.is_err() {
        state.uploads.discard(&stored).await;
    }
    let event = result?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(event, "Event created successfully")),
    ))
}

/// GET /api/event
pub async fn list_events(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ApiResponse<Vec<EventSummary>>>, ApiError> {
    let events = state.events.list_events(user.id).await?;
    Ok(Json(ApiResponse::success(events)))
}

/// GET /api/event/user-skills
pub async fn list_events_by_user_skills(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ApiResponse<Vec<EventSummary>>>, ApiError> {
    let events = state.events.list_events_by_user_skills(user.id).await?;
    Ok(Json(ApiResponse::success(events)))
}

/// GET /api/event/upcoming
pub async fn upcoming_events(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ApiResponse<Vec<JoinedEvent>>>, ApiError> {
    let events = state.events.upcoming_events(user.id).await?;
    Ok(Json(ApiResponse::success(events)))
}

/// GET /api/event/{id}
pub async fn get_event(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<ApiResponse<EventSummary>>, ApiError> {
    let event = state.events.get_event(event_id(path)?).await?;
    Ok(Json(ApiResponse::success(event)))
}

/// POST /api/event/{id}/volunteer
pub async fn join_event(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<String>, PathRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Volunteer>>), ApiError> {
    let volunteer = state.events.join_event(event_id(path)?, user.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(volunteer, "Joined event successfully")),
    ))
}

/// PUT /api/event/{id}/volunteer/selesai
pub async fn complete_volunteer(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<ApiResponse<StatusUpdate>>, ApiError> {
    let update = state.events.complete_volunteer(event_id(path)?, user.id).await?;
    let message = update.message.clone();
    Ok(Json(ApiResponse::success_with_message(update, &message)))
}

/// POST /api/event/{id}/report (multipart `description`, optional `photo`)
pub async fn create_report(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<String>, PathRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Report>>), ApiError> {
    let id = event_id(path)?;
    let mut form = MultipartForm::read(multipart?).await?;

    let mut stored = Vec::new();
    if let Some(photo) = form.take_file("photo") {
        stored.push(state.uploads.save_image(&photo).await?);
    }

    let report = NewReport {
        description: form.text_or_empty("description"),
        photo_url: stored.first().map(|f| f.public_url.clone()),
    };

    let result = state.events.create_report(id, user.id, report).await;
    if result.is_err() {
        state.uploads.discard(&stored).await;
    }
    let report = result?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(report, "Report submitted successfully")),
    ))
}
