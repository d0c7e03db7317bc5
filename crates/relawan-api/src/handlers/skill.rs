use axum::{extract::State, Json};

use relawan_core::domain::Skill;

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/skill
pub async fn list_skills(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Skill>>>, ApiError> {
    let skills = state.skills.list_skills().await?;
    Ok(Json(ApiResponse::success(skills)))
}
