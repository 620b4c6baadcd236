//! Habit routes — the Sequence tracker.
//!
//! Streak logic lives in `services::streak`; persistence in
//! `services::habit`. Handlers translate HTTP to service calls.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use super::auth::AuthUser;
use crate::services::habit::{self, HabitError, HabitKind, HabitRow};
use crate::state::AppState;

fn habit_error_to_status(err: &HabitError) -> StatusCode {
    match err {
        HabitError::NotFound(_) => StatusCode::NOT_FOUND,
        HabitError::Database(e) => {
            tracing::error!(error = %e, "habit query failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// `GET /api/habits`
pub async fn list_habits(State(state): State<AppState>, auth: AuthUser) -> Result<Json<Vec<HabitRow>>, StatusCode> {
    let habits = habit::list_habits(&state.pool, auth.user.id)
        .await
        .map_err(|e| habit_error_to_status(&e))?;
    Ok(Json(habits))
}

#[derive(Deserialize)]
pub struct CreateHabitBody {
    pub title: String,
    #[serde(default = "default_kind")]
    pub kind: String,
}

fn default_kind() -> String {
    "good".to_string()
}

/// `POST /api/habits`
pub async fn create_habit(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateHabitBody>,
) -> Result<(StatusCode, Json<HabitRow>), StatusCode> {
    if body.title.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let kind = HabitKind::from_str(&body.kind).ok_or(StatusCode::BAD_REQUEST)?;

    let created = habit::create_habit(&state.pool, auth.user.id, body.title.trim(), kind)
        .await
        .map_err(|e| habit_error_to_status(&e))?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `POST /api/habits/{id}/toggle` — flip today's completion.
///
/// The server's current date is authoritative; the response carries the
/// recomputed streak and the full completion set.
pub async fn toggle_habit(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(habit_id): Path<Uuid>,
) -> Result<Json<HabitRow>, StatusCode> {
    let today = Utc::now().date_naive();
    let updated = habit::toggle_today(&state.pool, auth.user.id, habit_id, today)
        .await
        .map_err(|e| habit_error_to_status(&e))?;
    Ok(Json(updated))
}

/// `DELETE /api/habits/{id}`
pub async fn delete_habit(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(habit_id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    habit::delete_habit(&state.pool, auth.user.id, habit_id)
        .await
        .map_err(|e| habit_error_to_status(&e))?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "habits_test.rs"]
mod tests;
