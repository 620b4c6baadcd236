//! Profile routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use uuid::Uuid;

use super::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileStats {
    pub tasks_completed: i64,
    pub habits_tracked: i64,
    pub best_streak: i32,
    pub journal_entries: i64,
    pub latest_mood: Option<i16>,
}

#[derive(Debug, Serialize)]
pub struct Profile {
    pub id: Uuid,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub stats: ProfileStats,
}

/// `GET /api/auth/profile` — the signed-in user's profile with usage stats.
pub async fn get_profile(State(state): State<AppState>, auth: AuthUser) -> Result<Json<Profile>, StatusCode> {
    let row = sqlx::query(
        "SELECT u.id, u.email, u.display_name, u.avatar_url, u.bio, u.created_at,
                (SELECT COUNT(*) FROM tasks t WHERE t.user_id = u.id AND t.completed) AS tasks_completed,
                (SELECT COUNT(*) FROM habits h WHERE h.user_id = u.id) AS habits_tracked,
                (SELECT COALESCE(MAX(h.streak), 0) FROM habits h WHERE h.user_id = u.id) AS best_streak,
                (SELECT COUNT(*) FROM journal_entries j WHERE j.user_id = u.id) AS journal_entries,
                (SELECT m.mood FROM mood_logs m WHERE m.user_id = u.id
                 ORDER BY m.logged_at DESC LIMIT 1) AS latest_mood
         FROM users u WHERE u.id = $1",
    )
    .bind(auth.user.id)
    .fetch_optional(&state.pool)
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "profile load failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?
    .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(Profile {
        id: row.get("id"),
        email: row.get("email"),
        display_name: row.get("display_name"),
        avatar_url: row.get("avatar_url"),
        bio: row.get("bio"),
        created_at: row.get("created_at"),
        stats: ProfileStats {
            tasks_completed: row.get("tasks_completed"),
            habits_tracked: row.get("habits_tracked"),
            best_streak: row.get("best_streak"),
            journal_entries: row.get("journal_entries"),
            latest_mood: row.get("latest_mood"),
        },
    }))
}

#[derive(Deserialize)]
pub struct UpdateProfileBody {
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

pub(crate) const MAX_DISPLAY_NAME_LEN: usize = 60;
pub(crate) const MAX_BIO_LEN: usize = 500;

pub(crate) fn validate_profile_update(body: &UpdateProfileBody) -> Result<(), StatusCode> {
    if let Some(name) = &body.display_name {
        if name.trim().is_empty() || name.chars().count() > MAX_DISPLAY_NAME_LEN {
            return Err(StatusCode::BAD_REQUEST);
        }
    }
    if let Some(bio) = &body.bio {
        if bio.chars().count() > MAX_BIO_LEN {
            return Err(StatusCode::BAD_REQUEST);
        }
    }
    Ok(())
}

/// `PATCH /api/auth/profile` — update display name, bio, or avatar.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<UpdateProfileBody>,
) -> Result<StatusCode, StatusCode> {
    validate_profile_update(&body)?;

    sqlx::query(
        "UPDATE users SET
            display_name = COALESCE($2, display_name),
            bio = COALESCE($3, bio),
            avatar_url = COALESCE($4, avatar_url)
         WHERE id = $1",
    )
    .bind(auth.user.id)
    .bind(body.display_name.as_deref().map(str::trim))
    .bind(&body.bio)
    .bind(&body.avatar_url)
    .execute(&state.pool)
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "profile update failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;
