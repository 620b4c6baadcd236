//! Mood routes — the Pulse tracker.
//!
//! The log is append-only; readings are never edited or removed.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use uuid::Uuid;

use super::auth::AuthUser;
use crate::state::AppState;

/// Mood scale used across the app. 1 is lowest energy, 5 is highest.
pub(crate) fn mood_label(mood: i16) -> Option<&'static str> {
    match mood {
        1 => Some("Drained"),
        2 => Some("Sad"),
        3 => Some("Neutral"),
        4 => Some("Happy"),
        5 => Some("Energized"),
        _ => None,
    }
}

#[derive(Debug, Serialize)]
pub struct MoodLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub mood: i16,
    pub label: &'static str,
    pub note: String,
    pub logged_at: DateTime<Utc>,
}

fn row_to_mood_log(r: &sqlx::postgres::PgRow) -> MoodLog {
    let mood: i16 = r.get("mood");
    MoodLog {
        id: r.get("id"),
        user_id: r.get("user_id"),
        mood,
        label: mood_label(mood).unwrap_or("Neutral"),
        note: r.get("note"),
        logged_at: r.get("logged_at"),
    }
}

#[derive(Deserialize)]
pub struct ListMoodsQuery {
    /// Number of most recent entries to return.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    30
}

/// `GET /api/moods?limit=N` — most recent first.
pub async fn list_moods(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListMoodsQuery>,
) -> Result<Json<Vec<MoodLog>>, StatusCode> {
    let limit = query.limit.clamp(1, 365);
    let rows = sqlx::query(
        "SELECT id, user_id, mood, note, logged_at FROM mood_logs
         WHERE user_id = $1 ORDER BY logged_at DESC LIMIT $2",
    )
    .bind(auth.user.id)
    .bind(limit)
    .fetch_all(&state.pool)
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "mood list failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(rows.iter().map(row_to_mood_log).collect()))
}

#[derive(Deserialize)]
pub struct CreateMoodBody {
    pub mood: i16,
    pub note: Option<String>,
}

/// `POST /api/moods` — log a mood reading.
pub async fn create_mood(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateMoodBody>,
) -> Result<(StatusCode, Json<MoodLog>), StatusCode> {
    if mood_label(body.mood).is_none() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let row = sqlx::query(
        "INSERT INTO mood_logs (user_id, mood, note) VALUES ($1, $2, $3)
         RETURNING id, user_id, mood, note, logged_at",
    )
    .bind(auth.user.id)
    .bind(body.mood)
    .bind(body.note.unwrap_or_default())
    .fetch_one(&state.pool)
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "mood insert failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok((StatusCode::CREATED, Json(row_to_mood_log(&row))))
}

#[cfg(test)]
#[path = "moods_test.rs"]
mod tests;
