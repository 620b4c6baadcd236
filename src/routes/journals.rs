//! Journal routes — the Chronicle.
//!
//! Entry content is stored and returned verbatim. The `nexus_comment` column
//! holds the margin note the client saved after calling the analyze endpoint.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use uuid::Uuid;

use super::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct JournalEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub ink_color: Option<String>,
    pub nexus_comment: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

const JOURNAL_COLUMNS: &str = "id, user_id, content, ink_color, nexus_comment, tags, created_at";

fn row_to_entry(r: &sqlx::postgres::PgRow) -> JournalEntry {
    JournalEntry {
        id: r.get("id"),
        user_id: r.get("user_id"),
        content: r.get("content"),
        ink_color: r.get("ink_color"),
        nexus_comment: r.get("nexus_comment"),
        tags: r.get("tags"),
        created_at: r.get("created_at"),
    }
}

/// `GET /api/journals` — newest first.
pub async fn list_entries(State(state): State<AppState>, auth: AuthUser) -> Result<Json<Vec<JournalEntry>>, StatusCode> {
    let rows = sqlx::query(&format!(
        "SELECT {JOURNAL_COLUMNS} FROM journal_entries WHERE user_id = $1 ORDER BY created_at DESC"
    ))
    .bind(auth.user.id)
    .fetch_all(&state.pool)
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "journal list failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(rows.iter().map(row_to_entry).collect()))
}

/// `GET /api/journals/{id}`
pub async fn get_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(entry_id): Path<Uuid>,
) -> Result<Json<JournalEntry>, StatusCode> {
    let row = sqlx::query(&format!(
        "SELECT {JOURNAL_COLUMNS} FROM journal_entries WHERE id = $1 AND user_id = $2"
    ))
    .bind(entry_id)
    .bind(auth.user.id)
    .fetch_optional(&state.pool)
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "journal fetch failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?
    .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(row_to_entry(&row)))
}

#[derive(Deserialize)]
pub struct CreateEntryBody {
    pub content: String,
    pub ink_color: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub nexus_comment: Option<String>,
}

/// `POST /api/journals` — write an entry.
pub async fn create_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateEntryBody>,
) -> Result<(StatusCode, Json<JournalEntry>), StatusCode> {
    if body.content.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let row = sqlx::query(&format!(
        "INSERT INTO journal_entries (user_id, content, ink_color, tags, nexus_comment)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING {JOURNAL_COLUMNS}"
    ))
    .bind(auth.user.id)
    .bind(&body.content)
    .bind(&body.ink_color)
    .bind(&body.tags)
    .bind(&body.nexus_comment)
    .fetch_one(&state.pool)
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "journal insert failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok((StatusCode::CREATED, Json(row_to_entry(&row))))
}

#[derive(Deserialize)]
pub struct UpdateEntryBody {
    pub content: Option<String>,
    pub ink_color: Option<String>,
    pub tags: Option<Vec<String>>,
    pub nexus_comment: Option<String>,
}

/// `PATCH /api/journals/{id}`
pub async fn update_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(entry_id): Path<Uuid>,
    Json(body): Json<UpdateEntryBody>,
) -> Result<Json<JournalEntry>, StatusCode> {
    if let Some(content) = &body.content {
        if content.trim().is_empty() {
            return Err(StatusCode::BAD_REQUEST);
        }
    }

    let row = sqlx::query(&format!(
        "UPDATE journal_entries SET
            content = COALESCE($3, content),
            ink_color = COALESCE($4, ink_color),
            tags = COALESCE($5, tags),
            nexus_comment = COALESCE($6, nexus_comment)
         WHERE id = $1 AND user_id = $2
         RETURNING {JOURNAL_COLUMNS}"
    ))
    .bind(entry_id)
    .bind(auth.user.id)
    .bind(&body.content)
    .bind(&body.ink_color)
    .bind(&body.tags)
    .bind(&body.nexus_comment)
    .fetch_optional(&state.pool)
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "journal update failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?
    .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(row_to_entry(&row)))
}

/// `DELETE /api/journals/{id}`
pub async fn delete_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(entry_id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let result = sqlx::query("DELETE FROM journal_entries WHERE id = $1 AND user_id = $2")
        .bind(entry_id)
        .bind(auth.user.id)
        .execute(&state.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "journal delete failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    if result.rows_affected() == 0 {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "journals_test.rs"]
mod tests;
