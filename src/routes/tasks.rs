//! Task routes — the Flow board CRUD.

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
pub struct Task {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub category: String,
    pub recurrence: String,
    pub time_of_day: Option<String>,
    pub icon: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

const TASK_COLUMNS: &str = "id, user_id, title, category, recurrence, time_of_day, icon, completed, created_at";

fn row_to_task(r: &sqlx::postgres::PgRow) -> Task {
    Task {
        id: r.get("id"),
        user_id: r.get("user_id"),
        title: r.get("title"),
        category: r.get("category"),
        recurrence: r.get("recurrence"),
        time_of_day: r.get("time_of_day"),
        icon: r.get("icon"),
        completed: r.get("completed"),
        created_at: r.get("created_at"),
    }
}

pub(crate) const TASK_CATEGORIES: [&str; 4] = ["study", "health", "personal", "work"];
pub(crate) const TASK_RECURRENCES: [&str; 4] = ["none", "daily", "weekly", "monthly"];

fn validate_category(raw: &str) -> Result<(), StatusCode> {
    if TASK_CATEGORIES.contains(&raw) {
        Ok(())
    } else {
        Err(StatusCode::BAD_REQUEST)
    }
}

fn validate_recurrence(raw: &str) -> Result<(), StatusCode> {
    if TASK_RECURRENCES.contains(&raw) {
        Ok(())
    } else {
        Err(StatusCode::BAD_REQUEST)
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /api/tasks` — the user's tasks, newest first.
pub async fn list_tasks(State(state): State<AppState>, auth: AuthUser) -> Result<Json<Vec<Task>>, StatusCode> {
    let rows = sqlx::query(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = $1 ORDER BY created_at DESC"
    ))
    .bind(auth.user.id)
    .fetch_all(&state.pool)
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "task list failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(rows.iter().map(row_to_task).collect()))
}

#[derive(Deserialize)]
pub struct CreateTaskBody {
    pub title: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_recurrence")]
    pub recurrence: String,
    pub time_of_day: Option<String>,
    #[serde(default = "default_icon")]
    pub icon: String,
}

fn default_category() -> String {
    "personal".to_string()
}

fn default_recurrence() -> String {
    "none".to_string()
}

fn default_icon() -> String {
    "Star".to_string()
}

/// `POST /api/tasks` — create a task.
pub async fn create_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateTaskBody>,
) -> Result<(StatusCode, Json<Task>), StatusCode> {
    if body.title.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    validate_category(&body.category)?;
    validate_recurrence(&body.recurrence)?;

    let row = sqlx::query(&format!(
        "INSERT INTO tasks (user_id, title, category, recurrence, time_of_day, icon)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING {TASK_COLUMNS}"
    ))
    .bind(auth.user.id)
    .bind(body.title.trim())
    .bind(&body.category)
    .bind(&body.recurrence)
    .bind(&body.time_of_day)
    .bind(&body.icon)
    .fetch_one(&state.pool)
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "task create failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok((StatusCode::CREATED, Json(row_to_task(&row))))
}

#[derive(Deserialize, Default)]
pub struct UpdateTaskBody {
    pub title: Option<String>,
    pub category: Option<String>,
    pub recurrence: Option<String>,
    /// Missing field leaves the value alone; explicit `null` clears it.
    #[serde(default, deserialize_with = "double_option")]
    pub time_of_day: Option<Option<String>>,
    pub icon: Option<String>,
    pub completed: Option<bool>,
}

fn double_option<'de, D>(de: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(de).map(Some)
}

/// `PATCH /api/tasks/{id}` — partial update; absent fields keep their value.
pub async fn update_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(task_id): Path<Uuid>,
    Json(body): Json<UpdateTaskBody>,
) -> Result<Json<Task>, StatusCode> {
    if let Some(title) = &body.title {
        if title.trim().is_empty() {
            return Err(StatusCode::BAD_REQUEST);
        }
    }
    if let Some(category) = &body.category {
        validate_category(category)?;
    }
    if let Some(recurrence) = &body.recurrence {
        validate_recurrence(recurrence)?;
    }

    let row = sqlx::query(&format!(
        "UPDATE tasks SET
            title = COALESCE($3, title),
            category = COALESCE($4, category),
            recurrence = COALESCE($5, recurrence),
            time_of_day = CASE WHEN $6 THEN $7 ELSE time_of_day END,
            icon = COALESCE($8, icon),
            completed = COALESCE($9, completed)
         WHERE id = $1 AND user_id = $2
         RETURNING {TASK_COLUMNS}"
    ))
    .bind(task_id)
    .bind(auth.user.id)
    .bind(body.title.as_deref().map(str::trim))
    .bind(&body.category)
    .bind(&body.recurrence)
    .bind(body.time_of_day.is_some())
    .bind(body.time_of_day.clone().flatten())
    .bind(&body.icon)
    .bind(body.completed)
    .fetch_optional(&state.pool)
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "task update failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?
    .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(row_to_task(&row)))
}

/// `DELETE /api/tasks/{id}`
pub async fn delete_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(task_id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
        .bind(task_id)
        .bind(auth.user.id)
        .execute(&state.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "task delete failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    if result.rows_affected() == 0 {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "tasks_test.rs"]
mod tests;
