//! Goal routes — the Horizon vision board.
//!
//! Stickers are stored as an opaque JSONB array. Their shape (position,
//! artwork, rotation) belongs to the clients; the server only checks that
//! the payload is an array.

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
pub struct Goal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub image_url: Option<String>,
    pub stickers: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

const GOAL_COLUMNS: &str = "id, user_id, title, image_url, stickers, created_at";

fn row_to_goal(r: &sqlx::postgres::PgRow) -> Goal {
    Goal {
        id: r.get("id"),
        user_id: r.get("user_id"),
        title: r.get("title"),
        image_url: r.get("image_url"),
        stickers: r.get("stickers"),
        created_at: r.get("created_at"),
    }
}

/// `GET /api/goals` — newest first.
pub async fn list_goals(State(state): State<AppState>, auth: AuthUser) -> Result<Json<Vec<Goal>>, StatusCode> {
    let rows = sqlx::query(&format!(
        "SELECT {GOAL_COLUMNS} FROM goals WHERE user_id = $1 ORDER BY created_at DESC"
    ))
    .bind(auth.user.id)
    .fetch_all(&state.pool)
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "goal list failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(rows.iter().map(row_to_goal).collect()))
}

#[derive(Deserialize)]
pub struct CreateGoalBody {
    pub title: String,
    pub image_url: Option<String>,
}

/// Cover art shown when a goal is created without an image.
pub(crate) const PLACEHOLDER_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1493612276216-9c5901955d43?q=80&w=1000&auto=format&fit=crop";

pub(crate) fn goal_image_or_placeholder(image_url: Option<&str>) -> &str {
    match image_url.map(str::trim) {
        Some(url) if !url.is_empty() => url,
        _ => PLACEHOLDER_IMAGE_URL,
    }
}

/// `POST /api/goals`
pub async fn create_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateGoalBody>,
) -> Result<(StatusCode, Json<Goal>), StatusCode> {
    if body.title.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let row = sqlx::query(&format!(
        "INSERT INTO goals (user_id, title, image_url) VALUES ($1, $2, $3) RETURNING {GOAL_COLUMNS}"
    ))
    .bind(auth.user.id)
    .bind(body.title.trim())
    .bind(goal_image_or_placeholder(body.image_url.as_deref()))
    .fetch_one(&state.pool)
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "goal create failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok((StatusCode::CREATED, Json(row_to_goal(&row))))
}

#[derive(Deserialize)]
pub struct UpdateGoalBody {
    pub title: Option<String>,
    pub image_url: Option<String>,
    /// Full replacement of the sticker array.
    pub stickers: Option<serde_json::Value>,
}

pub(crate) fn validate_stickers(stickers: &serde_json::Value) -> Result<(), StatusCode> {
    if stickers.is_array() {
        Ok(())
    } else {
        Err(StatusCode::BAD_REQUEST)
    }
}

/// `PATCH /api/goals/{id}` — update title, image, or replace the stickers.
pub async fn update_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(goal_id): Path<Uuid>,
    Json(body): Json<UpdateGoalBody>,
) -> Result<Json<Goal>, StatusCode> {
    if let Some(title) = &body.title {
        if title.trim().is_empty() {
            return Err(StatusCode::BAD_REQUEST);
        }
    }
    if let Some(stickers) = &body.stickers {
        validate_stickers(stickers)?;
    }

    let row = sqlx::query(&format!(
        "UPDATE goals SET
            title = COALESCE($3, title),
            image_url = COALESCE($4, image_url),
            stickers = COALESCE($5, stickers)
         WHERE id = $1 AND user_id = $2
         RETURNING {GOAL_COLUMNS}"
    ))
    .bind(goal_id)
    .bind(auth.user.id)
    .bind(body.title.as_deref().map(str::trim))
    .bind(&body.image_url)
    .bind(&body.stickers)
    .fetch_optional(&state.pool)
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "goal update failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?
    .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(row_to_goal(&row)))
}

/// `DELETE /api/goals/{id}`
pub async fn delete_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(goal_id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let result = sqlx::query("DELETE FROM goals WHERE id = $1 AND user_id = $2")
        .bind(goal_id)
        .bind(auth.user.id)
        .execute(&state.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "goal delete failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    if result.rows_affected() == 0 {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "goals_test.rs"]
mod tests;
