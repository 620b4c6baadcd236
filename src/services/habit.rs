//! Habit service — Sequence persistence and the toggle operation.
//!
//! Route handlers stay on protocol translation; this module owns the SQL and
//! the streak recompute on toggle.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::streak;

/// Habit kind: build a good habit or break a bad one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitKind {
    Good,
    Bad,
}

impl HabitKind {
    #[must_use]
    pub fn from_str(raw: &str) -> Option<Self> {
        match raw {
            "good" => Some(Self::Good),
            "bad" => Some(Self::Bad),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Bad => "bad",
        }
    }
}

/// A habit row, completion dates included.
#[derive(Debug, Clone, Serialize)]
pub struct HabitRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub kind: String,
    pub completed_dates: Vec<NaiveDate>,
    pub streak: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum HabitError {
    #[error("habit not found: {0}")]
    NotFound(Uuid),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

fn row_to_habit(r: &sqlx::postgres::PgRow) -> HabitRow {
    HabitRow {
        id: r.get("id"),
        user_id: r.get("user_id"),
        title: r.get("title"),
        kind: r.get("kind"),
        completed_dates: r.get("completed_dates"),
        streak: r.get("streak"),
        created_at: r.get("created_at"),
    }
}

const HABIT_COLUMNS: &str = "id, user_id, title, kind, completed_dates, streak, created_at";

/// List the user's habits, oldest first (matching the Sequence widget order).
///
/// # Errors
///
/// Returns the database error on query failure.
pub async fn list_habits(pool: &PgPool, user_id: Uuid) -> Result<Vec<HabitRow>, HabitError> {
    let rows = sqlx::query(&format!(
        "SELECT {HABIT_COLUMNS} FROM habits WHERE user_id = $1 ORDER BY created_at ASC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(row_to_habit).collect())
}

/// Create a habit with no completions and a zero streak.
///
/// # Errors
///
/// Returns the database error on insert failure.
pub async fn create_habit(pool: &PgPool, user_id: Uuid, title: &str, kind: HabitKind) -> Result<HabitRow, HabitError> {
    let row = sqlx::query(&format!(
        "INSERT INTO habits (user_id, title, kind) VALUES ($1, $2, $3) RETURNING {HABIT_COLUMNS}"
    ))
    .bind(user_id)
    .bind(title)
    .bind(kind.as_str())
    .fetch_one(pool)
    .await?;
    Ok(row_to_habit(&row))
}

/// Toggle today's completion and persist the recomputed streak.
///
/// Both directions rewrite `completed_dates` and `streak` from the resulting
/// set, so a toggle/untoggle pair is a no-op.
///
/// # Errors
///
/// Returns [`HabitError::NotFound`] for a missing or foreign habit.
pub async fn toggle_today(pool: &PgPool, user_id: Uuid, habit_id: Uuid, today: NaiveDate) -> Result<HabitRow, HabitError> {
    let row = sqlx::query(&format!(
        "SELECT {HABIT_COLUMNS} FROM habits WHERE id = $1 AND user_id = $2"
    ))
    .bind(habit_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or(HabitError::NotFound(habit_id))?;

    let mut habit = row_to_habit(&row);
    let new_streak = streak::toggle_completion(&mut habit.completed_dates, today);

    let updated = sqlx::query(&format!(
        "UPDATE habits SET completed_dates = $3, streak = $4 WHERE id = $1 AND user_id = $2 RETURNING {HABIT_COLUMNS}"
    ))
    .bind(habit_id)
    .bind(user_id)
    .bind(&habit.completed_dates)
    .bind(i32::try_from(new_streak).unwrap_or(i32::MAX))
    .fetch_optional(pool)
    .await?
    .ok_or(HabitError::NotFound(habit_id))?;

    Ok(row_to_habit(&updated))
}

/// Delete a habit.
///
/// # Errors
///
/// Returns [`HabitError::NotFound`] if nothing was deleted.
pub async fn delete_habit(pool: &PgPool, user_id: Uuid, habit_id: Uuid) -> Result<(), HabitError> {
    let result = sqlx::query("DELETE FROM habits WHERE id = $1 AND user_id = $2")
        .bind(habit_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(HabitError::NotFound(habit_id));
    }
    Ok(())
}

#[cfg(test)]
#[path = "habit_test.rs"]
mod tests;
