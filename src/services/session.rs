//! Session management.
//!
//! HTTP auth uses long-lived opaque session tokens stored server-side and
//! carried in an HttpOnly cookie. Expiry is enforced in SQL so a stale token
//! simply stops validating.

use std::fmt::Write;

use rand::Rng;
use sqlx::{PgPool, Row};
use uuid::Uuid;

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// User row returned from session validation.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SessionUser {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display name.
    pub display_name: String,
    /// Account email, if known.
    pub email: Option<String>,
    /// Avatar image URL, if available.
    pub avatar_url: Option<String>,
    /// Authentication method used to create the session (`"github"` or `"email"`).
    pub auth_method: String,
}

/// Create a session for the given user, returning the token.
///
/// # Errors
///
/// Returns the database error on insert failure.
pub async fn create_session(pool: &PgPool, user_id: Uuid) -> Result<String, sqlx::Error> {
    let token = generate_token();
    sqlx::query("INSERT INTO sessions (token, user_id) VALUES ($1, $2)")
        .bind(&token)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(token)
}

/// Validate a session token and return the associated user.
///
/// # Errors
///
/// Returns the database error on query failure.
pub async fn validate_session(pool: &PgPool, token: &str) -> Result<Option<SessionUser>, sqlx::Error> {
    let row = sqlx::query(
        r"SELECT
              u.id,
              u.display_name,
              u.email,
              u.avatar_url,
              CASE
                  WHEN u.github_id IS NOT NULL THEN 'github'
                  ELSE 'email'
              END AS auth_method
          FROM sessions s
          JOIN users u ON u.id = s.user_id
          WHERE s.token = $1 AND s.expires_at > now()",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| SessionUser {
        id: r.get("id"),
        display_name: r.get("display_name"),
        email: r.get("email"),
        avatar_url: r.get("avatar_url"),
        auth_method: r.get("auth_method"),
    }))
}

/// Delete a session by token.
///
/// # Errors
///
/// Returns the database error on delete failure.
pub async fn delete_session(pool: &PgPool, token: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM sessions WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
