//! Email access-code auth service.
//!
//! Sign-in without a password: the user asks for a code, we mail a
//! short-lived six-character code and store only its digest, and a correct
//! submission consumes the code and yields the user id. Five failed attempts
//! burn the code.

use rand::Rng;
use resend_rs::Resend;
use resend_rs::types::CreateEmailBaseOptions;
use sha2::{Digest, Sha256};
use sqlx::{PgPool, Row};
use uuid::Uuid;

const MAX_FAILED_ATTEMPTS: i32 = 5;
const EMAIL_AUTH_TEMPLATE: &str = include_str!("../../templates/email_auth.html");

#[derive(Debug, thiserror::Error)]
pub enum EmailAuthError {
    #[error("expired or incorrect code")]
    VerificationFailed,
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("email delivery failed: {0}")]
    EmailDelivery(String),
}

// =============================================================================
// EmailAddress
// =============================================================================

/// A validated, normalized (trimmed, lowercased) email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parse user input. `None` for anything that is not `local@domain`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        let (local, domain) = normalized.split_once('@')?;
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return None;
        }
        Some(Self(normalized))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Initial display name for a fresh account: the local part.
    #[must_use]
    pub fn suggested_display_name(&self) -> &str {
        match self.0.split_once('@') {
            Some((local, _)) if !local.is_empty() => local,
            _ => "user",
        }
    }
}

// =============================================================================
// AccessCode
// =============================================================================

/// A six-character access code over an alphabet without 0/1/I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessCode(String);

impl AccessCode {
    pub const LEN: usize = 6;
    const ALPHABET: &'static [u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

    #[must_use]
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let code = (0..Self::LEN)
            .map(|_| {
                let idx = rng.random_range(0..Self::ALPHABET.len());
                Self::ALPHABET[idx] as char
            })
            .collect();
        Self(code)
    }

    /// Parse user input (trimmed, uppercased). `None` for the wrong length or
    /// characters outside the alphabet.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_uppercase();
        if normalized.len() != Self::LEN
            || !normalized.chars().all(|c| Self::ALPHABET.contains(&(c as u8)))
        {
            return None;
        }
        Some(Self(normalized))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// SHA-256 hex digest; only this is persisted.
    #[must_use]
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.0.as_bytes());
        super::session::bytes_to_hex(&hasher.finalize())
    }
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Create (or refresh) the pending access code for an email. Ensures a user
/// row exists for the address. Returns the plaintext code for delivery.
///
/// # Errors
///
/// Returns the database error on failure.
pub async fn request_access_code(pool: &PgPool, email: &EmailAddress) -> Result<AccessCode, EmailAuthError> {
    sqlx::query(
        r"INSERT INTO users (email, display_name)
          VALUES ($1, $2)
          ON CONFLICT (email) DO UPDATE SET display_name = users.display_name",
    )
    .bind(email.as_str())
    .bind(email.suggested_display_name())
    .execute(pool)
    .await?;

    // One pending code per address.
    sqlx::query("DELETE FROM email_login_codes WHERE email = $1 AND consumed_at IS NULL")
        .bind(email.as_str())
        .execute(pool)
        .await?;

    let code = AccessCode::generate();
    sqlx::query("INSERT INTO email_login_codes (email, code_hash) VALUES ($1, $2)")
        .bind(email.as_str())
        .bind(code.digest())
        .execute(pool)
        .await?;

    Ok(code)
}

/// Verify a submitted code, consuming it on success. Returns the user id.
///
/// # Errors
///
/// Returns [`EmailAuthError::VerificationFailed`] for a wrong, expired, or
/// already-consumed code.
pub async fn verify_access_code(pool: &PgPool, email: &EmailAddress, code: &AccessCode) -> Result<Uuid, EmailAuthError> {
    let consumed = sqlx::query(
        r"UPDATE email_login_codes
          SET consumed_at = now()
          WHERE id = (
              SELECT id
              FROM email_login_codes
              WHERE email = $1
                AND consumed_at IS NULL
                AND expires_at > now()
              ORDER BY created_at DESC
              LIMIT 1
          )
          AND code_hash = $2
          RETURNING id",
    )
    .bind(email.as_str())
    .bind(code.digest())
    .fetch_optional(pool)
    .await?;

    if consumed.is_none() {
        sqlx::query(
            r"UPDATE email_login_codes
              SET attempts = attempts + 1,
                  consumed_at = CASE WHEN attempts + 1 >= $2 THEN now() ELSE consumed_at END
              WHERE id = (
                  SELECT id
                  FROM email_login_codes
                  WHERE email = $1
                    AND consumed_at IS NULL
                    AND expires_at > now()
                  ORDER BY created_at DESC
                  LIMIT 1
              )",
        )
        .bind(email.as_str())
        .bind(MAX_FAILED_ATTEMPTS)
        .execute(pool)
        .await?;
        return Err(EmailAuthError::VerificationFailed);
    }

    let user_row = sqlx::query("SELECT id FROM users WHERE email = $1")
        .bind(email.as_str())
        .fetch_optional(pool)
        .await?;

    let Some(user_row) = user_row else {
        return Err(EmailAuthError::VerificationFailed);
    };

    Ok(user_row.get("id"))
}

/// Deliver the access code over email.
///
/// # Errors
///
/// Returns [`EmailAuthError::EmailDelivery`] when the provider call fails.
pub async fn send_access_code_email(
    resend_api_key: &str,
    resend_from: &str,
    to: &EmailAddress,
    code: &AccessCode,
) -> Result<(), EmailAuthError> {
    let resend = Resend::new(resend_api_key);
    let subject = "Your Continuity Access Code";
    let html = render_email_auth_template(to.as_str(), code.as_str());

    let email = CreateEmailBaseOptions::new(resend_from, [to.as_str()], subject).with_html(&html);
    resend
        .emails
        .send(email)
        .await
        .map_err(|e| EmailAuthError::EmailDelivery(e.to_string()))?;
    Ok(())
}

#[must_use]
pub fn render_email_auth_template(email: &str, code: &str) -> String {
    EMAIL_AUTH_TEMPLATE
        .replace("{{EMAIL}}", email)
        .replace("{{CODE}}", code)
}

#[cfg(test)]
#[path = "email_auth_test.rs"]
mod tests;
