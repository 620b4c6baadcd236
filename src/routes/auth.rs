//! Auth routes — GitHub OAuth flow, email access codes, session management.

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use time::Duration;

use crate::services::email_auth::{self, AccessCode, EmailAddress, EmailAuthError};
use crate::services::{auth as auth_svc, session};
use crate::state::AppState;

const COOKIE_NAME: &str = "session_token";
const OAUTH_STATE_COOKIE_NAME: &str = "oauth_state";

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

pub(crate) fn cookie_secure() -> bool {
    if let Some(value) = env_bool("COOKIE_SECURE") {
        return value;
    }

    std::env::var("GITHUB_REDIRECT_URI")
        .map(|uri| uri.starts_with("https://"))
        .unwrap_or(false)
}

fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(axum_extra::extract::cookie::SameSite::Lax)
        .secure(secure)
        .build()
}

fn clear_cookie(name: &'static str, secure: bool) -> Cookie<'static> {
    Cookie::build((name, ""))
        .path("/")
        .http_only(true)
        .same_site(axum_extra::extract::cookie::SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: session::SessionUser,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(StatusCode::UNAUTHORIZED);
        }

        let app_state = AppState::from_ref(state);
        let user = session::validate_session(&app_state.pool, token)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(Self { user, token: token.to_owned() })
    }
}

// =============================================================================
// GITHUB OAUTH
// =============================================================================

/// `GET /auth/github` — redirect to GitHub authorization page.
pub async fn github_redirect(State(state): State<AppState>) -> Response {
    let Some(config) = &state.github else {
        return (StatusCode::SERVICE_UNAVAILABLE, "GitHub OAuth not configured").into_response();
    };

    let oauth_state = session::generate_token();
    let secure = cookie_secure();
    let cookie = Cookie::build((OAUTH_STATE_COOKIE_NAME, oauth_state.clone()))
        .path("/")
        .http_only(true)
        .same_site(axum_extra::extract::cookie::SameSite::Lax)
        .secure(secure)
        .max_age(Duration::minutes(10));

    let jar = CookieJar::new().add(cookie);
    (jar, Redirect::temporary(&config.authorize_url(&oauth_state))).into_response()
}

#[derive(Deserialize)]
pub struct CallbackQuery {
    code: String,
    state: Option<String>,
}

/// `GET /auth/github/callback` — exchange code, upsert user, set cookie,
/// redirect to `/`.
pub async fn github_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    axum::extract::Query(params): axum::extract::Query<CallbackQuery>,
) -> Response {
    let Some(config) = &state.github else {
        return (StatusCode::SERVICE_UNAVAILABLE, "GitHub OAuth not configured").into_response();
    };
    let secure = cookie_secure();

    // Verify OAuth CSRF state from cookie.
    let Some(callback_state) = params.state.as_deref() else {
        return (StatusCode::BAD_REQUEST, "missing oauth state").into_response();
    };
    let expected_state = jar
        .get(OAUTH_STATE_COOKIE_NAME)
        .map(Cookie::value)
        .unwrap_or_default();
    if expected_state.is_empty() || expected_state != callback_state {
        return (StatusCode::UNAUTHORIZED, "invalid oauth state").into_response();
    }

    let access_token = match auth_svc::exchange_code(config, &params.code).await {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "oauth code exchange failed");
            return (StatusCode::BAD_GATEWAY, "OAuth code exchange failed").into_response();
        }
    };

    let gh_user = match auth_svc::fetch_github_user(&access_token).await {
        Ok(u) => u,
        Err(e) => {
            tracing::error!(error = %e, "github user fetch failed");
            return (StatusCode::BAD_GATEWAY, "Failed to fetch GitHub profile").into_response();
        }
    };

    let user_id = match auth_svc::upsert_user(&state.pool, &gh_user).await {
        Ok(id) => id,
        Err(e) => {
            tracing::error!(error = %e, "user upsert failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create user").into_response();
        }
    };

    let token = match session::create_session(&state.pool, user_id).await {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "session creation failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create session").into_response();
        }
    };

    let jar = jar
        .add(session_cookie(token, secure))
        .add(clear_cookie(OAUTH_STATE_COOKIE_NAME, secure));
    (jar, Redirect::temporary("/")).into_response()
}

// =============================================================================
// EMAIL ACCESS CODES
// =============================================================================

#[derive(Deserialize)]
pub struct RequestCodeBody {
    pub email: String,
}

#[derive(Deserialize)]
pub struct VerifyCodeBody {
    pub email: String,
    pub code: String,
}

fn email_auth_error_to_status(err: &EmailAuthError) -> StatusCode {
    match err {
        EmailAuthError::VerificationFailed => StatusCode::UNAUTHORIZED,
        EmailAuthError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EmailAuthError::EmailDelivery(_) => StatusCode::BAD_GATEWAY,
    }
}

/// `POST /api/auth/email/request-code` — issue an access code for an email.
///
/// Without Resend configuration the code is logged instead of delivered,
/// which keeps local development self-contained.
pub async fn request_email_code(
    State(state): State<AppState>,
    Json(body): Json<RequestCodeBody>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let email = EmailAddress::parse(&body.email).ok_or(StatusCode::BAD_REQUEST)?;
    let code = email_auth::request_access_code(&state.pool, &email)
        .await
        .map_err(|e| email_auth_error_to_status(&e))?;

    let resend_key = std::env::var("RESEND_API_KEY").ok();
    let resend_from = std::env::var("RESEND_FROM").ok();
    match (resend_key, resend_from) {
        (Some(key), Some(from)) => {
            email_auth::send_access_code_email(&key, &from, &email, &code)
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "access code delivery failed");
                    email_auth_error_to_status(&e)
                })?;
        }
        _ => {
            tracing::info!(
                email = email.as_str(),
                code = code.as_str(),
                "resend not configured; access code logged"
            );
        }
    }

    Ok(Json(serde_json::json!({ "ok": true })))
}

/// `POST /api/auth/email/verify-code` — consume a code, start a session.
pub async fn verify_email_code(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<VerifyCodeBody>,
) -> Result<(CookieJar, Json<session::SessionUser>), StatusCode> {
    let email = EmailAddress::parse(&body.email).ok_or(StatusCode::BAD_REQUEST)?;
    let code = AccessCode::parse(&body.code).ok_or(StatusCode::BAD_REQUEST)?;
    let user_id = email_auth::verify_access_code(&state.pool, &email, &code)
        .await
        .map_err(|e| email_auth_error_to_status(&e))?;

    let token = session::create_session(&state.pool, user_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let user = session::validate_session(&state.pool, &token)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;

    let jar = jar.add(session_cookie(token, cookie_secure()));
    Ok((jar, Json(user)))
}

// =============================================================================
// SESSION
// =============================================================================

/// `GET /api/auth/me` — return current user.
pub async fn me(auth: AuthUser) -> Json<session::SessionUser> {
    Json(auth.user)
}

/// `POST /api/auth/logout` — delete session, clear cookie.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let _ = session::delete_session(&state.pool, &auth.token).await;

    let jar = CookieJar::new().add(clear_cookie(COOKIE_NAME, cookie_secure()));
    (jar, StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
