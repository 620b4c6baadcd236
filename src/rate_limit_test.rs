use super::*;

fn limiter() -> RateLimiter {
    RateLimiter::new()
}

// =============================================================================
// per-user window
// =============================================================================

#[test]
fn per_user_allows_up_to_limit() {
    let rl = limiter();
    let user = Uuid::new_v4();
    let now = Instant::now();
    for _ in 0..rl.config.per_user_limit {
        rl.check_and_record_at(user, now).unwrap();
    }
    let err = rl.check_and_record_at(user, now).unwrap_err();
    assert!(matches!(err, RateLimitError::PerUserExceeded { .. }));
}

#[test]
fn per_user_window_slides() {
    let rl = limiter();
    let user = Uuid::new_v4();
    let start = Instant::now();
    for _ in 0..rl.config.per_user_limit {
        rl.check_and_record_at(user, start).unwrap();
    }
    // Just past the window the old entries are pruned.
    let later = start + rl.config.per_user_window + Duration::from_secs(1);
    rl.check_and_record_at(user, later).unwrap();
}

#[test]
fn separate_users_have_separate_budgets() {
    let rl = limiter();
    let now = Instant::now();
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    for _ in 0..rl.config.per_user_limit {
        rl.check_and_record_at(a, now).unwrap();
    }
    // b is still allowed (global limit permitting).
    rl.check_and_record_at(b, now).unwrap();
}

// =============================================================================
// global window
// =============================================================================

#[test]
fn global_limit_applies_across_users() {
    let rl = limiter();
    let now = Instant::now();
    let mut recorded = 0;
    while recorded < rl.config.global_limit {
        // Spread over many users so the per-user limit never trips first.
        rl.check_and_record_at(Uuid::new_v4(), now).unwrap();
        recorded += 1;
    }
    let err = rl.check_and_record_at(Uuid::new_v4(), now).unwrap_err();
    assert!(matches!(err, RateLimitError::GlobalExceeded { .. }));
}

// =============================================================================
// token budget
// =============================================================================

#[test]
fn token_budget_fresh_user_passes() {
    let rl = limiter();
    rl.check_token_budget(Uuid::new_v4()).unwrap();
}

#[test]
fn token_budget_exceeded_after_recording() {
    let rl = limiter();
    let user = Uuid::new_v4();
    let now = Instant::now();
    rl.record_tokens_at(user, rl.config.token_budget, now);
    let err = rl.check_token_budget_at(user, now).unwrap_err();
    assert!(matches!(err, RateLimitError::TokenBudgetExceeded { .. }));
}

#[test]
fn token_budget_recovers_after_window() {
    let rl = limiter();
    let user = Uuid::new_v4();
    let start = Instant::now();
    rl.record_tokens_at(user, rl.config.token_budget, start);
    let later = start + rl.config.token_window + Duration::from_secs(1);
    rl.check_token_budget_at(user, later).unwrap();
}

#[test]
fn error_messages_name_the_limit() {
    let err = RateLimitError::PerUserExceeded { limit: 10, window_secs: 60 };
    assert!(err.to_string().contains("10"));
    let err = RateLimitError::TokenBudgetExceeded { budget: 50_000, window_secs: 3600 };
    assert!(err.to_string().contains("50000"));
}
