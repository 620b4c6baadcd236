use super::*;

// =============================================================================
// validation
// =============================================================================

#[test]
fn known_categories_and_recurrences_pass() {
    for category in TASK_CATEGORIES {
        assert!(validate_category(category).is_ok());
    }
    for recurrence in TASK_RECURRENCES {
        assert!(validate_recurrence(recurrence).is_ok());
    }
}

#[test]
fn full_category_and_recurrence_sets_are_accepted() {
    assert!(validate_category("study").is_ok());
    assert!(validate_category("health").is_ok());
    assert!(validate_recurrence("monthly").is_ok());
}

#[test]
fn unknown_category_is_rejected() {
    assert_eq!(validate_category("chores"), Err(StatusCode::BAD_REQUEST));
    assert_eq!(validate_recurrence("hourly"), Err(StatusCode::BAD_REQUEST));
}

// =============================================================================
// request bodies
// =============================================================================

#[test]
fn create_body_fills_defaults() {
    let body: CreateTaskBody = serde_json::from_value(serde_json::json!({ "title": "Water plants" })).unwrap();
    assert_eq!(body.category, "personal");
    assert_eq!(body.recurrence, "none");
    assert_eq!(body.icon, "Star");
    assert!(body.time_of_day.is_none());
}

#[test]
fn update_body_distinguishes_missing_from_null() {
    let missing: UpdateTaskBody = serde_json::from_value(serde_json::json!({})).unwrap();
    assert!(missing.time_of_day.is_none());

    let cleared: UpdateTaskBody = serde_json::from_value(serde_json::json!({ "time_of_day": null })).unwrap();
    assert_eq!(cleared.time_of_day, Some(None));

    let set: UpdateTaskBody = serde_json::from_value(serde_json::json!({ "time_of_day": "morning" })).unwrap();
    assert_eq!(set.time_of_day, Some(Some("morning".to_string())));
}

// =============================================================================
// serialization
// =============================================================================

// =============================================================================
// live-db integration
// =============================================================================

#[cfg(feature = "live-db-tests")]
mod live {
    use super::*;
    use crate::services::session::SessionUser;
    use crate::state::AppState;

    async fn integration_state() -> AppState {
        let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL required");
        let pool = crate::db::init_pool(&url).await.expect("pool init");
        AppState::new(pool, None, None)
    }

    async fn seed_user(state: &AppState) -> AuthUser {
        let id: Uuid =
            sqlx::query_scalar("INSERT INTO users (email, display_name) VALUES ($1, $2) RETURNING id")
                .bind(format!("{}@test.local", Uuid::new_v4()))
                .bind("task tester")
                .fetch_one(&state.pool)
                .await
                .unwrap();
        AuthUser {
            user: SessionUser {
                id,
                display_name: "task tester".into(),
                email: None,
                avatar_url: None,
                auth_method: "email".into(),
            },
            token: String::new(),
        }
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL/live Postgres"]
    async fn list_returns_newest_first() {
        let state = integration_state().await;
        let auth = seed_user(&state).await;

        for (title, offset_secs) in [("first", 0), ("second", 10), ("third", 20)] {
            sqlx::query(
                "INSERT INTO tasks (user_id, title, created_at)
                 VALUES ($1, $2, now() + make_interval(secs => $3))",
            )
            .bind(auth.user.id)
            .bind(title)
            .bind(f64::from(offset_secs))
            .execute(&state.pool)
            .await
            .unwrap();
        }

        let Json(tasks) = list_tasks(State(state), auth).await.unwrap();
        let titles: Vec<_> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["third", "second", "first"]);
    }
}

#[test]
fn task_serializes_all_fields() {
    let task = Task {
        id: Uuid::nil(),
        user_id: Uuid::nil(),
        title: "Ship the report".into(),
        category: "work".into(),
        recurrence: "daily".into(),
        time_of_day: Some("morning".into()),
        icon: "Zap".into(),
        completed: false,
        created_at: DateTime::<Utc>::UNIX_EPOCH,
    };
    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["title"], "Ship the report");
    assert_eq!(json["time_of_day"], "morning");
    assert_eq!(json["completed"], false);
}
