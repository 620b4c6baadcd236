use super::*;

#[test]
fn sticker_arrays_pass_validation() {
    assert!(validate_stickers(&serde_json::json!([])).is_ok());
    assert!(validate_stickers(&serde_json::json!([{ "emoji": "⭐", "x": 10, "y": 20 }])).is_ok());
}

#[test]
fn non_array_stickers_are_rejected() {
    assert_eq!(validate_stickers(&serde_json::json!({})), Err(StatusCode::BAD_REQUEST));
    assert_eq!(validate_stickers(&serde_json::json!("sticker")), Err(StatusCode::BAD_REQUEST));
    assert_eq!(validate_stickers(&serde_json::Value::Null), Err(StatusCode::BAD_REQUEST));
}

#[test]
fn absent_or_blank_image_gets_the_placeholder() {
    assert_eq!(goal_image_or_placeholder(None), PLACEHOLDER_IMAGE_URL);
    assert_eq!(goal_image_or_placeholder(Some("   ")), PLACEHOLDER_IMAGE_URL);
    assert_eq!(
        goal_image_or_placeholder(Some("https://example.com/peak.jpg")),
        "https://example.com/peak.jpg"
    );
}

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
                .bind("goal tester")
                .fetch_one(&state.pool)
                .await
                .unwrap();
        AuthUser {
            user: SessionUser {
                id,
                display_name: "goal tester".into(),
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

        for (title, offset_secs) in [("older", 0), ("newer", 10)] {
            sqlx::query(
                "INSERT INTO goals (user_id, title, image_url, created_at)
                 VALUES ($1, $2, $3, now() + make_interval(secs => $4))",
            )
            .bind(auth.user.id)
            .bind(title)
            .bind(PLACEHOLDER_IMAGE_URL)
            .bind(f64::from(offset_secs))
            .execute(&state.pool)
            .await
            .unwrap();
        }

        let Json(goals) = list_goals(State(state), auth).await.unwrap();
        let titles: Vec<_> = goals.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, ["newer", "older"]);
    }
}

#[test]
fn goal_serializes_stickers_verbatim() {
    let goal = Goal {
        id: Uuid::nil(),
        user_id: Uuid::nil(),
        title: "Run a marathon".into(),
        image_url: None,
        stickers: serde_json::json!([{ "emoji": "🏅" }]),
        created_at: DateTime::<Utc>::UNIX_EPOCH,
    };
    let json = serde_json::to_value(&goal).unwrap();
    assert_eq!(json["stickers"][0]["emoji"], "🏅");
}
