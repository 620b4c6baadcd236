use super::*;

#[test]
fn create_body_defaults_to_empty_tags() {
    let body: CreateEntryBody =
        serde_json::from_value(serde_json::json!({ "content": "Long day, good ending." })).unwrap();
    assert!(body.tags.is_empty());
    assert!(body.ink_color.is_none());
    assert!(body.nexus_comment.is_none());
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
                .bind("journal tester")
                .fetch_one(&state.pool)
                .await
                .unwrap();
        AuthUser {
            user: SessionUser {
                id,
                display_name: "journal tester".into(),
                email: None,
                avatar_url: None,
                auth_method: "email".into(),
            },
            token: String::new(),
        }
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL/live Postgres"]
    async fn fetch_one_returns_own_entry_only() {
        let state = integration_state().await;
        let owner = seed_user(&state).await;
        let stranger = seed_user(&state).await;

        let entry_id: Uuid = sqlx::query_scalar(
            "INSERT INTO journal_entries (user_id, content) VALUES ($1, $2) RETURNING id",
        )
        .bind(owner.user.id)
        .bind("A quiet morning.")
        .fetch_one(&state.pool)
        .await
        .unwrap();

        let Json(entry) = get_entry(State(state.clone()), owner, Path(entry_id)).await.unwrap();
        assert_eq!(entry.content, "A quiet morning.");

        let err = get_entry(State(state), stranger, Path(entry_id)).await.unwrap_err();
        assert_eq!(err, StatusCode::NOT_FOUND);
    }
}

#[test]
fn entry_content_survives_serialization_untouched() {
    let content = "Line one.\n\n  Indented, with \"quotes\" and emoji ✨";
    let entry = JournalEntry {
        id: Uuid::nil(),
        user_id: Uuid::nil(),
        content: content.into(),
        ink_color: Some("#1d4ed8".into()),
        nexus_comment: None,
        tags: vec!["gratitude".into()],
        created_at: DateTime::<Utc>::UNIX_EPOCH,
    };
    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["content"], content);
    assert_eq!(json["tags"][0], "gratitude");
}
