use super::*;

// =============================================================================
// bytes_to_hex
// =============================================================================

#[test]
fn bytes_to_hex_empty() {
    assert_eq!(bytes_to_hex(&[]), "");
}

#[test]
fn bytes_to_hex_leading_zero() {
    assert_eq!(bytes_to_hex(&[0x0a]), "0a");
}

#[test]
fn bytes_to_hex_multi_byte() {
    assert_eq!(bytes_to_hex(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
}

// =============================================================================
// generate_token
// =============================================================================

#[test]
fn generate_token_is_64_hex_chars() {
    let token = generate_token();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn generate_token_two_calls_differ() {
    assert_ne!(generate_token(), generate_token());
}

// =============================================================================
// SessionUser
// =============================================================================

#[test]
fn session_user_serializes_all_fields() {
    let user = SessionUser {
        id: Uuid::nil(),
        display_name: "ada".into(),
        email: Some("ada@example.com".into()),
        avatar_url: None,
        auth_method: "email".into(),
    };
    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json["display_name"], "ada");
    assert_eq!(json["email"], "ada@example.com");
    assert_eq!(json["auth_method"], "email");
    assert!(json["avatar_url"].is_null());
}

// =============================================================================
// live-db integration
// =============================================================================

#[cfg(feature = "live-db-tests")]
mod live {
    use super::*;

    async fn integration_pool() -> PgPool {
        let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL required");
        crate::db::init_pool(&url).await.expect("pool init")
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL/live Postgres"]
    async fn session_round_trip_validate_and_delete() {
        let pool = integration_pool().await;
        let user_id: Uuid =
            sqlx::query_scalar("INSERT INTO users (email, display_name) VALUES ($1, $2) RETURNING id")
                .bind(format!("{}@test.local", Uuid::new_v4()))
                .bind("test user")
                .fetch_one(&pool)
                .await
                .unwrap();

        let token = create_session(&pool, user_id).await.unwrap();
        let user = validate_session(&pool, &token).await.unwrap().unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(user.auth_method, "email");

        delete_session(&pool, &token).await.unwrap();
        assert!(validate_session(&pool, &token).await.unwrap().is_none());
    }
}
