use super::*;

fn body(display_name: Option<&str>, bio: Option<&str>) -> UpdateProfileBody {
    UpdateProfileBody {
        display_name: display_name.map(String::from),
        bio: bio.map(String::from),
        avatar_url: None,
    }
}

#[test]
fn empty_update_is_valid() {
    assert!(validate_profile_update(&body(None, None)).is_ok());
}

#[test]
fn blank_display_name_is_rejected() {
    assert_eq!(validate_profile_update(&body(Some("   "), None)), Err(StatusCode::BAD_REQUEST));
}

#[test]
fn display_name_length_limit() {
    let long = "x".repeat(MAX_DISPLAY_NAME_LEN + 1);
    assert_eq!(validate_profile_update(&body(Some(&long), None)), Err(StatusCode::BAD_REQUEST));

    let ok = "x".repeat(MAX_DISPLAY_NAME_LEN);
    assert!(validate_profile_update(&body(Some(&ok), None)).is_ok());
}

#[test]
fn bio_length_limit() {
    let long = "y".repeat(MAX_BIO_LEN + 1);
    assert_eq!(validate_profile_update(&body(None, Some(&long))), Err(StatusCode::BAD_REQUEST));
}

#[test]
fn profile_serializes_nested_stats() {
    let profile = Profile {
        id: Uuid::nil(),
        email: Some("me@example.com".into()),
        display_name: Some("Me".into()),
        avatar_url: None,
        bio: None,
        created_at: DateTime::<Utc>::UNIX_EPOCH,
        stats: ProfileStats {
            tasks_completed: 4,
            habits_tracked: 2,
            best_streak: 7,
            journal_entries: 12,
            latest_mood: Some(4),
        },
    };
    let json = serde_json::to_value(&profile).unwrap();
    assert_eq!(json["stats"]["best_streak"], 7);
    assert_eq!(json["stats"]["latest_mood"], 4);
}
