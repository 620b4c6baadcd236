use super::*;

#[test]
fn mood_labels_cover_the_scale() {
    assert_eq!(mood_label(1), Some("Drained"));
    assert_eq!(mood_label(2), Some("Sad"));
    assert_eq!(mood_label(3), Some("Neutral"));
    assert_eq!(mood_label(4), Some("Happy"));
    assert_eq!(mood_label(5), Some("Energized"));
}

#[test]
fn out_of_range_moods_have_no_label() {
    assert_eq!(mood_label(0), None);
    assert_eq!(mood_label(6), None);
    assert_eq!(mood_label(-1), None);
}

#[test]
fn list_query_defaults_to_thirty() {
    let q: ListMoodsQuery = serde_json::from_value(serde_json::json!({})).unwrap();
    assert_eq!(q.limit, 30);
}

#[test]
fn mood_log_serializes_label() {
    let log = MoodLog {
        id: Uuid::nil(),
        user_id: Uuid::nil(),
        mood: 5,
        label: "Energized",
        note: String::new(),
        logged_at: DateTime::<Utc>::UNIX_EPOCH,
    };
    let json = serde_json::to_value(&log).unwrap();
    assert_eq!(json["mood"], 5);
    assert_eq!(json["label"], "Energized");
}
