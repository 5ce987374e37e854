use std::time::Duration;

use mangawatch::{
    cli::{PromptAction, parse_prompt},
    config::{DEFAULT_REQUEST_TIMEOUT_SECS, parse_timeout},
    types::{Entry, GroupPreference, Lifecycle, Progress, ScrapeErrorBody, Snapshot},
};

#[test]
fn test_group_preference_from_str() {
    assert_eq!(
        "Bokugen Translation".parse::<GroupPreference>().unwrap(),
        GroupPreference::Group("Bokugen Translation".to_string())
    );
    assert_eq!("  spaced ".parse::<GroupPreference>().unwrap(), GroupPreference::Group("spaced".to_string()));
    assert_eq!("any".parse::<GroupPreference>().unwrap(), GroupPreference::Any);
    assert_eq!("ANY".parse::<GroupPreference>().unwrap(), GroupPreference::Any);
    assert_eq!("*".parse::<GroupPreference>().unwrap(), GroupPreference::Any);

    let result = "   ".parse::<GroupPreference>();
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("cannot be empty"));
}

#[test]
fn test_group_preference_matches() {
    let preference = GroupPreference::Group("bokugen".to_string());
    assert!(preference.matches("Bokugen Translation"));
    assert!(preference.matches("BOKUGEN"));
    assert!(!preference.matches("Other Scans"));
    assert!(preference.is_set());

    assert!(GroupPreference::Any.matches("anything"));
    assert!(!GroupPreference::Any.is_set());
}

#[test]
fn test_snapshot_accepts_english_field_names() {
    let snapshot: Snapshot = serde_json::from_str(
        r#"{
            "title": "Title",
            "cover_image_url": "https://example.org/cover.jpg",
            "latest_chapter_label": "Chapter 3",
            "publications": [{"group": "Alpha", "date": null}],
            "source_url": "https://example.org/title"
        }"#,
    )
    .unwrap();

    assert_eq!(snapshot.cover(), Some("https://example.org/cover.jpg"));
    assert_eq!(snapshot.latest().unwrap().group, "Alpha");
    assert!(snapshot.latest().unwrap().date.is_none());
}

#[test]
fn test_snapshot_tolerates_missing_optional_fields() {
    let snapshot: Snapshot = serde_json::from_str(
        r#"{"titulo": "T", "ultimo_capitulo": "C", "url": "https://example.org/t"}"#,
    )
    .unwrap();

    assert!(snapshot.cover().is_none());
    assert!(snapshot.publications.is_empty());
    assert!(snapshot.latest().is_none());
}

#[test]
fn test_error_body_detail() {
    let body: ScrapeErrorBody = serde_json::from_str(r#"{"detail": "Error de red"}"#).unwrap();
    assert_eq!(body.detail_message().as_deref(), Some("Error de red"));

    let body: ScrapeErrorBody = serde_json::from_str(r#"{"detail": "   "}"#).unwrap();
    assert_eq!(body.detail_message(), None);

    let body: ScrapeErrorBody = serde_json::from_str(r#"{"detail": [{"msg": "x"}]}"#).unwrap();
    assert_eq!(body.detail_message(), None);

    let body: ScrapeErrorBody = serde_json::from_str("{}").unwrap();
    assert_eq!(body.detail_message(), None);
}

#[test]
fn test_entry_accessors_follow_lifecycle() {
    let mut entry = Entry::pending("a");
    assert!(entry.snapshot().is_none());
    assert!(entry.error_message().is_none());
    assert!(!entry.is_settled());

    entry.lifecycle = Lifecycle::Loading;
    assert!(!entry.is_settled());
    assert_eq!(entry.lifecycle.label(), "loading");

    entry.lifecycle = Lifecycle::Failed("boom".to_string());
    assert!(entry.is_failed());
    assert!(entry.is_settled());
    assert_eq!(entry.error_message(), Some("boom"));
    assert!(entry.snapshot().is_none());
}

#[test]
fn test_progress() {
    let progress = Progress::start(4);
    assert_eq!(progress, Progress { completed: 0, total: 4 });
    assert!(!progress.is_done());
    assert_eq!(progress.to_string(), "0/4");

    assert!(Progress::default().is_done());
}

#[test]
fn test_parse_timeout() {
    let default = Some(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));

    assert_eq!(parse_timeout(None), default);
    assert_eq!(parse_timeout(Some("garbage")), default);
    assert_eq!(parse_timeout(Some(" 30 ")), Some(Duration::from_secs(30)));
    assert_eq!(parse_timeout(Some("0")), None);
}

#[test]
fn test_parse_prompt() {
    assert_eq!(parse_prompt("r"), PromptAction::RetryFailed);
    assert_eq!(parse_prompt(" Retry \n"), PromptAction::RetryFailed);
    assert_eq!(parse_prompt("3"), PromptAction::RetryRow(3));
    assert_eq!(parse_prompt("q"), PromptAction::Quit);
    assert_eq!(parse_prompt(""), PromptAction::Quit);
    assert_eq!(parse_prompt("0"), PromptAction::Invalid("0".to_string()));
    assert_eq!(parse_prompt("nope"), PromptAction::Invalid("nope".to_string()));
}

#[test]
fn test_cover_label_falls_back_to_placeholder() {
    let mut snapshot: Snapshot = serde_json::from_str(
        r#"{"titulo": "T", "imagen": "  ", "ultimo_capitulo": "C", "url": "https://example.org/t"}"#,
    )
    .unwrap();
    assert_eq!(snapshot.cover_label(), "-");

    snapshot.cover_image_url = Some("https://example.org/cover.jpg".to_string());
    assert_eq!(snapshot.cover_label(), "https://example.org/cover.jpg");
}
