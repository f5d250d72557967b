use super::*;

#[test]
fn defaults_match_documented_values() {
    let config = SyncConfig::default();
    assert_eq!(config.local_default, "http://127.0.0.1:8000");
    assert_eq!(config.save_debounce(), Duration::from_millis(700));
    assert_eq!(config.request_timeout(), Duration::from_secs(15));
    assert_eq!(config.store_dir, PathBuf::from(".planview"));
}

#[test]
fn candidates_are_ordered_and_deduplicated() {
    let config = SyncConfig {
        api_base: Some("https://api.example.test/".to_owned()),
        same_origin: Some("http://127.0.0.1:8000".to_owned()),
        ..SyncConfig::default()
    };
    assert_eq!(config.candidate_bases(), vec!["https://api.example.test", "http://127.0.0.1:8000"]);
}

#[test]
fn blank_override_is_skipped() {
    let config = SyncConfig { api_base: Some("  ".to_owned()), ..SyncConfig::default() };
    assert_eq!(config.candidate_bases(), vec!["http://127.0.0.1:8000"]);
}

#[test]
fn file_base_prefers_explicit_then_resolved() {
    let mut config = SyncConfig::default();
    assert_eq!(config.file_base_or(Some("http://api.test/")).as_deref(), Some("http://api.test"));
    assert_eq!(config.file_base_or(None).as_deref(), Some("http://127.0.0.1:8000"));
    config.file_base = Some("http://files.test".to_owned());
    assert_eq!(config.file_base_or(Some("http://api.test")).as_deref(), Some("http://files.test"));
}

#[test]
fn env_parse_falls_back_on_missing_or_garbage() {
    assert_eq!(env_parse("PLAN_SYNC_TEST_UNSET_VAR", 42_u64), 42);
}
