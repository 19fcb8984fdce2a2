//! 設定ファイルのテスト

use tempfile::tempdir;
use ward_round::config::Config;
use ward_round_common::Protocol;

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_save_and_reload() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("config.json");

    let config = Config {
        protocol: Protocol::Gemini,
        endpoint: "https://example.test/models".into(),
        max_attempts: 5,
        base_delay_ms: 250,
        canvas_size: 512,
        ..Default::default()
    };
    config.save_to(&path).unwrap();

    let reloaded = Config::load_from(&path).unwrap();
    assert_eq!(reloaded, config);
}

#[test]
fn test_broken_file_is_an_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(Config::load_from(&path).is_err());
}

#[test]
fn test_retry_settings_flow_into_summarizer() {
    let config = Config { max_attempts: 4, base_delay_ms: 10, min_note_chars: 20, ..Default::default() };
    let summarizer = config.summarizer_config().unwrap();

    assert_eq!(summarizer.retry.max_attempts, 4);
    assert_eq!(summarizer.retry.delay_after(3).as_millis(), 40);
    assert_eq!(summarizer.min_note_chars, 20);
}
