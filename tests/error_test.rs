//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use ward_round::annotate::parse_events;
use ward_round::error::WardRoundError;
use ward_round_common::{Shape, SummaryError};

/// 未知の形状名
#[test]
fn test_unknown_shape() {
    let err = "heart".parse::<Shape>().unwrap_err();
    let err: WardRoundError = err.into();
    assert!(format!("{}", err).contains("heart"));
}

/// 形状名の別名
#[test]
fn test_shape_aliases() {
    assert_eq!("Chest".parse::<Shape>().unwrap(), Shape::Lungs);
    assert_eq!("limbs".parse::<Shape>().unwrap(), Shape::Legs);
    assert_eq!(" abdomen ".trim().parse::<Shape>().unwrap(), Shape::Abdomen);
}

/// 座標が数値でないイベント
#[test]
fn test_events_with_bad_coordinates() {
    let result = parse_events(r#"[{"kind": "down", "x": "left", "y": 1}]"#);
    assert!(matches!(result, Err(WardRoundError::InvalidEvents(_))));
}

/// 範囲外の座標（f32で表せない）
#[test]
fn test_events_with_overflowing_coordinates() {
    let result = parse_events(r#"[{"kind": "down", "x": 1e300, "y": 1}]"#);
    assert!(matches!(result, Err(WardRoundError::InvalidEvents(_))));
}

/// WardRoundErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        WardRoundError::Config("テスト設定エラー".to_string()),
        WardRoundError::MissingApiKey,
        WardRoundError::MissingNotes,
        WardRoundError::Render("描画エラー".to_string()),
        WardRoundError::InvalidEvents("不正".to_string()),
        WardRoundError::HttpClient("初期化失敗".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "Error display should not be empty");
    }
}

/// 要約エラーはそのままの文言で表示される
#[test]
fn test_summary_error_is_transparent() {
    let inner = SummaryError::Validation { min: 50, actual: 12 };
    let err: WardRoundError = inner.clone().into();
    assert_eq!(format!("{}", err), format!("{}", inner));
    assert!(format!("{}", err).contains("at least 50 characters"));
}

#[test]
fn test_exhausted_mentions_last_error() {
    let err = SummaryError::Exhausted {
        attempts: 3,
        last: Box::new(SummaryError::Transport("connection refused".into())),
    };
    let display = format!("{}", err);
    assert!(display.contains("3 attempts"));
    assert!(display.contains("connection refused"));
}

/// IOエラー変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: WardRoundError = io_err.into();
    assert!(matches!(err, WardRoundError::Io(_)));
}
