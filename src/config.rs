use crate::error::{Result, WardRoundError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use ward_round_common::summary::{gemini_url, DEFAULT_GEMINI_MODEL, GEMINI_API_BASE, LOCAL_ENDPOINT, MIN_NOTE_CHARS};
use ward_round_common::{Protocol, RetryPolicy, SummarizerConfig};

/// 描画サイズの上限（px）
pub const MAX_CANVAS_SIZE: u32 = 8192;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub protocol: Protocol,
    /// Local: POST先URL / Gemini: モデル一覧のベースURL
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub timeout_seconds: u64,
    pub min_note_chars: usize,
    pub canvas_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            protocol: Protocol::Local,
            endpoint: LOCAL_ENDPOINT.into(),
            model: DEFAULT_GEMINI_MODEL.into(),
            api_key: None,
            max_attempts: 3,
            base_delay_ms: 1000,
            timeout_seconds: 30,
            min_note_chars: MIN_NOTE_CHARS,
            canvas_size: 400,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| WardRoundError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("ward-round").join("config.json"))
    }

    pub fn get_api_key(&self) -> Result<String> {
        // 環境変数を優先
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            if !key.trim().is_empty() {
                return Ok(key);
            }
        }

        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(WardRoundError::MissingApiKey)
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }

    /// 設定ファイルの描画サイズ（1〜`MAX_CANVAS_SIZE`）
    pub fn canvas_size(&self) -> Result<u32> {
        if self.canvas_size == 0 || self.canvas_size > MAX_CANVAS_SIZE {
            return Err(WardRoundError::Config(format!(
                "canvas_size は1〜{}にしてください（現在: {}）",
                MAX_CANVAS_SIZE, self.canvas_size
            )));
        }
        Ok(self.canvas_size)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// プロトコルに応じて最終URLを解決し、要約クライアント用の設定を作る
    pub fn summarizer_config(&self) -> Result<SummarizerConfig> {
        if self.max_attempts == 0 {
            return Err(WardRoundError::Config("max_attempts は1以上にしてください".into()));
        }

        let url = match self.protocol {
            Protocol::Local => self.endpoint.clone(),
            Protocol::Gemini => {
                let base = if self.endpoint == LOCAL_ENDPOINT || self.endpoint.is_empty() {
                    GEMINI_API_BASE
                } else {
                    self.endpoint.as_str()
                };
                gemini_url(base, &self.model, &self.get_api_key()?)
            }
        };

        Ok(SummarizerConfig {
            protocol: self.protocol,
            url,
            min_note_chars: self.min_note_chars,
            retry: RetryPolicy::new(self.max_attempts, Duration::from_millis(self.base_delay_ms)),
        })
    }
}
