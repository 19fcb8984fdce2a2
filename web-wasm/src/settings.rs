//! ブラウザ側の接続設定
//!
//! プロトコルとエンドポイントは localStorage に保存する。APIキーはメモリ上のみ。

use gloo::storage::{LocalStorage, Storage};
use ward_round_common::summary::{gemini_url, DEFAULT_GEMINI_MODEL, GEMINI_API_BASE, LOCAL_ENDPOINT};
use ward_round_common::{Protocol, SummarizerConfig};

const PROTOCOL_KEY: &str = "ward-round.protocol";
const ENDPOINT_KEY: &str = "ward-round.endpoint";

#[derive(Debug, Clone, PartialEq)]
pub struct WebSettings {
    pub protocol: Protocol,
    /// Local: POST先URL / Gemini: モデル一覧のベースURL（空なら既定）
    pub endpoint: String,
    pub api_key: String,
}

impl Default for WebSettings {
    fn default() -> Self {
        Self {
            protocol: Protocol::Local,
            endpoint: LOCAL_ENDPOINT.to_string(),
            api_key: String::new(),
        }
    }
}

impl WebSettings {
    /// 保存済みの値を読む（なければ既定値）
    pub fn load() -> Self {
        let defaults = Self::default();
        Self {
            protocol: LocalStorage::get(PROTOCOL_KEY).unwrap_or(defaults.protocol),
            endpoint: LocalStorage::get(ENDPOINT_KEY).unwrap_or(defaults.endpoint),
            api_key: String::new(),
        }
    }

    pub fn save(&self) {
        let saved = LocalStorage::set(PROTOCOL_KEY, self.protocol)
            .and_then(|_| LocalStorage::set(ENDPOINT_KEY, &self.endpoint));
        if let Err(e) = saved {
            web_sys::console::warn_1(&format!("設定を保存できません: {}", e).into());
        }
    }

    /// 要約クライアント用の設定を作る
    pub fn summarizer_config(&self) -> Result<SummarizerConfig, String> {
        let endpoint = self.endpoint.trim();
        match self.protocol {
            Protocol::Local => Ok(SummarizerConfig::local(if endpoint.is_empty() {
                LOCAL_ENDPOINT
            } else {
                endpoint
            })),
            Protocol::Gemini => {
                let key = self.api_key.trim();
                if key.is_empty() {
                    return Err("A Gemini API key is required for the Gemini protocol.".to_string());
                }
                let base = if endpoint.is_empty() || endpoint == LOCAL_ENDPOINT {
                    GEMINI_API_BASE
                } else {
                    endpoint
                };
                Ok(SummarizerConfig {
                    protocol: Protocol::Gemini,
                    url: gemini_url(base, DEFAULT_GEMINI_MODEL, key),
                    ..SummarizerConfig::default()
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_local_endpoint() {
        let config = WebSettings::default().summarizer_config().unwrap();
        assert_eq!(config.protocol, Protocol::Local);
        assert_eq!(config.url, LOCAL_ENDPOINT);
    }

    #[test]
    fn test_blank_local_endpoint_falls_back() {
        let settings = WebSettings { endpoint: "  ".into(), ..Default::default() };
        assert_eq!(settings.summarizer_config().unwrap().url, LOCAL_ENDPOINT);
    }

    #[test]
    fn test_gemini_requires_key() {
        let settings = WebSettings {
            protocol: Protocol::Gemini,
            api_key: "   ".into(),
            ..Default::default()
        };
        assert!(settings.summarizer_config().is_err());
    }

    #[test]
    fn test_gemini_uses_default_base() {
        let settings = WebSettings {
            protocol: Protocol::Gemini,
            api_key: "k&y".into(),
            ..Default::default()
        };
        let config = settings.summarizer_config().unwrap();
        assert_eq!(config.protocol, Protocol::Gemini);
        assert_eq!(config.url, gemini_url(GEMINI_API_BASE, DEFAULT_GEMINI_MODEL, "k&y"));
        assert!(config.url.ends_with("?key=k%26y"));
    }

    #[test]
    fn test_gemini_custom_base() {
        let settings = WebSettings {
            protocol: Protocol::Gemini,
            endpoint: "https://proxy.test/models/".into(),
            api_key: "abc".into(),
        };
        assert_eq!(
            settings.summarizer_config().unwrap().url,
            format!("https://proxy.test/models/{}:generateContent?key=abc", DEFAULT_GEMINI_MODEL)
        );
    }
}
