//! 起動時設定（APIキーとOAuthクライアントID）

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const CLIENT_ID_VAR: &str = "GOOGLE_CLIENT_ID";
pub const MODEL_VAR: &str = "GEMINI_MODEL";

#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub gemini_api_key: String,
    pub google_client_id: String,
    #[serde(default = "default_model")]
    pub gemini_model: String,
}

fn default_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

impl AppConfig {
    /// 値から組み立てる（秘密情報が空ならエラー）
    pub fn from_values(
        api_key: Option<&str>,
        client_id: Option<&str>,
        model: Option<&str>,
    ) -> Result<Self> {
        let required = |value: Option<&str>, name: &str| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or_else(|| Error::Config(format!("{} is not set", name)))
        };

        Ok(Self {
            gemini_api_key: required(api_key, API_KEY_VAR)?,
            google_client_id: required(client_id, CLIENT_ID_VAR)?,
            gemini_model: model
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .unwrap_or_else(default_model),
        })
    }

    /// 環境変数から読み込み（非WASM環境のみ）
    #[cfg(not(feature = "wasm"))]
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_VAR).ok();
        let client_id = std::env::var(CLIENT_ID_VAR).ok();
        let model = std::env::var(MODEL_VAR).ok();
        Self::from_values(api_key.as_deref(), client_id.as_deref(), model.as_deref())
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("gemini_api_key", &"***")
            .field("google_client_id", &self.google_client_id)
            .field("gemini_model", &self.gemini_model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_values_defaults_model() {
        let config = AppConfig::from_values(Some("key"), Some("id.apps.googleusercontent.com"), None).unwrap();
        assert_eq!(config.gemini_model, DEFAULT_GEMINI_MODEL);
    }

    #[test]
    fn test_from_values_requires_secrets() {
        let err = AppConfig::from_values(None, Some("id"), None).unwrap_err();
        assert_eq!(err.to_string(), "Config error: GEMINI_API_KEY is not set");

        let err = AppConfig::from_values(Some("key"), Some("  "), None).unwrap_err();
        assert!(err.to_string().contains("GOOGLE_CLIENT_ID"));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = AppConfig::from_values(Some("super-secret"), Some("id"), Some("m")).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("\"m\""));
    }

    #[test]
    fn test_deserialize_without_model() {
        let config: AppConfig =
            serde_json::from_str(r#"{"gemini_api_key": "k", "google_client_id": "c"}"#).unwrap();
        assert_eq!(config.gemini_model, DEFAULT_GEMINI_MODEL);
    }
}
