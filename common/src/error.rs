//! エラー型定義

use serde::Deserialize;
use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Empty response")]
    EmptyResponse,
}

impl Error {
    /// 非2xxレスポンスからエラーを組み立てる
    ///
    /// Google系APIのエラーボディ `{"error": {"code", "message", "status"}}` から
    /// メッセージを取り出す。JSONでない場合はメッセージ空のまま。
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorEnvelope>(body)
            .map(|envelope| envelope.error.message)
            .unwrap_or_default();
        Error::Api { status, message }
    }

    /// プロバイダが返したエラーメッセージ（あれば）
    pub fn provider_message(&self) -> Option<&str> {
        match self {
            Error::Api { message, .. } if !message.trim().is_empty() => Some(message.trim()),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
