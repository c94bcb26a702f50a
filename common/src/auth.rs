//! OAuthトークンまわりの型
//!
//! トークン本体はアプリから見て不透明。保持の有無だけが状態として意味を持つ。

use futures::channel::oneshot;
use serde::Deserialize;
use std::cell::RefCell;
use std::fmt;

/// スプレッドシート読み書きスコープ
pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// 後続の要求に置き換えられた要求のエラーコード
pub const CANCELLED_CODE: &str = "cancelled";

/// 同意画面の出し方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// 初回: 同意画面を表示
    Consent,
    /// 2回目以降: 画面なしで再取得
    Silent,
}

impl Prompt {
    pub fn as_str(&self) -> &'static str {
        match self {
            Prompt::Consent => "consent",
            Prompt::Silent => "",
        }
    }
}

/// アクセストークン（Debug出力では伏せる）
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Authorization ヘッダ値
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// 認可エラー（プロバイダの値をそのまま保持）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthError {
    pub code: String,
    pub description: Option<String>,
}

impl AuthError {
    pub fn new(code: impl Into<String>, description: Option<String>) -> Self {
        Self { code: code.into(), description }
    }

    /// 応答を待たずに要求が打ち切られた
    pub fn cancelled() -> Self {
        Self::new(CANCELLED_CODE, Some("The authorization request was superseded".into()))
    }

    /// こちら側で打ち切った要求か（プロバイダ由来のエラーではない）
    pub fn is_cancelled(&self) -> bool {
        self.code == CANCELLED_CODE
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.description.as_deref().filter(|d| !d.is_empty()) {
            Some(description) => write!(f, "{}: {}", self.code, description),
            None => f.write_str(&self.code),
        }
    }
}

impl std::error::Error for AuthError {}

pub type TokenResult = Result<AccessToken, AuthError>;

/// 応答待ちのトークン要求（常に最大1件）
///
/// 新しい要求を始めると前の要求の待ち側は `cancelled` で終わる。
#[derive(Debug, Default)]
pub struct PendingToken {
    sender: RefCell<Option<oneshot::Sender<TokenResult>>>,
}

impl PendingToken {
    /// 要求を登録する。前の要求が残っていれば true
    pub fn begin(&self) -> (TokenWaiter, bool) {
        let (sender, receiver) = oneshot::channel();
        let superseded = self.sender.borrow_mut().replace(sender).is_some();
        (TokenWaiter(receiver), superseded)
    }

    /// 待っている要求へ結果を渡す。待ち側がいなければ false
    pub fn resolve(&self, result: TokenResult) -> bool {
        match self.sender.borrow_mut().take() {
            Some(sender) => sender.send(result).is_ok(),
            None => false,
        }
    }
}

pub struct TokenWaiter(oneshot::Receiver<TokenResult>);

impl TokenWaiter {
    pub async fn wait(self) -> TokenResult {
        self.0.await.unwrap_or_else(|_| Err(AuthError::cancelled()))
    }
}

/// トークンクライアントのコールバック値
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl TokenResponse {
    pub fn into_token(self) -> Result<AccessToken, AuthError> {
        if let Some(code) = self.error.filter(|e| !e.is_empty()) {
            return Err(AuthError::new(code, self.error_description));
        }
        match self.access_token.filter(|t| !t.is_empty()) {
            Some(token) => Ok(AccessToken::new(token)),
            None => Err(AuthError::new("invalid_response", Some("No access token returned".into()))),
        }
    }
}

/// トークンクライアントの error_callback 値（ポップアップが閉じられた等）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientError {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl From<ClientError> for AuthError {
    fn from(err: ClientError) -> Self {
        let code = if err.kind.is_empty() { "unknown".to_string() } else { err.kind };
        AuthError::new(code, err.message)
    }
}
