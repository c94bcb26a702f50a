//! 外部サービスとの境界
//!
//! コントローラはこれらのトレイト越しにAI・スプレッドシート・認可・タイマー・画面に触れる。
//! ブラウザ実装は web-wasm、テストではインメモリ実装を差し込む。

use crate::auth::{AccessToken, AuthError, Prompt};
use crate::error::Result;
use crate::gemini::{GeminiRequest, GeminiResponse};
use crate::sheets::{CreateSpreadsheetRequest, Spreadsheet, ValueInputOption, ValueRange};
use crate::state::ViewModel;
use std::time::Duration;

/// AI抽出サービス（generateContent 1回）
#[allow(async_fn_in_trait)]
pub trait ExtractionService {
    async fn generate_content(&self, request: &GeminiRequest) -> Result<GeminiResponse>;
}

/// スプレッドシートサービス
#[allow(async_fn_in_trait)]
pub trait SpreadsheetService {
    async fn create_spreadsheet(
        &self,
        token: &AccessToken,
        request: &CreateSpreadsheetRequest,
    ) -> Result<Spreadsheet>;

    async fn update_values(
        &self,
        token: &AccessToken,
        spreadsheet_id: &str,
        option: ValueInputOption,
        body: &ValueRange,
    ) -> Result<()>;
}

/// OAuthトークン取得（1要求につき1応答）
#[allow(async_fn_in_trait)]
pub trait TokenService {
    async fn request_token(&self, prompt: Prompt) -> std::result::Result<AccessToken, AuthError>;
}

/// 繰り返しタイマー。ハンドルを drop すると停止する。
pub trait Ticker {
    type Handle: 'static;

    fn start(&self, period: Duration, tick: Box<dyn FnMut()>) -> Self::Handle;
}

/// 状態変化の描画先
pub trait SessionView {
    fn render(&self, model: &ViewModel);
}

/// 実行環境ごとの実装の組
pub trait Platform: 'static {
    type Extractor: ExtractionService + 'static;
    type Sheets: SpreadsheetService + 'static;
    type Auth: TokenService + 'static;
    type Ticker: Ticker + 'static;
}
