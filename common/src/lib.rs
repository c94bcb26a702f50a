//! Docsheet Common Library
//!
//! Web(WASM)とテストで共有される型とセッション制御:
//! - schema / record / table: 抽出スキーマ、レコード、表描画
//! - gemini / sheets / auth: 外部サービスの送受信型
//! - controller: 抽出・認可・エクスポートのオーケストレーション

pub mod auth;
pub mod config;
pub mod controller;
pub mod error;
pub mod gemini;
pub mod image;
pub mod loading;
pub mod prompts;
pub mod record;
pub mod schema;
pub mod services;
pub mod sheets;
pub mod state;
pub mod table;

pub use auth::{AccessToken, AuthError, Prompt};
pub use config::AppConfig;
pub use controller::Controller;
pub use error::{Error, Result};
pub use image::EncodedImage;
pub use record::{parse_records, ExtractedRecord};
pub use schema::{header_row, EXTRACTION_FIELDS, FIELD_COUNT};
pub use services::{
    ExtractionService, Platform, SessionView, SpreadsheetService, Ticker, TokenService,
};
pub use state::{AppState, ExportStatus, ViewModel};
pub use table::{render_results, TableBody};
