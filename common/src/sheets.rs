//! Google Sheets API の送受信型

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;

pub const SHEETS_API_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// 書き込み開始位置（先頭シートの左上）
pub const EXPORT_RANGE: &str = "A1";

pub const SPREADSHEET_TITLE_PREFIX: &str = "Extracted Booking Data - ";

/// 新規スプレッドシートのタイトル
pub fn spreadsheet_title<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("{}{}", SPREADSHEET_TITLE_PREFIX, now.format("%Y-%m-%d %H:%M:%S"))
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateSpreadsheetRequest {
    pub properties: SpreadsheetProperties,
}

impl CreateSpreadsheetRequest {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            properties: SpreadsheetProperties { title: title.into() },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SpreadsheetProperties {
    pub title: String,
}

/// 作成されたスプレッドシート
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spreadsheet {
    pub spreadsheet_id: String,
    pub spreadsheet_url: String,
}

/// 入力値の解釈モード
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueInputOption {
    Raw,
    UserEntered,
}

impl ValueInputOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueInputOption::Raw => "RAW",
            ValueInputOption::UserEntered => "USER_ENTERED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    pub range: String,
    pub major_dimension: String,
    pub values: Vec<Vec<Value>>,
}

impl ValueRange {
    pub fn rows(range: &str, values: Vec<Vec<Value>>) -> Self {
        Self {
            range: range.to_string(),
            major_dimension: "ROWS".to_string(),
            values,
        }
    }
}

/// values.update のURL
pub fn values_update_url(spreadsheet_id: &str, range: &str, option: ValueInputOption) -> String {
    format!(
        "{}/{}/values/{}?valueInputOption={}",
        SHEETS_API_URL,
        spreadsheet_id,
        range,
        option.as_str()
    )
}
