//! テスト用のインメモリ実装

#![allow(dead_code)]

use docsheet_common::auth::{AccessToken, AuthError, Prompt};
use docsheet_common::gemini::{GeminiRequest, GeminiResponse, Part};
use docsheet_common::sheets::{CreateSpreadsheetRequest, Spreadsheet, ValueInputOption, ValueRange};
use docsheet_common::{
    Controller, Error, ExtractionService, Platform, Result, SessionView, SpreadsheetService,
    Ticker, TokenService, ViewModel,
};
use serde_json::json;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;
use tokio::sync::Notify;

/// AI応答の振る舞い
#[derive(Clone)]
pub enum Reply {
    Text(String),
    NetworkError,
    ApiError(u16, String),
}

#[derive(Default)]
pub struct ExtractorRecord {
    pub calls: Cell<usize>,
    pub mime_types: RefCell<Vec<String>>,
}

pub struct FakeExtractor {
    reply: Reply,
    gate: Option<Rc<Notify>>,
    record: Rc<ExtractorRecord>,
}

impl ExtractionService for FakeExtractor {
    async fn generate_content(&self, request: &GeminiRequest) -> Result<GeminiResponse> {
        self.record.calls.set(self.record.calls.get() + 1);
        for part in &request.contents[0].parts {
            if let Part::InlineData { inline_data } = part {
                self.record.mime_types.borrow_mut().push(inline_data.mime_type.clone());
            }
        }
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.reply {
            Reply::Text(text) => Ok(serde_json::from_value(json!({
                "candidates": [{"content": {"parts": [{"text": text}]}}]
            }))?),
            Reply::NetworkError => Err(Error::Network("connection reset".into())),
            Reply::ApiError(status, body) => Err(Error::from_response(*status, body)),
        }
    }
}

/// スプレッドシート呼び出しの記録
#[derive(Default)]
pub struct SheetsRecord {
    pub calls: RefCell<Vec<String>>,
    pub titles: RefCell<Vec<String>>,
    pub updates: RefCell<Vec<(String, ValueInputOption, ValueRange)>>,
}

#[derive(Default)]
pub struct FakeSheets {
    pub fail_create: Option<(u16, String)>,
    pub fail_update: Option<(u16, String)>,
    record: Rc<SheetsRecord>,
}

impl SpreadsheetService for FakeSheets {
    async fn create_spreadsheet(
        &self,
        _token: &AccessToken,
        request: &CreateSpreadsheetRequest,
    ) -> Result<Spreadsheet> {
        self.record.calls.borrow_mut().push("create".into());
        self.record.titles.borrow_mut().push(request.properties.title.clone());
        if let Some((status, body)) = &self.fail_create {
            return Err(Error::from_response(*status, body));
        }
        Ok(Spreadsheet {
            spreadsheet_id: "sheet-123".into(),
            spreadsheet_url: "https://docs.google.com/spreadsheets/d/sheet-123/edit".into(),
        })
    }

    async fn update_values(
        &self,
        _token: &AccessToken,
        spreadsheet_id: &str,
        option: ValueInputOption,
        body: &ValueRange,
    ) -> Result<()> {
        self.record.calls.borrow_mut().push("update".into());
        self.record
            .updates
            .borrow_mut()
            .push((spreadsheet_id.to_string(), option, body.clone()));
        if let Some((status, body)) = &self.fail_update {
            return Err(Error::from_response(*status, body));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeAuth {
    replies: RefCell<VecDeque<std::result::Result<AccessToken, AuthError>>>,
    prompts: Rc<RefCell<Vec<Prompt>>>,
}

impl TokenService for FakeAuth {
    async fn request_token(&self, prompt: Prompt) -> std::result::Result<AccessToken, AuthError> {
        self.prompts.borrow_mut().push(prompt);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(AccessToken::new("ya29.test")))
    }
}

/// 手動で進めるタイマー
#[derive(Default)]
pub struct TickerRecord {
    pub started: Cell<usize>,
    pub active: Cell<usize>,
    pub period: Cell<Option<Duration>>,
    callback: RefCell<Option<Box<dyn FnMut()>>>,
}

impl TickerRecord {
    pub fn tick(&self) {
        if let Some(callback) = self.callback.borrow_mut().as_mut() {
            callback();
        }
    }
}

pub struct FakeTicker {
    record: Rc<TickerRecord>,
}

pub struct FakeHandle {
    record: Rc<TickerRecord>,
}

impl Drop for FakeHandle {
    fn drop(&mut self) {
        self.record.active.set(self.record.active.get() - 1);
        self.record.callback.borrow_mut().take();
    }
}

impl Ticker for FakeTicker {
    type Handle = FakeHandle;

    fn start(&self, period: Duration, tick: Box<dyn FnMut()>) -> FakeHandle {
        self.record.started.set(self.record.started.get() + 1);
        self.record.active.set(self.record.active.get() + 1);
        self.record.period.set(Some(period));
        *self.record.callback.borrow_mut() = Some(tick);
        FakeHandle {
            record: Rc::clone(&self.record),
        }
    }
}

pub struct RecordingView {
    models: Rc<RefCell<Vec<ViewModel>>>,
}

impl SessionView for RecordingView {
    fn render(&self, model: &ViewModel) {
        self.models.borrow_mut().push(model.clone());
    }
}

pub struct Fakes;

impl Platform for Fakes {
    type Extractor = FakeExtractor;
    type Sheets = FakeSheets;
    type Auth = FakeAuth;
    type Ticker = FakeTicker;
}

/// テストハーネス
pub struct Harness {
    pub controller: Controller<Fakes>,
    pub extractor: Rc<ExtractorRecord>,
    pub sheets: Rc<SheetsRecord>,
    pub prompts: Rc<RefCell<Vec<Prompt>>>,
    pub ticker: Rc<TickerRecord>,
    pub views: Rc<RefCell<Vec<ViewModel>>>,
}

impl Harness {
    pub fn last_view(&self) -> ViewModel {
        self.views.borrow().last().cloned().unwrap_or_default()
    }
}

pub struct HarnessBuilder {
    reply: Reply,
    gate: Option<Rc<Notify>>,
    sheets: FakeSheets,
    auth_replies: VecDeque<std::result::Result<AccessToken, AuthError>>,
}

impl HarnessBuilder {
    pub fn new() -> Self {
        Self {
            reply: Reply::Text("[]".into()),
            gate: None,
            sheets: FakeSheets::default(),
            auth_replies: VecDeque::new(),
        }
    }

    pub fn reply(mut self, reply: Reply) -> Self {
        self.reply = reply;
        self
    }

    pub fn gate(mut self, gate: Rc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn fail_create(mut self, status: u16, body: &str) -> Self {
        self.sheets.fail_create = Some((status, body.to_string()));
        self
    }

    pub fn fail_update(mut self, status: u16, body: &str) -> Self {
        self.sheets.fail_update = Some((status, body.to_string()));
        self
    }

    pub fn auth_reply(mut self, reply: std::result::Result<AccessToken, AuthError>) -> Self {
        self.auth_replies.push_back(reply);
        self
    }

    pub fn build(self) -> Harness {
        let extractor = Rc::new(ExtractorRecord::default());
        let sheets = Rc::new(SheetsRecord::default());
        let prompts = Rc::new(RefCell::new(Vec::new()));
        let ticker = Rc::new(TickerRecord::default());
        let views = Rc::new(RefCell::new(Vec::new()));

        let controller = Controller::<Fakes>::new(
            FakeExtractor {
                reply: self.reply,
                gate: self.gate,
                record: Rc::clone(&extractor),
            },
            FakeSheets {
                record: Rc::clone(&sheets),
                ..self.sheets
            },
            FakeAuth {
                replies: RefCell::new(self.auth_replies),
                prompts: Rc::clone(&prompts),
            },
            FakeTicker {
                record: Rc::clone(&ticker),
            },
            RecordingView {
                models: Rc::clone(&views),
            },
        );

        Harness {
            controller,
            extractor,
            sheets,
            prompts,
            ticker,
            views,
        }
    }
}

pub fn jpeg(len: usize) -> docsheet_common::EncodedImage {
    docsheet_common::EncodedImage::from_bytes("image/jpeg", &vec![0xFF; len])
}
