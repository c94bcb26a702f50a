//! セッションコントローラ
//!
//! 画像選択・抽出・認可・エクスポートを AppState 上で直列に進める。
//! シングルスレッド前提（RefCell）。await をまたいで状態を借用しないこと。
//!
//! 抽出とエクスポートは busy フラグで排他する。busy 中の要求はキューせず無視する。

use crate::auth::{AccessToken, Prompt};
use crate::error::Result;
use crate::gemini::build_extraction_request;
use crate::image::EncodedImage;
use crate::loading::{LoadingCycle, LOADING_INTERVAL};
use crate::record::{parse_records, ExtractedRecord};
use crate::services::{
    ExtractionService, Platform, SessionView, SpreadsheetService, Ticker, TokenService,
};
use crate::sheets::{
    spreadsheet_title, CreateSpreadsheetRequest, Spreadsheet, ValueInputOption, ValueRange,
    EXPORT_RANGE,
};
use crate::state::{
    auth_failure_message, export_failure_message, AppState, ExportStatus, SelectedDocument,
    EXTRACTION_FAILED_MESSAGE,
};
use crate::table::export_rows;
use log::{debug, error, info, warn};
use std::cell::RefCell;
use std::rc::Rc;

pub struct Controller<P: Platform> {
    inner: Rc<Inner<P>>,
}

struct Inner<P: Platform> {
    state: RefCell<AppState>,
    timer: RefCell<Option<<P::Ticker as Ticker>::Handle>>,
    extractor: P::Extractor,
    sheets: P::Sheets,
    auth: P::Auth,
    ticker: P::Ticker,
    view: Box<dyn SessionView>,
}

impl<P: Platform> Clone for Controller<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// busy 区間のガード。drop でタイマー停止 → busy 解除。
pub struct BusyScope<'a, P: Platform> {
    controller: &'a Controller<P>,
}

impl<P: Platform> Drop for BusyScope<'_, P> {
    fn drop(&mut self) {
        self.controller.set_busy(false);
    }
}

impl<P: Platform> Controller<P> {
    pub fn new(
        extractor: P::Extractor,
        sheets: P::Sheets,
        auth: P::Auth,
        ticker: P::Ticker,
        view: impl SessionView + 'static,
    ) -> Self {
        let controller = Self {
            inner: Rc::new(Inner {
                state: RefCell::new(AppState::default()),
                timer: RefCell::new(None),
                extractor,
                sheets,
                auth,
                ticker,
                view: Box::new(view),
            }),
        };
        controller.render();
        controller
    }

    /// 現在の状態のコピー
    pub fn snapshot(&self) -> AppState {
        self.inner.state.borrow().clone()
    }

    fn update(&self, f: impl FnOnce(&mut AppState)) {
        f(&mut self.inner.state.borrow_mut());
        self.render();
    }

    fn render(&self) {
        let model = self.inner.state.borrow().view_model();
        self.inner.view.render(&model);
    }

    /// 画像を選択（前の画像は置き換え）
    pub fn select_image(&self, file_name: impl Into<String>, image: EncodedImage) {
        let document = SelectedDocument::new(file_name, image);
        info!(
            "image selected: {} ({}, {} base64 bytes)",
            document.file_name,
            document.image.mime_type,
            document.image.data.len()
        );
        self.update(|s| s.document = Some(document));
    }

    pub fn is_busy(&self) -> bool {
        self.inner.state.borrow().busy
    }

    /// busy の切り替え。同じ値への切り替えは何もしない。
    pub fn set_busy(&self, busy: bool) {
        if busy == self.is_busy() {
            return;
        }

        if busy {
            self.update(|s| {
                s.busy = true;
                s.loading = LoadingCycle::default();
            });
            let weak = Rc::downgrade(&self.inner);
            let handle = self.inner.ticker.start(
                LOADING_INTERVAL,
                Box::new(move || {
                    if let Some(inner) = weak.upgrade() {
                        Controller { inner }.advance_loading();
                    }
                }),
            );
            *self.inner.timer.borrow_mut() = Some(handle);
            debug!("loading ticker started");
        } else {
            // 表示を消す前にタイマーを止める
            let handle = self.inner.timer.borrow_mut().take();
            drop(handle);
            debug!("loading ticker stopped");
            self.update(|s| s.busy = false);
        }
    }

    fn enter_busy(&self) -> Option<BusyScope<'_, P>> {
        if self.is_busy() {
            return None;
        }
        self.set_busy(true);
        Some(BusyScope { controller: self })
    }

    fn advance_loading(&self) {
        if !self.is_busy() {
            return;
        }
        self.update(|s| s.loading.advance());
    }

    /// 画像からレコードを抽出
    ///
    /// 画像なし・busy 中は何もしない。失敗時は汎用エラーを表示し結果を空にする。
    pub async fn extract(&self) {
        let image = {
            let state = self.inner.state.borrow();
            if !state.can_extract() {
                return;
            }
            let Some(document) = &state.document else {
                return;
            };
            document.image.clone()
        };

        let Some(_busy) = self.enter_busy() else {
            return;
        };

        self.update(|s| {
            s.results.clear();
            s.error = None;
            s.export_status = None;
        });

        match self.run_extraction(&image).await {
            Ok(records) => {
                info!("extracted {} record(s)", records.len());
                self.update(|s| s.results = records);
            }
            Err(e) => {
                error!("extraction failed: {}", e);
                self.update(|s| {
                    s.results.clear();
                    s.error = Some(EXTRACTION_FAILED_MESSAGE.to_string());
                });
            }
        }
    }

    async fn run_extraction(&self, image: &EncodedImage) -> Result<Vec<ExtractedRecord>> {
        info!("sending {} image for extraction", image.mime_type);
        let request = build_extraction_request(image);
        let response = self.inner.extractor.generate_content(&request).await?;
        parse_records(&response.text()?)
    }

    /// スプレッドシートへのアクセスを要求
    ///
    /// 未接続なら同意画面、接続済みなら画面なしで再取得する。
    /// 後続の要求に置き換えられた要求は表示に触れない。
    pub async fn connect(&self) {
        let prompt = if self.inner.state.borrow().is_connected() {
            Prompt::Silent
        } else {
            Prompt::Consent
        };
        info!("requesting spreadsheet access ({:?})", prompt);

        match self.inner.auth.request_token(prompt).await {
            Ok(token) => {
                info!("spreadsheet access granted");
                self.update(|s| s.token = Some(token));
            }
            Err(e) if e.is_cancelled() => {
                warn!("authorization request superseded: {}", e);
            }
            Err(e) => {
                error!("authorization failed: {}", e);
                self.update(|s| s.error = Some(auth_failure_message(&e)));
            }
        }
    }

    /// 結果を新しいスプレッドシートへ書き出す
    ///
    /// 結果が空・未接続・busy 中は何もしない。
    pub async fn export(&self) {
        let (records, token) = {
            let state = self.inner.state.borrow();
            if !state.can_export() {
                return;
            }
            let Some(token) = &state.token else {
                return;
            };
            (state.results.clone(), token.clone())
        };

        let Some(_busy) = self.enter_busy() else {
            return;
        };
        self.update(|s| s.export_status = None);

        let status = match self.run_export(&token, &records).await {
            Ok(sheet) => {
                info!("exported {} row(s) to spreadsheet {}", records.len(), sheet.spreadsheet_id);
                ExportStatus::Success { url: sheet.spreadsheet_url }
            }
            Err(e) => {
                error!("export failed: {}", e);
                ExportStatus::Failure { message: export_failure_message(&e) }
            }
        };
        self.update(|s| s.export_status = Some(status));
    }

    async fn run_export(
        &self,
        token: &AccessToken,
        records: &[ExtractedRecord],
    ) -> Result<Spreadsheet> {
        let title = spreadsheet_title(&chrono::Local::now());
        let sheet = self
            .inner
            .sheets
            .create_spreadsheet(token, &CreateSpreadsheetRequest::titled(title))
            .await?;

        let body = ValueRange::rows(EXPORT_RANGE, export_rows(records));
        self.inner
            .sheets
            .update_values(token, &sheet.spreadsheet_id, ValueInputOption::UserEntered, &body)
            .await?;

        Ok(sheet)
    }

    /// 結果を消去（busy 中は何もしない）
    pub fn clear_results(&self) {
        if !self.inner.state.borrow().can_clear() {
            return;
        }
        self.update(|s| {
            s.results.clear();
            s.error = None;
            s.export_status = None;
        });
    }

    pub fn dismiss_error(&self) {
        self.update(|s| s.error = None);
    }

    pub fn dismiss_export_status(&self) {
        self.update(|s| s.export_status = None);
    }
}
