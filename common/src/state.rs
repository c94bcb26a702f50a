//! セッション状態と描画用スナップショット

use crate::auth::{AccessToken, AuthError};
use crate::error::Error;
use crate::image::EncodedImage;
use crate::loading::LoadingCycle;
use crate::record::ExtractedRecord;
use crate::table::{render_results, TableBody};
use std::sync::Arc;

pub const EXTRACTION_FAILED_MESSAGE: &str =
    "Failed to extract data from the image. Please try again.";

pub const EXPORT_SUCCESS_MESSAGE: &str = "Export successful!";

/// エクスポート失敗文言（プロバイダのメッセージがあれば付ける）
pub fn export_failure_message(err: &Error) -> String {
    format!("Export failed. {}", err.provider_message().unwrap_or("Unknown error"))
}

pub fn auth_failure_message(err: &AuthError) -> String {
    format!("Authorization failed: {}", err)
}

/// 選択中の画像
#[derive(Debug, Clone)]
pub struct SelectedDocument {
    pub file_name: String,
    pub image: EncodedImage,
    preview_url: Arc<str>,
}

impl SelectedDocument {
    pub fn new(file_name: impl Into<String>, image: EncodedImage) -> Self {
        let preview_url = Arc::from(image.to_data_url());
        Self {
            file_name: file_name.into(),
            image,
            preview_url,
        }
    }

    pub fn preview_url(&self) -> Arc<str> {
        Arc::clone(&self.preview_url)
    }
}

/// エクスポート結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatus {
    Success { url: String },
    Failure { message: String },
}

/// セッション全体の状態
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub document: Option<SelectedDocument>,
    pub results: Vec<ExtractedRecord>,
    pub busy: bool,
    pub loading: LoadingCycle,
    pub token: Option<AccessToken>,
    pub error: Option<String>,
    pub export_status: Option<ExportStatus>,
}

impl AppState {
    pub fn has_image(&self) -> bool {
        self.document.as_ref().is_some_and(|d| !d.image.is_empty())
    }

    pub fn is_connected(&self) -> bool {
        self.token.is_some()
    }

    pub fn can_extract(&self) -> bool {
        !self.busy && self.has_image()
    }

    pub fn can_export(&self) -> bool {
        !self.busy && !self.results.is_empty() && self.is_connected()
    }

    pub fn can_clear(&self) -> bool {
        !self.busy && !self.results.is_empty()
    }

    pub fn view_model(&self) -> ViewModel {
        ViewModel {
            file_name: self.document.as_ref().map(|d| d.file_name.clone()),
            preview_url: self.document.as_ref().map(SelectedDocument::preview_url),
            busy: self.busy,
            loading_message: self.busy.then(|| self.loading.message()),
            table: render_results(&self.results),
            record_count: self.results.len(),
            error: self.error.clone(),
            export_status: self.export_status.clone(),
            connected: self.is_connected(),
            can_extract: self.can_extract(),
            can_export: self.can_export(),
            can_clear: self.can_clear(),
        }
    }
}

/// 画面に渡すスナップショット
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewModel {
    pub file_name: Option<String>,
    pub preview_url: Option<Arc<str>>,
    pub busy: bool,
    pub loading_message: Option<&'static str>,
    pub table: TableBody,
    pub record_count: usize,
    pub error: Option<String>,
    pub export_status: Option<ExportStatus>,
    pub connected: bool,
    pub can_extract: bool,
    pub can_export: bool,
    pub can_clear: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading::LOADING_MESSAGES;

    fn with_image() -> AppState {
        AppState {
            document: Some(SelectedDocument::new(
                "scan.jpg",
                EncodedImage::from_bytes("image/jpeg", b"jpeg"),
            )),
            ..Default::default()
        }
    }

    #[test]
    fn test_initial_state_disables_everything() {
        let model = AppState::default().view_model();
        assert!(!model.can_extract);
        assert!(!model.can_export);
        assert!(!model.can_clear);
        assert!(model.loading_message.is_none());
        assert!(matches!(model.table, TableBody::Placeholder { .. }));
    }

    #[test]
    fn test_image_enables_extract() {
        let state = with_image();
        assert!(state.can_extract());
        let model = state.view_model();
        assert_eq!(model.file_name.as_deref(), Some("scan.jpg"));
        assert_eq!(model.preview_url.as_deref(), Some("data:image/jpeg;base64,anBlZw=="));
    }

    #[test]
    fn test_empty_payload_is_not_an_image() {
        let state = AppState {
            document: Some(SelectedDocument::new("x.png", EncodedImage::from_bytes("image/png", b""))),
            ..Default::default()
        };
        assert!(!state.can_extract());
    }

    #[test]
    fn test_busy_disables_extract_and_shows_message() {
        let state = AppState { busy: true, ..with_image() };
        assert!(!state.can_extract());
        assert_eq!(state.view_model().loading_message, Some(LOADING_MESSAGES[0]));
    }

    #[test]
    fn test_export_requires_results_and_token() {
        let mut state = AppState {
            results: vec![ExtractedRecord::default()],
            ..Default::default()
        };
        assert!(!state.can_export());
        state.token = Some(AccessToken::new("t"));
        assert!(state.can_export());
        state.busy = true;
        assert!(!state.can_export());
    }

    #[test]
    fn test_export_failure_message() {
        let err = Error::Api { status: 403, message: "Permission denied".into() };
        assert_eq!(export_failure_message(&err), "Export failed. Permission denied");
        assert_eq!(
            export_failure_message(&Error::Network("offline".into())),
            "Export failed. Unknown error"
        );
    }
}
