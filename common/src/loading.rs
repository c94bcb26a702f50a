//! 処理中メッセージの巡回

use std::time::Duration;

/// メッセージ切り替え間隔
pub const LOADING_INTERVAL: Duration = Duration::from_millis(2500);

pub const LOADING_MESSAGES: [&str; 5] = [
    "Uploading document...",
    "Analyzing document layout...",
    "Reading table rows...",
    "Extracting booking details...",
    "Almost there...",
];

/// 現在表示中のメッセージ位置
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingCycle {
    index: usize,
}

impl LoadingCycle {
    pub fn message(&self) -> &'static str {
        LOADING_MESSAGES[self.index]
    }

    /// 次へ（末尾の次は先頭）
    pub fn advance(&mut self) {
        self.index = (self.index + 1) % LOADING_MESSAGES.len();
    }
}
