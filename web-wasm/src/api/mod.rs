//! 外部API（fetch / Google Identity Services）

mod http;
pub mod gemini;
pub mod google_auth;
pub mod sheets;

pub use gemini::FetchGemini;
pub use google_auth::GisTokenService;
pub use sheets::FetchSheets;
