//! Gemini API 呼び出し（fetch）

use super::http::send_json;
use docsheet_common::gemini::{generate_content_url, GeminiRequest, GeminiResponse};
use docsheet_common::{AppConfig, ExtractionService, Result};

pub struct FetchGemini {
    api_key: String,
    model: String,
}

impl FetchGemini {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
        }
    }
}

impl ExtractionService for FetchGemini {
    async fn generate_content(&self, request: &GeminiRequest) -> Result<GeminiResponse> {
        let body = serde_json::to_string(request)?;
        let url = generate_content_url(&self.model, &self.api_key);
        let text = send_json("POST", &url, &body, None).await?;
        Ok(serde_json::from_str(&text)?)
    }
}
