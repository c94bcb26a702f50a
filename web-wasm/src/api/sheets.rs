//! Google Sheets API 呼び出し（fetch）

use super::http::send_json;
use docsheet_common::sheets::{
    values_update_url, CreateSpreadsheetRequest, Spreadsheet, ValueInputOption, ValueRange,
    SHEETS_API_URL,
};
use docsheet_common::{AccessToken, Result, SpreadsheetService};

pub struct FetchSheets;

impl SpreadsheetService for FetchSheets {
    async fn create_spreadsheet(
        &self,
        token: &AccessToken,
        request: &CreateSpreadsheetRequest,
    ) -> Result<Spreadsheet> {
        let body = serde_json::to_string(request)?;
        let text = send_json("POST", SHEETS_API_URL, &body, Some(&token.bearer())).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn update_values(
        &self,
        token: &AccessToken,
        spreadsheet_id: &str,
        option: ValueInputOption,
        body: &ValueRange,
    ) -> Result<()> {
        let url = values_update_url(spreadsheet_id, &body.range, option);
        let body = serde_json::to_string(body)?;
        send_json("PUT", &url, &body, Some(&token.bearer())).await?;
        Ok(())
    }
}
