//! fetch による JSON 送受信

use docsheet_common::{Error, Result};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// JSONボディを送り、レスポンス本文を返す
///
/// 非2xxは `Error::Api`（Google形式のエラーボディからメッセージを取り出す）。
pub async fn send_json(
    method: &str,
    url: &str,
    body: &str,
    authorization: Option<&str>,
) -> Result<String> {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
    let headers = request.headers();
    headers.set("Content-Type", "application/json").map_err(js_error)?;
    if let Some(value) = authorization {
        headers.set("Authorization", value).map_err(js_error)?;
    }

    let window = web_sys::window().ok_or_else(|| Error::Network("window is not available".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    let resp: Response = resp_value.dyn_into().map_err(js_error)?;

    let text = JsFuture::from(resp.text().map_err(js_error)?)
        .await
        .map_err(js_error)?
        .as_string()
        .unwrap_or_default();

    if !resp.ok() {
        return Err(Error::from_response(resp.status(), &text));
    }
    Ok(text)
}

fn js_error(value: JsValue) -> Error {
    Error::Network(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}
