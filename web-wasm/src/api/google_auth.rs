//! Google Identity Services トークンクライアント
//!
//! initTokenClient に登録したコールバックを PendingToken で要求ごとの応答に変換する。
//! index.html で https://accounts.google.com/gsi/client を読み込んでおくこと。

use docsheet_common::auth::{ClientError, PendingToken, TokenResponse, TokenResult, SHEETS_SCOPE};
use docsheet_common::{AccessToken, AuthError, Prompt, TokenService};
use js_sys::{Object, Reflect};
use log::{info, warn};
use std::cell::OnceCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    type TokenClient;

    #[wasm_bindgen(catch, js_namespace = ["google", "accounts", "oauth2"], js_name = "initTokenClient")]
    fn init_token_client(config: &Object) -> Result<TokenClient, JsValue>;

    #[wasm_bindgen(method, js_name = "requestAccessToken")]
    fn request_access_token(this: &TokenClient, overrides: &Object);
}

struct Client {
    token_client: TokenClient,
    _on_token: Closure<dyn FnMut(JsValue)>,
    _on_error: Closure<dyn FnMut(JsValue)>,
}

pub struct GisTokenService {
    client_id: String,
    pending: Rc<PendingToken>,
    client: OnceCell<Client>,
}

impl GisTokenService {
    pub fn new(client_id: &str) -> Self {
        Self {
            client_id: client_id.to_string(),
            pending: Rc::new(PendingToken::default()),
            client: OnceCell::new(),
        }
    }

    /// 初回のみトークンクライアントを初期化
    fn client(&self) -> Result<&Client, AuthError> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let client = self.init_client()?;
        info!("token client initialized");
        Ok(self.client.get_or_init(|| client))
    }

    fn init_client(&self) -> Result<Client, AuthError> {
        let pending = Rc::clone(&self.pending);
        let on_token = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
            let result = serde_wasm_bindgen::from_value::<TokenResponse>(value)
                .map_err(|e| AuthError::new("invalid_response", Some(e.to_string())))
                .and_then(TokenResponse::into_token);
            resolve(&pending, result);
        });

        let pending = Rc::clone(&self.pending);
        let on_error = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
            let err = serde_wasm_bindgen::from_value::<ClientError>(value)
                .map(AuthError::from)
                .unwrap_or_else(|e| AuthError::new("unknown", Some(e.to_string())));
            resolve(&pending, Err(err));
        });

        let config = Object::new();
        set(&config, "client_id", &JsValue::from_str(&self.client_id))?;
        set(&config, "scope", &JsValue::from_str(SHEETS_SCOPE))?;
        set(&config, "callback", on_token.as_ref())?;
        set(&config, "error_callback", on_error.as_ref())?;

        let token_client = init_token_client(&config)
            .map_err(|e| AuthError::new("init_failed", Some(format!("{:?}", e))))?;

        Ok(Client {
            token_client,
            _on_token: on_token,
            _on_error: on_error,
        })
    }
}

fn resolve(pending: &PendingToken, result: TokenResult) {
    if !pending.resolve(result) {
        warn!("token callback fired without a pending request");
    }
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), AuthError> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(|e| AuthError::new("init_failed", Some(format!("{:?}", e))))
}

impl TokenService for GisTokenService {
    async fn request_token(&self, prompt: Prompt) -> Result<AccessToken, AuthError> {
        let client = self.client()?;

        let (waiter, superseded) = self.pending.begin();
        if superseded {
            warn!("superseding a pending token request");
        }

        let overrides = Object::new();
        set(&overrides, "prompt", &JsValue::from_str(prompt.as_str()))?;
        client.token_client.request_access_token(&overrides);

        waiter.wait().await
    }
}
