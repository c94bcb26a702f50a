//! メインアプリケーションコンポーネント

use crate::api::{FetchGemini, FetchSheets, GisTokenService};
use crate::components::{
    action_buttons::ActionButtons,
    banners::{ErrorBanner, ExportBanner},
    header::Header,
    loading_indicator::LoadingIndicator,
    results_table::ResultsTable,
    upload_area::UploadArea,
};
use crate::platform::{AppController, IntervalTicker, SignalView};
use docsheet_common::{AppConfig, EncodedImage, ViewModel};
use leptos::prelude::*;
use log::{error, info};
use wasm_bindgen_futures::spawn_local;

/// メインアプリケーションコンポーネント
///
/// 秘密情報はビルド時の環境変数から埋め込む。欠けていれば画面にエラーだけ出す。
#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_values(
        option_env!("GEMINI_API_KEY"),
        option_env!("GOOGLE_CLIENT_ID"),
        option_env!("GEMINI_MODEL"),
    );

    view! {
        <div class="container">
            <Header />
            {match config {
                Ok(config) => {
                    info!("using model {}", config.gemini_model);
                    view! { <Workspace config=config /> }.into_any()
                }
                Err(e) => {
                    error!("configuration error: {}", e);
                    view! {
                        <div class="banner banner-error" role="alert">{e.to_string()}</div>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}

#[component]
fn Workspace(config: AppConfig) -> impl IntoView {
    let (view_model, set_view_model) = signal(ViewModel::default());

    let controller = StoredValue::new_local(AppController::new(
        FetchGemini::new(&config),
        FetchSheets,
        GisTokenService::new(&config.google_client_id),
        IntervalTicker,
        SignalView(set_view_model),
    ));

    let on_image_selected = move |file_name: String, image: EncodedImage| {
        controller.with_value(|c| c.select_image(file_name, image));
    };

    let on_extract = move |_: ()| {
        let controller = controller.get_value();
        spawn_local(async move { controller.extract().await });
    };

    let on_connect = move |_: ()| {
        let controller = controller.get_value();
        spawn_local(async move { controller.connect().await });
    };

    let on_export = move |_: ()| {
        let controller = controller.get_value();
        spawn_local(async move { controller.export().await });
    };

    let on_clear = move |_: ()| controller.with_value(|c| c.clear_results());
    let on_dismiss_error = move |_: ()| controller.with_value(|c| c.dismiss_error());
    let on_dismiss_export = move |_: ()| controller.with_value(|c| c.dismiss_export_status());

    view! {
        <ErrorBanner view_model=view_model on_dismiss=on_dismiss_error />

        <UploadArea view_model=view_model on_image_selected=on_image_selected />

        <ActionButtons
            view_model=view_model
            on_extract=on_extract
            on_connect=on_connect
            on_export=on_export
            on_clear=on_clear
        />

        <LoadingIndicator view_model=view_model />

        <ExportBanner view_model=view_model on_dismiss=on_dismiss_export />

        <ResultsTable view_model=view_model />
    }
}
