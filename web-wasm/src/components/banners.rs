//! エラー／エクスポート結果バナー（閉じられる）

use docsheet_common::state::EXPORT_SUCCESS_MESSAGE;
use docsheet_common::{ExportStatus, ViewModel};
use leptos::prelude::*;

#[component]
pub fn ErrorBanner<F>(view_model: ReadSignal<ViewModel>, on_dismiss: F) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        {move || {
            view_model.with(|m| m.error.clone()).map(|message| {
                let on_dismiss = on_dismiss.clone();
                view! {
                    <div class="banner banner-error" role="alert">
                        <span>{message}</span>
                        <button class="banner-close" on:click=move |_| on_dismiss(())>"×"</button>
                    </div>
                }
            })
        }}
    }
}

#[component]
pub fn ExportBanner<F>(view_model: ReadSignal<ViewModel>, on_dismiss: F) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        {move || {
            view_model.with(|m| m.export_status.clone()).map(|status| {
                let on_dismiss = on_dismiss.clone();
                let (class, body) = match status {
                    ExportStatus::Success { url } => (
                        "banner banner-success",
                        view! {
                            <span>
                                {EXPORT_SUCCESS_MESSAGE} " "
                                <a href=url target="_blank" rel="noopener noreferrer">"Open spreadsheet"</a>
                            </span>
                        }
                        .into_any(),
                    ),
                    ExportStatus::Failure { message } => (
                        "banner banner-error",
                        view! { <span>{message}</span> }.into_any(),
                    ),
                };
                view! {
                    <div class=class role="status">
                        {body}
                        <button class="banner-close" on:click=move |_| on_dismiss(())>"×"</button>
                    </div>
                }
            })
        }}
    }
}
