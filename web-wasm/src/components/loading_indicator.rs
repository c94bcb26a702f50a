//! 処理中インジケータ

use docsheet_common::ViewModel;
use leptos::prelude::*;

#[component]
pub fn LoadingIndicator(view_model: ReadSignal<ViewModel>) -> impl IntoView {
    view! {
        <Show when=move || view_model.with(|m| m.busy)>
            <div class="loading" role="status">
                <div class="spinner"></div>
                <p class="loading-text">
                    {move || view_model.with(|m| m.loading_message.unwrap_or_default())}
                </p>
            </div>
        </Show>
    }
}
