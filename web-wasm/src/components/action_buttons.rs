//! 操作ボタンコンポーネント

use docsheet_common::ViewModel;
use leptos::prelude::*;

#[component]
pub fn ActionButtons<FE, FC, FX, FL>(
    view_model: ReadSignal<ViewModel>,
    on_extract: FE,
    on_connect: FC,
    on_export: FX,
    on_clear: FL,
) -> impl IntoView
where
    FE: Fn(()) + 'static + Clone,
    FC: Fn(()) + 'static + Clone,
    FX: Fn(()) + 'static + Clone,
    FL: Fn(()) + 'static + Clone,
{
    let busy = move || view_model.with(|m| m.busy);
    let connected = move || view_model.with(|m| m.connected);

    view! {
        <div class="action-buttons">
            <button
                class="btn btn-primary"
                disabled=move || !view_model.with(|m| m.can_extract)
                on:click={
                    let on_extract = on_extract.clone();
                    move |_| on_extract(())
                }
            >
                {move || if busy() { "Working..." } else { "Extract data" }}
            </button>

            <button
                class="btn btn-secondary"
                on:click={
                    let on_connect = on_connect.clone();
                    move |_| on_connect(())
                }
            >
                {move || if connected() { "Reconnect Google Sheets" } else { "Connect Google Sheets" }}
            </button>

            <button
                class="btn btn-secondary"
                disabled=move || !view_model.with(|m| m.can_export)
                on:click={
                    let on_export = on_export.clone();
                    move |_| on_export(())
                }
            >
                "Export to Google Sheets"
            </button>

            <button
                class="btn btn-tertiary"
                disabled=move || !view_model.with(|m| m.can_clear)
                on:click={
                    let on_clear = on_clear.clone();
                    move |_| on_clear(())
                }
            >
                "Clear"
            </button>

            <span class="connection-status" class:connected=connected>
                {move || if connected() { "Google Sheets connected" } else { "Not connected" }}
            </span>
        </div>
    }
}
