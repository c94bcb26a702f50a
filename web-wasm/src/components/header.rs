//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Booking Register Extractor"</h1>
            <p class="text-muted">
                "Photograph a booking register, extract its rows with AI, export them to Google Sheets"
            </p>
        </header>
    }
}
