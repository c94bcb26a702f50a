//! 結果テーブルコンポーネント

use docsheet_common::{header_row, TableBody, ViewModel};
use leptos::prelude::*;

#[component]
pub fn ResultsTable(view_model: ReadSignal<ViewModel>) -> impl IntoView {
    let headers = header_row();

    view! {
        <section class="results">
            <h2>
                "Extracted records"
                {move || match view_model.with(|m| m.record_count) {
                    0 => String::new(),
                    n => format!(" ({})", n),
                }}
            </h2>
            <div class="table-wrapper">
                <table class="results-table">
                    <thead>
                        <tr>
                            {headers.into_iter().map(|h| view! { <th>{h}</th> }).collect_view()}
                        </tr>
                    </thead>
                    <tbody>
                        {move || body_rows(view_model.with(|m| m.table.clone()))}
                    </tbody>
                </table>
            </div>
        </section>
    }
}

fn body_rows(body: TableBody) -> AnyView {
    match body {
        TableBody::Placeholder { colspan, message } => view! {
            <tr>
                <td class="placeholder" colspan=colspan.to_string()>{message}</td>
            </tr>
        }
        .into_any(),
        TableBody::Rows(rows) => rows
            .into_iter()
            .map(|row| {
                view! {
                    <tr>
                        {row.into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}
                    </tr>
                }
            })
            .collect_view()
            .into_any(),
    }
}
