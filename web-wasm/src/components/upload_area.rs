//! アップロードエリアコンポーネント
//!
//! クリックで選択、またはドラッグ&ドロップ。ドロップ時は先頭の1ファイルだけを使い、種類は確認しない。

use docsheet_common::{EncodedImage, ViewModel};
use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, Event, File, FileReader, HtmlInputElement};

#[component]
pub fn UploadArea<F>(view_model: ReadSignal<ViewModel>, on_image_selected: F) -> impl IntoView
where
    F: Fn(String, EncodedImage) + 'static + Clone,
{
    let (is_dragover, set_is_dragover) = signal(false);
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let on_drop = {
        let on_image_selected = on_image_selected.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            let first = ev
                .data_transfer()
                .and_then(|dt| dt.files())
                .and_then(|files| files.get(0));
            if let Some(file) = first {
                read_file(file, on_image_selected.clone());
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_click = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let on_change = {
        let on_image_selected = on_image_selected.clone();
        move |ev: Event| {
            let first = ev
                .target()
                .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
                .and_then(|input| take_first_file(&input));
            if let Some(file) = first {
                read_file(file, on_image_selected.clone());
            }
        }
    };

    view! {
        <div
            class=move || {
                if is_dragover.get() { "upload-area dragover" } else { "upload-area" }
            }
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:click=on_click
        >
            <input
                type="file"
                accept="image/*"
                class="hidden-input"
                node_ref=input_ref
                on:change=on_change
                on:click=|ev| ev.stop_propagation()
            />
            <Show
                when=move || view_model.with(|m| m.preview_url.is_some())
                fallback=|| view! {
                    <div class="upload-icon">"📄"</div>
                    <p>"Drag & drop a document image, or click to choose one"</p>
                    <p class="text-muted">"JPEG, PNG or WebP"</p>
                }
            >
                <img
                    class="preview"
                    alt="Document preview"
                    src=move || view_model.with(|m| m.preview_url.as_deref().unwrap_or_default().to_string())
                />
                <p class="file-name">
                    {move || view_model.with(|m| m.file_name.clone().unwrap_or_default())}
                </p>
            </Show>
        </div>
    }
}

/// 先頭のファイルを取り出して入力を空に戻す（同じファイルを選び直しても change が発火する）
fn take_first_file(input: &HtmlInputElement) -> Option<File> {
    let file = input.files().and_then(|files| files.get(0));
    input.set_value("");
    file
}

fn read_file<F>(file: File, on_image_selected: F)
where
    F: Fn(String, EncodedImage) + 'static,
{
    let file_name = file.name();
    let Ok(reader) = FileReader::new() else {
        return;
    };

    let reader_clone = reader.clone();
    let closure = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        let Some(data_url) = reader_clone.result().ok().and_then(|r| r.as_string()) else {
            return;
        };
        match EncodedImage::from_data_url(&data_url) {
            Ok(image) => on_image_selected(file_name.clone(), image),
            Err(e) => warn!("ignoring {}: {}", file_name, e),
        }
    }) as Box<dyn FnMut(_)>);

    reader.set_onload(Some(closure.as_ref().unchecked_ref()));
    closure.forget();

    let _ = reader.read_as_data_url(&file);
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;
    use web_sys::DataTransfer;

    wasm_bindgen_test_configure!(run_in_browser);

    fn file_input() -> HtmlInputElement {
        let input = web_sys::window()
            .and_then(|w| w.document())
            .unwrap()
            .create_element("input")
            .unwrap()
            .dyn_into::<HtmlInputElement>()
            .unwrap();
        input.set_type("file");
        input
    }

    #[wasm_bindgen_test]
    fn take_first_file_resets_input() {
        let input = file_input();
        let parts = js_sys::Array::of1(&JsValue::from_str("jpeg"));
        let transfer = DataTransfer::new().unwrap();
        for name in ["a.jpg", "b.jpg"] {
            let file = File::new_with_str_sequence(&parts, name).unwrap();
            transfer.items().add_with_file(&file).unwrap();
        }
        input.set_files(transfer.files().as_ref());

        let file = take_first_file(&input).unwrap();

        assert_eq!(file.name(), "a.jpg");
        assert_eq!(input.value(), "");
        assert_eq!(input.files().map(|f| f.length()), Some(0));
    }

    #[wasm_bindgen_test]
    fn take_first_file_without_selection() {
        let input = file_input();
        assert!(take_first_file(&input).is_none());
    }
}
