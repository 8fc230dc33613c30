//! アップロードコンポーネント
//!
//! ファイル選択 → Data URIプレビュー → （任意でAIキャプション）→ 公開。
//! フォームの状態はこの画面のローカル状態で、画面を離れると破棄される。

use crate::app::now_ms;
use gloo::timers::callback::Timeout;
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;
use lumiere_common::{ImageCaption, Notice, Photo, UploadFlow, UploadPhase, PUBLISH_DELAY};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{File, FileReader, HtmlInputElement};

/// 画面の表示段階
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Picker,
    Loading,
    Form,
}

impl From<UploadPhase> for Screen {
    fn from(phase: UploadPhase) -> Self {
        match phase {
            UploadPhase::Empty => Screen::Picker,
            UploadPhase::Loading => Screen::Loading,
            UploadPhase::Ready | UploadPhase::Analyzing | UploadPhase::Publishing => Screen::Form,
        }
    }
}

#[component]
pub fn Upload<FU, FC, FT>(
    ai_enabled: bool,
    on_upload: FU,
    on_cancel: FC,
    on_toast: FT,
) -> impl IntoView
where
    FU: Fn(Photo) + 'static + Clone + Send + Sync,
    FC: Fn() + 'static + Clone + Send + Sync,
    FT: Fn(Notice) + 'static + Clone + Send + Sync,
{
    let flow = RwSignal::new(UploadFlow::default());
    let screen = Memo::new(move |_| flow.with(|f| Screen::from(f.phase())));
    let analyzing = Signal::derive(move || flow.with(|f| f.analyzing));
    let publishing = Signal::derive(move || flow.with(|f| f.publishing));

    let on_file_change = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        let file_name = file.name();
        flow.update(|f| f.select_file(file_name.clone()));
        read_data_url(file, move |result| {
            flow.try_update(|f| apply_loaded(f, &file_name, result));
        });
    };

    let on_analyze = {
        let on_toast = on_toast.clone();
        move || {
            let Some(preview) = flow.try_update(|f| f.begin_analysis()).flatten() else {
                return;
            };
            let on_toast = on_toast.clone();
            spawn_local(async move {
                let caption = crate::api::gemini::client()
                    .generate_image_caption(&preview)
                    .await;
                if caption == ImageCaption::unavailable() {
                    warn!("gemini vision fell back to generic caption");
                }
                if let Some(notice) = flow.try_update(|f| f.finish_analysis(Ok(caption))) {
                    on_toast(notice);
                }
            });
        }
    };

    let on_publish = move |_| match flow.try_update(|f| f.begin_publish()) {
        Some(Err(notice)) => on_toast(notice),
        Some(Ok(())) => {
            let on_upload = on_upload.clone();
            let millis = PUBLISH_DELAY.as_millis() as u32;
            Timeout::new(millis, move || {
                // 画面を離れていたら公開は取り消し
                if let Some(photo) = flow.try_update(|f| f.finish_publish(now_ms(), None)) {
                    on_upload(photo);
                }
            })
            .forget();
        }
        None => {}
    };

    view! {
        <section class="upload">
            <h2 class="section-title">"Add to the collection"</h2>

            {move || match screen.get() {
                Screen::Picker => view! {
                    <label class="upload-area">
                        <input type="file" accept="image/*" class="file-input" on:change=on_file_change />
                        <div class="upload-icon">"📷"</div>
                        <p>"Select a photograph"</p>
                        <p class="text-muted">"JPEG, PNG, WebP"</p>
                    </label>
                }
                .into_any(),
                Screen::Loading => view! {
                    <div class="upload-area loading">
                        <p>"Preparing preview..."</p>
                    </div>
                }
                .into_any(),
                Screen::Form => {
                    let on_analyze = on_analyze.clone();
                    view! {
                        <div class="upload-form">
                            <div class="preview">
                                <img src=move || flow.with(|f| f.preview.clone().unwrap_or_default()) alt="Preview" />
                                <button
                                    class="btn btn-link"
                                    disabled=move || publishing.get()
                                    on:click=move |_| flow.update(|f| f.change())
                                >
                                    "Change"
                                </button>
                            </div>

                            <Show when=move || flow.with(|f| f.can_analyze(ai_enabled))>
                                {
                                    let on_analyze = on_analyze.clone();
                                    view! {
                                        <button
                                            class="btn btn-ai"
                                            disabled=move || analyzing.get()
                                            on:click=move |_| on_analyze()
                                        >
                                            {move || if analyzing.get() { "Analyzing..." } else { "Generate with AI" }}
                                        </button>
                                    }
                                }
                            </Show>

                            <label class="field">
                                <span class="field-label">"Title"</span>
                                <input
                                    type="text"
                                    prop:value=move || flow.with(|f| f.title.clone())
                                    on:input=move |ev| flow.update(|f| f.set_title(event_target_value(&ev)))
                                />
                            </label>
                            <label class="field">
                                <span class="field-label">"Description"</span>
                                <textarea
                                    rows="4"
                                    prop:value=move || flow.with(|f| f.description.clone())
                                    on:input=move |ev| flow.update(|f| f.set_description(event_target_value(&ev)))
                                />
                            </label>
                        </div>
                    }
                    .into_any()
                }
            }}

            <div class="upload-actions">
                <button class="btn btn-secondary" on:click=move |_| on_cancel()>"Cancel"</button>
                <button class="btn btn-primary" disabled=move || publishing.get() on:click=on_publish>
                    {move || if publishing.get() { "Publishing..." } else { "Confirm" }}
                </button>
            </div>
        </section>
    }
}

/// 読み込み結果をフォームへ反映する。失敗ならファイル選択からやり直し
fn apply_loaded(flow: &mut UploadFlow, file_name: &str, result: Option<String>) {
    // 読み込み中に「Change」された場合は無視
    if flow.file_name.as_deref() != Some(file_name) || flow.preview.is_some() {
        return;
    }
    match result {
        Some(data_url) => flow.preview_ready(data_url),
        None => flow.change(),
    }
}

/// FileReaderでData URIへ変換する。失敗時はNone
fn read_data_url<F>(file: File, on_loaded: F)
where
    F: Fn(Option<String>) + 'static,
{
    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(e) => {
            warn!("FileReader unavailable: {:?}", e);
            on_loaded(None);
            return;
        }
    };

    let on_loaded = Rc::new(on_loaded);
    let reader_clone = reader.clone();
    let on_event = Rc::clone(&on_loaded);
    let closure = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        let data_url = reader_clone.result().ok().and_then(|r| r.as_string());
        (*on_event)(data_url);
    }) as Box<dyn FnMut(_)>);

    reader.set_onload(Some(closure.as_ref().unchecked_ref()));
    reader.set_onerror(Some(closure.as_ref().unchecked_ref()));
    closure.forget();

    // 読み込みを開始できなければイベントは来ないので、ここでフォームを戻す
    if let Err(e) = reader.read_as_data_url(&file) {
        warn!("failed to read {}: {:?}", file.name(), e);
        (*on_loaded)(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_from_phase() {
        assert_eq!(Screen::from(UploadPhase::Empty), Screen::Picker);
        assert_eq!(Screen::from(UploadPhase::Loading), Screen::Loading);
        assert_eq!(Screen::from(UploadPhase::Ready), Screen::Form);
        assert_eq!(Screen::from(UploadPhase::Analyzing), Screen::Form);
        assert_eq!(Screen::from(UploadPhase::Publishing), Screen::Form);
    }

    #[test]
    fn test_apply_loaded_sets_preview() {
        let mut flow = UploadFlow::default();
        flow.select_file("a.jpg");
        apply_loaded(&mut flow, "a.jpg", Some("data:image/jpeg;base64,AAAA".into()));
        assert_eq!(flow.phase(), UploadPhase::Ready);
    }

    #[test]
    fn test_apply_loaded_failure_returns_to_picker() {
        let mut flow = UploadFlow::default();
        flow.select_file("a.jpg");
        assert_eq!(Screen::from(flow.phase()), Screen::Loading);

        apply_loaded(&mut flow, "a.jpg", None);
        assert_eq!(flow.phase(), UploadPhase::Empty);
        assert_eq!(Screen::from(flow.phase()), Screen::Picker);
    }

    #[test]
    fn test_apply_loaded_ignores_stale_file() {
        let mut flow = UploadFlow::default();
        flow.select_file("a.jpg");
        flow.change();
        flow.select_file("b.jpg");

        apply_loaded(&mut flow, "a.jpg", Some("data:image/jpeg;base64,AAAA".into()));
        assert_eq!(flow.phase(), UploadPhase::Loading);
        assert_eq!(flow.preview, None);
    }
}
