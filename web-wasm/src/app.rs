//! メインアプリケーションコンポーネント
//!
//! ルート状態は `RwSignal<AppState>` 1つだけ。子コンポーネントは
//! コールバック経由で `Dispatcher` にコマンドを送る。

use crate::components::{
    about::About,
    navigation::Navigation,
    photo_grid::PhotoGrid,
    toast_stack::ToastStack,
    upload::Upload,
};
use crate::storage::LocalStorageStore;
use gloo::timers::callback::Timeout;
use leptos::logging::{error, warn};
use leptos::prelude::*;
use lumiere_common::{
    AppState, Command, Effect, Notice, Photo, PortfolioStore, ProfileField, Toast, UserProfile,
    ViewState, REMOVE_CONFIRMATION_PROMPT,
};

/// 現在時刻（UNIXミリ秒）
pub fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}

/// 保存済みの状態を読み込む（未保存ならサンプル）
fn load_state() -> lumiere_common::Result<AppState> {
    let store = PortfolioStore::new(LocalStorageStore);
    let photos = store.load_photos(now_ms())?;
    let profile = store.load_profile()?;
    Ok(AppState::new(photos, profile))
}

/// コマンドの適用と副作用の実行
#[derive(Clone, Copy)]
pub struct Dispatcher {
    state: RwSignal<AppState>,
}

impl Dispatcher {
    pub fn new(state: RwSignal<AppState>) -> Self {
        Self { state }
    }

    pub fn send(self, command: Command) {
        let effects = self
            .state
            .try_update(|s| s.apply(command, now_ms()))
            .unwrap_or_default();
        for effect in effects {
            self.run(effect);
        }
    }

    pub fn toast(self, notice: Notice) {
        self.send(Command::AddToast(notice));
    }

    fn run(self, effect: Effect) {
        let store = PortfolioStore::new(LocalStorageStore);
        // 保存失敗はコンソールに出すだけ（メモリ上の状態が正）
        match effect {
            Effect::PersistPhotos => {
                if let Some(Err(e)) = self.state.try_with_untracked(|s| store.save_photos(&s.photos)) {
                    warn!("failed to persist photos: {}", e);
                }
            }
            Effect::PersistProfile => {
                if let Some(Err(e)) = self.state.try_with_untracked(|s| store.save_profile(&s.profile)) {
                    warn!("failed to persist profile: {}", e);
                }
            }
            Effect::ScheduleToastExpiry { id, after } => {
                let millis = u32::try_from(after.as_millis()).unwrap_or(u32::MAX);
                Timeout::new(millis, move || self.send(Command::ExpireToast(id))).forget();
            }
        }
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    match load_state() {
        Ok(state) => view! { <Portfolio initial=state /> }.into_any(),
        Err(e) => {
            error!("failed to load saved portfolio: {}", e);
            view! {
                <div class="load-error">
                    <h1>"Lumière"</h1>
                    <p>"Saved portfolio data could not be read."</p>
                    <p class="text-muted">{e.to_string()}</p>
                </div>
            }
            .into_any()
        }
    }
}

#[component]
fn Portfolio(initial: AppState) -> impl IntoView {
    let state = RwSignal::new(initial);
    let dispatcher = Dispatcher::new(state);
    let ai_enabled = crate::api::gemini::ai_enabled();

    // 通知の増減で写真グリッドが再描画されないよう分けておく
    let view_state: Signal<ViewState> = Memo::new(move |_| state.with(|s| s.view)).into();
    let photos: Signal<Vec<Photo>> = Memo::new(move |_| state.with(|s| s.photos.clone())).into();
    let profile: Signal<UserProfile> = Memo::new(move |_| state.with(|s| s.profile.clone())).into();
    let toasts: Signal<Vec<Toast>> = Memo::new(move |_| state.with(|s| s.toasts.clone())).into();

    let on_navigate = move |view: ViewState| dispatcher.send(Command::SetView(view));

    // 確認ダイアログはここで同期的に出す
    let on_remove = move |id: String| {
        let confirmed = gloo::dialogs::confirm(REMOVE_CONFIRMATION_PROMPT);
        dispatcher.send(Command::RemovePhoto { id, confirmed });
    };

    let on_update_profile = move |field: ProfileField| dispatcher.send(Command::UpdateProfile(field));
    let on_upload = move |photo: Photo| dispatcher.send(Command::Upload(photo));
    let on_cancel = move || dispatcher.send(Command::SetView(ViewState::Gallery));
    let on_toast = move |notice: Notice| dispatcher.toast(notice);

    view! {
        <div class="app">
            <Navigation view=view_state on_navigate=on_navigate />

            <main class="main">
                {move || match view_state.get() {
                    ViewState::Gallery => view! {
                        <PhotoGrid photos=photos on_remove=on_remove />
                    }.into_any(),
                    ViewState::Profile => view! {
                        <About
                            profile=profile
                            ai_enabled=ai_enabled
                            on_update=on_update_profile
                            on_toast=on_toast
                        />
                    }.into_any(),
                    ViewState::Upload => view! {
                        <Upload
                            ai_enabled=ai_enabled
                            on_upload=on_upload
                            on_cancel=on_cancel
                            on_toast=on_toast
                        />
                    }.into_any(),
                }}
            </main>

            <footer class="footer">
                <p>{move || footer_text(current_year(), &profile.get().name)}</p>
            </footer>

            <ToastStack toasts=toasts />
        </div>
    }
}

fn current_year() -> u32 {
    js_sys::Date::new_0().get_full_year()
}

fn footer_text(year: u32, name: &str) -> String {
    format!("© {} {}. All rights reserved.", year, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footer_text() {
        assert_eq!(
            footer_text(2026, "Alexandre Voss"),
            "© 2026 Alexandre Voss. All rights reserved."
        );
    }
}
