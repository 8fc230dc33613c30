//! About（プロフィール）コンポーネント
//!
//! 入力は1文字ごとに `ProfileField` としてルートへ送る。
//! 編集モードと推敲中フラグはこの画面だけのローカル状態。

use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;
use lumiere_common::{contact_links, Notice, ProfileEditor, ProfileField, UserProfile, DEFAULT_BIO_TONE};

#[component]
pub fn About<FU, FT>(
    profile: Signal<UserProfile>,
    ai_enabled: bool,
    on_update: FU,
    on_toast: FT,
) -> impl IntoView
where
    FU: Fn(ProfileField) + 'static + Clone + Send + Sync,
    FT: Fn(Notice) + 'static + Clone + Send + Sync,
{
    let editor = RwSignal::new(ProfileEditor::default());
    let is_editing = Memo::new(move |_| editor.with(|e| e.is_editing()));
    let polishing = Signal::derive(move || editor.with(|e| e.polishing));

    let on_polish = {
        let on_update = on_update.clone();
        move || {
            let current = profile.get_untracked();
            let Some(bio) = editor.try_update(|e| e.begin_polish(&current)).flatten() else {
                return;
            };
            let on_update = on_update.clone();
            let on_toast = on_toast.clone();
            spawn_local(async move {
                let result = crate::api::gemini::client()
                    .generate_bio(&bio, DEFAULT_BIO_TONE)
                    .await;
                if let Err(e) = &result {
                    warn!("gemini bio error: {}", e);
                }
                // 画面を離れていたら結果は捨てる
                if let Some(outcome) = editor.try_update(|e| e.finish_polish(result)) {
                    if let Some(field) = outcome.update {
                        on_update(field);
                    }
                    on_toast(outcome.notice);
                }
            });
        }
    };

    view! {
        <section class="about">
            {move || {
                if is_editing.get() {
                    view! {
                        <ProfileForm
                            profile=profile
                            ai_enabled=ai_enabled
                            polishing=polishing
                            on_update=on_update.clone()
                            on_polish=on_polish.clone()
                            on_save=move || editor.update(|e| e.save())
                        />
                    }
                    .into_any()
                } else {
                    view! {
                        <ProfileCard profile=profile on_edit=move || editor.update(|e| e.begin_edit()) />
                    }
                    .into_any()
                }
            }}
        </section>
    }
}

#[component]
fn ProfileCard<F>(profile: Signal<UserProfile>, on_edit: F) -> impl IntoView
where
    F: Fn() + 'static + Clone + Send + Sync,
{
    move || {
        let p = profile.get();
        let on_edit = on_edit.clone();
        view! {
            <div class="profile-card">
                {p.avatar_url.clone().map(|url| view! { <img class="avatar" src=url alt=p.name.clone() /> })}
                <h1 class="profile-name">{p.name.clone()}</h1>
                <p class="profile-title">{p.title.clone()}</p>
                <div class="profile-bio">
                    {bio_paragraphs(&p.bio).into_iter().map(|line| view! { <p>{line.to_string()}</p> }).collect_view()}
                </div>
                <ul class="contact-links">
                    {contact_links(&p)
                        .into_iter()
                        .map(|link| view! {
                            <li><a href=link.href target="_blank" rel="noopener noreferrer">{link.label}</a></li>
                        })
                        .collect_view()}
                </ul>
                <button class="btn btn-secondary" on:click=move |_| on_edit()>"Edit Profile"</button>
            </div>
        }
    }
}

#[component]
fn ProfileForm<FU, FP, FS>(
    profile: Signal<UserProfile>,
    ai_enabled: bool,
    polishing: Signal<bool>,
    on_update: FU,
    on_polish: FP,
    on_save: FS,
) -> impl IntoView
where
    FU: Fn(ProfileField) + 'static + Clone + Send + Sync,
    FP: Fn() + 'static + Clone + Send + Sync,
    FS: Fn() + 'static + Clone + Send + Sync,
{
    let field = |label: &'static str,
                 read: fn(&UserProfile) -> String,
                 make: fn(String) -> ProfileField| {
        let on_update = on_update.clone();
        view! {
            <label class="field">
                <span class="field-label">{label}</span>
                <input
                    type="text"
                    prop:value=move || profile.with(read)
                    on:input=move |ev| on_update(make(event_target_value(&ev)))
                />
            </label>
        }
    };

    let on_bio_input = {
        let on_update = on_update.clone();
        move |ev| on_update(ProfileField::Bio(event_target_value(&ev)))
    };

    view! {
        <div class="profile-form">
            {field("Name", |p| p.name.clone(), ProfileField::Name)}
            {field("Title", |p| p.title.clone(), ProfileField::Title)}
            <label class="field">
                <span class="field-label">"Bio"</span>
                <textarea rows="6" prop:value=move || profile.with(|p| p.bio.clone()) on:input=on_bio_input />
            </label>
            <Show when=move || ai_enabled>
                {
                    let on_polish = on_polish.clone();
                    view! {
                        <button
                            class="btn btn-ai"
                            disabled=move || polishing.get()
                            on:click=move |_| on_polish()
                        >
                            {move || if polishing.get() { "Polishing..." } else { "Polish with AI" }}
                        </button>
                    }
                }
            </Show>
            {field("Avatar URL", |p| p.avatar_url.clone().unwrap_or_default(), ProfileField::AvatarUrl)}
            {field("Email", |p| p.email.clone().unwrap_or_default(), ProfileField::Email)}
            {field("Instagram", |p| p.instagram.clone().unwrap_or_default(), ProfileField::Instagram)}
            <button class="btn btn-primary" on:click=move |_| on_save()>"Save"</button>
        </div>
    }
}

/// 空行を除いて段落に分ける
fn bio_paragraphs(bio: &str) -> Vec<&str> {
    bio.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
}
