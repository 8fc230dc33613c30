//! 写真グリッドコンポーネント（2列メイソンリー）

use leptos::ev::MouseEvent;
use leptos::prelude::*;
use lumiere_common::{GridLayout, HoverState, Photo};

#[component]
pub fn PhotoGrid<F>(photos: Signal<Vec<Photo>>, on_remove: F) -> impl IntoView
where
    F: Fn(String) + 'static + Clone + Send + Sync,
{
    let hover = RwSignal::new(HoverState::default());

    move || {
        let photos = photos.get();
        match GridLayout::from_photos(&photos) {
            GridLayout::Empty => view! {
                <div class="gallery-empty">
                    <p>"No works in the collection yet."</p>
                    <p class="text-muted">"Upload a photograph to begin."</p>
                </div>
            }
            .into_any(),
            GridLayout::Columns { left, right } => {
                let column = |items: Vec<&Photo>| {
                    items
                        .into_iter()
                        .cloned()
                        .map(|photo| {
                            view! { <PhotoCard photo=photo hover=hover on_remove=on_remove.clone() /> }
                        })
                        .collect_view()
                };
                view! {
                    <div class="photo-grid">
                        <div class="grid-column">{column(left)}</div>
                        <div class="grid-column">{column(right)}</div>
                    </div>
                }
                .into_any()
            }
        }
    }
}

#[component]
fn PhotoCard<F>(photo: Photo, hover: RwSignal<HoverState>, on_remove: F) -> impl IntoView
where
    F: Fn(String) + 'static + Clone + Send + Sync,
{
    let is_hovered = {
        let photo_id = photo.id.clone();
        move || hover.with(|h| h.is_hovered(&photo_id))
    };

    let on_enter = {
        let photo_id = photo.id.clone();
        move |_| hover.update(|h| h.enter(&photo_id))
    };
    let on_leave = move |_| hover.update(|h| h.leave());

    // カード側のクリックへ伝播させない
    let on_remove_click = {
        let photo_id = photo.id.clone();
        move |ev: MouseEvent| {
            ev.stop_propagation();
            on_remove(photo_id.clone());
        }
    };

    let is_hovered_caption = is_hovered.clone();

    view! {
        <figure class="photo-card" on:mouseenter=on_enter on:mouseleave=on_leave>
            <img src=photo.url.clone() alt=photo.title.clone() loading="lazy" />
            <figcaption class=move || caption_class(is_hovered_caption())>
                <h3 class="photo-title">{photo.title.clone()}</h3>
                {photo.description.clone().map(|d| view! { <p class="photo-description">{d}</p> })}
            </figcaption>
            <button
                class="remove-button"
                class:visible=is_hovered
                title="Remove"
                on:click=on_remove_click
            >
                "×"
            </button>
        </figure>
    }
}

fn caption_class(hovered: bool) -> &'static str {
    if hovered {
        "photo-caption"
    } else {
        "photo-caption dimmed"
    }
}
