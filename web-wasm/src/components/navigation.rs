//! ナビゲーションコンポーネント

use leptos::prelude::*;
use lumiere_common::ViewState;

#[component]
pub fn Navigation<F>(view: Signal<ViewState>, on_navigate: F) -> impl IntoView
where
    F: Fn(ViewState) + 'static + Clone + Send,
{
    let on_brand = {
        let on_navigate = on_navigate.clone();
        move |_| on_navigate(ViewState::Gallery)
    };

    view! {
        <nav class="navigation">
            <button class="brand" on:click=on_brand>"Lumière"</button>
            <div class="nav-links">
                {ViewState::ALL
                    .into_iter()
                    .map(|target| {
                        let on_navigate = on_navigate.clone();
                        view! {
                            <button
                                class=move || nav_link_class(view.get() == target)
                                on:click=move |_| on_navigate(target)
                            >
                                {target.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </nav>
    }
}

fn nav_link_class(active: bool) -> &'static str {
    if active {
        "nav-link active"
    } else {
        "nav-link"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_link_class() {
        assert_eq!(nav_link_class(true), "nav-link active");
        assert_eq!(nav_link_class(false), "nav-link");
    }
}
